//! Shared fixtures for unit tests.

use warren_core::{Capabilities, EntityId, Env, GridMap, OccupancySnapshot, Position};

use crate::context::{DecisionContext, TacticalView};

pub(crate) fn open_scene() -> (GridMap, OccupancySnapshot) {
    (GridMap::open(10, 10), OccupancySnapshot::new())
}

pub(crate) fn test_context<'a>(
    map: &'a GridMap,
    occupancy: &'a OccupancySnapshot,
) -> DecisionContext<'a> {
    DecisionContext::new(
        EntityId(1),
        Position::new(1, 1),
        Capabilities::default(),
        Env::with_all(map, occupancy).as_brain_env(),
        TacticalView::default(),
        0xC0FFEE,
    )
    .expect("oracles are wired")
}
