//! Per-creature traversal cost grid.
//!
//! Built fresh from terrain + occupancy + the mover's capabilities each
//! time a cost-aware search runs; world state changes every turn, so the
//! grid is not worth caching across turns.

use crate::capabilities::Capabilities;
use crate::env::{MapDimensions, MapOracle, OccupancyOracle, TerrainKind};
use crate::types::{EntityId, Position};

/// Baseline cost of entering an ordinary floor tile.
pub const COST_FLOOR: f32 = 1.0;
/// Entering a tile held by another creature: enterable, but steep enough
/// that a short detour always wins. Soft avoidance, not a hard block.
pub const COST_OCCUPIED: f32 = 10.0;
/// Ground hazard premium paid by creatures that cannot fly.
pub const COST_HAZARD: f32 = 20.0;
/// Tunneling through a solid wall, for creatures that can burrow.
pub const COST_DIG: f32 = 50.0;
/// Effectively infinite: any cell at or above this never enters a search.
pub const COST_IMPASSABLE: f32 = 1.0e9;

/// Snapshot of traversal costs for one creature.
#[derive(Clone, Debug)]
pub struct CostGrid {
    dimensions: MapDimensions,
    cells: Vec<f32>,
}

impl CostGrid {
    /// Prices every cell of the map for `mover`.
    pub fn build(
        map: &dyn MapOracle,
        occupancy: &dyn OccupancyOracle,
        mover: EntityId,
        capabilities: Capabilities,
    ) -> Self {
        let dimensions = map.dimensions();
        let mut cells = vec![COST_IMPASSABLE; dimensions.area()];

        for y in 0..dimensions.height as i32 {
            for x in 0..dimensions.width as i32 {
                let position = Position::new(x, y);
                let index = y as usize * dimensions.width as usize + x as usize;
                cells[index] = cell_cost(map, occupancy, mover, capabilities, position);
            }
        }

        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Cost of entering the cell. Out-of-bounds is impassable.
    pub fn cost(&self, position: Position) -> f32 {
        if !self.dimensions.contains(position) {
            return COST_IMPASSABLE;
        }
        let index =
            position.y as usize * self.dimensions.width as usize + position.x as usize;
        self.cells[index]
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.cost(position) < COST_IMPASSABLE
    }
}

fn cell_cost(
    map: &dyn MapOracle,
    occupancy: &dyn OccupancyOracle,
    mover: EntityId,
    capabilities: Capabilities,
    position: Position,
) -> f32 {
    let Some(tile) = map.tile(position) else {
        return COST_IMPASSABLE;
    };

    let terrain = tile.terrain();
    let base = if terrain.is_passable() {
        if terrain.is_hazard() && !capabilities.can_fly() {
            COST_HAZARD
        } else {
            COST_FLOOR
        }
    } else if terrain.is_diggable() && capabilities.can_burrow() {
        COST_DIG
    } else if terrain == TerrainKind::Void && capabilities.can_fly() {
        COST_FLOOR
    } else {
        return COST_IMPASSABLE;
    };

    if occupancy.is_blocked_for(position, mover) {
        base.max(COST_OCCUPIED)
    } else {
        base
    }
}
