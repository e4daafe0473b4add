use crate::types::{EntityId, Position};

/// Read-only view of which creature, if any, stands on each tile.
///
/// Lookups must be O(1); pathfinding and the cost model query this once per
/// expanded cell.
pub trait OccupancyOracle {
    fn entity_at(&self, position: Position) -> Option<EntityId>;

    fn is_occupied(&self, position: Position) -> bool {
        self.entity_at(position).is_some()
    }

    /// Returns true if the tile is held by a creature other than `mover`.
    ///
    /// A creature never blocks itself; every caller that plans movement for
    /// a specific creature wants this form rather than raw occupancy.
    fn is_blocked_for(&self, position: Position, mover: EntityId) -> bool {
        self.entity_at(position).is_some_and(|other| other != mover)
    }
}

/// Empty occupancy view for hosts (and tests) that track no creatures.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOccupancy;

impl OccupancyOracle for NoOccupancy {
    fn entity_at(&self, _position: Position) -> Option<EntityId> {
        None
    }
}
