//! The atomic outcomes a creature turn can resolve to.

use warren_core::{EntityId, Position};

/// One turn's worth of creature activity, handed back to the scheduler.
///
/// The decision core only chooses actions; resolving them (moving the
/// creature, rolling damage) belongs to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Do nothing this turn. Also the no-op sentinel when arbitration
    /// produces nothing and no fallback applies.
    Wait,
    /// Step onto an adjacent tile.
    Step(Position),
    /// Strike an adjacent target.
    Melee { target: EntityId },
    /// Shoot a visible target at range.
    Ranged { target: EntityId },
    /// Hold position defensively until the next turn.
    Defend,
    /// Use the item in the given inventory slot.
    UseItem { slot: u8 },
}

impl Action {
    /// Debug label used by arbitration traces.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Wait => "wait",
            Action::Step(_) => "step",
            Action::Melee { .. } => "melee",
            Action::Ranged { .. } => "ranged",
            Action::Defend => "defend",
            Action::UseItem { .. } => "use-item",
        }
    }
}
