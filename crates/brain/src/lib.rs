//! Autonomous creature decisions for a turn-based grid dungeon.
//!
//! `warren-brain` decides *what* a creature does each turn: a stack-based
//! goal planner with failure-driven replanning, plus event-driven action
//! arbitration where independent behavior providers bid weighted candidates
//! and one is drawn at random. Spatial reasoning (pathfinding, distance
//! fields, field of view) comes from `warren-core`.
//!
//! One creature, one [`Brain`]; the external scheduler assembles a
//! [`DecisionContext`] per turn and executes the [`Action`] that
//! [`Brain::take_turn`] returns. Everything is synchronous and, given a
//! fixed seed, fully deterministic.
pub mod actions;
pub mod arbitration;
pub mod behaviors;
pub mod context;
pub mod driver;
pub mod goal;
pub mod stack;

#[cfg(test)]
pub(crate) mod test_support;

pub use actions::Action;
pub use arbitration::{
    ArbitrationEvent, BehaviorProvider, CandidateSet, Proposal, ProviderSet,
};
pub use context::{DecisionContext, Enemy, TacticalView};
pub use driver::Brain;
pub use goal::{FailureResponse, Goal, GoalId, GoalStep};
pub use stack::{GoalEntry, GoalStack};
