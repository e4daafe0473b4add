//! Concrete goals and behavior providers.
//!
//! These are the structural content of the planner: each goal implements
//! the {is_finished, take_action, on_fail} contract, each provider
//! contributes weighted candidates to arbitration events. Hosts compose
//! per-creature behavior by registering providers, not by subclassing.
mod combat;
mod idle;
mod travel;

pub use combat::{AttackGoal, DefendProvider, FleeGoal, MeleeProvider, RangedProvider};
pub use idle::{IdleGoal, WanderGoal, WanderProvider};
pub use travel::{MoveToGoal, PatrolGoal, PatrolProvider};
