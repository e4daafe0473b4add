//! Goals: units of creature intent.
//!
//! A goal knows when it is finished, what to do this turn, and how to react
//! when it cannot proceed. Goals never call back into the stack that owns
//! them; instead `take_action` returns a [`GoalStep`] directive and the
//! turn driver applies it, which keeps ownership single and borrows simple.

use std::fmt;

use crate::actions::Action;
use crate::arbitration::ProviderSet;
use crate::context::DecisionContext;

/// Stable opaque handle for a goal while it lives on a stack.
///
/// The pruning pass rebuilds the stack into a fresh container, so ancestor
/// links are ids rather than references; a handle can never dangle, only go
/// stale, and a stale handle simply stops matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GoalId(pub(crate) u32);

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// What a goal wants the turn driver to do after its action routine ran.
pub enum GoalStep {
    /// Spend the turn on this action.
    Act(Action),
    /// Suspend this goal under a new sub-goal; the sub-goal records this
    /// goal as its originating intent.
    Push(Box<dyn Goal>),
    /// This goal is complete; pop it and let the goal beneath continue
    /// within the same turn.
    Done,
    /// This goal cannot proceed; route through [`Goal::on_fail`].
    Fail,
}

/// How a failed goal wants the stack unwound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FailureResponse {
    /// Pop everything down to the originating intent and retain it so it
    /// can replan with fresh state. A goal with no origin drains the whole
    /// stack and returns the creature to default behavior.
    #[default]
    UnwindToOrigin,
    /// Just remove this goal and let whatever is beneath resume.
    Abandon,
}

/// A unit of intent with a completion test, a per-turn action routine, and
/// a failure handler.
pub trait Goal {
    /// Short name used in traces.
    fn name(&self) -> &'static str;

    /// Completion predicate, checked by the pruning pass each turn.
    fn is_finished(&self, ctx: &DecisionContext<'_>) -> bool;

    /// Per-turn action routine. May consult FOV, pathfinding and distance
    /// fields through `ctx`, fire arbitration events through `providers`,
    /// and push sub-goals or signal failure via the returned directive.
    fn take_action(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        providers: &ProviderSet,
    ) -> GoalStep;

    /// Failure handler; the default delegates to unwinding the stack to
    /// this goal's originating intent.
    fn on_fail(&mut self, _ctx: &DecisionContext<'_>) -> FailureResponse {
        FailureResponse::UnwindToOrigin
    }
}
