//! The per-turn decision driver.
//!
//! One [`Brain`] per AI-controlled creature, owning its goal stack and its
//! registered behavior providers. The external scheduler calls
//! [`Brain::take_turn`] once per turn with a fresh [`DecisionContext`] and
//! executes whatever action comes back.

use crate::actions::Action;
use crate::arbitration::{ArbitrationEvent, BehaviorProvider, Proposal, ProviderSet};
use crate::context::DecisionContext;
use crate::goal::{FailureResponse, Goal, GoalStep};
use crate::stack::GoalStack;

/// Upper bound on push/pop/fail transitions within a single turn. A goal
/// pair that keeps pushing and failing at each other would otherwise spin
/// forever inside one turn slot.
const MAX_PLANNER_STEPS: usize = 8;

/// Decision state for one creature: its goal stack plus the behavior
/// providers that contribute to arbitration. Lives exactly as long as the
/// creature.
#[derive(Default)]
pub struct Brain {
    stack: GoalStack,
    providers: ProviderSet,
}

impl Brain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style provider registration; dispatch order is registration
    /// order.
    pub fn with_provider(mut self, provider: Box<dyn BehaviorProvider>) -> Self {
        self.providers.register(provider);
        self
    }

    pub fn stack(&self) -> &GoalStack {
        &self.stack
    }

    /// Pushes a root goal directly, e.g. a scripted objective from the host.
    pub fn push_goal(&mut self, goal: Box<dyn Goal>) {
        self.stack.push(goal);
    }

    /// Raises an out-of-band event (e.g. `RangedHit` after the host resolved
    /// a shot). An `Adopt` winner lands on the stack for the next turn; an
    /// `Act` winner is handed back for immediate resolution.
    pub fn raise(
        &mut self,
        event: ArbitrationEvent,
        ctx: &mut DecisionContext<'_>,
    ) -> Option<Action> {
        let set = self.providers.gather(event, ctx);
        match set.pick(&mut ctx.rng) {
            Some(Proposal::Act(action)) => Some(action),
            Some(Proposal::Adopt(goal)) => {
                self.stack.push(goal);
                None
            }
            None => None,
        }
    }

    /// Decides one turn.
    ///
    /// Prunes finished goals, then lets the active goal act; an empty stack
    /// fires the `Bored` event so providers can seed a fresh root goal, and
    /// a turn where nothing volunteers falls back to a default wander.
    pub fn take_turn(&mut self, ctx: &mut DecisionContext<'_>) -> Action {
        tracing::debug!(
            entity = %ctx.entity,
            position = %ctx.position,
            goals = self.stack.len(),
            "turn start"
        );
        self.stack.remove_finished(ctx);

        for _ in 0..MAX_PLANNER_STEPS {
            let Some(entry) = self.stack.peek_mut() else {
                match self.providers.gather(ArbitrationEvent::Bored, ctx).pick(&mut ctx.rng) {
                    Some(Proposal::Act(action)) => return action,
                    Some(Proposal::Adopt(goal)) => {
                        self.stack.push(goal);
                        continue;
                    }
                    None => return default_wander(ctx),
                }
            };

            let active = entry.id;
            let step = entry.goal.take_action(ctx, &self.providers);

            match step {
                GoalStep::Act(action) => {
                    tracing::debug!(entity = %ctx.entity, action = action.label(), "turn decided");
                    return action;
                }
                GoalStep::Push(goal) => {
                    self.stack.push_sub(goal, Some(active));
                }
                GoalStep::Done => {
                    self.stack.pop();
                }
                GoalStep::Fail => {
                    if let Some(entry) = self.stack.peek_mut() {
                        let origin = entry.origin;
                        match entry.goal.on_fail(ctx) {
                            FailureResponse::UnwindToOrigin => self.stack.fail_to_origin(origin),
                            FailureResponse::Abandon => {
                                self.stack.pop();
                            }
                        }
                    }
                }
            }
        }

        tracing::warn!(
            entity = %ctx.entity,
            "planner hit its per-turn transition bound; waiting this turn out"
        );
        Action::Wait
    }
}

/// Default idle behavior when no goal and no provider has anything to say:
/// a random open step, or waiting when boxed in.
fn default_wander(ctx: &mut DecisionContext<'_>) -> Action {
    let open: Vec<_> = ctx
        .position
        .neighbors()
        .into_iter()
        .filter(|neighbor| ctx.can_step_to(*neighbor))
        .collect();
    if open.is_empty() {
        return Action::Wait;
    }
    let index = ctx.rng.below(open.len() as u64) as usize;
    Action::Step(open[index])
}
