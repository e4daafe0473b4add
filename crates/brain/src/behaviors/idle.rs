//! Default behavior when nothing demands attention.

use warren_core::Position;

use crate::actions::Action;
use crate::arbitration::{ArbitrationEvent, BehaviorProvider, CandidateSet, ProviderSet};
use crate::context::DecisionContext;
use crate::goal::{Goal, GoalStep};

/// Picks a random enterable neighbor, or `None` when boxed in.
pub(crate) fn random_step(ctx: &mut DecisionContext<'_>) -> Option<Position> {
    let open: Vec<Position> = ctx
        .position
        .neighbors()
        .into_iter()
        .filter(|neighbor| ctx.can_step_to(*neighbor))
        .collect();
    if open.is_empty() {
        return None;
    }
    let index = ctx.rng.below(open.len() as u64) as usize;
    Some(open[index])
}

/// Drift around for a fixed number of steps.
pub struct WanderGoal {
    steps: u32,
}

impl WanderGoal {
    pub fn new(steps: u32) -> Box<Self> {
        Box::new(Self { steps })
    }
}

impl Goal for WanderGoal {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn is_finished(&self, _ctx: &DecisionContext<'_>) -> bool {
        self.steps == 0
    }

    fn take_action(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        _providers: &ProviderSet,
    ) -> GoalStep {
        if self.steps == 0 {
            return GoalStep::Done;
        }
        self.steps -= 1;
        match random_step(ctx) {
            Some(next) => GoalStep::Act(Action::Step(next)),
            None => GoalStep::Act(Action::Wait),
        }
    }
}

/// Stand still for a fixed number of turns.
pub struct IdleGoal {
    turns: u32,
}

impl IdleGoal {
    pub fn new(turns: u32) -> Box<Self> {
        Box::new(Self { turns })
    }
}

impl Goal for IdleGoal {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn is_finished(&self, _ctx: &DecisionContext<'_>) -> bool {
        self.turns == 0
    }

    fn take_action(
        &mut self,
        _ctx: &mut DecisionContext<'_>,
        _providers: &ProviderSet,
    ) -> GoalStep {
        if self.turns == 0 {
            return GoalStep::Done;
        }
        self.turns -= 1;
        GoalStep::Act(Action::Wait)
    }
}

/// Seeds wander/idle root goals on boredom and offers random steps to
/// movement arbitration.
#[derive(Default)]
pub struct WanderProvider;

impl WanderProvider {
    pub fn new() -> Box<Self> {
        Box::new(Self)
    }
}

impl BehaviorProvider for WanderProvider {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn respond(
        &self,
        event: ArbitrationEvent,
        ctx: &mut DecisionContext<'_>,
        out: &mut CandidateSet,
    ) {
        match event {
            ArbitrationEvent::Bored => {
                out.adopt(3, WanderGoal::new(8));
                out.adopt(1, IdleGoal::new(2));
            }
            ArbitrationEvent::GatherMovement => {
                if let Some(next) = random_step(ctx) {
                    out.act(2, Action::Step(next));
                }
            }
            _ => {}
        }
    }
}
