//! Movement goals: go somewhere, keep walking a beat.

use warren_core::{Position, find_path};

use crate::actions::Action;
use crate::arbitration::{ArbitrationEvent, BehaviorProvider, CandidateSet, ProviderSet};
use crate::context::DecisionContext;
use crate::goal::{Goal, GoalStep};

/// When a travel goal counts as arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Arrival {
    /// Standing on the destination tile.
    At,
    /// Standing on any tile adjacent to the destination. Used when the
    /// destination itself is occupied, e.g. walking up to an attack target.
    Adjacent,
}

/// Navigate to a destination tile, re-planning the route every turn so the
/// path reflects current occupancy.
pub struct MoveToGoal {
    dest: Position,
    arrival: Arrival,
}

impl MoveToGoal {
    /// Arrive exactly on `dest`.
    pub fn to(dest: Position) -> Box<Self> {
        Box::new(Self {
            dest,
            arrival: Arrival::At,
        })
    }

    /// Arrive next to `dest` (the tile itself may be occupied).
    pub fn next_to(dest: Position) -> Box<Self> {
        Box::new(Self {
            dest,
            arrival: Arrival::Adjacent,
        })
    }

    fn arrived(&self, from: Position) -> bool {
        match self.arrival {
            Arrival::At => from == self.dest,
            Arrival::Adjacent => from.chebyshev(self.dest) <= 1,
        }
    }
}

impl Goal for MoveToGoal {
    fn name(&self) -> &'static str {
        "move-to"
    }

    fn is_finished(&self, ctx: &DecisionContext<'_>) -> bool {
        self.arrived(ctx.position)
    }

    fn take_action(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        _providers: &ProviderSet,
    ) -> GoalStep {
        if self.arrived(ctx.position) {
            return GoalStep::Done;
        }

        match find_path(ctx.map(), ctx.occupancy(), ctx.entity, ctx.position, self.dest) {
            Some(steps) => match steps.first() {
                Some(&next) => GoalStep::Act(Action::Step(next)),
                None => GoalStep::Done,
            },
            // No route is a normal outcome; let the originating intent
            // replan.
            None => GoalStep::Fail,
        }
    }
}

/// Cycle through a fixed list of waypoints forever, delegating each leg to
/// a [`MoveToGoal`] sub-goal.
pub struct PatrolGoal {
    waypoints: Vec<Position>,
    next: usize,
}

impl PatrolGoal {
    pub fn new(waypoints: Vec<Position>) -> Box<Self> {
        Box::new(Self { waypoints, next: 0 })
    }
}

impl Goal for PatrolGoal {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn is_finished(&self, _ctx: &DecisionContext<'_>) -> bool {
        self.waypoints.is_empty()
    }

    fn take_action(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        _providers: &ProviderSet,
    ) -> GoalStep {
        if self.waypoints.is_empty() {
            return GoalStep::Done;
        }
        if ctx.position == self.waypoints[self.next] {
            self.next = (self.next + 1) % self.waypoints.len();
        }
        GoalStep::Push(MoveToGoal::to(self.waypoints[self.next]))
    }
}

/// Seeds a patrol route when the creature has nothing better to do.
pub struct PatrolProvider {
    waypoints: Vec<Position>,
}

impl PatrolProvider {
    pub fn new(waypoints: Vec<Position>) -> Box<Self> {
        Box::new(Self { waypoints })
    }
}

impl BehaviorProvider for PatrolProvider {
    fn name(&self) -> &'static str {
        "patrol"
    }

    fn respond(
        &self,
        event: ArbitrationEvent,
        _ctx: &mut DecisionContext<'_>,
        out: &mut CandidateSet,
    ) {
        if event == ArbitrationEvent::Bored && !self.waypoints.is_empty() {
            out.adopt(2, PatrolGoal::new(self.waypoints.clone()));
        }
    }
}
