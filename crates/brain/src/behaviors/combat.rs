//! Combat goals and providers: closing in, striking, shooting, running.

use warren_core::{DistanceField, EntityId, Position, RangeShape};

use super::travel::MoveToGoal;
use crate::actions::Action;
use crate::arbitration::{ArbitrationEvent, BehaviorProvider, CandidateSet, Proposal, ProviderSet};
use crate::context::DecisionContext;
use crate::goal::{Goal, GoalStep};

/// How far a shot can carry.
const RANGED_REACH: u32 = 6;
/// Far enough that a fleeing creature stops running.
const SAFE_DISTANCE: u32 = 4;

/// Engage a specific target: shoot it at range, close to melee, strike.
///
/// The actual strike is arbitrated, so item- or spell-oriented providers on
/// the same creature can outbid the plain attack.
pub struct AttackGoal {
    target: EntityId,
}

impl AttackGoal {
    pub fn new(target: EntityId) -> Box<Self> {
        Box::new(Self { target })
    }
}

impl Goal for AttackGoal {
    fn name(&self) -> &'static str {
        "attack"
    }

    /// Done once the target is no longer in the tactical view: dead,
    /// fled, or out of sight.
    fn is_finished(&self, ctx: &DecisionContext<'_>) -> bool {
        ctx.tactical.enemy_position(self.target).is_none()
    }

    fn take_action(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        providers: &ProviderSet,
    ) -> GoalStep {
        let Some(target_position) = ctx.tactical.enemy_position(self.target) else {
            return GoalStep::Done;
        };

        if ctx.position.is_adjacent(target_position) {
            let set = providers.gather(ArbitrationEvent::GatherMelee, ctx);
            return match set.pick(&mut ctx.rng) {
                Some(Proposal::Act(action)) => GoalStep::Act(action),
                Some(Proposal::Adopt(goal)) => GoalStep::Push(goal),
                // No provider claimed the strike; the plain attack is the
                // default.
                None => GoalStep::Act(Action::Melee {
                    target: self.target,
                }),
            };
        }

        let distance = ctx.position.chebyshev(target_position);
        if distance <= RANGED_REACH
            && ctx.can_see(target_position, RANGED_REACH, RangeShape::Circle)
        {
            let set = providers.gather(ArbitrationEvent::GatherRanged, ctx);
            match set.pick(&mut ctx.rng) {
                Some(Proposal::Act(action)) => return GoalStep::Act(action),
                Some(Proposal::Adopt(goal)) => return GoalStep::Push(goal),
                None => {}
            }
        }

        GoalStep::Push(MoveToGoal::next_to(target_position))
    }
}

/// Run up the distance gradient away from a set of threats.
pub struct FleeGoal {
    threats: Vec<EntityId>,
    safe_distance: u32,
}

impl FleeGoal {
    pub fn new(threats: Vec<EntityId>) -> Box<Self> {
        Box::new(Self {
            threats,
            safe_distance: SAFE_DISTANCE,
        })
    }

    pub fn with_safe_distance(mut self: Box<Self>, safe_distance: u32) -> Box<Self> {
        self.safe_distance = safe_distance;
        self
    }

    fn threat_positions(&self, ctx: &DecisionContext<'_>) -> Vec<Position> {
        self.threats
            .iter()
            .filter_map(|threat| ctx.tactical.enemy_position(*threat))
            .collect()
    }
}

impl Goal for FleeGoal {
    fn name(&self) -> &'static str {
        "flee"
    }

    fn is_finished(&self, ctx: &DecisionContext<'_>) -> bool {
        self.threat_positions(ctx)
            .iter()
            .all(|threat| ctx.position.chebyshev(*threat) >= self.safe_distance)
    }

    fn take_action(
        &mut self,
        ctx: &mut DecisionContext<'_>,
        _providers: &ProviderSet,
    ) -> GoalStep {
        let threats = self.threat_positions(ctx);
        if threats.is_empty() {
            return GoalStep::Done;
        }

        // Influence-map form: occupancy is ignored in the field and applied
        // when choosing the actual step.
        let field = DistanceField::build(ctx.map(), &threats);
        let here = field.distance(ctx.position);

        let mut best: Option<(Position, f32)> = None;
        for neighbor in ctx.position.neighbors() {
            if !ctx.can_step_to(neighbor) {
                continue;
            }
            let there = field.distance(neighbor);
            if there.is_finite()
                && there > here
                && best.is_none_or(|(_, current)| there > current)
            {
                best = Some((neighbor, there));
            }
        }

        match best {
            Some((next, _)) => GoalStep::Act(Action::Step(next)),
            // Cornered: nothing increases distance.
            None => GoalStep::Fail,
        }
    }
}

/// Proposes melee strikes, and adopts an [`AttackGoal`] when an idle
/// creature spots an enemy.
#[derive(Default)]
pub struct MeleeProvider;

impl MeleeProvider {
    pub fn new() -> Box<Self> {
        Box::new(Self)
    }
}

impl BehaviorProvider for MeleeProvider {
    fn name(&self) -> &'static str {
        "melee"
    }

    fn respond(
        &self,
        event: ArbitrationEvent,
        ctx: &mut DecisionContext<'_>,
        out: &mut CandidateSet,
    ) {
        match event {
            ArbitrationEvent::GatherMelee => {
                if let Some(enemy) = ctx.tactical.nearest_enemy(ctx.position)
                    && ctx.position.is_adjacent(enemy.position)
                {
                    out.act(8, Action::Melee { target: enemy.id });
                    out.set_handled();
                }
            }
            ArbitrationEvent::Bored => {
                if let Some(enemy) = ctx.tactical.nearest_enemy(ctx.position) {
                    out.adopt(6, AttackGoal::new(enemy.id));
                }
            }
            _ => {}
        }
    }
}

/// Proposes ranged shots, and repositions after a hit (kiting).
pub struct RangedProvider {
    reach: u32,
}

impl RangedProvider {
    pub fn new() -> Box<Self> {
        Box::new(Self {
            reach: RANGED_REACH,
        })
    }
}

impl BehaviorProvider for RangedProvider {
    fn name(&self) -> &'static str {
        "ranged"
    }

    fn respond(
        &self,
        event: ArbitrationEvent,
        ctx: &mut DecisionContext<'_>,
        out: &mut CandidateSet,
    ) {
        match event {
            ArbitrationEvent::GatherRanged => {
                let Some(enemy) = ctx.tactical.nearest_enemy(ctx.position) else {
                    return;
                };
                let distance = ctx.position.chebyshev(enemy.position);
                if (2..=self.reach).contains(&distance)
                    && ctx.can_see(enemy.position, self.reach, RangeShape::Circle)
                {
                    out.act(6, Action::Ranged { target: enemy.id });
                }
            }
            ArbitrationEvent::RangedHit => {
                // Open the gap again before the target closes it.
                if let Some(enemy) = ctx.tactical.nearest_enemy(ctx.position)
                    && ctx.position.chebyshev(enemy.position) < SAFE_DISTANCE
                {
                    out.adopt(4, FleeGoal::new(vec![enemy.id]));
                }
            }
            _ => {}
        }
    }
}

/// Low-priority defensive fallback.
#[derive(Default)]
pub struct DefendProvider;

impl DefendProvider {
    pub fn new() -> Box<Self> {
        Box::new(Self)
    }
}

impl BehaviorProvider for DefendProvider {
    fn name(&self) -> &'static str {
        "defend"
    }

    fn respond(
        &self,
        event: ArbitrationEvent,
        _ctx: &mut DecisionContext<'_>,
        out: &mut CandidateSet,
    ) {
        match event {
            ArbitrationEvent::GatherDefensive => {
                out.act(2, Action::Defend);
            }
            // Fallback tickets only when nobody earlier claimed the strike.
            ArbitrationEvent::GatherMelee if !out.is_handled() => {
                out.act(1, Action::Defend);
            }
            _ => {}
        }
    }
}
