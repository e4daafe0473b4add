//! Event-driven action arbitration.
//!
//! A named event is raised against the acting creature; every behavior
//! provider attached to it may append weighted candidates to a shared list,
//! and a single weighted random draw resolves the turn. This lets many
//! small, independently authored behavior modules compose without
//! inheritance or a central decision tree: a synchronous publish/subscribe
//! protocol scoped to one creature's turn.

use warren_core::DecisionRng;

use crate::actions::Action;
use crate::context::DecisionContext;
use crate::goal::Goal;

/// The event catalog. Names are topics; payload comes from the context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ArbitrationEvent {
    /// Gather melee attack candidates against the primary target.
    GatherMelee,
    /// Gather ranged attack candidates.
    GatherRanged,
    /// Gather defensive candidates.
    GatherDefensive,
    /// Gather item-use candidates.
    GatherItem,
    /// Gather movement candidates.
    GatherMovement,
    /// The goal stack is empty; providers may seed a fresh root goal.
    Bored,
    /// A ranged attack just landed; providers may react (reposition, press
    /// the advantage).
    RangedHit,
}

/// What a provider puts up for selection: either a concrete action for this
/// turn, or a goal for the creature to adopt onto its stack.
pub enum Proposal {
    Act(Action),
    Adopt(Box<dyn Goal>),
}

struct Candidate {
    weight: u32,
    label: &'static str,
    proposal: Proposal,
}

/// The shared candidate list one arbitration pass accumulates.
///
/// Weights are lottery tickets, not probabilities: weight 1 on every entry
/// gives a uniform draw. Zero-weight entries are dropped at insertion and
/// never stored.
#[derive(Default)]
pub struct CandidateSet {
    entries: Vec<Candidate>,
    handled: bool,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a candidate. Weight 0 is silently discarded.
    pub fn add(&mut self, weight: u32, label: &'static str, proposal: Proposal) {
        if weight == 0 {
            tracing::trace!(label, "dropped zero-weight candidate");
            return;
        }
        self.entries.push(Candidate {
            weight,
            label,
            proposal,
        });
    }

    /// Convenience for proposing a concrete action.
    pub fn act(&mut self, weight: u32, action: Action) {
        self.add(weight, action.label(), Proposal::Act(action));
    }

    /// Convenience for proposing a goal to adopt.
    pub fn adopt(&mut self, weight: u32, goal: Box<dyn Goal>) {
        let label = goal.name();
        self.add(weight, label, Proposal::Adopt(goal));
    }

    /// Marks the event as handled so providers later in the dispatch chain
    /// skip their default fallback contributions.
    pub fn set_handled(&mut self) {
        self.handled = true;
    }

    pub fn is_handled(&self) -> bool {
        self.handled
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Weighted random selection: draw a uniform integer in
    /// `[0, total_weight)` and walk the entries in insertion order,
    /// accumulating weight until the draw falls inside an entry's range.
    ///
    /// Returns `None` on an empty list; callers are responsible for a
    /// default idle/wander fallback. The final entry absorbs any draw the
    /// walk failed to place.
    pub fn pick(self, rng: &mut DecisionRng) -> Option<Proposal> {
        if self.entries.is_empty() {
            return None;
        }

        let total: u64 = self.entries.iter().map(|entry| entry.weight as u64).sum();
        let draw = rng.below(total);

        // Rounding fallback: the final entry absorbs any draw the walk
        // failed to place.
        let mut winner = self.entries.len() - 1;
        let mut cumulative = 0u64;
        for (index, entry) in self.entries.iter().enumerate() {
            cumulative += entry.weight as u64;
            if draw < cumulative {
                winner = index;
                break;
            }
        }

        let entry = self.entries.into_iter().nth(winner)?;
        tracing::debug!(
            winner = entry.label,
            weight = entry.weight,
            total,
            draw,
            "arbitration pick"
        );
        Some(entry.proposal)
    }
}

/// An independently authored behavior module attached to a creature.
///
/// Providers receive every event raised against their creature and may
/// append zero or more candidates. They can consult [`CandidateSet::
/// is_handled`] to suppress their own fallback contributions when an
/// earlier provider claimed the event.
pub trait BehaviorProvider {
    fn name(&self) -> &'static str;

    fn respond(
        &self,
        event: ArbitrationEvent,
        ctx: &mut DecisionContext<'_>,
        out: &mut CandidateSet,
    );
}

/// The ordered list of providers attached to one creature.
#[derive(Default)]
pub struct ProviderSet {
    providers: Vec<Box<dyn BehaviorProvider>>,
}

impl ProviderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn BehaviorProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Raises `event` to every provider in registration order and returns
    /// the accumulated candidate list.
    pub fn gather(
        &self,
        event: ArbitrationEvent,
        ctx: &mut DecisionContext<'_>,
    ) -> CandidateSet {
        let mut set = CandidateSet::new();
        for provider in &self.providers {
            provider.respond(event, ctx, &mut set);
        }
        tracing::trace!(%event, candidates = set.len(), "arbitration gather");
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_weight_entries_are_never_stored() {
        let mut set = CandidateSet::new();
        set.act(0, Action::Wait);
        assert!(set.is_empty());

        set.act(1, Action::Defend);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_set_picks_nothing() {
        let mut rng = DecisionRng::seeded(5);
        assert!(CandidateSet::new().pick(&mut rng).is_none());
    }

    #[test]
    fn single_candidate_always_wins() {
        let mut rng = DecisionRng::seeded(5);
        let mut set = CandidateSet::new();
        set.act(3, Action::Defend);

        match set.pick(&mut rng) {
            Some(Proposal::Act(Action::Defend)) => {}
            _ => panic!("the only candidate must win"),
        }
    }

    #[test]
    fn uniform_weights_reach_every_entry() {
        let mut rng = DecisionRng::seeded(11);
        let mut first = 0u32;
        let mut second = 0u32;
        for _ in 0..200 {
            let mut set = CandidateSet::new();
            set.act(1, Action::Wait);
            set.act(1, Action::Defend);
            match set.pick(&mut rng) {
                Some(Proposal::Act(Action::Wait)) => first += 1,
                Some(Proposal::Act(Action::Defend)) => second += 1,
                _ => unreachable!(),
            }
        }
        assert!(first > 0 && second > 0);
    }

    #[test]
    fn handled_flag_round_trips() {
        let mut set = CandidateSet::new();
        assert!(!set.is_handled());
        set.set_handled();
        assert!(set.is_handled());
    }

    #[test]
    fn event_names_render_kebab_case() {
        assert_eq!(ArbitrationEvent::GatherMelee.to_string(), "gather-melee");
        assert_eq!(ArbitrationEvent::Bored.to_string(), "bored");
        assert_eq!(ArbitrationEvent::RangedHit.to_string(), "ranged-hit");
    }
}
