//! The goal stack: one per AI-controlled creature, living exactly as long
//! as that creature. The top entry is always the current focus.

use crate::context::DecisionContext;
use crate::goal::{Goal, GoalId};

/// A goal plus its bookkeeping while it lives on the stack.
pub struct GoalEntry {
    pub id: GoalId,
    /// The ancestor goal that pushed this one, used only for failure
    /// recovery. `None` marks a root goal.
    pub origin: Option<GoalId>,
    pub goal: Box<dyn Goal>,
}

/// LIFO container of a creature's active goals.
#[derive(Default)]
pub struct GoalStack {
    entries: Vec<GoalEntry>,
    next_id: u32,
}

impl GoalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a root goal (no originating intent).
    pub fn push(&mut self, goal: Box<dyn Goal>) -> GoalId {
        self.push_sub(goal, None)
    }

    /// Pushes a sub-goal recording the intent that created it.
    pub fn push_sub(&mut self, goal: Box<dyn Goal>, origin: Option<GoalId>) -> GoalId {
        let id = GoalId(self.next_id);
        self.next_id += 1;
        tracing::debug!(goal = goal.name(), %id, ?origin, "push goal");
        self.entries.push(GoalEntry { id, origin, goal });
        id
    }

    /// Pops the current focus. Empty stacks yield `None`, never an error.
    pub fn pop(&mut self) -> Option<GoalEntry> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&GoalEntry> {
        self.entries.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut GoalEntry> {
        self.entries.last_mut()
    }

    pub fn top_id(&self) -> Option<GoalId> {
        self.entries.last().map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prunes finished goals and their orphaned descendants.
    ///
    /// Iterates bottom to top (creation order, not execution order). An
    /// entry is dropped when its own predicate says finished, or when its
    /// recorded origin was dropped earlier in this same pass. Ancestors are
    /// always pushed before descendants, so by the time a descendant is
    /// evaluated its ancestor's fate is already known; reversing this
    /// iteration would break the cascade.
    pub fn remove_finished(&mut self, ctx: &DecisionContext<'_>) {
        let mut removed: Vec<GoalId> = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());

        for entry in self.entries.drain(..) {
            let orphaned = entry
                .origin
                .is_some_and(|origin| removed.contains(&origin));
            if orphaned || entry.goal.is_finished(ctx) {
                tracing::debug!(goal = entry.goal.name(), id = %entry.id, orphaned, "prune goal");
                removed.push(entry.id);
            } else {
                kept.push(entry);
            }
        }

        self.entries = kept;
    }

    /// Unwinds after a failure: pops entries from the top until the popped
    /// entry is the failed goal's originating intent, which is pushed back
    /// (retained) so it can replan with fresh state next step.
    ///
    /// With `origin == None` (a root goal failed) the whole stack drains:
    /// abandon everything and return to default behavior. Intentional;
    /// callers must not rely on a non-empty stack afterwards.
    pub fn fail_to_origin(&mut self, origin: Option<GoalId>) {
        while let Some(entry) = self.entries.pop() {
            if Some(entry.id) == origin {
                tracing::debug!(goal = entry.goal.name(), id = %entry.id, "replanning at origin");
                self.entries.push(entry);
                return;
            }
            tracing::debug!(goal = entry.goal.name(), id = %entry.id, "unwound goal");
        }
    }
}
