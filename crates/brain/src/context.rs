//! Per-turn decision context.
//!
//! The external scheduler assembles one of these before asking a creature's
//! brain for an action, and drops it when the turn resolves. It bundles the
//! acting creature, cached tactical facts, resolved world oracles, and the
//! turn's random stream.

use warren_core::{
    BrainEnv, Capabilities, DecisionRng, EntityId, MapOracle, OccupancyOracle, OracleError,
    Position, RangeShape, visible_tiles,
};

/// A creature the acting creature currently considers hostile and can see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Position,
}

/// Tactical facts the scheduler caches for the turn: who is visible, and
/// which of them, if any, is the primary target.
#[derive(Clone, Debug, Default)]
pub struct TacticalView {
    pub visible_enemies: Vec<Enemy>,
    pub primary_target: Option<EntityId>,
}

impl TacticalView {
    pub fn enemy_position(&self, id: EntityId) -> Option<Position> {
        self.visible_enemies
            .iter()
            .find(|enemy| enemy.id == id)
            .map(|enemy| enemy.position)
    }

    pub fn nearest_enemy(&self, from: Position) -> Option<Enemy> {
        self.visible_enemies
            .iter()
            .copied()
            .min_by_key(|enemy| (from.chebyshev(enemy.position), enemy.id))
    }
}

/// Ephemeral read-only view for one creature's turn.
pub struct DecisionContext<'a> {
    /// The creature deciding.
    pub entity: EntityId,
    /// Its position at the start of the turn.
    pub position: Position,
    pub capabilities: Capabilities,
    pub tactical: TacticalView,
    /// Cached Chebyshev distance to the primary target, if one is visible.
    pub target_distance: Option<u32>,
    /// Per-turn random stream; see `combine_seed` for how hosts derive the
    /// seed deterministically.
    pub rng: DecisionRng,
    map: &'a dyn MapOracle,
    occupancy: &'a dyn OccupancyOracle,
}

impl<'a> DecisionContext<'a> {
    /// Resolves the environment's oracles once and caches the target
    /// distance.
    ///
    /// # Errors
    ///
    /// Returns an [`OracleError`] if the map or occupancy oracle is missing;
    /// that is a host wiring bug, not an in-simulation outcome.
    pub fn new(
        entity: EntityId,
        position: Position,
        capabilities: Capabilities,
        env: BrainEnv<'a>,
        tactical: TacticalView,
        seed: u64,
    ) -> Result<Self, OracleError> {
        let map = env.map()?;
        let occupancy = env.occupancy()?;
        let target_distance = tactical
            .primary_target
            .and_then(|target| tactical.enemy_position(target))
            .map(|target_position| position.chebyshev(target_position));

        Ok(Self {
            entity,
            position,
            capabilities,
            tactical,
            target_distance,
            rng: DecisionRng::seeded(seed),
            map,
            occupancy,
        })
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn occupancy(&self) -> &'a dyn OccupancyOracle {
        self.occupancy
    }

    /// True if the tile can be stepped onto by this creature right now.
    pub fn can_step_to(&self, position: Position) -> bool {
        self.map.is_walkable(position)
            && !self.occupancy.is_blocked_for(position, self.entity)
    }

    /// Line-of-sight check, computed on demand via shadowcasting.
    pub fn can_see(&self, target: Position, range: u32, shape: RangeShape) -> bool {
        visible_tiles(self.map, self.position, range, shape).contains(&target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_core::{Env, GridMap, OccupancySnapshot};

    #[test]
    fn missing_oracles_are_a_wiring_error() {
        let env: BrainEnv<'_> = Env::empty();
        let result = DecisionContext::new(
            EntityId(1),
            Position::ORIGIN,
            Capabilities::default(),
            env,
            TacticalView::default(),
            0,
        );
        assert_eq!(result.err(), Some(OracleError::MapNotAvailable));
    }

    #[test]
    fn target_distance_is_cached_from_the_tactical_view() {
        let map = GridMap::open(8, 8);
        let occupancy = OccupancySnapshot::new();
        let tactical = TacticalView {
            visible_enemies: vec![Enemy {
                id: EntityId::PLAYER,
                position: Position::new(5, 5),
            }],
            primary_target: Some(EntityId::PLAYER),
        };

        let ctx = DecisionContext::new(
            EntityId(1),
            Position::new(1, 1),
            Capabilities::default(),
            Env::with_all(&map, &occupancy).as_brain_env(),
            tactical,
            7,
        )
        .unwrap();
        assert_eq!(ctx.target_distance, Some(4));
    }
}
