//! Traits describing read-only world data.
//!
//! Oracles expose static terrain and per-turn creature occupancy. The
//! [`Env`] aggregate bundles them so the decision core can reach everything
//! it needs without hard coupling to concrete host implementations.
mod error;
mod map;
mod occupancy;
mod rng;
mod snapshot;

pub use error::OracleError;
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use occupancy::{NoOccupancy, OccupancyOracle};
pub use rng::{DecisionRng, combine_seed};
pub use snapshot::{GridMap, OccupancySnapshot};

/// Aggregates the read-only oracles consumed during one creature's turn.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, M, O>
where
    M: MapOracle + ?Sized,
    O: OccupancyOracle + ?Sized,
{
    map: Option<&'a M>,
    occupancy: Option<&'a O>,
}

/// Trait-object form used at the decision-core boundary.
pub type BrainEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn OccupancyOracle + 'a>;

impl<'a, M, O> Env<'a, M, O>
where
    M: MapOracle + ?Sized,
    O: OccupancyOracle + ?Sized,
{
    pub fn new(map: Option<&'a M>, occupancy: Option<&'a O>) -> Self {
        Self { map, occupancy }
    }

    pub fn with_all(map: &'a M, occupancy: &'a O) -> Self {
        Self::new(Some(map), Some(occupancy))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            occupancy: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the OccupancyOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::OccupancyNotAvailable` if no occupancy oracle
    /// was provided.
    pub fn occupancy(&self) -> Result<&'a O, OracleError> {
        self.occupancy.ok_or(OracleError::OccupancyNotAvailable)
    }
}

impl<'a, M, O> Env<'a, M, O>
where
    M: MapOracle + 'a,
    O: OccupancyOracle + 'a,
{
    /// Converts this environment into the trait-object based [`BrainEnv`].
    pub fn as_brain_env(&self) -> BrainEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let occupancy: Option<&'a dyn OccupancyOracle> =
            self.occupancy.map(|occupancy| occupancy as _);
        Env::new(map, occupancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_oracles_surface_as_errors() {
        let env: BrainEnv<'_> = Env::empty();
        assert_eq!(env.map().err(), Some(OracleError::MapNotAvailable));
        assert_eq!(
            env.occupancy().err(),
            Some(OracleError::OccupancyNotAvailable)
        );
    }

    #[test]
    fn provided_oracles_resolve() {
        let map = GridMap::open(2, 2);
        let occupancy = OccupancySnapshot::new();
        let env = Env::with_all(&map, &occupancy).as_brain_env();
        assert!(env.map().is_ok());
        assert!(env.occupancy().is_ok());
    }
}
