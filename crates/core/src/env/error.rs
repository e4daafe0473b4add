//! Oracle access errors.

use crate::types::Position;

/// Errors raised when a required oracle is missing from the environment.
///
/// These indicate wiring bugs in the host, not in-simulation outcomes:
/// an unreachable path or an empty candidate list is represented as data,
/// never as an error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// MapOracle is not available in the environment.
    #[error("MapOracle not available")]
    MapNotAvailable,

    /// OccupancyOracle is not available in the environment.
    #[error("OccupancyOracle not available")]
    OccupancyNotAvailable,

    /// Position is outside the map bounds.
    #[error("position {0} is out of map bounds")]
    PositionOutOfBounds(Position),
}
