//! Grid-world primitives for the creature decision core.
//!
//! `warren-core` defines the value types, read-only world oracles, and the
//! spatial algorithms (field of view, A*, multi-source distance fields, the
//! per-creature cost model) that the planner in `warren-brain` consumes.
//! Everything here is pure and synchronous: one call, one answer, no state
//! kept between turns.
pub mod capabilities;
pub mod env;
pub mod fov;
pub mod nav;
pub mod types;

pub use capabilities::Capabilities;
pub use env::{
    BrainEnv, DecisionRng, Env, GridMap, MapDimensions, MapOracle, NoOccupancy,
    OccupancyOracle, OccupancySnapshot, OracleError, StaticTile, TerrainKind, combine_seed,
};
pub use fov::{RangeShape, visible_tiles};
pub use nav::{
    COST_DIG, COST_FLOOR, COST_HAZARD, COST_IMPASSABLE, COST_OCCUPIED, CostGrid,
    DistanceField, UNREACHABLE, find_path, find_path_weighted,
};
pub use types::{Direction, EntityId, Position};
