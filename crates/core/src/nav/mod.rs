//! Grid navigation: cost model, single-target A*, multi-source flood fill.
mod astar;
mod costs;
mod field;

pub use astar::{find_path, find_path_weighted};
pub use costs::{
    COST_DIG, COST_FLOOR, COST_HAZARD, COST_IMPASSABLE, COST_OCCUPIED, CostGrid,
};
pub use field::{DistanceField, UNREACHABLE};
