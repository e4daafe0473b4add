//! Owned oracle implementations backed by plain grids and tables.
//!
//! Hosts that already keep their world in another shape can implement the
//! oracle traits directly; these concrete types exist for hosts that want a
//! ready-made snapshot per turn, and for tests.

use std::collections::HashMap;

use super::map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
use super::occupancy::OccupancyOracle;
use crate::types::{EntityId, Position};

/// Dense terrain grid implementing [`MapOracle`].
#[derive(Clone, Debug)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl GridMap {
    /// Creates a map filled with the given terrain.
    pub fn filled(width: u32, height: u32, terrain: TerrainKind) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            tiles: vec![terrain; dimensions.area()],
            dimensions,
        }
    }

    /// Creates an all-floor map, the common starting point in tests.
    pub fn open(width: u32, height: u32) -> Self {
        Self::filled(width, height, TerrainKind::Floor)
    }

    pub fn set(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = terrain;
        }
    }

    /// Sets every tile along a straight horizontal or vertical segment.
    pub fn set_line(&mut self, from: Position, to: Position, terrain: TerrainKind) {
        if from.x == to.x {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                self.set(Position::new(from.x, y), terrain);
            }
        } else if from.y == to.y {
            for x in from.x.min(to.x)..=from.x.max(to.x) {
                self.set(Position::new(x, from.y), terrain);
            }
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.index(position)
            .map(|index| StaticTile::new(self.tiles[index]))
    }
}

/// Position-keyed occupancy table implementing [`OccupancyOracle`].
#[derive(Clone, Debug, Default)]
pub struct OccupancySnapshot {
    by_position: HashMap<Position, EntityId>,
}

impl OccupancySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, entity: EntityId, position: Position) {
        self.by_position.insert(position, entity);
    }

    pub fn remove(&mut self, position: Position) {
        self.by_position.remove(&position);
    }
}

impl OccupancyOracle for OccupancySnapshot {
    fn entity_at(&self, position: Position) -> Option<EntityId> {
        self.by_position.get(&position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_map_bounds_and_terrain() {
        let mut map = GridMap::open(4, 3);
        map.set(Position::new(2, 1), TerrainKind::Wall);

        assert!(map.is_walkable(Position::new(0, 0)));
        assert!(!map.is_walkable(Position::new(2, 1)));
        assert!(!map.is_walkable(Position::new(4, 0)));
        assert!(!map.is_walkable(Position::new(-1, 0)));
        assert_eq!(map.tile(Position::new(5, 5)), None);
    }

    #[test]
    fn occupancy_blocks_others_but_not_self() {
        let mut occupancy = OccupancySnapshot::new();
        let spot = Position::new(1, 1);
        occupancy.place(EntityId(7), spot);

        assert!(occupancy.is_occupied(spot));
        assert!(occupancy.is_blocked_for(spot, EntityId(3)));
        assert!(!occupancy.is_blocked_for(spot, EntityId(7)));
        assert!(!occupancy.is_occupied(Position::new(0, 0)));
    }
}
