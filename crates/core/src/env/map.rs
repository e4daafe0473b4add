use crate::types::Position;

/// Static map oracle exposing immutable terrain layout.
///
/// Implemented by the host world; every spatial algorithm in this crate
/// consumes terrain exclusively through this trait.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Returns true if the tile exists and its terrain can be entered on
    /// foot. Out-of-bounds positions are never walkable.
    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(|tile| tile.is_passable())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Total tile count, used to bound full-grid scans.
    pub const fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    /// Ground hazard: enterable, but the cost model makes non-flyers pay
    /// a steep premium for it.
    Water,
    /// Open pit or missing tile. Blocks ground movement entirely.
    Void,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor | TerrainKind::Water)
    }

    /// Solid terrain a burrowing creature could tunnel through.
    pub fn is_diggable(self) -> bool {
        matches!(self, TerrainKind::Wall)
    }

    /// True for ground hazards that flight bypasses at no extra cost.
    pub fn is_hazard(self) -> bool {
        matches!(self, TerrainKind::Water)
    }
}
