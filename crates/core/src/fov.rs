//! Field of view by recursive shadowcasting.
//!
//! Eight octants, each scanned row by row with a shrinking slope interval.
//! A blocking tile truncates visibility behind it and the scan recurses
//! into the narrowed interval for the remaining rows. Slope comparisons use
//! half-tile offsets on both sweep boundaries, which keeps the result
//! symmetric: if A sees B, B sees A.

use std::collections::HashSet;

use crate::env::MapOracle;
use crate::types::Position;

/// Shape of the sight boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RangeShape {
    /// True circle, compared via squared Euclidean distance.
    #[default]
    Circle,
    /// Chebyshev square: diagonal sight reaches as far as orthogonal.
    Square,
}

/// Octant transforms mapping scan-space (dx, dy) onto the grid.
const OCTANTS: [[i32; 4]; 8] = [
    [1, 0, 0, 1],
    [0, 1, 1, 0],
    [0, -1, 1, 0],
    [-1, 0, 0, 1],
    [-1, 0, 0, -1],
    [0, -1, -1, 0],
    [0, 1, -1, 0],
    [1, 0, 0, -1],
];

/// Computes the set of tiles visible from `origin` within `range`.
///
/// The origin is always visible. Out-of-bounds tiles terminate recursion
/// like walls but are never part of the result. Any non-walkable terrain
/// blocks sight.
pub fn visible_tiles(
    map: &dyn MapOracle,
    origin: Position,
    range: u32,
    shape: RangeShape,
) -> HashSet<Position> {
    let mut visible = HashSet::new();
    visible.insert(origin);
    if range == 0 {
        return visible;
    }

    for octant in OCTANTS {
        cast_octant(map, origin, range as i32, 1, 1.0, 0.0, octant, shape, &mut visible);
    }
    visible
}

/// Scans one octant from `row` outward while the slope interval
/// `[start_slope, end_slope]` stays open (slopes run high to low here).
#[allow(clippy::too_many_arguments)]
fn cast_octant(
    map: &dyn MapOracle,
    origin: Position,
    range: i32,
    row: i32,
    mut start_slope: f32,
    end_slope: f32,
    octant: [i32; 4],
    shape: RangeShape,
    visible: &mut HashSet<Position>,
) {
    if start_slope < end_slope {
        return;
    }

    let mut blocked = false;
    let mut next_start = start_slope;
    for distance in row..=range {
        if blocked {
            break;
        }
        let dy = -distance;
        for dx in -distance..=0 {
            // Half-tile offsets on both edges of the cell.
            let left = (dx as f32 - 0.5) / (dy as f32 + 0.5);
            let right = (dx as f32 + 0.5) / (dy as f32 - 0.5);
            if start_slope < right {
                continue;
            }
            if end_slope > left {
                break;
            }

            let position = Position::new(
                origin.x + dx * octant[0] + dy * octant[1],
                origin.y + dx * octant[2] + dy * octant[3],
            );
            let in_bounds = map.contains(position);

            if in_bounds && within_range(dx, dy, range, shape) {
                visible.insert(position);
            }

            let blocks = !in_bounds || !map.is_walkable(position);
            if blocked {
                if blocks {
                    next_start = right;
                } else {
                    blocked = false;
                    start_slope = next_start;
                }
            } else if blocks && distance < range {
                // Everything past this wall within its angular shadow is
                // cut off; recurse into the interval left of the shadow.
                blocked = true;
                cast_octant(
                    map,
                    origin,
                    range,
                    distance + 1,
                    start_slope,
                    left,
                    octant,
                    shape,
                    visible,
                );
                next_start = right;
            }
        }
    }
}

fn within_range(dx: i32, dy: i32, range: i32, shape: RangeShape) -> bool {
    match shape {
        RangeShape::Square => dx.abs().max(dy.abs()) <= range,
        RangeShape::Circle => dx * dx + dy * dy <= range * range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, TerrainKind};

    #[test]
    fn origin_is_always_visible() {
        let mut map = GridMap::filled(3, 3, TerrainKind::Wall);
        let origin = Position::new(1, 1);
        map.set(origin, TerrainKind::Floor);

        let visible = visible_tiles(&map, origin, 0, RangeShape::Circle);
        assert!(visible.contains(&origin));
    }

    #[test]
    fn open_room_is_symmetric() {
        let map = GridMap::open(11, 11);
        let tiles: Vec<Position> = (0..11)
            .flat_map(|y| (0..11).map(move |x| Position::new(x, y)))
            .collect();

        for shape in [RangeShape::Circle, RangeShape::Square] {
            for &a in &tiles {
                let from_a = visible_tiles(&map, a, 4, shape);
                for &b in &tiles {
                    if from_a.contains(&b) {
                        let from_b = visible_tiles(&map, b, 4, shape);
                        assert!(from_b.contains(&a), "{b} cannot see {a} back ({shape:?})");
                    }
                }
            }
        }
    }

    #[test]
    fn wall_casts_a_shadow_behind_itself() {
        let mut map = GridMap::open(13, 13);
        let origin = Position::new(2, 6);
        let wall = Position::new(4, 6);
        map.set(wall, TerrainKind::Wall);

        let visible = visible_tiles(&map, origin, 8, RangeShape::Square);
        assert!(visible.contains(&wall), "the wall itself stays visible");
        assert!(!visible.contains(&Position::new(5, 6)));
        assert!(!visible.contains(&Position::new(6, 6)));

        // Tiles outside the wall's angular shadow are untouched.
        assert!(visible.contains(&Position::new(6, 4)));
        assert!(visible.contains(&Position::new(6, 8)));
    }

    #[test]
    fn out_of_bounds_is_never_reported() {
        let map = GridMap::open(4, 4);
        let visible = visible_tiles(&map, Position::new(0, 0), 6, RangeShape::Square);
        for position in &visible {
            assert!(map.contains(*position));
        }
    }

    #[test]
    fn circle_clips_corners_the_square_keeps() {
        let map = GridMap::open(9, 9);
        let origin = Position::new(4, 4);
        let corner = Position::new(7, 7); // distance 3 diagonal, 18 > 3^2

        let square = visible_tiles(&map, origin, 3, RangeShape::Square);
        let circle = visible_tiles(&map, origin, 3, RangeShape::Circle);
        assert!(square.contains(&corner));
        assert!(!circle.contains(&corner));
        assert!(circle.contains(&Position::new(7, 4)));
    }

    #[test]
    fn blocking_respects_a_doorway() {
        // Wall column with one gap: tiles behind the gap are visible,
        // tiles behind the wall are not.
        let mut map = GridMap::open(9, 9);
        map.set_line(Position::new(4, 0), Position::new(4, 8), TerrainKind::Wall);
        let door = Position::new(4, 4);
        map.set(door, TerrainKind::Floor);

        let origin = Position::new(2, 4);
        let visible = visible_tiles(&map, origin, 6, RangeShape::Square);
        assert!(visible.contains(&Position::new(6, 4)));
        assert!(!visible.contains(&Position::new(6, 0)));
        assert!(!visible.contains(&Position::new(6, 8)));
    }
}
