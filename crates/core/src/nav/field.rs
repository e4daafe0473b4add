//! Multi-source distance fields built by simultaneous flood fill.
//!
//! One BFS from every goal cell at once answers "how far is the nearest of
//! N goals" for the whole map, which is far cheaper than N single-target
//! searches. Gradient descent over the finished field reconstructs a route;
//! ascending the same field is the natural basis for flee behavior.

use std::collections::VecDeque;

use crate::env::{MapDimensions, MapOracle, OccupancyOracle};
use crate::types::{EntityId, Position};

/// Sentinel distance for cells no goal can reach.
pub const UNREACHABLE: f32 = f32::INFINITY;

/// Grid of shortest distances to the nearest goal cell.
#[derive(Clone, Debug)]
pub struct DistanceField {
    dimensions: MapDimensions,
    cells: Vec<f32>,
}

impl DistanceField {
    /// Floods from every goal, ignoring creature occupancy entirely.
    ///
    /// This is the static influence-map form; use it when the field will be
    /// consulted for many creatures or inverted for flee gradients.
    pub fn build(map: &dyn MapOracle, goals: &[Position]) -> Self {
        Self::flood(map, goals, None, EntityId::PLAYER)
    }

    /// Floods from every goal, refusing to route through tiles held by a
    /// creature other than `mover`.
    pub fn build_avoiding(
        map: &dyn MapOracle,
        goals: &[Position],
        occupancy: &dyn OccupancyOracle,
        mover: EntityId,
    ) -> Self {
        Self::flood(map, goals, Some(occupancy), mover)
    }

    fn flood(
        map: &dyn MapOracle,
        goals: &[Position],
        occupancy: Option<&dyn OccupancyOracle>,
        mover: EntityId,
    ) -> Self {
        let dimensions = map.dimensions();
        let mut cells = vec![UNREACHABLE; dimensions.area()];
        let mut queue = VecDeque::new();

        // Goal cells seed at 0 even when occupied; the exclusion only
        // applies to transit cells.
        for &goal in goals {
            if let Some(index) = index_of(dimensions, goal)
                && cells[index].is_infinite()
            {
                cells[index] = 0.0;
                queue.push_back((goal, 0u32));
            }
        }

        while let Some((current, distance)) = queue.pop_front() {
            for neighbor in current.neighbors() {
                let Some(index) = index_of(dimensions, neighbor) else {
                    continue;
                };
                if !cells[index].is_infinite() {
                    continue;
                }
                if !map.is_walkable(neighbor) {
                    continue;
                }
                if let Some(occupancy) = occupancy
                    && occupancy.is_blocked_for(neighbor, mover)
                {
                    continue;
                }
                cells[index] = (distance + 1) as f32;
                queue.push_back((neighbor, distance + 1));
            }
        }

        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    /// Recorded distance to the nearest goal, [`UNREACHABLE`] when no goal
    /// connects (or the position is out of bounds).
    pub fn distance(&self, position: Position) -> f32 {
        index_of(self.dimensions, position)
            .map(|index| self.cells[index])
            .unwrap_or(UNREACHABLE)
    }

    /// One step of gradient descent: the neighbor with the strictly smallest
    /// recorded distance below `start`'s own.
    ///
    /// Returns `None` when `start` is already on a goal (distance 0) or is
    /// unreachable. Ties break toward the first match in direction order.
    pub fn step_toward(&self, start: Position) -> Option<Position> {
        let here = self.distance(start);
        if here == 0.0 || here.is_infinite() {
            return None;
        }

        let mut best: Option<(Position, f32)> = None;
        for neighbor in start.neighbors() {
            let there = self.distance(neighbor);
            if there < here && best.is_none_or(|(_, current)| there < current) {
                best = Some((neighbor, there));
            }
        }
        best.map(|(position, _)| position)
    }

    /// One step of gradient ascent: the neighbor with the strictly largest
    /// finite distance above `start`'s own. This is the flee direction when
    /// the field was flooded from a danger set.
    pub fn step_away(&self, start: Position) -> Option<Position> {
        let here = self.distance(start);
        if here.is_infinite() {
            return None;
        }

        let mut best: Option<(Position, f32)> = None;
        for neighbor in start.neighbors() {
            let there = self.distance(neighbor);
            if there.is_finite()
                && there > here
                && best.is_none_or(|(_, current)| there > current)
            {
                best = Some((neighbor, there));
            }
        }
        best.map(|(position, _)| position)
    }

    /// Full gradient-descent route from `start` to the nearest goal.
    ///
    /// Bounded by width × height iterations as a safety valve against any
    /// inconsistency in the field; hitting the bound, or starting from an
    /// unreachable cell, yields `None`.
    pub fn path_to_nearest(&self, start: Position) -> Option<Vec<Position>> {
        if self.distance(start).is_infinite() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = start;
        for _ in 0..self.dimensions.area() {
            match self.step_toward(current) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => {
                    return (self.distance(current) == 0.0).then_some(path);
                }
            }
        }
        None
    }
}

fn index_of(dimensions: MapDimensions, position: Position) -> Option<usize> {
    dimensions
        .contains(position)
        .then(|| position.y as usize * dimensions.width as usize + position.x as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GridMap, OccupancySnapshot, TerrainKind};

    #[test]
    fn every_cell_records_distance_to_the_nearer_goal() {
        let map = GridMap::open(7, 7);
        let goals = [Position::new(0, 0), Position::new(6, 6)];
        let field = DistanceField::build(&map, &goals);

        for y in 0..7 {
            for x in 0..7 {
                let position = Position::new(x, y);
                let expected = goals
                    .iter()
                    .map(|goal| position.chebyshev(*goal))
                    .min()
                    .unwrap() as f32;
                assert_eq!(field.distance(position), expected, "at {position}");
            }
        }
    }

    #[test]
    fn goal_cells_are_zero_and_walls_stay_unreachable() {
        let mut map = GridMap::open(5, 5);
        map.set(Position::new(2, 2), TerrainKind::Wall);
        let field = DistanceField::build(&map, &[Position::new(0, 0)]);

        assert_eq!(field.distance(Position::new(0, 0)), 0.0);
        assert_eq!(field.distance(Position::new(2, 2)), UNREACHABLE);
        assert_eq!(field.distance(Position::new(9, 9)), UNREACHABLE);
    }

    #[test]
    fn isolated_region_is_unreachable_and_terminates() {
        // Wall column splits the map; goal on the far side.
        let mut map = GridMap::open(7, 5);
        map.set_line(Position::new(3, 0), Position::new(3, 4), TerrainKind::Wall);
        let field = DistanceField::build(&map, &[Position::new(6, 2)]);

        let stranded = Position::new(1, 2);
        assert_eq!(field.distance(stranded), UNREACHABLE);
        assert_eq!(field.path_to_nearest(stranded), None);
        assert_eq!(field.step_toward(stranded), None);
    }

    #[test]
    fn path_to_nearest_descends_to_a_goal() {
        let map = GridMap::open(8, 8);
        let goals = [Position::new(0, 0), Position::new(7, 7)];
        let field = DistanceField::build(&map, &goals);

        let start = Position::new(6, 5);
        let path = field.path_to_nearest(start).expect("open map");
        assert!(path.len() <= map.dimensions().area());
        assert_eq!(path.last(), Some(&Position::new(7, 7)));

        // Each step strictly decreases the recorded distance.
        let mut previous = field.distance(start);
        for step in &path {
            let here = field.distance(*step);
            assert!(here < previous);
            previous = here;
        }
    }

    #[test]
    fn step_away_climbs_the_gradient() {
        let map = GridMap::open(9, 9);
        let threat = Position::new(4, 4);
        let field = DistanceField::build(&map, &[threat]);

        let mut current = Position::new(5, 4);
        for _ in 0..3 {
            let next = field.step_away(current).expect("room to retreat");
            assert!(field.distance(next) > field.distance(current));
            current = next;
        }
    }

    #[test]
    fn avoiding_variant_routes_around_creatures() {
        // Corridor with another creature in the middle: the field stops at it.
        let mut map = GridMap::filled(5, 1, TerrainKind::Wall);
        map.set_line(Position::new(0, 0), Position::new(4, 0), TerrainKind::Floor);
        let mut occupancy = OccupancySnapshot::new();
        occupancy.place(EntityId(5), Position::new(2, 0));

        let field = DistanceField::build_avoiding(
            &map,
            &[Position::new(0, 0)],
            &occupancy,
            EntityId(1),
        );
        assert_eq!(field.distance(Position::new(4, 0)), UNREACHABLE);

        let ignoring = DistanceField::build(&map, &[Position::new(0, 0)]);
        assert_eq!(ignoring.distance(Position::new(4, 0)), 4.0);
    }
}
