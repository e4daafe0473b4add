//! Single-target A* over the tile grid.
//!
//! Two entry points share the machinery: [`find_path`] is the hard-obstacle
//! mode (walkable terrain, other creatures exclude a cell outright), and
//! [`find_path_weighted`] searches a [`CostGrid`] so capability-priced
//! terrain and soft avoidance can shape the route.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::costs::CostGrid;
use crate::env::{MapOracle, OccupancyOracle};
use crate::types::{EntityId, Position};

/// Frontier entry ordered by f = g + h. Position fields participate in the
/// ordering only to keep tie-breaking deterministic.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    x: i32,
    y: i32,
}

/// Finds a path from `start` to `goal` for `mover`.
///
/// Classic A*: 8-way neighbor expansion at uniform step cost 1, Chebyshev
/// heuristic (admissible and consistent for this move set). A cell is
/// excluded when it is out of bounds, not walkable, or held by another
/// creature. The destination itself is exempt from the occupancy check so
/// a creature can path up to an attack target.
///
/// Returns the steps after `start` through `goal` inclusive. `start == goal`
/// yields an empty path; an unwalkable goal yields `None` without searching.
/// `None` is a normal outcome, not an error.
pub fn find_path(
    map: &dyn MapOracle,
    occupancy: &dyn OccupancyOracle,
    mover: EntityId,
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    if start == goal {
        return Some(Vec::new());
    }
    if !map.is_walkable(goal) {
        return None;
    }

    let mut frontier = BinaryHeap::new();
    let mut g_score: HashMap<Position, u32> = HashMap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();

    let h = start.chebyshev(goal);
    frontier.push(Reverse(OpenNode {
        f: h,
        h,
        x: start.x,
        y: start.y,
    }));
    g_score.insert(start, 0);

    while let Some(Reverse(node)) = frontier.pop() {
        let current = Position::new(node.x, node.y);
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        let current_g = g_score[&current];
        // Stale heap entry for a node already expanded more cheaply.
        if node.f > current_g + node.h {
            continue;
        }

        for neighbor in current.neighbors() {
            if !map.is_walkable(neighbor) {
                continue;
            }
            if neighbor != goal && occupancy.is_blocked_for(neighbor, mover) {
                continue;
            }

            let tentative = current_g + 1;
            if tentative < g_score.get(&neighbor).copied().unwrap_or(u32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                let h = neighbor.chebyshev(goal);
                frontier.push(Reverse(OpenNode {
                    f: tentative + h,
                    h,
                    x: neighbor.x,
                    y: neighbor.y,
                }));
            }
        }
    }

    None
}

/// Frontier entry for the weighted search. Ordered by `f` via `total_cmp`,
/// then by position for deterministic tie-breaking.
#[derive(Clone, Copy, PartialEq)]
struct WeightedNode {
    f: f32,
    x: i32,
    y: i32,
}

impl Eq for WeightedNode {}

impl Ord for WeightedNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
    }
}

impl PartialOrd for WeightedNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Cost-aware A* over a prebuilt [`CostGrid`].
///
/// `g` accumulates the entry cost of each cell; the Chebyshev heuristic
/// stays admissible because no cell costs less than 1. Cells the grid marks
/// impassable never enter the frontier, so a burrower's wall shows up as a
/// 50-cost step while a non-burrower's wall never does.
pub fn find_path_weighted(
    costs: &CostGrid,
    start: Position,
    goal: Position,
) -> Option<Vec<Position>> {
    if start == goal {
        return Some(Vec::new());
    }
    if !costs.is_passable(goal) {
        return None;
    }

    let mut frontier = BinaryHeap::new();
    let mut g_score: HashMap<Position, f32> = HashMap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();

    frontier.push(Reverse(WeightedNode {
        f: start.chebyshev(goal) as f32,
        x: start.x,
        y: start.y,
    }));
    g_score.insert(start, 0.0);

    while let Some(Reverse(node)) = frontier.pop() {
        let current = Position::new(node.x, node.y);
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        let current_g = g_score[&current];
        if node.f > current_g + current.chebyshev(goal) as f32 {
            continue;
        }

        for neighbor in current.neighbors() {
            if !costs.is_passable(neighbor) {
                continue;
            }

            let tentative = current_g + costs.cost(neighbor);
            if tentative < g_score.get(&neighbor).copied().unwrap_or(f32::INFINITY) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                frontier.push(Reverse(WeightedNode {
                    f: tentative + neighbor.chebyshev(goal) as f32,
                    x: neighbor.x,
                    y: neighbor.y,
                }));
            }
        }
    }

    None
}

fn reconstruct(
    came_from: &HashMap<Position, Position>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.pop(); // drop start
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::Capabilities;
    use crate::env::{GridMap, NoOccupancy, OccupancySnapshot, TerrainKind};

    const MOVER: EntityId = EntityId(1);

    #[test]
    fn open_grid_diagonal_is_optimal() {
        let map = GridMap::open(5, 5);
        let path = find_path(
            &map,
            &NoOccupancy,
            MOVER,
            Position::new(0, 0),
            Position::new(4, 4),
        )
        .expect("open grid must be traversable");

        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Position::new(4, 4)));
    }

    #[test]
    fn start_equals_goal_returns_empty_path() {
        let map = GridMap::open(3, 3);
        let at = Position::new(1, 1);
        assert_eq!(find_path(&map, &NoOccupancy, MOVER, at, at), Some(vec![]));
    }

    #[test]
    fn unwalkable_goal_fails_without_search() {
        let mut map = GridMap::open(3, 3);
        map.set(Position::new(2, 2), TerrainKind::Wall);
        assert_eq!(
            find_path(
                &map,
                &NoOccupancy,
                MOVER,
                Position::new(0, 0),
                Position::new(2, 2)
            ),
            None
        );
    }

    #[test]
    fn occupied_destination_is_still_reachable() {
        let map = GridMap::open(5, 5);
        let mut occupancy = OccupancySnapshot::new();
        let target = Position::new(4, 0);
        occupancy.place(EntityId::PLAYER, target);

        let path = find_path(&map, &occupancy, MOVER, Position::new(0, 0), target)
            .expect("occupied destination must be pathable");
        assert_eq!(path.last(), Some(&target));
    }

    #[test]
    fn occupied_cell_mid_route_is_excluded() {
        // Single-file corridor at y = 0 with a creature parked in the middle.
        let mut map = GridMap::filled(5, 3, TerrainKind::Wall);
        map.set_line(Position::new(0, 0), Position::new(4, 0), TerrainKind::Floor);
        let mut occupancy = OccupancySnapshot::new();
        occupancy.place(EntityId(8), Position::new(2, 0));

        assert_eq!(
            find_path(&map, &occupancy, MOVER, Position::new(0, 0), Position::new(4, 0)),
            None
        );
    }

    #[test]
    fn walls_force_a_detour() {
        let mut map = GridMap::open(5, 5);
        map.set_line(Position::new(2, 0), Position::new(2, 3), TerrainKind::Wall);

        let path = find_path(
            &map,
            &NoOccupancy,
            MOVER,
            Position::new(0, 0),
            Position::new(4, 0),
        )
        .expect("gap at (2, 4) keeps the sides connected");
        assert!(path.len() > 4);
        assert!(path.iter().all(|step| map.is_walkable(*step)));
    }

    #[test]
    fn weighted_search_detours_around_soft_obstacles() {
        // Straight line is 4 steps; the middle tile is occupied (cost 10),
        // so the 5-step detour through the open row wins.
        let map = GridMap::open(5, 2);
        let mut occupancy = OccupancySnapshot::new();
        occupancy.place(EntityId(8), Position::new(2, 0));
        let costs = CostGrid::build(&map, &occupancy, MOVER, Capabilities::default());

        let path = find_path_weighted(&costs, Position::new(0, 0), Position::new(4, 0))
            .expect("detour row is open");
        assert!(!path.contains(&Position::new(2, 0)));
    }

    #[test]
    fn burrower_digs_when_the_detour_is_long() {
        // Wall column fully severs the map; only a digger gets across.
        let mut map = GridMap::open(7, 3);
        map.set_line(Position::new(3, 0), Position::new(3, 2), TerrainKind::Wall);

        let walker = CostGrid::build(&map, &NoOccupancy, MOVER, Capabilities::default());
        assert_eq!(
            find_path_weighted(&walker, Position::new(0, 1), Position::new(6, 1)),
            None
        );

        let digger = CostGrid::build(
            &map,
            &NoOccupancy,
            MOVER,
            Capabilities::default() | Capabilities::BURROWING,
        );
        let path = find_path_weighted(&digger, Position::new(0, 1), Position::new(6, 1))
            .expect("burrower tunnels through");
        assert!(path.iter().any(|step| step.x == 3));
    }
}
