//! Breadth-first pathfinding over a robot's knowledge map.
//!
//! Plain BFS on the 4-connected grid: the returned path is shortest in
//! step count. Frontier cells are optimistically treated as passable, so
//! a plan may later turn out blocked; callers replan when the next step
//! of a cached route stops being traversable.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::coord::{GridBounds, GridCoord};
use crate::knowledge::{CellKnowledge, KnowledgeMap};

/// Fixed expansion order: down, up, left, right. This order is the
/// tie-break between equal-length paths and must stay stable for
/// deterministic replay.
const DIRECTIONS: [GridCoord; 4] = [
    GridCoord { x: 0, y: 1 },
    GridCoord { x: 0, y: -1 },
    GridCoord { x: -1, y: 0 },
    GridCoord { x: 1, y: 0 },
];

/// Find a shortest path from `start` to `goal` through cells not known to
/// be blocked.
///
/// Returns the full path including both endpoints, or `None` when the
/// goal is unreachable through known-non-blocked cells. Does not mutate
/// the map.
pub fn find_path(
    start: GridCoord,
    goal: GridCoord,
    map: &KnowledgeMap,
    bounds: GridBounds,
) -> Option<Vec<GridCoord>> {
    let mut queue = VecDeque::new();
    let mut visited: HashSet<GridCoord> = HashSet::new();
    let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();

    queue.push_back(start);
    visited.insert(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        for offset in DIRECTIONS {
            let next = current + offset;
            if !bounds.contains(next) || visited.contains(&next) {
                continue;
            }
            if map.classify(next) == CellKnowledge::Blocked {
                continue;
            }
            visited.insert(next);
            came_from.insert(next, current);
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct(
    came_from: &HashMap<GridCoord, GridCoord>,
    start: GridCoord,
    goal: GridCoord,
) -> Vec<GridCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridWorld;

    /// Scan every cell of the world into the map so BFS sees the full
    /// obstacle layout.
    fn full_knowledge(world: &GridWorld) -> KnowledgeMap {
        let mut map = KnowledgeMap::default();
        for y in 0..world.height() {
            for x in 0..world.width() {
                let coord = GridCoord::new(x, y);
                if world.cell(coord).map_or(false, |c| !c.has_obstacle()) {
                    map.scan(coord, world.neighborhood(coord));
                }
            }
        }
        map
    }

    #[test]
    fn test_straight_line_is_shortest() {
        let map = KnowledgeMap::default();
        let bounds = GridBounds::new(10, 10);
        let path = find_path(GridCoord::new(1, 1), GridCoord::new(1, 5), &map, bounds).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], GridCoord::new(1, 1));
        assert_eq!(path[4], GridCoord::new(1, 5));
    }

    #[test]
    fn test_start_equals_goal() {
        let map = KnowledgeMap::default();
        let bounds = GridBounds::new(3, 3);
        let path = find_path(GridCoord::new(1, 1), GridCoord::new(1, 1), &map, bounds).unwrap();
        assert_eq!(path, vec![GridCoord::new(1, 1)]);
    }

    #[test]
    fn test_tie_break_prefers_down_first() {
        // Two equal-length paths from (0,0) to (1,1); the fixed expansion
        // order reaches (1,1) through (0,1) first.
        let map = KnowledgeMap::default();
        let bounds = GridBounds::new(5, 5);
        let path = find_path(GridCoord::new(0, 0), GridCoord::new(1, 1), &map, bounds).unwrap();
        assert_eq!(
            path,
            vec![GridCoord::new(0, 0), GridCoord::new(0, 1), GridCoord::new(1, 1)]
        );
    }

    #[test]
    fn test_detour_around_wall() {
        // Vertical wall at x=2 with a gap at y=4.
        let mut world = GridWorld::new(6, 6);
        for y in 0..4 {
            world.place_obstacle(GridCoord::new(2, y));
        }
        let map = full_knowledge(&world);
        let bounds = world.bounds();

        let path = find_path(GridCoord::new(1, 0), GridCoord::new(3, 0), &map, bounds).unwrap();
        // Down to the gap, across, back up: 2 + 8 steps + endpoints.
        assert_eq!(path.len(), 11);
        assert!(path.iter().all(|&c| map.classify(c).is_traversable()));
        assert!(path.contains(&GridCoord::new(2, 4)));
    }

    #[test]
    fn test_unreachable_returns_none() {
        // Goal walled off on all four sides.
        let mut world = GridWorld::new(6, 6);
        let goal = GridCoord::new(4, 4);
        for offset in goal.neighbors_4() {
            world.place_obstacle(offset);
        }
        let map = full_knowledge(&world);

        assert!(find_path(GridCoord::new(0, 0), goal, &map, world.bounds()).is_none());
    }

    #[test]
    fn test_frontier_cells_are_traversable() {
        // Empty map: everything is implicit frontier, and BFS still
        // routes through it.
        let map = KnowledgeMap::default();
        let bounds = GridBounds::new(20, 20);
        let path =
            find_path(GridCoord::new(0, 0), GridCoord::new(19, 19), &map, bounds).unwrap();
        assert_eq!(path.len(), 39);
    }
}
