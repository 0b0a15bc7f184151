//! Robot-private incremental map of the world.
//!
//! Each robot re-discovers the grid on its own: nothing is shared between
//! agents. The map is a sparse classification keyed by coordinate; absent
//! coordinates are implicitly frontier (unknown, assumed passable for
//! planning). Charging station coordinates are tracked in a separate set
//! so they survive reclassification of the cell itself.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::coord::GridCoord;
use crate::grid::Cell;

/// What a robot knows about one coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKnowledge {
    /// Known to exist but passability never observed
    Frontier,
    /// Observed obstacle-free, not yet occupied
    Free,
    /// Observed to contain an obstacle
    Blocked,
    /// Physically occupied at least once
    Visited,
}

impl CellKnowledge {
    /// Can a path be planned through this cell? Frontier cells are
    /// optimistically assumed passable.
    #[inline]
    pub fn is_traversable(self) -> bool {
        self != CellKnowledge::Blocked
    }
}

/// A robot's incrementally built map.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeMap {
    pub(crate) cells: HashMap<GridCoord, CellKnowledge>,
    pub(crate) stations: HashSet<GridCoord>,
}

impl KnowledgeMap {
    /// Create a map seeded with the robot's start cell and home station.
    pub fn new(start: GridCoord, home_station: GridCoord) -> Self {
        let mut map = Self::default();
        map.stations.insert(home_station);
        map.cells.insert(home_station, CellKnowledge::Free);
        map.cells.insert(start, CellKnowledge::Visited);
        map
    }

    /// Classification of a coordinate. Total: unseen coordinates are
    /// `Frontier`.
    #[inline]
    pub fn classify(&self, coord: GridCoord) -> CellKnowledge {
        self.cells
            .get(&coord)
            .copied()
            .unwrap_or(CellKnowledge::Frontier)
    }

    /// Fold one local observation into the map.
    ///
    /// Marks the robot's own cell Visited and classifies each neighbor
    /// from its occupants. Free and Visited cells are never re-marked
    /// Blocked (confirmed-clear cells stay clear); a Blocked cell observed
    /// without an obstacle is corrected back to Free, which handles
    /// transient obstacles.
    pub fn scan<'a, I>(&mut self, position: GridCoord, neighborhood: I)
    where
        I: IntoIterator<Item = (GridCoord, &'a Cell)>,
    {
        self.cells.insert(position, CellKnowledge::Visited);

        for (coord, cell) in neighborhood {
            self.cells.entry(coord).or_insert(CellKnowledge::Frontier);

            if cell.has_station() && self.stations.insert(coord) {
                debug!("discovered station at ({}, {})", coord.x, coord.y);
            }

            match (cell.has_obstacle(), self.classify(coord)) {
                // Confirmed-clear cells are never downgraded by a scan.
                (true, CellKnowledge::Free) | (true, CellKnowledge::Visited) => {}
                (true, _) => {
                    self.cells.insert(coord, CellKnowledge::Blocked);
                }
                (false, CellKnowledge::Blocked) => {
                    // The obstacle we remembered is gone.
                    self.cells.insert(coord, CellKnowledge::Free);
                }
                (false, CellKnowledge::Frontier) if cell.has_station() => {
                    self.cells.insert(coord, CellKnowledge::Free);
                }
                (false, _) => {}
            }
        }
    }

    /// Mark a coordinate as physically visited. Also used to retire an
    /// unreachable frontier so it is never targeted again.
    #[inline]
    pub fn mark_visited(&mut self, coord: GridCoord) {
        self.cells.insert(coord, CellKnowledge::Visited);
    }

    /// All coordinates currently classified Frontier.
    pub fn frontiers(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells
            .iter()
            .filter(|(_, &k)| k == CellKnowledge::Frontier)
            .map(|(&c, _)| c)
    }

    /// Known charging station coordinates.
    #[inline]
    pub fn stations(&self) -> &HashSet<GridCoord> {
        &self.stations
    }

    /// Is this coordinate a known charging station?
    #[inline]
    pub fn is_station(&self, coord: GridCoord) -> bool {
        self.stations.contains(&coord)
    }

    /// Number of coordinates with an explicit classification.
    pub fn known_cells(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridWorld;

    fn scan_at(map: &mut KnowledgeMap, world: &GridWorld, position: GridCoord) {
        map.scan(position, world.neighborhood(position));
    }

    #[test]
    fn test_initial_state() {
        let start = GridCoord::new(1, 1);
        let map = KnowledgeMap::new(start, start);
        // Start doubles as the home station: Visited wins for the cell,
        // station membership is tracked separately.
        assert_eq!(map.classify(start), CellKnowledge::Visited);
        assert!(map.is_station(start));
    }

    #[test]
    fn test_classify_is_total() {
        let map = KnowledgeMap::default();
        assert_eq!(
            map.classify(GridCoord::new(37, -4)),
            CellKnowledge::Frontier
        );
    }

    #[test]
    fn test_scan_classifies_neighbors() {
        let mut world = GridWorld::new(5, 5);
        world.place_obstacle(GridCoord::new(2, 1));
        world.place_station(GridCoord::new(1, 2));

        let position = GridCoord::new(2, 2);
        let mut map = KnowledgeMap::default();
        scan_at(&mut map, &world, position);

        assert_eq!(map.classify(position), CellKnowledge::Visited);
        assert_eq!(map.classify(GridCoord::new(2, 1)), CellKnowledge::Blocked);
        assert_eq!(map.classify(GridCoord::new(1, 2)), CellKnowledge::Free);
        assert!(map.is_station(GridCoord::new(1, 2)));
        // Everything else in the neighborhood is frontier.
        assert_eq!(map.classify(GridCoord::new(3, 3)), CellKnowledge::Frontier);
        assert_eq!(map.known_cells(), 9);
    }

    #[test]
    fn test_visited_never_downgraded_to_blocked() {
        let mut world = GridWorld::new(5, 5);
        let position = GridCoord::new(2, 2);
        let neighbor = GridCoord::new(2, 3);

        let mut map = KnowledgeMap::default();
        map.mark_visited(neighbor);
        world.place_obstacle(neighbor);
        scan_at(&mut map, &world, position);

        assert_eq!(map.classify(neighbor), CellKnowledge::Visited);
    }

    #[test]
    fn test_free_never_downgraded_to_blocked() {
        let mut world = GridWorld::new(5, 5);
        let position = GridCoord::new(2, 2);
        let neighbor = GridCoord::new(3, 2);

        // First scan sees no obstacle there and a station confirms Free.
        world.place_station(neighbor);
        let mut map = KnowledgeMap::default();
        scan_at(&mut map, &world, position);
        assert_eq!(map.classify(neighbor), CellKnowledge::Free);

        world.place_obstacle(neighbor);
        scan_at(&mut map, &world, position);
        assert_eq!(map.classify(neighbor), CellKnowledge::Free);
    }

    #[test]
    fn test_blocked_corrected_to_free() {
        let mut world = GridWorld::new(5, 5);
        let position = GridCoord::new(2, 2);
        let neighbor = GridCoord::new(1, 1);

        world.place_obstacle(neighbor);
        let mut map = KnowledgeMap::default();
        scan_at(&mut map, &world, position);
        assert_eq!(map.classify(neighbor), CellKnowledge::Blocked);

        // Obstacle disappears; the next scan corrects the marking.
        let cleared = GridWorld::new(5, 5);
        scan_at(&mut map, &cleared, position);
        assert_eq!(map.classify(neighbor), CellKnowledge::Free);
    }
}
