//! Shared grid world: cell storage and occupancy.
//!
//! The world is a dense width x height grid. Each cell can hold several
//! occupants at once (a robot standing on trash, a robot parked on its
//! charging station), so occupancy is a closed set of flags rather than a
//! single cell type. At most one robot occupies a cell at a time; that
//! invariant is what keeps the turn-based simulation collision-free.

use crate::coord::{GridBounds, GridCoord};

/// Identifier of a robot agent, assigned at world generation.
pub type RobotId = usize;

/// One kind of cell occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    /// Impassable obstacle (wall or furniture)
    Obstacle,
    /// A piece of trash waiting to be cleaned
    Trash,
    /// A charging station
    Station,
    /// A robot, by id
    Robot(RobotId),
}

/// Occupancy state of a single grid cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    obstacle: bool,
    trash: bool,
    station: bool,
    robot: Option<RobotId>,
}

impl Cell {
    /// Does this cell contain an obstacle?
    #[inline]
    pub fn has_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Does this cell contain trash?
    #[inline]
    pub fn has_trash(&self) -> bool {
        self.trash
    }

    /// Does this cell contain a charging station?
    #[inline]
    pub fn has_station(&self) -> bool {
        self.station
    }

    /// The robot occupying this cell, if any.
    #[inline]
    pub fn robot(&self) -> Option<RobotId> {
        self.robot
    }

    /// Is the cell completely empty?
    pub fn is_empty(&self) -> bool {
        !self.obstacle && !self.trash && !self.station && self.robot.is_none()
    }

    /// All occupants of this cell.
    pub fn occupants(&self) -> Vec<Occupant> {
        let mut out = Vec::new();
        if self.obstacle {
            out.push(Occupant::Obstacle);
        }
        if self.trash {
            out.push(Occupant::Trash);
        }
        if self.station {
            out.push(Occupant::Station);
        }
        if let Some(id) = self.robot {
            out.push(Occupant::Robot(id));
        }
        out
    }
}

/// The shared 2-D grid world.
///
/// Owns cell occupancy only; robot agents themselves live outside the
/// grid and reference it through their coordinate.
#[derive(Clone, Debug)]
pub struct GridWorld {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl GridWorld {
    /// Create an empty world of the given size.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bounds covering the whole grid.
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        self.bounds().contains(coord)
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> usize {
        (coord.y as usize) * (self.width as usize) + (coord.x as usize)
    }

    /// The cell at a coordinate, or `None` outside the grid.
    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        if self.in_bounds(coord) {
            Some(&self.cells[self.index(coord)])
        } else {
            None
        }
    }

    fn cell_mut(&mut self, coord: GridCoord) -> Option<&mut Cell> {
        if self.in_bounds(coord) {
            let idx = self.index(coord);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// The Moore (8-connected) neighborhood of a coordinate, in-bounds
    /// cells only.
    pub fn neighborhood(&self, coord: GridCoord) -> Vec<(GridCoord, &Cell)> {
        coord
            .neighbors_8()
            .into_iter()
            .filter(|&n| self.in_bounds(n))
            .map(|n| (n, &self.cells[self.index(n)]))
            .collect()
    }

    /// Place an obstacle. Fails on out-of-bounds or occupied cells.
    pub fn place_obstacle(&mut self, coord: GridCoord) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if cell.is_empty() => {
                cell.obstacle = true;
                true
            }
            _ => false,
        }
    }

    /// Place one piece of trash. At most one per cell, never on obstacles.
    pub fn place_trash(&mut self, coord: GridCoord) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if !cell.obstacle && !cell.trash => {
                cell.trash = true;
                true
            }
            _ => false,
        }
    }

    /// Place a charging station. Never on obstacles or other stations.
    pub fn place_station(&mut self, coord: GridCoord) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if !cell.obstacle && !cell.station => {
                cell.station = true;
                true
            }
            _ => false,
        }
    }

    /// Place a robot. Fails if the cell is blocked or already holds a robot.
    pub fn place_robot(&mut self, coord: GridCoord, id: RobotId) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if !cell.obstacle && cell.robot.is_none() => {
                cell.robot = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Move a robot one cell. The single physical move primitive: callers
    /// have already validated the target, so violations are bugs.
    pub fn relocate(&mut self, id: RobotId, from: GridCoord, to: GridCoord) {
        debug_assert_eq!(
            from.chebyshev_distance(&to),
            1,
            "relocate must move exactly one cell"
        );
        debug_assert_eq!(self.cell(from).and_then(Cell::robot), Some(id));
        debug_assert!(self
            .cell(to)
            .map_or(false, |c| !c.has_obstacle() && c.robot().is_none()));

        if let Some(cell) = self.cell_mut(from) {
            cell.robot = None;
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.robot = Some(id);
        }
    }

    /// Remove trash from a cell. Returns whether there was any.
    pub fn remove_trash(&mut self, coord: GridCoord) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if cell.trash => {
                cell.trash = false;
                true
            }
            _ => false,
        }
    }

    /// Number of trash pieces left in the world.
    pub fn trash_remaining(&self) -> usize {
        self.cells.iter().filter(|c| c.trash).count()
    }

    /// All completely empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<GridCoord> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let coord = GridCoord::new(x, y);
                if self.cells[self.index(coord)].is_empty() {
                    out.push(coord);
                }
            }
        }
        out
    }
}
