//! World generation.
//!
//! Builds the initial grid: a border ring of obstacles, randomly placed
//! interior obstacles, scattered trash (at most one per cell), and one
//! charging station per robot with the robot starting on it. All
//! placement is driven by a single master RNG; per-robot tie-break RNGs
//! and the driver's shuffle seed are derived from it so one configured
//! seed reproduces the entire run.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

use swachh_map::{GridCoord, GridWorld, RobotAgent};

use crate::config::SimConfig;
use crate::error::{Result, SwachhError};

/// A generated world, ready to hand to the driver.
pub struct World {
    pub grid: GridWorld,
    pub robots: Vec<RobotAgent>,
    /// Seed for the driver's per-tick shuffle RNG, derived from the
    /// master seed.
    pub driver_seed: u64,
}

/// Generate a world from the configuration.
///
/// Fails on degenerate configurations: a pinned start cell that is out
/// of bounds or obstructed, or too few empty cells for the requested
/// robots. Setup failures are fatal and never retried.
pub fn generate(config: &SimConfig) -> Result<World> {
    let wc = &config.world;
    if wc.width < 3 || wc.height < 3 {
        return Err(SwachhError::Setup(format!(
            "grid {}x{} leaves no interior inside the border",
            wc.width, wc.height
        )));
    }

    let mut rng = if config.run.seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(config.run.seed)
    };

    let mut grid = GridWorld::new(wc.width, wc.height);

    // Border ring of obstacles.
    for x in 0..wc.width {
        grid.place_obstacle(GridCoord::new(x, 0));
        grid.place_obstacle(GridCoord::new(x, wc.height - 1));
    }
    for y in 1..wc.height - 1 {
        grid.place_obstacle(GridCoord::new(0, y));
        grid.place_obstacle(GridCoord::new(wc.width - 1, y));
    }

    // Reserve the pinned start before obstacles can land on it.
    let pinned = wc.start_cell.map(|[x, y]| GridCoord::new(x, y));
    if let Some(start) = pinned {
        if grid.cell(start).map_or(true, |c| !c.is_empty()) {
            return Err(SwachhError::Setup(format!(
                "no usable start cell at ({}, {})",
                start.x, start.y
            )));
        }
        if !grid.place_station(start) {
            return Err(SwachhError::Setup(format!(
                "could not place station at ({}, {})",
                start.x, start.y
            )));
        }
    }

    // Interior obstacles on a sample of the empty cells.
    let empties = grid.empty_cells();
    let num_obstacles = (empties.len() as f32 * wc.obstacle_ratio) as usize;
    for &coord in empties.choose_multiple(&mut rng, num_obstacles) {
        grid.place_obstacle(coord);
    }

    // Trash on the remaining empties, at most one per cell.
    let empties = grid.empty_cells();
    let num_trash = ((empties.len() as f32 * wc.trash_probability) as usize).min(empties.len());
    for &coord in empties.choose_multiple(&mut rng, num_trash) {
        grid.place_trash(coord);
    }

    // Stations and robots: robot 0 takes the pinned cell when one is
    // configured, the rest sample distinct empty cells.
    let mut starts: Vec<GridCoord> = Vec::with_capacity(wc.num_robots);
    if let Some(start) = pinned {
        if wc.num_robots > 0 {
            starts.push(start);
        }
    }
    let remaining = wc.num_robots.saturating_sub(starts.len());
    if remaining > 0 {
        let empties = grid.empty_cells();
        if empties.len() < remaining {
            return Err(SwachhError::Setup(format!(
                "{} robots requested but only {} empty cells left",
                wc.num_robots,
                empties.len()
            )));
        }
        starts.extend(empties.choose_multiple(&mut rng, remaining));
    }

    let mut robots = Vec::with_capacity(wc.num_robots);
    for (id, &start) in starts.iter().enumerate() {
        grid.place_station(start);
        if !grid.place_robot(start, id) {
            return Err(SwachhError::Setup(format!(
                "could not place robot {} at ({}, {})",
                id, start.x, start.y
            )));
        }
        let agent_seed: u64 = rng.gen();
        robots.push(RobotAgent::new(
            id,
            start,
            start,
            config.agent.clone(),
            agent_seed,
        ));
    }

    info!(
        "generated {}x{} world: {} trash, {} robots",
        wc.width,
        wc.height,
        grid.trash_remaining(),
        robots.len()
    );

    Ok(World {
        grid,
        robots,
        driver_seed: rng.gen(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn small_config(seed: u64) -> SimConfig {
        let mut config = SimConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.run.seed = seed;
        config
    }

    #[test]
    fn test_generate_default_layout() {
        let world = generate(&small_config(42)).unwrap();

        // Border is solid obstacle.
        for x in 0..10 {
            assert!(world.grid.cell(GridCoord::new(x, 0)).unwrap().has_obstacle());
            assert!(world.grid.cell(GridCoord::new(x, 9)).unwrap().has_obstacle());
        }

        // Robot 0 starts on its station at the pinned cell.
        let start = GridCoord::new(1, 1);
        let cell = world.grid.cell(start).unwrap();
        assert!(cell.has_station());
        assert_eq!(cell.robot(), Some(0));
        assert_eq!(world.robots.len(), 1);
        assert_eq!(world.robots[0].position(), start);
        assert_eq!(world.robots[0].energy(), 100);

        assert!(world.grid.trash_remaining() > 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(&small_config(7)).unwrap();
        let b = generate(&small_config(7)).unwrap();

        assert_eq!(a.driver_seed, b.driver_seed);
        assert_eq!(a.grid.trash_remaining(), b.grid.trash_remaining());
        for y in 0..10 {
            for x in 0..10 {
                let coord = GridCoord::new(x, y);
                assert_eq!(a.grid.cell(coord), b.grid.cell(coord));
            }
        }
    }

    #[test]
    fn test_multi_robot_distinct_starts() {
        let mut config = small_config(3);
        config.world.num_robots = 4;
        config.world.trash_probability = 0.2;
        let world = generate(&config).unwrap();

        assert_eq!(world.robots.len(), 4);
        let mut positions: Vec<GridCoord> =
            world.robots.iter().map(|r| r.position()).collect();
        positions.sort_by_key(|c| (c.x, c.y));
        positions.dedup();
        assert_eq!(positions.len(), 4, "robots start on distinct cells");
        for robot in &world.robots {
            assert!(world.grid.cell(robot.position()).unwrap().has_station());
        }
    }

    #[test]
    fn test_degenerate_start_is_fatal() {
        let mut config = small_config(1);
        config.world.start_cell = Some([0, 0]); // on the border ring
        assert!(matches!(
            generate(&config),
            Err(SwachhError::Setup(_))
        ));
    }
}
