//! Turn-based simulation driver.
//!
//! Advances the whole population one tick at a time: collect statistics,
//! re-shuffle the execution order, step every robot once, check the
//! termination conditions. Robots later in the shuffled order see the
//! post-move state of robots earlier in it; that sequential ordering is
//! the only synchronization in the simulation.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use swachh_map::{GridWorld, RobotAgent};

use crate::stats::StatsCollector;
use crate::world::World;

/// Owns the grid and the robot population and drives them to completion.
pub struct SimulationDriver {
    grid: GridWorld,
    robots: Vec<RobotAgent>,
    rng: SmallRng,
    tick: usize,
    max_ticks: usize,
    running: bool,
    stats: StatsCollector,
}

impl SimulationDriver {
    /// Create a driver for a generated world.
    pub fn new(world: World, max_ticks: usize) -> Self {
        Self {
            grid: world.grid,
            robots: world.robots,
            rng: SmallRng::seed_from_u64(world.driver_seed),
            tick: 0,
            max_ticks,
            running: true,
            stats: StatsCollector::new(),
        }
    }

    /// Advance one global tick. Does nothing once the run has halted.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }

        self.stats.collect(self.tick, &self.grid, &self.robots);

        let mut order: Vec<usize> = (0..self.robots.len()).collect();
        order.shuffle(&mut self.rng);
        for idx in order {
            self.robots[idx].step(&mut self.grid);
        }

        self.tick += 1;

        if self.grid.trash_remaining() == 0 {
            info!("all trash collected after {} ticks", self.tick);
            self.running = false;
        } else if self.tick >= self.max_ticks {
            info!(
                "tick ceiling {} reached, {} trash left",
                self.max_ticks,
                self.grid.trash_remaining()
            );
            self.running = false;
        } else {
            debug!(
                "tick {}: {} trash remaining",
                self.tick,
                self.grid.trash_remaining()
            );
        }
    }

    /// Run until a termination condition trips.
    pub fn run(&mut self) {
        while self.running {
            self.tick();
        }
    }

    /// Is the simulation still going?
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks completed so far.
    #[inline]
    pub fn tick_count(&self) -> usize {
        self.tick
    }

    /// The grid world.
    #[inline]
    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    /// The robot population.
    #[inline]
    pub fn robots(&self) -> &[RobotAgent] {
        &self.robots
    }

    /// Collected per-tick statistics.
    #[inline]
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }
}
