//! # Swachh-Map: grid world and robot policy for a cleaning simulation
//!
//! Core library of the Swachh simulation: a bounded 2-D grid world with
//! obstacles, trash and charging stations, plus the cleaning robots that
//! explore it. Each robot incrementally builds a private map of the grid,
//! cleans trash it encounters and returns to a station before its energy
//! runs out.
//!
//! ## Architecture
//!
//! - [`coord`]: coordinate value types ([`GridCoord`], [`GridBounds`])
//! - [`grid`]: the shared world ([`GridWorld`], cell occupancy)
//! - [`knowledge`]: per-robot incremental map ([`KnowledgeMap`])
//! - [`pathfinding`]: breadth-first [`find_path`] over a knowledge map
//! - [`agent`]: [`RobotAgent`] with its fixed-priority decision policy
//! - [`config`]: [`AgentConfig`] behavior tunables
//!
//! ## Decision hierarchy
//!
//! Every tick a robot performs exactly one action, chosen by the first
//! applicable rule: clean in place, keep charging, return to a station on
//! critical energy, grab adjacent trash, step onto an adjacent frontier,
//! or route to the nearest known frontier (degrading to a random walk
//! once the map holds no frontiers).
//!
//! ## Quick Start
//!
//! ```rust
//! use swachh_map::{AgentConfig, GridCoord, GridWorld, RobotAgent};
//!
//! let mut world = GridWorld::new(8, 8);
//! let start = GridCoord::new(1, 1);
//! world.place_station(start);
//! world.place_trash(GridCoord::new(2, 1));
//! world.place_robot(start, 0);
//!
//! let mut robot = RobotAgent::new(0, start, start, AgentConfig::default(), 42);
//! for _ in 0..4 {
//!     robot.step(&mut world);
//! }
//! assert_eq!(robot.trash_collected(), 1);
//! ```
//!
//! ## Concurrency model
//!
//! None: the simulation is turn-based and single-threaded. A driver steps
//! every robot once per tick in a (re-)shuffled order; a robot stepping
//! later in the order sees the post-move occupancy of robots that stepped
//! earlier, which is the only coordination mechanism between agents.

pub mod agent;
pub mod config;
pub mod coord;
pub mod grid;
pub mod knowledge;
pub mod pathfinding;

pub use agent::RobotAgent;
pub use config::AgentConfig;
pub use coord::{GridBounds, GridCoord};
pub use grid::{Cell, GridWorld, Occupant, RobotId};
pub use knowledge::{CellKnowledge, KnowledgeMap};
pub use pathfinding::find_path;
