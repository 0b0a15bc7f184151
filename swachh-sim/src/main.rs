//! SwachhSim - turn-based cleaning robot simulation
//!
//! Generates a bounded grid world with obstacles, scattered trash and
//! charging stations, then drives a population of cleaning robots that
//! explore it frontier-by-frontier, clean what they find, and queue up to
//! recharge before their batteries die.

mod config;
mod driver;
mod error;
mod stats;
mod world;

use std::path::Path;

use tracing::info;

use config::SimConfig;
use driver::SimulationDriver;
use error::{Result, SwachhError};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swachh_sim=info".parse().unwrap())
                .add_directive("swachh_map=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let mut config = if args.len() > 1 && !args[1].starts_with("--") {
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        SimConfig::load(config_path)?
    } else if Path::new("swachh.toml").exists() {
        info!("Loading configuration from swachh.toml");
        SimConfig::load(Path::new("swachh.toml"))?
    } else {
        info!("Using default configuration");
        SimConfig::default()
    };

    // Override the seed if provided
    if let Some(i) = args.iter().position(|a| a == "--seed") {
        let seed = args
            .get(i + 1)
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| SwachhError::Config("--seed requires a number".into()))?;
        info!("Using seed override: {}", seed);
        config.run.seed = seed;
    }

    info!(
        "world {}x{}, {} robots, obstacle ratio {:.2}, trash probability {:.2}, seed {}",
        config.world.width,
        config.world.height,
        config.world.num_robots,
        config.world.obstacle_ratio,
        config.world.trash_probability,
        config.run.seed
    );

    let world = world::generate(&config)?;
    let initial_trash = world.grid.trash_remaining();

    let mut driver = SimulationDriver::new(world, config.run.max_steps);
    driver.run();

    // Final summary
    let collected: usize = driver
        .robots()
        .iter()
        .map(|r| r.trash_collected())
        .sum();
    info!(
        "finished after {} ticks: {}/{} trash collected, {} remaining",
        driver.tick_count(),
        collected,
        initial_trash,
        driver.grid().trash_remaining()
    );
    if let Some(record) = driver.stats().last() {
        info!(
            "final reporters: {:.1}% clean, avg energy {:.1}, {} total moves",
            record.clean_percentage, record.avg_energy, record.total_movements
        );
    }
    for robot in driver.robots() {
        info!(
            "robot {}: pos ({}, {}), energy {}, {} moves, {} trash, {} cells mapped",
            robot.id(),
            robot.position().x,
            robot.position().y,
            robot.energy(),
            robot.movement_count(),
            robot.trash_collected(),
            robot.map().known_cells()
        );
    }

    Ok(())
}
