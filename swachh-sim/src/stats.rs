//! Run statistics.
//!
//! The per-tick reporters the driver collects before stepping the
//! population: total trash collected, average robot energy, percentage of
//! clean cells, and total movements.

use swachh_map::{GridWorld, RobotAgent};

/// One row of the per-tick time series.
#[derive(Clone, Debug, PartialEq)]
pub struct TickRecord {
    pub tick: usize,
    pub trash_collected: usize,
    pub avg_energy: f32,
    pub clean_percentage: f32,
    pub total_movements: usize,
}

/// Collects the per-tick time series for a run.
#[derive(Clone, Debug, Default)]
pub struct StatsCollector {
    records: Vec<TickRecord>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick's model-level reporters.
    pub fn collect(&mut self, tick: usize, grid: &GridWorld, robots: &[RobotAgent]) {
        self.records
            .push(Self::snapshot(tick, grid, robots));
    }

    fn snapshot(tick: usize, grid: &GridWorld, robots: &[RobotAgent]) -> TickRecord {
        let trash_collected = robots.iter().map(RobotAgent::trash_collected).sum();
        let total_movements = robots.iter().map(RobotAgent::movement_count).sum();
        let avg_energy = if robots.is_empty() {
            0.0
        } else {
            robots.iter().map(|r| r.energy() as f32).sum::<f32>() / robots.len() as f32
        };

        let total_cells = grid.bounds().area();
        let clean_cells = total_cells - grid.trash_remaining();
        let clean_percentage = (clean_cells as f32 / total_cells as f32) * 100.0;

        TickRecord {
            tick,
            trash_collected,
            avg_energy,
            clean_percentage,
            total_movements,
        }
    }

    /// The full time series, one record per tick.
    pub fn records(&self) -> &[TickRecord] {
        &self.records
    }

    /// The most recent record, if any tick has been collected.
    pub fn last(&self) -> Option<&TickRecord> {
        self.records.last()
    }
}
