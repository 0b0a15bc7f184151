//! Robot agent state and per-tick lifecycle.

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::decision::{self, Action, MoveReason};
use crate::config::AgentConfig;
use crate::coord::GridCoord;
use crate::grid::{GridWorld, RobotId};
use crate::knowledge::KnowledgeMap;

/// A cleaning robot.
///
/// Owns its knowledge map, energy budget and tie-break RNG exclusively;
/// the only shared state it touches is grid occupancy. One call to
/// [`RobotAgent::step`] per driver tick performs exactly one action.
pub struct RobotAgent {
    pub(crate) id: RobotId,
    pub(crate) position: GridCoord,
    pub(crate) energy: i32,
    pub(crate) map: KnowledgeMap,
    pub(crate) trash_collected: usize,
    pub(crate) movement_count: usize,
    pub(crate) returning_to_station: bool,
    pub(crate) charging: bool,
    pub(crate) cleaning_mode: bool,
    /// Cached route to the current exploration target, consumed front to
    /// back and recomputed on invalidation.
    pub(crate) route: Vec<GridCoord>,
    pub(crate) config: AgentConfig,
    pub(crate) rng: SmallRng,
}

impl RobotAgent {
    /// Create a robot at `start` with a full battery, knowing only its
    /// own cell and its home station.
    pub fn new(
        id: RobotId,
        start: GridCoord,
        home_station: GridCoord,
        config: AgentConfig,
        seed: u64,
    ) -> Self {
        Self {
            id,
            position: start,
            energy: config.max_energy,
            map: KnowledgeMap::new(start, home_station),
            trash_collected: 0,
            movement_count: 0,
            returning_to_station: false,
            charging: false,
            cleaning_mode: false,
            route: Vec::new(),
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Robot identifier.
    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    /// Current grid position.
    #[inline]
    pub fn position(&self) -> GridCoord {
        self.position
    }

    /// Remaining energy, always within `[0, max_energy]`.
    #[inline]
    pub fn energy(&self) -> i32 {
        self.energy
    }

    /// Trash pieces cleaned so far.
    #[inline]
    pub fn trash_collected(&self) -> usize {
        self.trash_collected
    }

    /// Physical moves executed so far.
    #[inline]
    pub fn movement_count(&self) -> usize {
        self.movement_count
    }

    /// Is the robot currently parked on a station and charging?
    #[inline]
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// The robot's private knowledge map.
    #[inline]
    pub fn map(&self) -> &KnowledgeMap {
        &self.map
    }

    /// Advance the robot by one tick: scan, decide, commit one action.
    ///
    /// A robot with no energy left skips the tick entirely; that is a
    /// valid terminal condition, not an error.
    pub fn step(&mut self, world: &mut GridWorld) {
        if self.energy <= 0 {
            trace!("robot {}: out of energy, skipping tick", self.id);
            return;
        }

        self.map.scan(self.position, world.neighborhood(self.position));
        let action = decision::decide(self, world);
        self.commit(action, world);
    }

    fn commit(&mut self, action: Action, world: &mut GridWorld) {
        match action {
            Action::Clean => {
                world.remove_trash(self.position);
                self.trash_collected += 1;
                self.energy -= 1;
                self.cleaning_mode = false;
                debug!(
                    "robot {}: cleaned ({}, {}), total {}",
                    self.id, self.position.x, self.position.y, self.trash_collected
                );
            }
            Action::Charge => {
                self.energy = (self.energy + self.config.charge_rate).min(self.config.max_energy);
                trace!("robot {}: charging, energy {}", self.id, self.energy);
            }
            Action::Move { to, reason } => {
                self.execute_move(to, world);
                match reason {
                    MoveReason::Trash => self.cleaning_mode = true,
                    MoveReason::Station => {
                        if self.map.is_station(to) {
                            self.charging = true;
                            debug!("robot {}: docked at ({}, {})", self.id, to.x, to.y);
                        }
                    }
                    _ => {}
                }
            }
            Action::Wait => {}
        }
    }

    /// The single physical move primitive: relocate, count the move, pay
    /// one energy, mark the new cell visited.
    fn execute_move(&mut self, to: GridCoord, world: &mut GridWorld) {
        world.relocate(self.id, self.position, to);
        self.position = to;
        self.movement_count += 1;
        self.energy -= 1;
        self.map.mark_visited(to);
    }
}
