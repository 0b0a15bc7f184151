//! Per-tick decision policy.
//!
//! A fixed-priority rule list evaluated top to bottom; the first
//! applicable rule produces the action for the tick and every lower rule
//! is skipped:
//!
//! 1. clean trash on the current cell (preempts everything, charging
//!    included)
//! 2. keep charging until full
//! 3. head for a station on critical energy
//! 4. grab adjacent trash
//! 5. step onto an adjacent frontier cell
//! 6. route to the nearest known frontier, random walk once none remain
//!
//! The chosen rule yields an explicit [`Action`] value which the robot
//! then commits, so the priority order can be tested apart from the
//! driver loop.

use log::debug;
use rand::seq::SliceRandom;

use super::robot::RobotAgent;
use crate::coord::GridCoord;
use crate::grid::{Cell, GridWorld};
use crate::knowledge::CellKnowledge;
use crate::pathfinding::find_path;

/// The one action a robot takes in a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Consume the trash on the current cell
    Clean,
    /// Gain one charge increment
    Charge,
    /// Relocate to an adjacent cell
    Move { to: GridCoord, reason: MoveReason },
    /// Do nothing this tick
    Wait,
}

/// Why a move was chosen; commit hooks key off this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveReason {
    /// Stepping onto adjacent trash (latches cleaning mode)
    Trash,
    /// Stepping onto an adjacent frontier cell
    Frontier,
    /// Advancing along the cached exploration route
    Route,
    /// Random fallback walk
    Random,
    /// Approaching a charging station (docks on arrival)
    Station,
}

/// Evaluate the rule list. Flag and route bookkeeping happens here; all
/// world mutation happens when the returned action is committed.
pub(crate) fn decide(robot: &mut RobotAgent, world: &GridWorld) -> Action {
    // Rule 1: trash underneath is cleaned immediately.
    if world.cell(robot.position).map_or(false, Cell::has_trash) {
        return Action::Clean;
    }
    if robot.cleaning_mode {
        // The grab came up empty (another robot got the trash first).
        robot.cleaning_mode = false;
    }

    // Rule 2: charging consumes the tick until the battery is full; a
    // full battery exits the charging state and falls through to normal
    // behavior within this same tick.
    if robot.charging {
        if robot.energy >= robot.config.max_energy {
            robot.charging = false;
            robot.returning_to_station = false;
        } else {
            return Action::Charge;
        }
    }

    // Rule 3: critical energy.
    if robot.energy < robot.config.critical_energy {
        return go_to_station(robot, world);
    }

    // Rule 4: adjacent trash, uniform-random among candidates.
    let trash_cells: Vec<GridCoord> = world
        .neighborhood(robot.position)
        .iter()
        .filter(|(_, cell)| cell.has_trash() && cell.robot().is_none())
        .map(|(coord, _)| *coord)
        .collect();
    if let Some(&to) = trash_cells.choose(&mut robot.rng) {
        robot.route.clear();
        return Action::Move {
            to,
            reason: MoveReason::Trash,
        };
    }

    // Rule 5: adjacent frontier cells are free information gain.
    let frontier_cells: Vec<GridCoord> = world
        .neighborhood(robot.position)
        .iter()
        .filter(|(coord, cell)| {
            robot.map.classify(*coord) == CellKnowledge::Frontier
                && !cell.has_obstacle()
                && cell.robot().is_none()
        })
        .map(|(coord, _)| *coord)
        .collect();
    if let Some(&to) = frontier_cells.choose(&mut robot.rng) {
        robot.route.clear();
        return Action::Move {
            to,
            reason: MoveReason::Frontier,
        };
    }

    // Rule 6: long-range exploration.
    explore_global(robot, world)
}

/// Route to the nearest known frontier; once the map holds none (fully
/// explored, or only unreachable remainders) fall back to a random walk.
fn explore_global(robot: &mut RobotAgent, world: &GridWorld) -> Action {
    if let Some(action) = advance_route(robot, world) {
        return action;
    }

    let Some(target) = nearest_frontier(robot) else {
        return random_step(robot, world);
    };

    match find_path(robot.position, target, &robot.map, world.bounds()) {
        Some(path) if path.len() > 1 => {
            robot.route = path[1..].to_vec();
            advance_route(robot, world).unwrap_or(Action::Wait)
        }
        _ => {
            // Isolated frontier: retire it for good so it is never
            // targeted again.
            debug!(
                "robot {}: frontier ({}, {}) unreachable, retiring",
                robot.id, target.x, target.y
            );
            robot.map.mark_visited(target);
            random_step(robot, world)
        }
    }
}

/// Advance one step along the cached route, if any.
///
/// A next step that turned out Blocked invalidates the route (replan); a
/// next step occupied by another robot holds position and keeps the
/// route for the following tick.
fn advance_route(robot: &mut RobotAgent, world: &GridWorld) -> Option<Action> {
    let &next = robot.route.first()?;
    if robot.map.classify(next) == CellKnowledge::Blocked {
        robot.route.clear();
        return None;
    }
    if world.cell(next).and_then(Cell::robot).is_some() {
        return Some(Action::Wait);
    }
    robot.route.remove(0);
    Some(Action::Move {
        to: next,
        reason: MoveReason::Route,
    })
}

/// Nearest frontier by Manhattan distance - a greedy pre-filter before
/// the exact BFS. Ties break on (distance, x, y) so replays are stable.
fn nearest_frontier(robot: &RobotAgent) -> Option<GridCoord> {
    let position = robot.position;
    robot
        .map
        .frontiers()
        .min_by_key(|coord| (coord.manhattan_distance(&position), coord.x, coord.y))
}

/// Uniform-random step onto any obstacle-free, robot-free neighbor.
fn random_step(robot: &mut RobotAgent, world: &GridWorld) -> Action {
    let candidates: Vec<GridCoord> = world
        .neighborhood(robot.position)
        .iter()
        .filter(|(_, cell)| !cell.has_obstacle() && cell.robot().is_none())
        .map(|(coord, _)| *coord)
        .collect();
    match candidates.choose(&mut robot.rng) {
        Some(&to) => Action::Move {
            to,
            reason: MoveReason::Random,
        },
        None => Action::Wait,
    }
}

/// Rule 3 sub-procedure: approach the nearest known station and dock.
///
/// A robot already occupying the next step makes this tick a no-op -- the
/// natural queue in front of a busy station. Stations are never retired:
/// an unreachable station just means waiting and retrying.
fn go_to_station(robot: &mut RobotAgent, world: &GridWorld) -> Action {
    robot.returning_to_station = true;
    robot.route.clear();

    let position = robot.position;
    let Some(&station) = robot
        .map
        .stations()
        .iter()
        .min_by_key(|coord| (coord.manhattan_distance(&position), coord.x, coord.y))
    else {
        return Action::Wait;
    };

    if robot.position == station {
        robot.charging = true;
        return Action::Wait;
    }

    match find_path(robot.position, station, &robot.map, world.bounds()) {
        Some(path) if path.len() > 1 => {
            let next = path[1];
            if world.cell(next).and_then(Cell::robot).is_some() {
                Action::Wait
            } else {
                Action::Move {
                    to: next,
                    reason: MoveReason::Station,
                }
            }
        }
        _ => Action::Wait,
    }
}
