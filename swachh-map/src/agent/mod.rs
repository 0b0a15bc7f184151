//! Robot agent: per-tick lifecycle and decision policy.

mod decision;
mod robot;

pub use robot::RobotAgent;
