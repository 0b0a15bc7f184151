//! Agent behavior configuration.

use serde::Deserialize;

/// Tunables for the robot decision policy.
#[derive(Clone, Debug, Deserialize)]
pub struct AgentConfig {
    /// Energy level below which the robot heads for a charging station
    /// (default: 40)
    #[serde(default = "default_critical_energy")]
    pub critical_energy: i32,

    /// Energy gained per tick while charging (default: 5)
    #[serde(default = "default_charge_rate")]
    pub charge_rate: i32,

    /// Energy capacity; robots start full (default: 100)
    #[serde(default = "default_max_energy")]
    pub max_energy: i32,
}

fn default_critical_energy() -> i32 {
    40
}

fn default_charge_rate() -> i32 {
    5
}

fn default_max_energy() -> i32 {
    100
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            critical_energy: default_critical_energy(),
            charge_rate: default_charge_rate(),
            max_energy: default_max_energy(),
        }
    }
}
