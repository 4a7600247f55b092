//! Simulation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulated robot.
///
/// Any field missing from the parameter file takes its default value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Starting position of the robot.
    ///
    /// Units: millimeters
    pub start_position_mm: [f64; 2],

    /// Starting heading of the robot.
    ///
    /// Units: radians
    pub start_heading_rad: f64,

    /// Maximum speed at which the robot pursues a demanded position.
    ///
    /// Units: millimeters/second
    pub max_speed_mms: f64,

    /// Maximum rate at which the robot turns towards a demanded heading.
    ///
    /// Units: radians/second
    pub max_turn_rate_rads: f64,

    /// Period of the beacon synchronisation preamble.
    ///
    /// Units: milliseconds
    pub preamble_period_ms: u64,

    /// Time for which each preamble is observable.
    ///
    /// Units: milliseconds
    pub preamble_width_ms: u64,

    /// Windows during which the beacon provides no signal.
    pub dropouts: Vec<Dropout>,
}

/// A window of lost beacon signal.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct Dropout {
    /// Units: milliseconds
    pub start_ms: u64,

    /// Units: milliseconds
    pub duration_ms: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Dropout {
    /// True if the window covers the given time.
    pub fn contains(&self, time_ms: u64) -> bool {
        time_ms >= self.start_ms && time_ms - self.start_ms < self.duration_ms
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            start_position_mm: [0.0, -2000.0],
            start_heading_rad: 0.0,
            max_speed_mms: 800.0,
            max_turn_rate_rads: 6.0,
            preamble_period_ms: 5000,
            preamble_width_ms: 50,
            dropouts: Vec::new(),
        }
    }
}
