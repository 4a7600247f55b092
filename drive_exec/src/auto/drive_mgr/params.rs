//! # DriveMgr Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::auto::path::PathParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveMgrParams {
    /// Formation path construction
    pub path: PathParams,

    /// Time without a beacon signal after which a moving robot is stopped.
    ///
    /// Units: milliseconds
    pub missing_position_timeout_ms: u64,

    /// Time allotted to every path segment.
    ///
    /// The segment time is fixed, so the effective speed of a segment depends on its length.
    ///
    /// Units: milliseconds
    pub segment_time_ms: u64,

    /// Optional per-segment times, one per path point, overriding `segment_time_ms`.
    ///
    /// Units: milliseconds
    #[serde(default)]
    pub segment_times_ms: Option<Vec<u64>>,

    /// If set, the program begins by holding position for this long before synchronising.
    ///
    /// Units: milliseconds
    #[serde(default)]
    pub start_pause_ms: Option<u64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for DriveMgrParams {
    fn default() -> Self {
        Self {
            path: PathParams::default(),
            missing_position_timeout_ms: 200,
            segment_time_ms: 1000,
            segment_times_ms: None,
            start_pause_ms: None,
        }
    }
}
