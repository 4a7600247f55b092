//! # [`SyncWithPreamble`] drive command

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::debug;

use crate::loc::{Localiser, Pose};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Waits for the beacon synchronisation preamble.
///
/// Placed at the head of the program so that every traverse of the path begins from a pose known
/// to the beacon and in phase with the other robot of the formation. No demands are made while
/// waiting.
#[derive(Debug, Default)]
pub struct SyncWithPreamble {
    start_time_ms: u64,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl SyncWithPreamble {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin waiting. The wait has no fixed duration.
    pub fn start(&mut self, now_ms: u64, _start_pose: &Pose) -> Option<u64> {
        self.start_time_ms = now_ms;
        None
    }

    /// Returns true once the preamble is observed.
    pub fn step(&mut self, now_ms: u64, loc: &dyn Localiser) -> bool {
        if loc.preamble_detected() {
            debug!(
                "Preamble detected after {} ms",
                now_ms.saturating_sub(self.start_time_ms)
            );
            true
        } else {
            false
        }
    }
}
