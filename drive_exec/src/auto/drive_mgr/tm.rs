//! # Defines Telemetry Pack for the drive manager

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DriveTm {
    /// Tick of the last call to `advance`
    pub time_ms: u64,

    pub mode: DriveMode,

    /// Index of the active command in the program
    pub cmd_index: usize,

    /// Name of the active command, `None` while idle
    pub cmd_name: Option<String>,

    /// Whether the missing position watchdog is armed
    pub watchdog_armed: bool,

    /// Number of stops forced by the watchdog
    pub num_watchdog_stops: u64,

    /// Number of times the whole program has been completed
    pub num_cycles: u64,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveMode {
    Idle,
    Moving,
}

impl Default for DriveMode {
    fn default() -> Self {
        DriveMode::Idle
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_archived_form() {
        let tm = DriveTm {
            time_ms: 1200,
            mode: DriveMode::Moving,
            cmd_name: Some(String::from("DriveCmd::Follow")),
            ..DriveTm::default()
        };

        let json: serde_json::Value = serde_json::to_value(&tm).unwrap();
        assert_eq!(json["mode"], "Moving");
        assert_eq!(json["cmd_name"], "DriveCmd::Follow");
        assert_eq!(json["num_cycles"], 0);

        let idle: serde_json::Value = serde_json::to_value(DriveTm::default()).unwrap();
        assert_eq!(idle["mode"], "Idle");
        assert!(idle["cmd_name"].is_null());
    }
}
