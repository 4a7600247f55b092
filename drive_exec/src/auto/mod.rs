//! # Autonomy Module
//!
//! This module provides the autonomous traverse of the robot: the construction of the formation
//! path and the drive manager which sequences the motion commands that follow it.

pub use drive_mgr::DriveMgr;

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Drive Manager module
pub mod drive_mgr;

/// Defines path types and the formation transform
pub mod path;

/// Hardcoded waypoint tables
pub mod tables;
