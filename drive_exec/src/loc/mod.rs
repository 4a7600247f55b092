//! # Localisation module
//!
//! The robot's absolute position comes from an external beacon. This module defines the pose type
//! shared by the autonomy and the interface through which the beacon driver is consumed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The pose (position and heading in the beacon frame) of the robot.
///
/// Heading is measured from the beacon +Y axis towards the +X axis, so a robot facing +Y has a
/// heading of zero and a robot facing +X has a heading of pi/2.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Pose {
    /// The position in the beacon frame
    ///
    /// Units: millimeters
    pub position_mm: Vector2<f64>,

    /// The heading in the beacon frame
    ///
    /// Units: radians
    pub heading_rad: f64,
}

/// One tick's reading from the beacon.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BeaconSample {
    /// Whether the beacon provided an up to date pose this tick
    pub signal: bool,

    /// The latest pose, or the last known one if there is no signal
    pub pose: Pose,

    /// Whether the synchronisation preamble was observed this tick
    pub preamble: bool,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of absolute robot position.
pub trait Localiser {
    /// Whether the beacon currently provides an up to date pose.
    fn has_signal(&self) -> bool;

    /// The most recent pose reported by the beacon.
    ///
    /// If there is no signal this is the last pose that was known.
    fn current_pose(&self) -> Pose;

    /// Whether the beacon's synchronisation preamble is being observed this tick.
    ///
    /// The preamble repeats periodically. Robots sharing a beacon wait for it so that they begin
    /// their paths in phase.
    fn preamble_detected(&self) -> bool;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BeaconSample {
    /// A sample with signal at the given pose, observing the preamble.
    pub fn with_signal(pose: Pose) -> Self {
        Self {
            signal: true,
            pose,
            preamble: true,
        }
    }
}

impl Localiser for BeaconSample {
    fn has_signal(&self) -> bool {
        self.signal
    }

    fn current_pose(&self) -> Pose {
        self.pose
    }

    fn preamble_detected(&self) -> bool {
        self.preamble
    }
}

impl Pose {
    pub fn new(x_mm: f64, y_mm: f64, heading_rad: f64) -> Self {
        Self {
            position_mm: Vector2::new(x_mm, y_mm),
            heading_rad,
        }
    }

    /// Create a pose at the given position facing along the beacon +Y axis.
    pub fn at(position_mm: Vector2<f64>) -> Self {
        Self {
            position_mm,
            heading_rad: 0.0,
        }
    }
}
