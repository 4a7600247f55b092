//! # Mechanisms module
//!
//! The drive train is an external collaborator. The autonomy only ever asks it to pursue a pose or
//! to stop; this module defines that interface and a record of the last demand made through it.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// The drive actuation interface.
pub trait Actuator {
    /// Continuously pursue the given pose until a new demand is made.
    fn move_to(&mut self, x_mm: f64, y_mm: f64, heading_rad: f64);

    /// Halt all motion immediately.
    fn stop(&mut self);
}

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// A demand issued to the drive train.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum DriveDems {
    /// Pursue the pose
    MoveTo(Pose),

    /// Stop
    Stop,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DriveDems {
    /// Send this demand to an actuator.
    pub fn apply(&self, act: &mut dyn Actuator) {
        match self {
            DriveDems::MoveTo(p) => act.move_to(p.position_mm.x, p.position_mm.y, p.heading_rad),
            DriveDems::Stop => act.stop(),
        }
    }
}
