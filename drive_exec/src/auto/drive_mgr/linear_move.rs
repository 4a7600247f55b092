//! # [`LinearMove`] segment interpolation

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use nalgebra::Vector2;
use util::maths::{clamp, lerp};

use crate::{
    loc::Pose,
    mech::{Actuator, DriveDems},
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// A straight line move from a starting pose to a target point in a fixed time.
///
/// The move is open-loop: the position is interpolated from the starting pose captured by
/// [`LinearMove::start`] and the elapsed time only. The heading faces the target for the whole
/// move.
#[derive(Debug, Clone)]
pub struct LinearMove {
    target_mm: Vector2<f64>,
    duration_ms: u64,
    start_mm: Vector2<f64>,
    heading_rad: f64,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl LinearMove {
    pub fn new(target_mm: Vector2<f64>, duration_ms: u64) -> Self {
        Self {
            target_mm,
            duration_ms,
            start_mm: target_mm,
            heading_rad: 0.0,
        }
    }

    /// Capture the starting position and return the duration of the move.
    pub fn start(&mut self, start_pose: &Pose) -> u64 {
        self.start_mm = start_pose.position_mm;

        let delta = self.target_mm - self.start_mm;
        self.heading_rad = delta.x.atan2(delta.y);

        self.duration_ms
    }

    /// Normalised time of the move after `elapsed_ms`, in `[0, 1]`.
    pub fn normalised_time(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }

        clamp(elapsed_ms as f64 / self.duration_ms as f64, 0.0, 1.0)
    }

    /// The commanded pose at the given normalised time.
    pub fn pose_at(&self, at_normalised_time: f64) -> Pose {
        Pose {
            position_mm: Vector2::new(
                lerp(self.start_mm.x, self.target_mm.x, at_normalised_time),
                lerp(self.start_mm.y, self.target_mm.y, at_normalised_time),
            ),
            heading_rad: self.heading_rad,
        }
    }

    /// Send the pose at the given normalised time to the actuator, returning the demand made.
    pub fn update(&self, act: &mut dyn Actuator, at_normalised_time: f64) -> DriveDems {
        let dems = DriveDems::MoveTo(self.pose_at(at_normalised_time));
        dems.apply(act);
        dems
    }

    pub fn target_mm(&self) -> Vector2<f64> {
        self.target_mm
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::MockActuator;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_interpolation() {
        let mut mv = LinearMove::new(Vector2::new(100.0, -300.0), 1000);
        assert_eq!(mv.start(&Pose::new(-60.0, 500.0, 1.0)), 1000);

        assert_eq!(mv.pose_at(0.0).position_mm, Vector2::new(-60.0, 500.0));
        assert_eq!(mv.pose_at(1.0).position_mm, Vector2::new(100.0, -300.0));
        assert_eq!(mv.pose_at(0.5).position_mm, Vector2::new(20.0, 100.0));
    }

    #[test]
    fn test_heading_faces_target() {
        let origin = Pose::default();

        let mut mv = LinearMove::new(Vector2::new(0.0, 10.0), 100);
        mv.start(&origin);
        assert_eq!(mv.pose_at(0.3).heading_rad, 0.0);

        let mut mv = LinearMove::new(Vector2::new(10.0, 0.0), 100);
        mv.start(&origin);
        assert!((mv.pose_at(0.0).heading_rad - FRAC_PI_2).abs() < 1e-12);
        assert!((mv.pose_at(1.0).heading_rad - FRAC_PI_2).abs() < 1e-12);

        let mut mv = LinearMove::new(Vector2::new(0.0, -10.0), 100);
        mv.start(&origin);
        assert!((mv.pose_at(0.5).heading_rad.abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_normalised_time() {
        let mv = LinearMove::new(Vector2::new(1.0, 1.0), 200);
        assert_eq!(mv.normalised_time(0), 0.0);
        assert_eq!(mv.normalised_time(50), 0.25);
        assert_eq!(mv.normalised_time(200), 1.0);
        assert_eq!(mv.normalised_time(5000), 1.0);

        let instant = LinearMove::new(Vector2::new(1.0, 1.0), 0);
        assert_eq!(instant.normalised_time(0), 1.0);
    }

    #[test]
    fn test_update_sends_pose() {
        let mut act = MockActuator::default();
        let mut mv = LinearMove::new(Vector2::new(0.0, 200.0), 400);
        mv.start(&Pose::default());

        let dems = mv.update(&mut act, 0.25);

        assert_eq!(dems, DriveDems::MoveTo(Pose::new(0.0, 50.0, 0.0)));
        assert_eq!(act.dems, vec![dems]);
    }
}
