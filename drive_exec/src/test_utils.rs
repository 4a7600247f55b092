//! Recording actuator used by the unit tests.

use crate::{
    loc::Pose,
    mech::{Actuator, DriveDems},
};

/// An actuator recording every demand it receives.
#[derive(Debug, Default, Clone)]
pub struct MockActuator {
    pub dems: Vec<DriveDems>,
}

impl MockActuator {
    pub fn num_stops(&self) -> usize {
        self.dems.iter().filter(|d| **d == DriveDems::Stop).count()
    }

    pub fn last_pose(&self) -> Option<Pose> {
        self.dems.iter().rev().find_map(|d| match d {
            DriveDems::MoveTo(p) => Some(*p),
            DriveDems::Stop => None,
        })
    }
}

impl Actuator for MockActuator {
    fn move_to(&mut self, x_mm: f64, y_mm: f64, heading_rad: f64) {
        self.dems
            .push(DriveDems::MoveTo(Pose::new(x_mm, y_mm, heading_rad)));
    }

    fn stop(&mut self) {
        self.dems.push(DriveDems::Stop);
    }
}
