//! # [`Pause`] drive command

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::{
    loc::Pose,
    mech::{Actuator, DriveDems},
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Holds the pose the robot had when the command started for a fixed time.
#[derive(Debug)]
pub struct Pause {
    duration_ms: u64,
    start_time_ms: u64,
    hold: Pose,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl Pause {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            start_time_ms: 0,
            hold: Pose::default(),
        }
    }

    pub fn start(&mut self, now_ms: u64, start_pose: &Pose) -> Option<u64> {
        self.start_time_ms = now_ms;
        self.hold = *start_pose;

        Some(self.duration_ms)
    }

    pub fn step(&mut self, now_ms: u64, act: &mut dyn Actuator) -> bool {
        DriveDems::MoveTo(self.hold).apply(act);

        now_ms.saturating_sub(self.start_time_ms) >= self.duration_ms
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::MockActuator;

    #[test]
    fn test_holds_for_duration() {
        let mut act = MockActuator::default();
        let hold = Pose::new(-60.0, -2810.0, 0.5);

        let mut pause = Pause::new(2000);
        assert_eq!(pause.start(1000, &hold), Some(2000));

        assert!(!pause.step(1000, &mut act));
        assert!(!pause.step(2999, &mut act));
        assert!(pause.step(3000, &mut act));

        assert_eq!(act.dems, vec![DriveDems::MoveTo(hold); 3]);
    }
}
