//! # Simulation module
//!
//! A kinematic stand-in for the beacon and the drive train, so that the drive controller can be
//! run without hardware. The simulated robot pursues the demanded position at a bounded speed and
//! turns towards the demanded heading at a bounded rate. The beacon reports the true pose except during the
//! configured dropout windows, when it reports no signal and the last pose it saw.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
pub use params::{Dropout, SimParams};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use nalgebra::Vector2;
use util::maths::{clamp, wrap_pi};

use crate::{
    loc::{BeaconSample, Pose},
    mech::{Actuator, DriveDems},
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

pub struct SimRobot {
    params: SimParams,

    /// True pose of the robot
    pose: Pose,

    /// Last pose the beacon reported with signal
    last_seen_pose: Pose,

    /// Demand currently being pursued
    dems: Option<DriveDems>,

    time_ms: Option<u64>,

    num_dems: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimRobot {
    pub fn new(params: SimParams) -> Self {
        let pose = Pose::new(
            params.start_position_mm[0],
            params.start_position_mm[1],
            params.start_heading_rad,
        );

        Self {
            params,
            pose,
            last_seen_pose: pose,
            dems: None,
            time_ms: None,
            num_dems: 0,
        }
    }

    /// Move the robot forward to `now_ms` and take a beacon reading.
    pub fn step(&mut self, now_ms: u64) -> BeaconSample {
        let dt_s = match self.time_ms {
            Some(t) => now_ms.saturating_sub(t) as f64 / 1000.0,
            None => 0.0,
        };
        self.time_ms = Some(now_ms);

        if let Some(DriveDems::MoveTo(target)) = self.dems {
            let delta = target.position_mm - self.pose.position_mm;
            let max_step_mm = self.params.max_speed_mms * dt_s;
            let dist_mm = delta.norm();

            self.pose.position_mm = if dist_mm <= max_step_mm {
                target.position_mm
            } else {
                self.pose.position_mm + delta * (max_step_mm / dist_mm)
            };

            let max_turn_rad = self.params.max_turn_rate_rads * dt_s;
            let turn_rad = clamp(
                wrap_pi(target.heading_rad - self.pose.heading_rad),
                -max_turn_rad,
                max_turn_rad,
            );
            self.pose.heading_rad = wrap_pi(self.pose.heading_rad + turn_rad);
        }

        let signal = !self.params.dropouts.iter().any(|d| d.contains(now_ms));
        if signal {
            self.last_seen_pose = self.pose;
        }

        let preamble = self.params.preamble_period_ms > 0
            && now_ms % self.params.preamble_period_ms < self.params.preamble_width_ms;

        trace!(
            "Sim at {} ms: ({:.1}, {:.1}) signal: {}",
            now_ms,
            self.pose.position_mm.x,
            self.pose.position_mm.y,
            signal
        );

        BeaconSample {
            signal,
            pose: self.last_seen_pose,
            preamble,
        }
    }

    /// The true pose of the robot.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The demand currently being pursued.
    pub fn dems(&self) -> Option<DriveDems> {
        self.dems
    }

    /// Total number of demands received.
    pub fn num_dems(&self) -> u64 {
        self.num_dems
    }
}

impl Actuator for SimRobot {
    fn move_to(&mut self, x_mm: f64, y_mm: f64, heading_rad: f64) {
        self.dems = Some(DriveDems::MoveTo(Pose {
            position_mm: Vector2::new(x_mm, y_mm),
            heading_rad,
        }));
        self.num_dems += 1;
    }

    fn stop(&mut self) {
        self.dems = Some(DriveDems::Stop);
        self.num_dems += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        auto::{drive_mgr::DriveMgrParams, DriveMgr},
        loc::Localiser,
    };

    fn params() -> SimParams {
        SimParams {
            start_position_mm: [0.0, 0.0],
            max_speed_mms: 1000.0,
            ..SimParams::default()
        }
    }

    #[test]
    fn test_pursuit_is_speed_limited() {
        let mut sim = SimRobot::new(params());
        sim.step(0);
        sim.move_to(0.0, 500.0, 0.0);

        sim.step(100);
        assert!((sim.pose().position_mm.y - 100.0).abs() < 1e-9);

        sim.step(1000);
        assert_eq!(sim.pose().position_mm, Vector2::new(0.0, 500.0));

        // Turns the short way round at a bounded rate
        sim.move_to(0.0, 500.0, -3.0);
        sim.step(1100);
        assert!((sim.pose().heading_rad - -0.6).abs() < 1e-9);
        sim.step(2000);
        assert!((sim.pose().heading_rad - -3.0).abs() < 1e-9);

        sim.stop();
        sim.step(3000);
        assert_eq!(sim.pose().position_mm, Vector2::new(0.0, 500.0));
        assert_eq!(sim.num_dems(), 3);
    }

    #[test]
    fn test_dropout_and_preamble() {
        let mut sim = SimRobot::new(SimParams {
            dropouts: vec![Dropout {
                start_ms: 100,
                duration_ms: 50,
            }],
            ..params()
        });
        sim.move_to(1000.0, 0.0, 0.0);

        let sample = sim.step(0);
        assert!(sample.has_signal());
        assert!(sample.preamble_detected());

        let sample = sim.step(50);
        assert!(sample.has_signal());
        assert!(!sample.preamble_detected());

        // The robot keeps moving but the beacon reports the last pose it saw
        let sample = sim.step(120);
        assert!(!sample.has_signal());
        assert_eq!(sample.current_pose().position_mm, Vector2::new(50.0, 0.0));
        assert!(sim.pose().position_mm.x > 50.0);

        assert!(sim.step(150).has_signal());
    }

    #[test]
    fn test_drive_mgr_in_sim() {
        let mut sim = SimRobot::new(SimParams {
            start_position_mm: [-60.0, -2810.0],
            dropouts: vec![
                // Short gap, ridden through
                Dropout {
                    start_ms: 3000,
                    duration_ms: 150,
                },
                // Long gap, forces a stop
                Dropout {
                    start_ms: 20_000,
                    duration_ms: 1000,
                },
            ],
            ..SimParams::default()
        });
        let mut mgr = DriveMgr::from_params(DriveMgrParams::default()).unwrap();

        let mut t = 0;
        while t < 20_000 {
            let sample = sim.step(t);
            mgr.advance(t, &sample, &mut sim);
            t += 10;
        }

        assert!(mgr.is_moving());
        assert_eq!(mgr.current_cmd_index(), 1);
        assert_eq!(mgr.get_tm().num_watchdog_stops, 0);

        while t < 21_000 {
            let sample = sim.step(t);
            mgr.advance(t, &sample, &mut sim);
            t += 10;
        }

        assert!(!mgr.is_moving());
        assert_eq!(mgr.get_tm().num_watchdog_stops, 1);
        assert_eq!(sim.dems(), Some(DriveDems::Stop));

        // Resumes from the sync once the beacon returns
        let sample = sim.step(t);
        mgr.advance(t, &sample, &mut sim);
        assert!(mgr.is_moving());
        assert_eq!(mgr.current_cmd_index(), 0);
    }
}
