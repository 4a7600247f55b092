//! # DriveMgr module
//!
//! This module implements the [`DriveMgr`] state machine, which sequences the motion commands that
//! drive the robot around its formation path. The manager is in one of two modes:
//!
//! - `Idle` - The robot is not moving. Motion begins as soon as the beacon provides a pose.
//! - `Moving` - The active command of the program is stepped every tick.
//!
//! The program is a fixed list of [`DriveCmd`]s executed cyclically, when the last command
//! completes the first one is started again. There is no terminal state: the only way back to
//! `Idle` is the missing position watchdog, which stops the robot once the beacon signal has been
//! absent for longer than the configured timeout. Shorter gaps are ridden through open-loop.
//!
//! The watchdog only runs while moving. Losing the signal before motion has ever started has no
//! effect.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod follow;
mod linear_move;
mod params;
mod pause;
mod sync;
pub mod tm;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt::Display;

pub use self::{
    linear_move::LinearMove,
    params::DriveMgrParams,
    tm::{DriveMode, DriveTm},
};

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub mod cmds {
    pub use super::follow::FollowPath;
    pub use super::pause::Pause;
    pub use super::sync::SyncWithPreamble;
}

use cmds::*;
use log::{error, info, warn};

use super::path::{Path, PathError};
use crate::{
    loc::{Localiser, Pose},
    mech::Actuator,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive Manager
///
/// Owns the command program and decides every tick whether to start moving, keep stepping the
/// active command, or stop because the beacon signal has been lost for too long.
pub struct DriveMgr {
    /// Parameters the manager was built from.
    pub params: DriveMgrParams,

    /// The commands executed in order, wrapping back to the first.
    program: Vec<DriveCmd>,

    /// True between starting the program and a watchdog stop.
    moving: bool,

    /// Index of the active command.
    current_cmd: usize,

    /// Tick at which the beacon signal was first found missing, `None` if the watchdog is not
    /// armed.
    lost_position_time_ms: Option<u64>,

    tm: DriveTm,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors that can occur while building the drive manager.
#[derive(Debug, thiserror::Error)]
pub enum DriveMgrError {
    #[error("Failed to load DriveMgrParams: {0:?}")]
    ParamLoadError(util::params::LoadError),

    #[error("Error in Path processing: {0}")]
    PathError(PathError),

    #[error("Attempted to create a DriveMgr with an empty program")]
    EmptyProgram,

    #[error("Path has {num_points} points but {num_times} segment times were given")]
    SegmentCountMismatch { num_points: usize, num_times: usize },
}

/// A motion command of the program.
#[derive(Debug)]
pub enum DriveCmd {
    Sync(SyncWithPreamble),
    Pause(Pause),
    // In a box to reduce the size of the command enum
    Follow(Box<FollowPath>),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveMgr {
    /// Load the parameters and build the manager and its program.
    pub fn init(params_path: &str) -> Result<Self, DriveMgrError> {
        let params: DriveMgrParams =
            util::params::load(params_path).map_err(DriveMgrError::ParamLoadError)?;

        Self::from_params(params)
    }

    /// Build the standard program described by the parameters: an optional pause, a sync, then
    /// the formation path.
    pub fn from_params(params: DriveMgrParams) -> Result<Self, DriveMgrError> {
        let path = Path::from_params(&params.path).map_err(DriveMgrError::PathError)?;

        info!(
            "Built {:?} path of {} points ({:.0} mm)",
            params.path.role,
            path.get_num_points(),
            path.get_length()
        );

        let follow = match params.segment_times_ms {
            Some(ref times) => FollowPath::new(path, times)?,
            None => FollowPath::with_uniform_time(path, params.segment_time_ms)?,
        };

        let mut program = Vec::with_capacity(3);
        if let Some(pause_ms) = params.start_pause_ms {
            program.push(DriveCmd::Pause(Pause::new(pause_ms)));
        }
        program.push(DriveCmd::Sync(SyncWithPreamble::new()));
        program.push(DriveCmd::Follow(Box::new(follow)));

        Self::new(params, program)
    }

    /// Build a manager executing the given program.
    pub fn new(params: DriveMgrParams, program: Vec<DriveCmd>) -> Result<Self, DriveMgrError> {
        if program.is_empty() {
            return Err(DriveMgrError::EmptyProgram);
        }

        Ok(Self {
            params,
            program,
            moving: false,
            current_cmd: 0,
            lost_position_time_ms: None,
            tm: DriveTm::default(),
        })
    }

    /// Process one tick.
    ///
    /// Must be called once per tick with non-decreasing values of `now_ms`.
    pub fn advance(&mut self, now_ms: u64, loc: &dyn Localiser, act: &mut dyn Actuator) {
        self.tm.time_ms = now_ms;

        if !loc.has_signal() {
            if !self.moving {
                return;
            }

            // Ride through short gaps, stop if the gap outlasts the timeout
            match self.lost_position_time_ms {
                None => {
                    warn!("Beacon signal lost, watchdog armed");
                    self.lost_position_time_ms = Some(now_ms);
                }
                Some(lost_ms)
                    if now_ms.saturating_sub(lost_ms)
                        >= self.params.missing_position_timeout_ms =>
                {
                    error!(
                        "No beacon signal for {} ms, stopping",
                        now_ms.saturating_sub(lost_ms)
                    );
                    self.lost_position_time_ms = None;
                    act.stop();
                    self.moving = false;
                    self.tm.num_watchdog_stops += 1;
                    self.update_tm();
                    return;
                }
                Some(_) => (),
            }
        } else {
            self.lost_position_time_ms = None;
        }

        if !self.moving {
            self.moving = true;
            self.current_cmd = 0;
            let duration_ms = self.program[0].start(now_ms, &loc.current_pose());
            info!(
                "DriveMgr moving, started {} ({})",
                self.program[0],
                fmt_duration(duration_ms)
            );
            self.update_tm();
            return;
        }

        if self.program[self.current_cmd].step(now_ms, loc, act) {
            self.current_cmd = (self.current_cmd + 1) % self.program.len();
            if self.current_cmd == 0 {
                self.tm.num_cycles += 1;
            }

            let duration_ms = self.program[self.current_cmd].start(now_ms, &loc.current_pose());
            info!(
                "DriveMgr command change to: {} ({})",
                self.program[self.current_cmd],
                fmt_duration(duration_ms)
            );
        }

        self.update_tm();
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn current_cmd_index(&self) -> usize {
        self.current_cmd
    }

    pub fn watchdog_armed(&self) -> bool {
        self.lost_position_time_ms.is_some()
    }

    pub fn program(&self) -> &[DriveCmd] {
        &self.program
    }

    /// The path followed by the first follow command of the program, if any.
    pub fn path(&self) -> Option<&Path> {
        self.program.iter().find_map(|cmd| match cmd {
            DriveCmd::Follow(f) => Some(f.path()),
            _ => None,
        })
    }

    pub fn get_tm(&self) -> DriveTm {
        self.tm.clone()
    }

    fn update_tm(&mut self) {
        self.tm.mode = match self.moving {
            true => DriveMode::Moving,
            false => DriveMode::Idle,
        };
        self.tm.cmd_index = self.current_cmd;
        self.tm.cmd_name = match self.moving {
            true => Some(self.program[self.current_cmd].to_string()),
            false => None,
        };
        self.tm.watchdog_armed = self.watchdog_armed();
    }
}

fn fmt_duration(duration_ms: Option<u64>) -> String {
    match duration_ms {
        Some(d) => format!("{} ms", d),
        None => String::from("until complete"),
    }
}

impl Display for DriveCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriveCmd::Sync(_) => write!(f, "DriveCmd::Sync"),
            DriveCmd::Pause(_) => write!(f, "DriveCmd::Pause"),
            DriveCmd::Follow(_) => write!(f, "DriveCmd::Follow"),
        }
    }
}

impl DriveCmd {
    /// Called once when the command becomes active.
    ///
    /// Returns how long the command will run for, or `None` if it runs until a condition is met.
    pub fn start(&mut self, now_ms: u64, start_pose: &Pose) -> Option<u64> {
        match self {
            DriveCmd::Sync(sync) => sync.start(now_ms, start_pose),
            DriveCmd::Pause(pause) => pause.start(now_ms, start_pose),
            DriveCmd::Follow(follow) => follow.start(now_ms, start_pose),
        }
    }

    /// Called every tick while the command is active, returns true once it is done.
    pub fn step(&mut self, now_ms: u64, loc: &dyn Localiser, act: &mut dyn Actuator) -> bool {
        match self {
            DriveCmd::Sync(sync) => sync.step(now_ms, loc),
            DriveCmd::Pause(pause) => pause.step(now_ms, act),
            DriveCmd::Follow(follow) => follow.step(now_ms, act),
        }
    }
}

impl From<FollowPath> for DriveCmd {
    fn from(follow: FollowPath) -> Self {
        DriveCmd::Follow(Box::new(follow))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        auto::{
            path::{FormationRole, PathParams},
            tables::PathTable,
        },
        mech::DriveDems,
        loc::BeaconSample,
        test_utils::MockActuator,
    };

    /// Two pauses, so the program cycles on time alone.
    fn two_pause_mgr() -> DriveMgr {
        DriveMgr::new(
            DriveMgrParams::default(),
            vec![
                DriveCmd::Pause(Pause::new(100)),
                DriveCmd::Pause(Pause::new(50)),
            ],
        )
        .unwrap()
    }

    fn line_path() -> Path {
        Path::from_params(&PathParams {
            table: PathTable::Custom {
                points: vec![[0.0, 1000.0]],
            },
            scale: [1.0, 1.0],
            offset_mm: [0.0, 0.0],
            spacing_mm: 0.0,
            role: FormationRole::Leader,
        })
        .unwrap()
    }

    /// Follow a single 1000 mm segment in 1000 ms.
    fn follow_mgr() -> DriveMgr {
        let follow = FollowPath::with_uniform_time(line_path(), 1000).unwrap();
        DriveMgr::new(DriveMgrParams::default(), vec![follow.into()]).unwrap()
    }

    #[test]
    fn test_empty_program() {
        assert!(matches!(
            DriveMgr::new(DriveMgrParams::default(), vec![]),
            Err(DriveMgrError::EmptyProgram)
        ));
    }

    #[test]
    fn test_from_params_builds_program() {
        let mgr = DriveMgr::from_params(DriveMgrParams::default()).unwrap();
        assert_eq!(mgr.program().len(), 2);
        assert!(matches!(mgr.program()[0], DriveCmd::Sync(_)));
        assert!(matches!(mgr.program()[1], DriveCmd::Follow(_)));
        assert_eq!(mgr.path().unwrap().get_num_points(), 37);

        let params = DriveMgrParams {
            start_pause_ms: Some(2000),
            ..DriveMgrParams::default()
        };
        let mgr = DriveMgr::from_params(params).unwrap();
        assert_eq!(mgr.program().len(), 3);
        assert!(matches!(mgr.program()[0], DriveCmd::Pause(_)));
    }

    #[test]
    fn test_from_params_rejects_bad_config() {
        let params = DriveMgrParams {
            segment_times_ms: Some(vec![100; 3]),
            ..DriveMgrParams::default()
        };
        assert!(matches!(
            DriveMgr::from_params(params),
            Err(DriveMgrError::SegmentCountMismatch {
                num_points: 37,
                num_times: 3
            })
        ));

        let mut params = DriveMgrParams::default();
        params.path.table = PathTable::Custom { points: vec![] };
        assert!(matches!(
            DriveMgr::from_params(params),
            Err(DriveMgrError::PathError(PathError::EmptyTable))
        ));
    }

    #[test]
    fn test_idle_without_signal() {
        let mut mgr = follow_mgr();
        let loc = BeaconSample::default();
        let mut act = MockActuator::default();

        for t in 0..1000 {
            mgr.advance(t, &loc, &mut act);
            assert!(!mgr.is_moving());
            assert!(!mgr.watchdog_armed());
        }

        assert!(act.dems.is_empty());
        assert_eq!(mgr.get_tm().mode, DriveMode::Idle);
    }

    #[test]
    fn test_start_on_signal() {
        let mut mgr = follow_mgr();
        let mut loc = BeaconSample::default();
        let mut act = MockActuator::default();

        mgr.advance(0, &loc, &mut act);
        assert!(!mgr.is_moving());

        loc.signal = true;
        mgr.advance(10, &loc, &mut act);

        assert!(mgr.is_moving());
        assert_eq!(mgr.current_cmd_index(), 0);
        // Starting only starts, the first step happens next tick
        assert!(act.dems.is_empty());

        let tm = mgr.get_tm();
        assert_eq!(tm.mode, DriveMode::Moving);
        assert_eq!(tm.cmd_name.as_deref(), Some("DriveCmd::Follow"));

        mgr.advance(510, &loc, &mut act);
        assert_eq!(
            act.dems,
            vec![DriveDems::MoveTo(Pose::new(0.0, 500.0, 0.0))]
        );
    }

    #[test]
    fn test_single_missed_reading_tolerated() {
        let mut mgr = follow_mgr();
        let mut loc = BeaconSample::with_signal(Pose::default());
        let mut act = MockActuator::default();

        mgr.advance(0, &loc, &mut act);
        mgr.advance(100, &loc, &mut act);

        loc.signal = false;
        mgr.advance(200, &loc, &mut act);

        assert!(mgr.is_moving());
        assert!(mgr.watchdog_armed());
        assert_eq!(act.num_stops(), 0);
        // The command still advanced this tick
        assert_eq!(act.dems.len(), 2);
        assert_eq!(act.last_pose(), Some(Pose::new(0.0, 200.0, 0.0)));

        // Signal return disarms the watchdog
        loc.signal = true;
        mgr.advance(300, &loc, &mut act);
        assert!(!mgr.watchdog_armed());
        assert_eq!(act.dems.len(), 3);
    }

    #[test]
    fn test_watchdog_timeout() {
        let mut mgr = follow_mgr();
        let mut loc = BeaconSample::with_signal(Pose::default());
        let mut act = MockActuator::default();

        mgr.advance(900, &loc, &mut act);
        mgr.advance(950, &loc, &mut act);

        // Armed at t = 1000
        loc.signal = false;
        mgr.advance(1000, &loc, &mut act);
        assert!(mgr.watchdog_armed());

        mgr.advance(1100, &loc, &mut act);
        mgr.advance(1199, &loc, &mut act);
        assert!(mgr.is_moving());
        assert_eq!(act.num_stops(), 0);

        mgr.advance(1200, &loc, &mut act);
        assert!(!mgr.is_moving());
        assert!(!mgr.watchdog_armed());
        assert_eq!(act.num_stops(), 1);
        assert_eq!(act.dems.last(), Some(&DriveDems::Stop));
        assert_eq!(mgr.get_tm().num_watchdog_stops, 1);

        // No further advances while the signal stays away
        let num_dems = act.dems.len();
        for t in 1201..2000 {
            mgr.advance(t, &loc, &mut act);
        }
        assert_eq!(act.dems.len(), num_dems);
        assert_eq!(act.num_stops(), 1);

        // Signal return restarts from the first command
        loc.signal = true;
        mgr.advance(2000, &loc, &mut act);
        assert!(mgr.is_moving());
        assert_eq!(mgr.current_cmd_index(), 0);
        assert_eq!(act.dems.len(), num_dems);
    }

    #[test]
    fn test_intermittent_gaps_never_stop() {
        let mut mgr = follow_mgr();
        let mut loc = BeaconSample::with_signal(Pose::default());
        let mut act = MockActuator::default();

        // Signal present one tick in every three, gaps never reach the timeout
        for t in 0..100 {
            loc.signal = t % 3 == 0;
            mgr.advance(t * 50, &loc, &mut act);
        }

        assert!(mgr.is_moving());
        assert_eq!(act.num_stops(), 0);
    }

    #[test]
    fn test_program_cycles() {
        let mut mgr = two_pause_mgr();
        let loc = BeaconSample::with_signal(Pose::new(5.0, 5.0, 0.0));
        let mut act = MockActuator::default();

        mgr.advance(0, &loc, &mut act);
        assert_eq!(mgr.current_cmd_index(), 0);

        let mut indices = vec![];
        let mut t = 0;
        while mgr.get_tm().num_cycles < 3 {
            t += 10;
            mgr.advance(t, &loc, &mut act);
            if indices.last() != Some(&mgr.current_cmd_index()) {
                indices.push(mgr.current_cmd_index());
            }
            assert!(t < 10_000, "program never cycled");
        }

        // 0 -> 1 -> 0 -> 1 -> 0 -> 1 -> 0
        assert_eq!(indices, vec![0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(t, 3 * 150);
        assert_eq!(act.num_stops(), 0);
    }

    #[test]
    fn test_sync_then_follow() {
        let follow = FollowPath::with_uniform_time(line_path(), 1000).unwrap();
        let mut mgr = DriveMgr::new(
            DriveMgrParams::default(),
            vec![DriveCmd::Sync(SyncWithPreamble::new()), follow.into()],
        )
        .unwrap();

        let mut loc = BeaconSample::with_signal(Pose::default());
        loc.preamble = false;
        let mut act = MockActuator::default();

        mgr.advance(0, &loc, &mut act);
        for t in 1..100 {
            mgr.advance(t, &loc, &mut act);
            assert_eq!(mgr.current_cmd_index(), 0);
        }
        assert!(act.dems.is_empty());

        loc.preamble = true;
        mgr.advance(100, &loc, &mut act);
        assert_eq!(mgr.current_cmd_index(), 1);

        loc.preamble = false;
        mgr.advance(1100, &loc, &mut act);

        // Path done, wrapped back to the sync
        assert_eq!(mgr.current_cmd_index(), 0);
        assert_eq!(mgr.get_tm().num_cycles, 1);
        assert_eq!(act.last_pose(), Some(Pose::new(0.0, 1000.0, 0.0)));
    }
}
