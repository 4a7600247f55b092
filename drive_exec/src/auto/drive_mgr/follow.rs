//! # [`FollowPath`] drive command

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::{debug, info};

use crate::{auto::path::Path, loc::Pose, mech::Actuator};

use super::{linear_move::LinearMove, DriveMgrError};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Walks a path point by point with one [`LinearMove`] per point.
///
/// The first move starts from the pose the robot had when the command started, every following
/// move starts from the previous point. Segments are scheduled back to back, so if a tick arrives
/// late any segments whose time has already passed are skipped over.
#[derive(Debug)]
pub struct FollowPath {
    path: Path,
    moves: Vec<LinearMove>,

    /// Index of the executing move
    current: usize,

    /// Scheduled start time of the executing move
    seg_start_time_ms: u64,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl FollowPath {
    /// Create a new follow command, with one duration per point of the path.
    pub fn new(path: Path, segment_times_ms: &[u64]) -> Result<Self, DriveMgrError> {
        if segment_times_ms.len() != path.get_num_points() {
            return Err(DriveMgrError::SegmentCountMismatch {
                num_points: path.get_num_points(),
                num_times: segment_times_ms.len(),
            });
        }

        let moves = path
            .points()
            .iter()
            .zip(segment_times_ms)
            .map(|(p, t)| LinearMove::new(*p, *t))
            .collect();

        Ok(Self {
            path,
            moves,
            current: 0,
            seg_start_time_ms: 0,
        })
    }

    /// Create a new follow command where every segment takes the same time.
    pub fn with_uniform_time(path: Path, segment_time_ms: u64) -> Result<Self, DriveMgrError> {
        let times = vec![segment_time_ms; path.get_num_points()];
        Self::new(path, &times)
    }

    pub fn start(&mut self, now_ms: u64, start_pose: &Pose) -> Option<u64> {
        self.current = 0;
        self.seg_start_time_ms = now_ms;
        self.moves[0].start(start_pose);

        let total_ms: u64 = self.moves.iter().map(LinearMove::duration_ms).sum();

        info!(
            "Following {} point path ({:.0} mm) over {} ms",
            self.path.get_num_points(),
            self.path.get_length(),
            total_ms
        );

        Some(total_ms)
    }

    /// Issue the pose of the current segment, returning true once the last segment is complete.
    pub fn step(&mut self, now_ms: u64, act: &mut dyn Actuator) -> bool {
        loop {
            let elapsed_ms = now_ms.saturating_sub(self.seg_start_time_ms);
            let duration_ms = self.moves[self.current].duration_ms();

            if elapsed_ms < duration_ms {
                let mv = &self.moves[self.current];
                mv.update(act, mv.normalised_time(elapsed_ms));
                return false;
            }

            // Segment time is up, land exactly on the final target
            if self.current + 1 == self.moves.len() {
                self.moves[self.current].update(act, 1.0);
                info!("Path complete");
                return true;
            }

            let seg_start = Pose::at(self.moves[self.current].target_mm());

            self.seg_start_time_ms += duration_ms;
            self.current += 1;
            self.moves[self.current].start(&seg_start);

            debug!(
                "Segment {}/{} started",
                self.current + 1,
                self.moves.len()
            );
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the executing segment.
    pub fn current_segment(&self) -> usize {
        self.current
    }
}
