//! # Path
//!
//! This module defines the path followed by the robot and the formation transform which builds it
//! from a waypoint table.
//!
//! Two robots trace the same table. The leader's copy is shifted by `-spacing` on both axes, the
//! follower's by `+spacing` and its point order is reversed, so the pair draws mirrored geometry
//! in a consistent relative phase.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::tables::PathTable;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A path defining the desired trajectory of the robot.
///
/// A path is built once, is never empty, and cannot be modified afterwards.
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct Path {
    points_mm: Vec<Vector2<f64>>,
}

/// Parameters of the formation transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathParams {
    /// The table the path is built from
    pub table: PathTable,

    /// Scale applied to the table's x and y coordinates.
    pub scale: [f64; 2],

    /// Translation applied after scaling.
    ///
    /// Units: millimeters
    pub offset_mm: [f64; 2],

    /// Spacing between the two robots of the formation, applied to both axes.
    ///
    /// Units: millimeters
    pub spacing_mm: f64,

    /// The role of this robot in the formation.
    pub role: FormationRole,
}

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

/// Role of a robot in a two robot formation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationRole {
    Leader,
    Follower,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PathError {
    #[error("Attempted to create a path from an empty waypoint table")]
    EmptyTable,

    #[error("The path transform produced a non-finite point at index {0}")]
    NonFinite(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Path {
    /// Build the path described by the parameters.
    pub fn from_params(params: &PathParams) -> Result<Self, PathError> {
        Self::build(params.table.points(), params)
    }

    /// Apply the formation transform to every point of `table`.
    ///
    /// Each point is scaled and translated, then shifted by the formation spacing. Followers
    /// additionally have the order of the points reversed.
    pub fn build(table: &[[f64; 2]], params: &PathParams) -> Result<Self, PathError> {
        if table.is_empty() {
            return Err(PathError::EmptyTable);
        }

        let spacing_mm = match params.role {
            FormationRole::Leader => -params.spacing_mm,
            FormationRole::Follower => params.spacing_mm,
        };

        let mut points_mm = Vec::with_capacity(table.len());

        for (i, p) in table.iter().enumerate() {
            let point = Vector2::new(
                p[0] * params.scale[0] + params.offset_mm[0] + spacing_mm,
                p[1] * params.scale[1] + params.offset_mm[1] + spacing_mm,
            );

            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(PathError::NonFinite(i));
            }

            points_mm.push(point);
        }

        if params.role == FormationRole::Follower {
            points_mm.reverse();
        }

        Ok(Self { points_mm })
    }

    /// The points of the path in order of traversal.
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points_mm
    }

    /// Get the number of points in the path
    pub fn get_num_points(&self) -> usize {
        self.points_mm.len()
    }

    /// Return the length of the path in millimeters, the sum of all segment lengths.
    pub fn get_length(&self) -> f64 {
        self.points_mm
            .windows(2)
            .map(|seg| (seg[1] - seg[0]).norm())
            .sum()
    }
}

impl Default for FormationRole {
    fn default() -> Self {
        FormationRole::Leader
    }
}

impl Default for PathParams {
    fn default() -> Self {
        Self {
            table: PathTable::FigureEight,
            scale: [1100.0, 900.0],
            offset_mm: [0.0, -2750.0],
            spacing_mm: 60.0,
            role: FormationRole::Leader,
        }
    }
}
