//! # Waypoint tables
//!
//! Source tables from which the formation path is built. The figure eight is normalised and must
//! be scaled into millimeters by the path parameters, the other tables are already in millimeters
//! and are used with a scale of one.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Figure of eight starting and ending at the centre, traced twice.
pub const FIGURE_EIGHT: [[f64; 2]; 37] = [
    [0.0, 0.0],
    [0.1, -0.4],
    [0.2, -0.5],
    [0.5, -0.5],
    [0.6, -0.4],
    [0.6, 0.4],
    [0.5, 0.5],
    [0.2, 0.5],
    [0.1, 0.4],
    [0.0, 0.0],
    [-0.1, -0.4],
    [-0.2, -0.5],
    [-0.5, -0.5],
    [-0.6, -0.4],
    [-0.6, 0.4],
    [-0.5, 0.5],
    [-0.2, 0.5],
    [-0.1, 0.4],
    [0.0, 0.0],
    [0.1, -0.4],
    [0.2, -0.5],
    [0.5, -0.5],
    [0.6, -0.4],
    [0.6, 0.4],
    [0.5, 0.5],
    [0.2, 0.5],
    [0.1, 0.4],
    [0.0, 0.0],
    [-0.1, -0.4],
    [-0.2, -0.5],
    [-0.5, -0.5],
    [-0.6, -0.4],
    [-0.6, 0.4],
    [-0.5, 0.5],
    [-0.2, 0.5],
    [-0.1, 0.4],
    [0.0, 0.0],
];

/// Rectangle spanning the rear and front of the arena (mm).
pub const RECTANGLE: [[f64; 2]; 4] = [
    [600.0, -800.0],
    [-600.0, -800.0],
    [-600.0, 0.0],
    [600.0, 0.0],
];

/// Circle around the arena centre (mm).
pub const CIRCLE_CENTRE: [[f64; 2]; 13] = [
    [0.0, 300.0],
    [-280.0, 230.0],
    [-500.0, 50.0],
    [-600.0, -250.0],
    [-500.0, -550.0],
    [-280.0, -730.0],
    [0.0, -800.0],
    [280.0, -730.0],
    [500.0, -550.0],
    [600.0, -250.0],
    [500.0, 50.0],
    [280.0, 230.0],
    [0.0, 300.0],
];

/// Circle in the upper left of the arena (mm).
pub const CIRCLE_UPPER_LEFT: [[f64; 2]; 13] = [
    [0.0, -850.0],
    [280.0, -780.0],
    [500.0, -600.0],
    [600.0, -300.0],
    [500.0, 0.0],
    [280.0, 190.0],
    [0.0, 250.0],
    [-280.0, 190.0],
    [-500.0, 0.0],
    [-600.0, -300.0],
    [-500.0, -600.0],
    [-280.0, -780.0],
    [0.0, -850.0],
];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Selects the waypoint table the path is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathTable {
    FigureEight,
    Rectangle,
    CircleCentre,
    CircleUpperLeft,
    Custom { points: Vec<[f64; 2]> },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PathTable {
    /// The raw points of the table.
    pub fn points(&self) -> &[[f64; 2]] {
        match self {
            PathTable::FigureEight => &FIGURE_EIGHT,
            PathTable::Rectangle => &RECTANGLE,
            PathTable::CircleCentre => &CIRCLE_CENTRE,
            PathTable::CircleUpperLeft => &CIRCLE_UPPER_LEFT,
            PathTable::Custom { points } => points.as_slice(),
        }
    }
}

impl Default for PathTable {
    fn default() -> Self {
        PathTable::FigureEight
    }
}
