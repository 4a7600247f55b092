//! # Drive library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the drive controller crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomy module - path construction and the drive command sequencer
pub mod auto;

/// Localisation module - the beacon pose source consumed by the autonomy
pub mod loc;

/// Mechanisms module - the drive actuation interface
pub mod mech;

/// Simulation module - a simulated beacon and drive train
pub mod sim;

#[cfg(test)]
pub(crate) mod test_utils;
