//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{self, info};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// Messages are written to stdout and to the session's log file, each one
/// stamped with the number of seconds elapsed since the session epoch.
///
/// Targets listed in `quiet_targets` (module paths such as
/// `drive_lib::sim`) log at `Info` and above unless `min_level` is `Trace`,
/// so that per-cycle output from them does not drown a `Debug` run.
///
/// # Notes
///
/// - `min_level` must be at least `log::Level::Info`, the drive controller
///   always reports its state transitions.
///
/// # Safety
///
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    min_level: self::LevelFilter,
    quiet_targets: &[&'static str],
    session: &session::Session,
) -> Result<(), LoggerInitError> {
    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level));
    }

    let log_file = fern::log_file(session.log_file_path.clone())
        .map_err(LoggerInitError::LogFileInitError)?;

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{:>11.4}s {} {}{}",
                session::get_elapsed_seconds(),
                level_tag(record.level()),
                target_prefix(record.level(), record.target()),
                message
            ))
        })
        .level(min_level);

    for target in quiet_targets {
        dispatch = dispatch.level_for(*target, quiet_level(min_level));
    }

    dispatch
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?}", min_level);
    if !quiet_targets.is_empty() {
        info!(
            "    Quiet targets ({:?}): {:?}",
            quiet_level(min_level),
            quiet_targets
        );
    }
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Level applied to quiet targets for the given global level.
fn quiet_level(min_level: LevelFilter) -> LevelFilter {
    match min_level {
        LevelFilter::Trace => LevelFilter::Trace,
        l => l.min(LevelFilter::Info),
    }
}

/// Module path shown before debug and trace messages, empty otherwise.
fn target_prefix(level: log::Level, target: &str) -> String {
    match level {
        log::Level::Debug | log::Level::Trace => format!("{}: ", target),
        _ => String::new(),
    }
}

/// Fixed width, coloured tag for a log level
fn level_tag(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "trace".dimmed(),
        log::Level::Debug => "debug".cyan(),
        log::Level::Info => " info".green(),
        log::Level::Warn => " WARN".yellow().bold(),
        log::Level::Error => "ERROR".red().bold(),
    }
}
