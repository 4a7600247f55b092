//! Main drive controller executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Main loop:
//!         - Read the session clock
//!         - Simulated drive train and beacon processing
//!         - DriveMgr processing
//!         - Telemetry archiving
//!
//! The executable runs until the optional run duration (in seconds, the only argument) has
//! elapsed, or forever if none is given.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};

// Internal
use drive_lib::{
    auto::DriveMgr,
    sim::{SimParams, SimRobot},
};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    session::{Session, SessionClock},
    time::Clock,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.01;

/// Number of cycles between two telemetry archives.
const TM_ARCHIVE_PERIOD_CYCLES: u64 = 100;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("drive_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &["drive_lib::sim"], &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Formation Drive Executable\n");
    let host_info = host::get_uname().wrap_err("Failed to get host information")?;
    info!(
        "Running on: {} ({} {} {})",
        host_info.nodename, host_info.sysname, host_info.release, host_info.machine
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- ARGUMENTS ----

    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    let run_duration_ms = match args.len() {
        1 => {
            info!("No run duration provided, running until stopped");
            None
        }
        2 => {
            let run_duration_s: f64 = args[1]
                .parse()
                .wrap_err_with(|| format!("Could not parse run duration \"{}\"", args[1]))?;
            info!("Running for {:.02} s", run_duration_s);
            Some((run_duration_s * 1000.0) as u64)
        }
        n => {
            return Err(eyre!(
                "Expected either zero or one argument, found {}",
                n - 1
            ))
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut drive_mgr = DriveMgr::init("drive_mgr.toml").wrap_err("Failed to initialise DriveMgr")?;
    info!("DriveMgr init complete");

    let sim_params: SimParams =
        util::params::load("sim.toml").wrap_err("Could not load sim params")?;
    let mut sim = SimRobot::new(sim_params);
    info!("SimRobot init complete");

    info!("Module initialisation complete\n");

    session.save("path.json", drive_mgr.path().cloned());
    session.save("drive_mgr_params.json", drive_mgr.params.clone());

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    let clock = SessionClock;
    let mut num_cycles: u64 = 0;

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        let now_ms = clock.now_ms();

        if let Some(d) = run_duration_ms {
            if now_ms >= d {
                info!("Run duration reached, stopping");
                break;
            }
        }

        // ---- SIMULATION ----

        let sample = sim.step(now_ms);

        // ---- AUTONOMY PROCESSING ----

        drive_mgr.advance(now_ms, &sample, &mut sim);

        // ---- TELEMETRY ----

        if num_cycles % TM_ARCHIVE_PERIOD_CYCLES == 0 {
            session.save(
                format!("tm/drive_tm_{:010}.json", now_ms),
                drive_mgr.get_tm(),
            );
            session.save(format!("tm/sim_pose_{:010}.json", now_ms), sim.pose());
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
            ),
        }

        num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    let tm = drive_mgr.get_tm();
    info!(
        "Completed {} cycles, {} program loops, {} watchdog stops",
        num_cycles, tm.num_cycles, tm.num_watchdog_stops
    );
    session.save("drive_tm_final.json", tm);

    session.exit();

    info!("End of execution");

    Ok(())
}
