//! Headless playback of a PTSP motion plan.
//!
//! Reads a problem file and a control file, replays the control sequence
//! through the vehicle model at the reference 20 ticks/second, and writes a
//! trajectory trace (`trace.csv`) plus a run summary (`summary.json`).

mod formats;
mod output;

use playback::{Playback, RunConfig};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("usage: ptsp-sim-app <problem-file> <control-file> [out-dir]")]
    Usage,
    #[error(transparent)]
    Format(#[from] formats::FormatError),
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn read_file(path: &str) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Io {
        path: PathBuf::from(path),
        source,
    })
}

fn run() -> Result<(), AppError> {
    let mut args = env::args().skip(1);
    let problem_path = args.next().ok_or(AppError::Usage)?;
    let control_path = args.next().ok_or(AppError::Usage)?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let problem = formats::parse_problem(&read_file(&problem_path)?)?;
    let commands = formats::parse_controls(&read_file(&control_path)?)?;
    log::info!(
        "loaded {}x{} world, {} waypoints, {} commands",
        problem.world_width,
        problem.world_height,
        problem.waypoints.len(),
        commands.len()
    );

    let config = RunConfig::new(problem.initial_heading_deg, problem.initial_position);
    let mut playback = Playback::new(config, commands);

    let mut recorder = output::TraceRecorder::new();
    let frames = playback.run_to_completion(|ctx, state| recorder.record(ctx, state));

    let state = playback.state();
    log::info!(
        "playback complete: {} frames, final position ({:.2}, {:.2}), {}/{} waypoints hit",
        frames,
        state.vehicle.position.x,
        state.vehicle.position.y,
        state.waypoint_hits.len(),
        problem.waypoints.len()
    );

    fs::create_dir_all(&out_dir).map_err(|source| AppError::Io {
        path: out_dir.clone(),
        source,
    })?;

    let trace_path = out_dir.join("trace.csv");
    fs::write(&trace_path, recorder.to_csv()).map_err(|source| AppError::Io {
        path: trace_path.clone(),
        source,
    })?;

    let summary = output::RunSummary::from_run(
        playback.ticks(),
        playback.config().tick,
        state,
        &problem.waypoints,
    );
    let summary_path = out_dir.join("summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?).map_err(|source| {
        AppError::Io {
            path: summary_path.clone(),
            source,
        }
    })?;

    log::info!("wrote {} and {}", trace_path.display(), summary_path.display());
    Ok(())
}

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use control::ControlCommand;

    // End-to-end: parse both formats and replay, checking that the hit
    // record and trace line up with the command script.
    #[test]
    fn test_parsed_run_replays_and_credits_waypoints() {
        let problem = formats::parse_problem(
            "WORLD_DIMENSIONS: 20 20\nINITIAL_DIR: 0\nINITIAL_POS: 2 2\nNUM_WAYPOINTS: 1\nWAYPOINTS\n1 10 2 1.0\n",
        )
        .unwrap();
        let commands = formats::parse_controls("2\n0.0 0.5 0.5 1\n0.0 0.0 0.25 0\n").unwrap();
        assert_eq!(commands[0], ControlCommand::new(0.0, 0.5, 0.5).with_waypoint(1));

        let config = RunConfig::new(problem.initial_heading_deg, problem.initial_position);
        let mut playback = Playback::new(config, commands);
        let mut recorder = output::TraceRecorder::new();
        let frames = playback.run_to_completion(|ctx, state| recorder.record(ctx, state));

        assert_eq!(frames, playback.ticks());
        assert_eq!(recorder.len() as u64, frames);
        assert_eq!(playback.state().waypoint_hits, vec![1]);

        // Heading 0 with no turning: motion is purely along +x.
        let final_pos = playback.state().vehicle.position;
        assert!(final_pos.x > 2.0);
        assert!((final_pos.y - 2.0).abs() < 1e-9);

        let summary = output::RunSummary::from_run(
            playback.ticks(),
            playback.config().tick,
            playback.state(),
            &problem.waypoints,
        );
        assert!(summary.waypoints[0].hit);
    }
}
