//! Headless run outputs: per-tick trajectory trace and a run summary.

use serde::Serialize;
use simcore::{SimContext, SimState, Waypoint};
use std::fmt::Write as _;

/// Collects one trace row per rendered frame. Shaped like a render callback
/// so it plugs straight into `Playback::run_to_completion`.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    rows: Vec<TraceRow>,
}

#[derive(Debug, Clone, Copy)]
struct TraceRow {
    t: f64,
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    dir_x: f64,
    dir_y: f64,
}

impl TraceRecorder {
    pub fn new() -> Self {
        TraceRecorder::default()
    }

    pub fn record(&mut self, ctx: SimContext, state: &SimState) {
        let v = &state.vehicle;
        self.rows.push(TraceRow {
            t: ctx.t,
            x: v.position.x,
            y: v.position.y,
            vx: v.velocity.x,
            vy: v.velocity.y,
            dir_x: v.direction.x,
            dir_y: v.direction.y,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from("t,x,y,vx,vy,dir_x,dir_y\n");
        for r in &self.rows {
            let _ = writeln!(
                out,
                "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                r.t, r.x, r.y, r.vx, r.vy, r.dir_x, r.dir_y
            );
        }
        out
    }
}

/// Hit/unhit status per waypoint, the headless analog of coloring hit
/// waypoints in the animator.
#[derive(Debug, Serialize)]
pub struct WaypointSummary {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub hit: bool,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_seconds: f64,
    pub final_position: [f64; 2],
    pub final_heading_rad: f64,
    pub waypoints: Vec<WaypointSummary>,
    /// Waypoint ids in the order their commands completed.
    pub hit_order: Vec<u32>,
}

impl RunSummary {
    pub fn from_run(ticks: u64, tick: f64, state: &SimState, waypoints: &[Waypoint]) -> Self {
        let v = &state.vehicle;
        RunSummary {
            ticks,
            elapsed_seconds: ticks as f64 * tick,
            final_position: [v.position.x, v.position.y],
            final_heading_rad: v.direction.y.atan2(v.direction.x),
            waypoints: waypoints
                .iter()
                .map(|w| WaypointSummary {
                    id: w.id,
                    x: w.x,
                    y: w.y,
                    radius: w.radius,
                    hit: state.waypoint_hits.contains(&w.id),
                })
                .collect(),
            hit_order: state.waypoint_hits.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simcore::VehicleState;

    fn test_state() -> SimState {
        let mut state = SimState::new(VehicleState::from_heading(
            0.0,
            nalgebra::Vector2::new(1.0, 2.0),
        ));
        state.waypoint_hits = vec![2, 1];
        state
    }

    #[test]
    fn test_trace_csv_has_header_and_rows() {
        let mut recorder = TraceRecorder::new();
        let state = test_state();
        recorder.record(SimContext { dt: 0.05, t: 0.0 }, &state);
        recorder.record(SimContext { dt: 0.05, t: 0.05 }, &state);

        let csv = recorder.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "t,x,y,vx,vy,dir_x,dir_y");
        assert!(lines[1].starts_with("0.0000,1.000000,2.000000"));
    }

    #[test]
    fn test_summary_marks_hits() {
        let state = test_state();
        let waypoints = vec![
            Waypoint { id: 1, x: 0.0, y: 0.0, radius: 1.0 },
            Waypoint { id: 2, x: 5.0, y: 5.0, radius: 1.0 },
            Waypoint { id: 3, x: 9.0, y: 9.0, radius: 1.0 },
        ];

        let summary = RunSummary::from_run(10, 0.05, &state, &waypoints);
        assert!((summary.elapsed_seconds - 0.5).abs() < 1e-12);
        assert!(summary.waypoints[0].hit);
        assert!(summary.waypoints[1].hit);
        assert!(!summary.waypoints[2].hit);
        assert_eq!(summary.hit_order, vec![2, 1]);
    }
}
