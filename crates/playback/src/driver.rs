use control::{ControlCommand, ControlSequencer};
use kinematics::{VehicleModel, DEFAULT_FRICTION};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::{ControlModel, MechanicsModel, Model, SimContext, SimState, VehicleState};

/// Reference cadence: 50 ms per tick, 20 ticks per second.
pub const DEFAULT_TICK: f64 = 0.05;

/// Everything needed to construct or reconstruct a run.
///
/// This is the single construction entry point; there is no other way to
/// seed vehicle or sequencer state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Initial heading in degrees.
    pub initial_heading_deg: f64,
    /// Initial position [x, y].
    pub initial_position: [f64; 2],
    /// Per-tick multiplicative velocity decay, in (0, 1).
    pub friction: f64,
    /// Timestep length in seconds.
    pub tick: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            initial_heading_deg: 0.0,
            initial_position: [0.0, 0.0],
            friction: DEFAULT_FRICTION,
            tick: DEFAULT_TICK,
        }
    }
}

impl RunConfig {
    pub fn new(initial_heading_deg: f64, initial_position: [f64; 2]) -> Self {
        RunConfig {
            initial_heading_deg,
            initial_position,
            ..Default::default()
        }
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_tick(mut self, tick: f64) -> Self {
        self.tick = tick;
        self
    }
}

/// Externally visible run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Paused,
    Complete,
}

/// Drives one run of the vehicle/sequencer pair at a fixed timestep.
///
/// Single-threaded and cooperative: a tick runs to completion before control
/// returns to the caller, so a render step never observes state mid-update.
pub struct Playback {
    config: RunConfig,
    vehicle_model: VehicleModel,
    sequencer: ControlSequencer,
    state: SimState,
    t: f64,
    ticks: u64,
    paused: bool,
    accumulator: f64,
}

impl Playback {
    pub fn new(config: RunConfig, commands: Vec<ControlCommand>) -> Self {
        let vehicle = Self::initial_vehicle(&config);
        Playback {
            vehicle_model: VehicleModel::new(config.friction),
            sequencer: ControlSequencer::new(commands),
            state: SimState::new(vehicle),
            config,
            t: 0.0,
            ticks: 0,
            paused: false,
            accumulator: 0.0,
        }
    }

    fn initial_vehicle(config: &RunConfig) -> VehicleState {
        VehicleState::from_heading(
            config.initial_heading_deg,
            Vector2::new(config.initial_position[0], config.initial_position[1]),
        )
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn context(&self) -> SimContext {
        SimContext {
            dt: self.config.tick,
            t: self.t,
        }
    }

    /// Number of physics updates performed; equals the path length.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status(&self) -> RunStatus {
        if self.sequencer.is_complete() {
            RunStatus::Complete
        } else if self.paused {
            RunStatus::Paused
        } else {
            RunStatus::Running
        }
    }

    pub fn is_complete(&self) -> bool {
        self.sequencer.is_complete()
    }

    /// Stop advancing simulation state. Callers may keep redrawing the
    /// frozen frame from `state()`.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume ticking. A no-op once the run is complete; only `reset`
    /// leaves that state.
    pub fn resume(&mut self) {
        if !self.sequencer.is_complete() {
            self.paused = false;
        }
    }

    /// Run one tick: sequencer first, then physics. A guaranteed no-op
    /// while paused or after completion.
    ///
    /// On the tick the command list runs out the vehicle is not advanced,
    /// freezing the display at the last simulated state.
    pub fn step(&mut self) -> RunStatus {
        if self.paused || self.sequencer.is_complete() {
            return self.status();
        }

        let ctx = self.context();
        self.sequencer.step_control(ctx, &mut self.state);
        if self.sequencer.is_complete() {
            log::debug!("run complete after {} ticks ({:.2}s)", self.ticks, self.t);
            return RunStatus::Complete;
        }

        self.vehicle_model.step_physics(ctx, &mut self.state);
        self.t += self.config.tick;
        self.ticks += 1;
        self.status()
    }

    /// Advance by an arbitrary elapsed time, running as many whole fixed
    /// ticks as fit. Returns the unconsumed remainder.
    ///
    /// Trajectories depend only on the number of ticks run, so feeding
    /// wall-clock deltas here matches calling `step` per timer callback.
    pub fn advance_by(&mut self, elapsed: f64) -> f64 {
        self.accumulator += elapsed;
        while self.accumulator >= self.config.tick {
            self.step();
            self.accumulator -= self.config.tick;
        }
        self.accumulator
    }

    /// Batch mode: tick until the run completes, invoking `render` once per
    /// physics update, after the state mutation. The callback gets shared
    /// references only and cannot mutate simulation state.
    ///
    /// Returns the number of frames rendered. Stops early if paused.
    pub fn run_to_completion<F>(&mut self, mut render: F) -> u64
    where
        F: FnMut(SimContext, &SimState),
    {
        let mut frames = 0;
        while self.status() == RunStatus::Running {
            let before = self.ticks;
            self.step();
            if self.ticks > before {
                render(self.context(), &self.state);
                frames += 1;
            }
        }
        frames
    }

    /// Discard the current run and construct a fresh one from the stored
    /// config and command list. Path history and waypoint hits are cleared.
    pub fn reset(&mut self) {
        self.state = SimState::new(Self::initial_vehicle(&self.config));
        self.sequencer.reset();
        self.t = 0.0;
        self.ticks = 0;
        self.paused = false;
        self.accumulator = 0.0;
        log::debug!("playback reset");
    }
}

impl Model for Playback {
    fn reset(&mut self) {
        Playback::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_commands() -> Vec<ControlCommand> {
        vec![
            ControlCommand::new(0.05, 1.0, 0.5).with_waypoint(1),
            ControlCommand::new(-0.05, 0.5, 0.5),
            ControlCommand::new(0.0, 0.0, 0.25).with_waypoint(3),
        ]
    }

    fn test_playback() -> Playback {
        Playback::new(RunConfig::new(45.0, [2.0, 2.0]), test_commands())
    }

    #[test]
    fn test_runs_to_completion_and_freezes() {
        let mut pb = test_playback();
        for _ in 0..1000 {
            pb.step();
        }
        assert_eq!(pb.status(), RunStatus::Complete);

        let frozen = pb.state().vehicle;
        let path_len = pb.state().path.len();
        for _ in 0..10 {
            pb.step();
        }
        assert_eq!(pb.state().vehicle, frozen);
        assert_eq!(pb.state().path.len(), path_len);
    }

    #[test]
    fn test_completion_collects_all_waypoints() {
        let mut pb = test_playback();
        while pb.status() == RunStatus::Running {
            pb.step();
        }
        assert_eq!(pb.state().waypoint_hits, vec![1, 3]);
    }

    #[test]
    fn test_pause_gates_stepping() {
        let mut pb = test_playback();
        pb.step();
        let snapshot = pb.state().vehicle;

        pb.pause();
        for _ in 0..5 {
            assert_eq!(pb.step(), RunStatus::Paused);
        }
        assert_eq!(pb.state().vehicle, snapshot);

        pb.resume();
        pb.step();
        assert_ne!(pb.state().vehicle, snapshot);
    }

    #[test]
    fn test_resume_after_complete_is_noop() {
        let mut pb = test_playback();
        while pb.status() == RunStatus::Running {
            pb.step();
        }

        pb.resume();
        assert_eq!(pb.status(), RunStatus::Complete);
        let frozen = pb.state().vehicle;
        pb.step();
        assert_eq!(pb.state().vehicle, frozen);
    }

    #[test]
    fn test_reset_matches_fresh_run_exactly() {
        let mut reset_pb = test_playback();
        for _ in 0..7 {
            reset_pb.step();
        }
        reset_pb.reset();
        assert!(reset_pb.state().path.is_empty());
        assert!(reset_pb.state().waypoint_hits.is_empty());

        let mut fresh = test_playback();
        for _ in 0..3 {
            reset_pb.step();
            fresh.step();
        }

        assert_eq!(reset_pb.state().vehicle, fresh.state().vehicle);
        assert_eq!(reset_pb.state().path, fresh.state().path);
    }

    #[test]
    fn test_advance_by_matches_per_tick_stepping() {
        let mut stepped = test_playback();
        let mut batched = test_playback();

        // Irregular wall-clock deltas must reduce to the same fixed ticks.
        let mut remainder = 0.0;
        for _ in 0..20 {
            remainder = batched.advance_by(0.07);
        }
        assert!(remainder >= 0.0 && remainder < batched.config().tick);
        // 20 * 0.07 = 1.4s is 28 ticks of 0.05s; rounding may withhold the
        // last one, but whatever ran must match stepping tick for tick.
        let n = batched.ticks();
        assert!(n == 27 || n == 28, "unexpected tick count {n}");
        for _ in 0..n {
            stepped.step();
        }

        assert_eq!(batched.ticks(), stepped.ticks());
        assert_eq!(batched.state().vehicle, stepped.state().vehicle);
    }

    #[test]
    fn test_render_callback_sees_each_frame() {
        let mut pb = test_playback();
        let mut frames = 0u64;
        let mut last_path_len = 0usize;

        let rendered = pb.run_to_completion(|ctx, state| {
            frames += 1;
            assert!(state.path.len() > last_path_len);
            last_path_len = state.path.len();
            assert!(ctx.dt > 0.0);
        });

        assert_eq!(rendered, frames);
        assert_eq!(frames, pb.ticks());
        assert_eq!(last_path_len as u64, pb.ticks());
    }

    #[test]
    fn test_empty_sequence_completes_without_frames() {
        let mut pb = Playback::new(RunConfig::default(), Vec::new());
        let frames = pb.run_to_completion(|_, _| {});
        assert_eq!(frames, 0);
        assert_eq!(pb.status(), RunStatus::Complete);
        assert!(pb.state().path.is_empty());
    }
}
