use simcore::{ControlModel, Model, SimContext, SimState};

use crate::ControlCommand;

/// Lifecycle of one sequencer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerStatus {
    Running,
    /// Terminal: every command's hold has drained. Only constructing (or
    /// resetting to) a fresh sequencer leaves this state.
    Complete,
}

/// What happened during one sequencer tick.
///
/// Command transitions are reported here explicitly rather than inferred from
/// the remaining hold time, so waypoint-hit detection is independent of the
/// tick size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvent {
    /// Index of the command that became active this tick.
    pub activated: Option<usize>,
    /// Waypoint credited by the command that finished its hold this tick.
    pub waypoint_hit: Option<u32>,
    /// True on the tick the command list ran out.
    pub finished: bool,
}

/// Walks an ordered, immutable command list on a fixed timestep.
#[derive(Debug, Clone)]
pub struct ControlSequencer {
    commands: Vec<ControlCommand>,
    /// Next command to load; always in `0..=commands.len()`.
    index: usize,
    remaining_hold: f64,
    status: SequencerStatus,
}

impl ControlSequencer {
    pub fn new(commands: Vec<ControlCommand>) -> Self {
        ControlSequencer {
            commands,
            index: 0,
            remaining_hold: 0.0,
            status: SequencerStatus::Running,
        }
    }

    pub fn status(&self) -> SequencerStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SequencerStatus::Complete
    }

    pub fn commands(&self) -> &[ControlCommand] {
        &self.commands
    }

    /// The command currently driving the vehicle, if one has been loaded.
    pub fn active(&self) -> Option<&ControlCommand> {
        self.index.checked_sub(1).and_then(|i| self.commands.get(i))
    }

    /// Hold time left on the active command. May be negative on the tick a
    /// hold drains; it is not clamped to zero.
    pub fn remaining_hold(&self) -> f64 {
        self.remaining_hold
    }

    /// Drain the hold timer by `dt` and switch commands when it runs out.
    ///
    /// At most one command is loaded per tick. Once complete, further calls
    /// are a guaranteed no-op returning an empty event.
    pub fn tick(&mut self, dt: f64) -> TickEvent {
        if self.is_complete() {
            return TickEvent::default();
        }

        self.remaining_hold -= dt;
        if self.remaining_hold > 0.0 {
            return TickEvent::default();
        }

        // A transition: the previously active command (if any) has finished
        // its hold and gets its waypoint credited now.
        let waypoint_hit = self
            .index
            .checked_sub(1)
            .and_then(|i| self.commands[i].waypoint);

        if self.index < self.commands.len() {
            // The next hold replaces whatever overshoot the timer carried;
            // the trigger comparison above ran on the raw negative value.
            self.remaining_hold = self.commands[self.index].hold_duration;
            self.index += 1;
            TickEvent {
                activated: Some(self.index - 1),
                waypoint_hit,
                finished: false,
            }
        } else {
            self.status = SequencerStatus::Complete;
            TickEvent {
                activated: None,
                waypoint_hit,
                finished: true,
            }
        }
    }
}

impl Model for ControlSequencer {
    fn reset(&mut self) {
        self.index = 0;
        self.remaining_hold = 0.0;
        self.status = SequencerStatus::Running;
    }
}

impl ControlModel for ControlSequencer {
    fn step_control(&mut self, ctx: SimContext, state: &mut SimState) {
        let event = self.tick(ctx.dt);

        if let Some(i) = event.activated {
            let cmd = self.commands[i];
            log::debug!(
                "t={:.2}: command {} active (turn {}, accel {}, hold {}s)",
                ctx.t,
                i,
                cmd.turn_rate,
                cmd.acceleration,
                cmd.hold_duration
            );
            state.vehicle.apply_controls(cmd.turn_rate, cmd.acceleration);
        }

        if let Some(id) = event.waypoint_hit {
            state.waypoint_hits.push(id);
        }
    }
}
