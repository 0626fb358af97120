use serde::{Deserialize, Serialize};

/// One scripted control directive.
///
/// A command's controls stay active for `hold_duration` seconds; when the
/// hold drains, the next command takes over and this command's waypoint (if
/// any) is credited as hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlCommand {
    /// Heading change applied each tick while active, in radians per tick.
    pub turn_rate: f64,
    /// Acceleration applied each tick while active.
    pub acceleration: f64,
    /// Time the command stays active, in seconds.
    pub hold_duration: f64,
    /// Waypoint credited when this command finishes its hold.
    pub waypoint: Option<u32>,
}

impl ControlCommand {
    pub fn new(turn_rate: f64, acceleration: f64, hold_duration: f64) -> Self {
        ControlCommand {
            turn_rate,
            acceleration,
            hold_duration,
            waypoint: None,
        }
    }

    /// Credit a waypoint when the command completes.
    pub fn with_waypoint(mut self, id: u32) -> Self {
        self.waypoint = Some(id);
        self
    }
}
