use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Kinematic state of the point vehicle.
///
/// `direction` is expected to stay unit length (rotation preserves it, and
/// construction normalizes from a heading angle); this is not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub direction: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub position: Vector2<f64>,
    /// Active turn control, radians per tick (0 is straight).
    pub current_turn: f64,
    /// Active acceleration control (0 is coasting).
    pub current_acceleration: f64,
}

impl VehicleState {
    /// Create a vehicle at rest with an explicit direction vector.
    pub fn new(direction: Vector2<f64>, position: Vector2<f64>) -> Self {
        VehicleState {
            direction,
            velocity: Vector2::zeros(),
            position,
            current_turn: 0.0,
            current_acceleration: 0.0,
        }
    }

    /// Create a vehicle at rest from a heading given in degrees.
    pub fn from_heading(heading_deg: f64, position: Vector2<f64>) -> Self {
        let theta = heading_deg.to_radians();
        VehicleState::new(Vector2::new(theta.cos(), theta.sin()), position)
    }

    /// Store the control inputs for subsequent physics updates.
    ///
    /// Has no immediate kinematic effect; the stored values are consumed by
    /// the kinematics model once per tick until replaced.
    pub fn apply_controls(&mut self, turn: f64, acceleration: f64) {
        self.current_turn = turn;
        self.current_acceleration = acceleration;
    }
}

/// A waypoint target region, used for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Complete per-run simulation state.
///
/// Owned by exactly one run; a restart constructs a fresh value rather than
/// patching this one in place.
#[derive(Debug, Clone)]
pub struct SimState {
    pub vehicle: VehicleState,
    /// Every position the vehicle has occupied, one entry per physics tick.
    /// The initial position is not an element.
    pub path: Vec<Vector2<f64>>,
    /// Waypoint ids in the order their owning commands completed.
    pub waypoint_hits: Vec<u32>,
}

impl SimState {
    pub fn new(vehicle: VehicleState) -> Self {
        SimState {
            vehicle,
            path: Vec::new(),
            waypoint_hits: Vec::new(),
        }
    }
}
