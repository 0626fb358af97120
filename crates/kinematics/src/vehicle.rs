use nalgebra::Rotation2;
use simcore::{MechanicsModel, Model, SimContext, SimState, VehicleState};

/// Per-tick multiplicative velocity decay used by the reference vehicle.
pub const DEFAULT_FRICTION: f64 = 0.99;

/// Kinematic model of the point vehicle.
///
/// Turning is an instantaneous heading change applied once per tick, and
/// friction is plain multiplicative decay. Neither is physically exact; both
/// are deliberate discrete-time approximations and part of the model's
/// contract.
#[derive(Debug, Clone, Copy)]
pub struct VehicleModel {
    /// Friction coefficient in (0, 1).
    pub friction: f64,
}

impl VehicleModel {
    pub fn new(friction: f64) -> Self {
        VehicleModel { friction }
    }

    /// Advance the vehicle by one tick using its stored controls.
    ///
    /// The update order is a contract: rotate the heading, thrust along the
    /// rotated heading, apply friction, then translate. Reordering any of
    /// these produces a different trajectory. Never fails.
    pub fn advance(&self, vehicle: &mut VehicleState) {
        vehicle.direction = Rotation2::new(vehicle.current_turn) * vehicle.direction;
        vehicle.velocity += vehicle.direction * vehicle.current_acceleration;
        vehicle.velocity *= self.friction;
        vehicle.position += vehicle.velocity;
    }
}

impl Default for VehicleModel {
    fn default() -> Self {
        VehicleModel::new(DEFAULT_FRICTION)
    }
}

impl Model for VehicleModel {
    fn reset(&mut self) {
        // No internal state beyond the friction constant
    }
}

impl MechanicsModel for VehicleModel {
    fn step_physics(&mut self, _ctx: SimContext, state: &mut SimState) {
        self.advance(&mut state.vehicle);
        state.path.push(state.vehicle.position);
    }
}
