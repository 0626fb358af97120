use crate::SimState;

/// Timestep context handed to every model step.
#[derive(Debug, Clone, Copy)]
pub struct SimContext {
    /// Fixed timestep length in seconds.
    pub dt: f64,
    /// Simulated time elapsed since the start of the run.
    pub t: f64,
}

pub trait Model {
    fn reset(&mut self);
}

/// Advances the physical (kinematic) portion of the state by one tick.
pub trait MechanicsModel: Model {
    fn step_physics(&mut self, ctx: SimContext, state: &mut SimState);
}

/// Issues control inputs into the state, once per tick.
pub trait ControlModel: Model {
    fn step_control(&mut self, ctx: SimContext, state: &mut SimState);
}

#[cfg(test)]
mod tests {
    use crate::VehicleState;
    use nalgebra::Vector2;

    #[test]
    fn test_from_heading_unit_direction() {
        let v = VehicleState::from_heading(90.0, Vector2::new(3.0, 4.0));
        assert!((v.direction.norm() - 1.0).abs() < 1e-12);
        assert!(v.direction.x.abs() < 1e-12);
        assert!((v.direction.y - 1.0).abs() < 1e-12);
        assert!((v.velocity.norm()).abs() < 1e-12);
    }

    #[test]
    fn test_apply_controls_stores_without_moving() {
        let mut v = VehicleState::from_heading(0.0, Vector2::zeros());
        v.apply_controls(0.3, -1.5);
        assert!((v.current_turn - 0.3).abs() < 1e-12);
        assert!((v.current_acceleration - (-1.5)).abs() < 1e-12);
        assert!((v.position.norm()).abs() < 1e-12);
        assert!((v.velocity.norm()).abs() < 1e-12);
    }
}
