//! Discrete-time kinematics for the point vehicle
//!
//! One model: turn-and-thrust motion with multiplicative friction, updated
//! once per fixed tick from the controls stored on the vehicle state.

pub mod vehicle;

pub use vehicle::*;
