//! Shared state types and model traits for the playback simulation
//!
//! Every stepping crate (kinematics, control, playback) operates on the
//! state structs defined here through the `Model` trait family.

pub mod state;
pub mod traits;

pub use state::*;
pub use traits::*;
