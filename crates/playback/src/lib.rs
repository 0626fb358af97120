//! Fixed-timestep frame driver
//!
//! Owns one run of the vehicle/sequencer pair: ticks both at a fixed cadence,
//! hands each frame to a caller-supplied render callback, and handles
//! pause/resume, completion freeze, and reset.

pub mod driver;

pub use driver::*;
