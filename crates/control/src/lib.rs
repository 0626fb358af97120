//! Scripted control playback
//!
//! This crate provides:
//! - Control commands (turn / acceleration / hold duration / waypoint credit)
//! - A sequencer that walks an ordered command list on a fixed timestep

pub mod command;
pub mod sequencer;

pub use command::*;
pub use sequencer::*;
