//! Input handling module
//!
//! Provides input mapping from key names to simulation commands.

mod input_mapper;

pub use input_mapper::{InputMapper, SimulationCommand};
