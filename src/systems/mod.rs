//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod parameters;
mod simulation;

pub use parameters::{Parameter, ParameterError, ParameterPanel, ParameterTarget};
pub use simulation::{FrameResult, SimulationSystem};
