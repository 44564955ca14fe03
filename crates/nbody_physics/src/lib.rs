//! N-body gravity simulation for NBodySim
//!
//! This crate provides the simulation core:
//! - Point-mass bodies, either fixed anchors or free movers
//! - Pairwise Newtonian gravity with a scene distance ratio
//! - A world that accumulates every pair, then integrates, once per tick

pub mod body;
pub mod gravity;
pub mod world;

// Re-export commonly used types
pub use body::{Body, BodyKey, BodyType, InitialState};
pub use gravity::{accumulate_pair, GravityParams};
pub use world::{BodyInstance, GravityWorld, SimulationState};
