//! NBodySim - Sun/Earth/Moon gravity demo
//!
//! Host-side pieces around the `nbody_physics` core: configuration, scene
//! construction, command input, the parameter panel and the frame driver.
//! Rendering, windowing and the GUI overlay are external collaborators.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
