//! Scene construction utilities
//!
//! This module provides a declarative API for building gravity scenes.

mod scene_builder;

pub use scene_builder::{sun_earth_moon, SceneBuilder, EARTH_DISPLAY_SCALE, SUN_DISPLAY_SCALE};
