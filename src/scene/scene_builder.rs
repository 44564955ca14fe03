//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for populating a gravity world, plus the reference
//! Sun/Earth/Moon scene.

use crate::config::ScenarioConfig;
use nbody_math::Vec3;
use nbody_physics::{Body, GravityParams, GravityWorld};

/// Render scale of the sun sphere
pub const SUN_DISPLAY_SCALE: f32 = 4.0;
/// Render scale of the earth sphere
pub const EARTH_DISPLAY_SCALE: f32 = 1.5;

/// Builder for constructing gravity scenes
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .with_gravity(GravityParams::new(0.01, 100.0))
///     .add_fixed("sun", Vec3::new(0.0, 0.0, -300.0), 1.0e7, 4.0)
///     .add_free("earth", Vec3::new(0.0, 80.0, -300.0), Vec3::new(0.35, 0.0, 0.0), 1.0e4, 1.5)
///     .build();
/// ```
pub struct SceneBuilder {
    world: GravityWorld,
}

impl SceneBuilder {
    /// Create a new scene builder with default gravity
    pub fn new() -> Self {
        Self {
            world: GravityWorld::new(),
        }
    }

    /// Set the gravity parameters
    pub fn with_gravity(mut self, params: GravityParams) -> Self {
        self.world.params = params;
        self
    }

    /// Add an immovable anchor body
    pub fn add_fixed(mut self, name: &str, position: Vec3, mass: f32, scale: f32) -> Self {
        self.world.add_body(
            Body::fixed(position, mass)
                .with_name(name)
                .with_display_scale(scale),
        );
        self
    }

    /// Add a body that moves under gravity
    pub fn add_free(
        mut self,
        name: &str,
        position: Vec3,
        velocity: Vec3,
        mass: f32,
        scale: f32,
    ) -> Self {
        self.world.add_body(
            Body::free(position, velocity, mass)
                .with_name(name)
                .with_display_scale(scale),
        );
        self
    }

    /// Add a custom body to the scene
    pub fn add_body(mut self, body: Body) -> Self {
        self.world.add_body(body);
        self
    }

    /// Build the scene and return the configured world (Idle)
    pub fn build(self) -> GravityWorld {
        self.world
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the reference scene: a fixed sun with the earth above it on +Y and
/// the moon above the earth
pub fn sun_earth_moon(scenario: &ScenarioConfig, params: GravityParams) -> GravityWorld {
    let sun_position = scenario.sun_position;
    let earth_position = sun_position + Vec3::Y * scenario.earth_sun_distance;
    let moon_position = earth_position + Vec3::Y * scenario.earth_moon_distance;

    SceneBuilder::new()
        .with_gravity(params)
        .add_fixed("sun", sun_position, scenario.sun_mass, SUN_DISPLAY_SCALE)
        .add_free(
            "earth",
            earth_position,
            scenario.earth_velocity,
            scenario.earth_mass,
            EARTH_DISPLAY_SCALE,
        )
        .add_free(
            "moon",
            moon_position,
            scenario.moon_velocity,
            scenario.moon_mass,
            1.0,
        )
        .build()
}
