//! Point-mass body types for the gravity simulation

use nbody_math::Vec3;
use slotmap::new_key_type;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in the gravity world
    ///
    /// Uses generational indexing so a key to a removed body returns None
    /// instead of aliasing whatever later reuses its slot.
    pub struct BodyKey;
}

/// Whether a body moves under gravity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyType {
    /// Integrates motion from accumulated acceleration
    #[default]
    Free,
    /// Immovable anchor: position and velocity never change
    Fixed,
}

/// Position and velocity recorded at setup, restored on reset
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InitialState {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// A point mass participating in the simulation
#[derive(Clone, Debug)]
pub struct Body {
    /// Mass of the body (tunable on fixed and free bodies alike)
    pub mass: f32,
    /// Display name, used for logs and parameter groups
    pub name: Option<String>,
    /// Sphere scale the renderer draws this body with
    pub display_scale: f32,
    position: Vec3,
    velocity: Vec3,
    body_type: BodyType,
    initial: InitialState,
    /// Acceleration accumulated during the current tick
    acceleration: Vec3,
}

impl Body {
    /// Create a free body with the given initial conditions
    pub fn free(position: Vec3, velocity: Vec3, mass: f32) -> Self {
        Self {
            mass,
            name: None,
            display_scale: 1.0,
            position,
            velocity,
            body_type: BodyType::Free,
            initial: InitialState {
                position,
                velocity,
            },
            acceleration: Vec3::ZERO,
        }
    }

    /// Create a fixed body; its velocity is zero for its whole life
    pub fn fixed(position: Vec3, mass: f32) -> Self {
        Self {
            body_type: BodyType::Fixed,
            ..Self::free(position, Vec3::ZERO, mass)
        }
    }

    /// Set the display name of this body
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the render scale of this body
    pub fn with_display_scale(mut self, scale: f32) -> Self {
        self.display_scale = scale;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    pub fn is_fixed(&self) -> bool {
        self.body_type == BodyType::Fixed
    }

    /// The recorded initial conditions
    pub fn initial(&self) -> InitialState {
        self.initial
    }

    /// Acceleration accumulated so far in the current tick
    pub fn pending_acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Name for log output, falling back to "unnamed"
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// Overwrite position and velocity together. No-op on a fixed body.
    pub fn set_state(&mut self, position: Vec3, velocity: Vec3) {
        if self.is_fixed() {
            return;
        }
        self.position = position;
        self.velocity = velocity;
    }

    /// Replace the recorded initial conditions. No-op on a fixed body.
    pub fn set_initial(&mut self, position: Vec3, velocity: Vec3) {
        if self.is_fixed() {
            return;
        }
        self.initial = InitialState {
            position,
            velocity,
        };
    }

    /// Restore the recorded initial conditions and drop pending acceleration
    pub fn reset(&mut self) {
        let initial = self.initial;
        self.set_state(initial.position, initial.velocity);
        self.acceleration = Vec3::ZERO;
    }

    /// Add to this tick's acceleration. Fixed bodies never accumulate.
    pub fn accumulate(&mut self, acceleration: Vec3) {
        if self.is_fixed() {
            return;
        }
        self.acceleration += acceleration;
    }

    /// Advance one step: velocity from accumulated acceleration, then position
    /// from the new velocity. Clears the accumulator.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_fixed() {
            return;
        }
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.acceleration = Vec3::ZERO;
    }
}
