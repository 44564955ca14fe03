//! Tunable simulation parameters
//!
//! The table a debug overlay binds its widgets to: each entry names a live
//! value in the world with the range and step the widget should offer. Edits
//! go through [`ParameterPanel::set`], which clamps into range.

use nbody_math::Vec3;
use nbody_physics::{Body, BodyKey, GravityWorld};
use std::collections::BTreeMap;
use std::fmt;

const MASS_MAX: f32 = 10_000_000.0;
const VELOCITY_MAX: f32 = 100.0;
const GRAVITY_CONSTANT_MAX: f32 = 2.0;
const DISTANCE_RATIO_MAX: f32 = 10_000.0;

/// Which value a parameter reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterTarget {
    /// Mass of a body (fixed or free)
    Mass(BodyKey),
    /// X component of a free body's initial velocity
    InitialVelocityX(BodyKey),
    /// Y component of a free body's initial velocity
    InitialVelocityY(BodyKey),
    GravityConstant,
    DistanceRatio,
}

/// One tunable entry
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Unique lookup key, e.g. `earth_mass`
    pub key: String,
    /// Group heading, e.g. `Earth`
    pub group: String,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Decimal places to display
    pub precision: u8,
    pub target: ParameterTarget,
}

impl Parameter {
    /// Clamp a value into this parameter's range
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// Error type for parameter edits
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// No parameter with this key
    UnknownParameter(String),
    /// The parameter's body is no longer in the world
    MissingBody(String),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::UnknownParameter(key) => write!(f, "Unknown parameter: {}", key),
            ParameterError::MissingBody(key) => {
                write!(f, "Parameter '{}' refers to a removed body", key)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// The set of parameters bound to one world
#[derive(Debug, Clone)]
pub struct ParameterPanel {
    parameters: Vec<Parameter>,
}

impl ParameterPanel {
    /// Panel with only the gravity parameters
    pub fn new() -> Self {
        Self {
            parameters: vec![
                Parameter {
                    key: "gravity_constant".to_string(),
                    group: "Gravity".to_string(),
                    label: "Force",
                    min: 0.0,
                    max: GRAVITY_CONSTANT_MAX,
                    step: 0.01,
                    precision: 3,
                    target: ParameterTarget::GravityConstant,
                },
                Parameter {
                    key: "distance_ratio".to_string(),
                    group: "Gravity".to_string(),
                    label: "Distance Ratio",
                    min: 0.0,
                    max: DISTANCE_RATIO_MAX,
                    step: 10.0,
                    precision: 0,
                    target: ParameterTarget::DistanceRatio,
                },
            ],
        }
    }

    /// Panel with the gravity parameters and every named body in `world`
    pub fn for_world(world: &GravityWorld) -> Self {
        let mut panel = Self::new();
        for (key, body) in world.bodies() {
            panel.bind_body(key, body);
        }
        panel
    }

    /// Add the entries for one body. Unnamed bodies are skipped.
    ///
    /// Every body gets a mass entry; free bodies also get initial velocity x/y.
    pub fn bind_body(&mut self, key: BodyKey, body: &Body) {
        let Some(name) = body.name.as_deref() else {
            return;
        };
        let group = capitalize(name);

        self.parameters.push(Parameter {
            key: format!("{}_mass", name),
            group: group.clone(),
            label: "Mass",
            min: 0.0,
            max: MASS_MAX,
            step: 1000.0,
            precision: 0,
            target: ParameterTarget::Mass(key),
        });

        if body.is_fixed() {
            return;
        }

        for (suffix, label, target) in [
            ("velocity_x", "Velocity x", ParameterTarget::InitialVelocityX(key)),
            ("velocity_y", "Velocity y", ParameterTarget::InitialVelocityY(key)),
        ] {
            self.parameters.push(Parameter {
                key: format!("{}_{}", name, suffix),
                group: group.clone(),
                label,
                min: 0.0,
                max: VELOCITY_MAX,
                step: 1.0,
                precision: 2,
                target,
            });
        }
    }

    /// All entries in display order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up an entry by key
    pub fn find(&self, key: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.key == key)
    }

    fn lookup(&self, key: &str) -> Result<&Parameter, ParameterError> {
        self.find(key)
            .ok_or_else(|| ParameterError::UnknownParameter(key.to_string()))
    }

    /// Read the live value of a parameter
    pub fn get(&self, world: &GravityWorld, key: &str) -> Result<f32, ParameterError> {
        let parameter = self.lookup(key)?;
        let missing = || ParameterError::MissingBody(key.to_string());

        let value = match parameter.target {
            ParameterTarget::Mass(body) => world.get_body(body).ok_or_else(missing)?.mass,
            ParameterTarget::InitialVelocityX(body) => {
                world.initial_state(body).ok_or_else(missing)?.velocity.x
            }
            ParameterTarget::InitialVelocityY(body) => {
                world.initial_state(body).ok_or_else(missing)?.velocity.y
            }
            ParameterTarget::GravityConstant => world.params.gravitational_constant,
            ParameterTarget::DistanceRatio => world.params.distance_ratio,
        };
        Ok(value)
    }

    /// Write a parameter, clamped into its range. Returns the applied value.
    ///
    /// Mass and gravity edits are live. Velocity edits change the initial
    /// conditions: visible at once while Idle, otherwise after the next reset.
    pub fn set(
        &self,
        world: &mut GravityWorld,
        key: &str,
        value: f32,
    ) -> Result<f32, ParameterError> {
        let parameter = self.lookup(key)?;
        let value = parameter.clamp(value);
        let missing = || ParameterError::MissingBody(key.to_string());

        match parameter.target {
            ParameterTarget::Mass(body) => {
                world.get_body_mut(body).ok_or_else(missing)?.mass = value;
            }
            ParameterTarget::InitialVelocityX(body) => {
                let initial = world.initial_state(body).ok_or_else(missing)?;
                let velocity = Vec3::new(value, initial.velocity.y, initial.velocity.z);
                world.set_initial_state(body, initial.position, velocity);
            }
            ParameterTarget::InitialVelocityY(body) => {
                let initial = world.initial_state(body).ok_or_else(missing)?;
                let velocity = Vec3::new(initial.velocity.x, value, initial.velocity.z);
                world.set_initial_state(body, initial.position, velocity);
            }
            ParameterTarget::GravityConstant => world.params.gravitational_constant = value,
            ParameterTarget::DistanceRatio => world.params.distance_ratio = value,
        }

        log::debug!("Parameter {} = {}", key, value);
        Ok(value)
    }

    /// Apply a batch of `key -> value` edits
    ///
    /// A bad entry does not stop the batch: every valid edit is applied and
    /// the errors for the rest are returned in key order.
    pub fn apply_all(
        &self,
        world: &mut GravityWorld,
        values: &BTreeMap<String, f32>,
    ) -> Vec<ParameterError> {
        values
            .iter()
            .filter_map(|(key, value)| self.set(world, key, *value).err())
            .collect()
    }
}

impl Default for ParameterPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
