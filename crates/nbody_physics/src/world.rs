//! Gravity world and simulation

use crate::body::{Body, BodyKey, InitialState};
use crate::gravity::{accumulate_pair, GravityParams};
use bytemuck::{Pod, Zeroable};
use nbody_math::Vec3;
use slotmap::SlotMap;

/// Whether ticks advance the simulation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationState {
    /// Positions and velocities are frozen
    #[default]
    Idle,
    /// Each tick integrates one step
    Running,
}

/// Per-body record handed to an external renderer for instanced drawing
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 3],
    pub scale: f32,
}

/// The gravity world containing all bodies
pub struct GravityWorld {
    /// All bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, Body>,
    /// Gravity parameters, editable between ticks
    pub params: GravityParams,
    state: SimulationState,
    tick_count: u64,
    /// Pairs skipped on the last tick, so each is warned about once
    skipped_pairs: Vec<(BodyKey, BodyKey)>,
}

impl GravityWorld {
    /// Create a new world with default gravity parameters
    pub fn new() -> Self {
        Self::with_params(GravityParams::default())
    }

    /// Create a new world with custom gravity parameters
    pub fn with_params(params: GravityParams) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            params,
            state: SimulationState::Idle,
            tick_count: 0,
            skipped_pairs: Vec::new(),
        }
    }

    /// Add a body to the world and return its key
    pub fn add_body(&mut self, body: Body) -> BodyKey {
        self.bodies.insert(body)
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body> {
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// Iterate over all bodies in their fixed enumeration order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.bodies.iter()
    }

    /// Find the first body with the given name
    pub fn find_by_name(&self, name: &str) -> Option<(BodyKey, &Body)> {
        self.bodies
            .iter()
            .find(|(_, body)| body.name.as_deref() == Some(name))
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimulationState::Running
    }

    /// Number of ticks integrated since the last reset
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Pairs whose gravity was skipped on the last tick
    pub fn skipped_pairs(&self) -> &[(BodyKey, BodyKey)] {
        &self.skipped_pairs
    }

    /// Idle -> Running. Starting a running world does nothing.
    pub fn start(&mut self) {
        if self.state != SimulationState::Running {
            log::debug!("Simulation started with {} bodies", self.bodies.len());
        }
        self.state = SimulationState::Running;
    }

    /// Restore every free body to its initial state and return to Idle
    pub fn reset(&mut self) {
        for body in self.bodies.values_mut() {
            body.reset();
        }
        self.state = SimulationState::Idle;
        self.tick_count = 0;
        log::debug!("Simulation reset");
    }

    /// Replace a body's initial conditions
    ///
    /// While Idle the body is also moved there, so the edit is visible before
    /// `start()`. While Running the new values take effect on the next reset.
    /// Returns false for a stale key.
    pub fn set_initial_state(&mut self, key: BodyKey, position: Vec3, velocity: Vec3) -> bool {
        let idle = self.state == SimulationState::Idle;
        let Some(body) = self.bodies.get_mut(key) else {
            return false;
        };
        body.set_initial(position, velocity);
        if idle {
            body.reset();
        }
        true
    }

    /// Initial conditions of a body
    pub fn initial_state(&self, key: BodyKey) -> Option<InitialState> {
        self.bodies.get(key).map(Body::initial)
    }

    /// Step the simulation forward by `dt`
    ///
    /// This performs:
    /// 1. Pairwise gravity accumulation over every unordered pair
    /// 2. Velocity then position integration of every free body
    ///
    /// Does nothing while Idle. Returns whether the world advanced.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.state != SimulationState::Running {
            return false;
        }

        // Phase 1: accumulate accelerations from all pairs
        let keys: Vec<BodyKey> = self.bodies.keys().collect();
        let mut skipped = Vec::new();
        for i in 0..keys.len() {
            for j in (i + 1)..keys.len() {
                let Some([a, b]) = self.bodies.get_disjoint_mut([keys[i], keys[j]]) else {
                    continue;
                };
                if !accumulate_pair(&self.params, a, b) {
                    skipped.push((keys[i], keys[j]));
                }
            }
        }

        // Phase 2: integrate once every pair has contributed
        for body in self.bodies.values_mut() {
            body.integrate(dt);
        }

        self.tick_count += 1;
        if !skipped.is_empty() {
            log::debug!("Tick {}: {} pair(s) skipped", self.tick_count, skipped.len());
        }
        self.note_skipped_pairs(skipped);
        true
    }

    /// Record this tick's skipped pairs, warning only for newly skipped ones
    ///
    /// Returns how many pairs were newly skipped.
    fn note_skipped_pairs(&mut self, skipped: Vec<(BodyKey, BodyKey)>) -> usize {
        let mut new_pairs = 0;
        for &(a, b) in &skipped {
            if self.skipped_pairs.contains(&(a, b)) {
                continue;
            }
            new_pairs += 1;
            let label = |key: BodyKey| self.bodies.get(key).map_or("removed", Body::label);
            log::warn!(
                "Skipping gravity between '{}' and '{}': scaled distance is zero",
                label(a),
                label(b)
            );
        }
        for &(a, b) in &self.skipped_pairs {
            if !skipped.contains(&(a, b)) {
                log::debug!("Gravity between {:?} and {:?} resumed", a, b);
            }
        }
        self.skipped_pairs = skipped;
        new_pairs
    }

    /// Sum of `mass * velocity` over all bodies
    pub fn total_momentum(&self) -> Vec3 {
        self.bodies
            .values()
            .fold(Vec3::ZERO, |acc, body| acc + body.velocity() * body.mass)
    }

    /// Render snapshot of every body in enumeration order
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.bodies
            .values()
            .map(|body| BodyInstance {
                position: body.position().to_array(),
                scale: body.display_scale,
            })
            .collect()
    }
}

impl Default for GravityWorld {
    fn default() -> Self {
        Self::new()
    }
}
