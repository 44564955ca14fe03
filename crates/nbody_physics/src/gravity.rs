//! Pairwise Newtonian gravity
//!
//! Force between two bodies is `G * m_a * m_b / (ratio * d)^2`. The raw
//! distance is scaled by the distance ratio *before* squaring; the ratio is a
//! scene-unit choice (1 scene unit = `ratio` physical units), not a physical
//! constant, and changing the order of operations changes the tuning curve.

use crate::body::Body;
use nbody_math::Vec3;

/// Global gravity tunables shared by every pair during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityParams {
    /// Gravitational constant `G`
    pub gravitational_constant: f32,
    /// Multiplier applied to every distance before the inverse-square law
    pub distance_ratio: f32,
}

impl Default for GravityParams {
    fn default() -> Self {
        Self {
            gravitational_constant: 0.01,
            distance_ratio: 100.0,
        }
    }
}

impl GravityParams {
    /// Create gravity parameters
    pub fn new(gravitational_constant: f32, distance_ratio: f32) -> Self {
        Self {
            gravitational_constant,
            distance_ratio,
        }
    }

    /// Per-unit-mass pull `G / (ratio * distance)^2` at `distance`
    ///
    /// Returns `None` when the scaled distance is zero (coincident bodies or a
    /// zero ratio).
    #[inline]
    fn pull_at(&self, distance: f32) -> Option<f32> {
        let scaled = self.distance_ratio * distance;
        let denominator = scaled * scaled;
        // Also rejects NaN
        if !(denominator > 0.0) {
            return None;
        }
        Some(self.gravitational_constant / denominator)
    }

    /// Unit direction from `from` toward `toward` and the pull between them
    ///
    /// Multiply the pull by the *other* body's mass for an acceleration, or by
    /// both masses for a force.
    pub fn pull(&self, from: Vec3, toward: Vec3) -> Option<(Vec3, f32)> {
        let offset = toward - from;
        let distance = offset.length();
        let pull = self.pull_at(distance)?;
        Some((offset / distance, pull))
    }

    /// Force magnitude between two masses `distance` apart
    ///
    /// Returns `None` when the scaled distance is zero.
    pub fn force_magnitude(&self, mass_a: f32, mass_b: f32, distance: f32) -> Option<f32> {
        self.pull_at(distance).map(|pull| pull * mass_a * mass_b)
    }

    /// Force exerted on `a` by `b`, pointing from `a` toward `b`
    ///
    /// Returns `None` for coincident bodies.
    pub fn force_on(&self, a: &Body, b: &Body) -> Option<Vec3> {
        let (direction, pull) = self.pull(a.position(), b.position())?;
        Some(direction * (pull * a.mass * b.mass))
    }
}

/// Accumulate the mutual attraction of `a` and `b` for the current tick
///
/// Each free body receives `force / own mass` toward the other; fixed bodies
/// receive nothing. Positions are not touched. Returns `false` when the pair
/// was skipped because the bodies coincide.
pub fn accumulate_pair(params: &GravityParams, a: &mut Body, b: &mut Body) -> bool {
    let Some((direction, pull)) = params.pull(a.position(), b.position()) else {
        return false;
    };

    // force / m_a == pull * m_b, which stays finite for a massless body
    a.accumulate(direction * (pull * b.mass));
    b.accumulate(-direction * (pull * a.mass));
    true
}
