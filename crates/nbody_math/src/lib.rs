//! 3D Mathematics Library
//!
//! This crate provides the vector type the NBodySim physics core computes with.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components

mod vec3;

pub use vec3::Vec3;
