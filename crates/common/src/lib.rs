//! Shared types used across the voxwalk crates.
//!
//! # Invariants
//! - Types here are plain values with no behavior tied to a particular world.

mod types;

pub use types::{Aabb, Transform};
