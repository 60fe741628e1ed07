//! World geometry for collision: a field of static axis-aligned cubes.
//!
//! # Invariants
//! - Queries never mutate the field.
//! - Touching faces do not count as overlap, so a body can stand on a cube.
//!
//! Cubes are bucketed by XZ cell so a query only tests cubes near the volume.
//! This is a lookup aid for a flat list of boxes, not voxel storage.

mod field;

pub use field::{CellCoord, CubeField, FieldError, FieldSpec};

pub fn crate_info() -> &'static str {
    "voxwalk-world v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("world"));
    }
}
