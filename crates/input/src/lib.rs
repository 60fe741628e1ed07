//! Input: named keys mapped to logical movement keys, plus mouse-look.
//!
//! # Invariants
//! - Handlers only mutate plain state (`InputState`, `Orientation`).
//! - Consumers read a copied `InputState` snapshot, never live handler state.
//! - Pitch stays inside `[-PITCH_LIMIT, PITCH_LIMIT]`.
//! - Mouse deltas received without pointer capture are dropped.

pub mod action;
pub mod look;
pub mod state;

pub use action::{BindingError, KeyBindings, MoveKey};
pub use look::{MouseLook, Orientation, PITCH_LIMIT};
pub use state::{InputState, InputTracker};

pub fn crate_info() -> &'static str {
    "voxwalk-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
