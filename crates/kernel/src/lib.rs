//! Movement kernel: player body state, per-frame integration, collision resolution.
//!
//! # Invariants
//! - `tick` with a non-positive `dt` returns the body unchanged.
//! - Collision queries are read-only; the kernel never mutates world geometry.
//! - Horizontal motion resolves X before Z, reverting only the blocked axis.
//! - Void reset runs last and overrides everything before it in the tick.

pub mod body;
pub mod collision;
pub mod config;
pub mod controller;
pub mod driver;
pub mod integrator;
pub mod script;

pub use body::PlayerBody;
pub use collision::{CollisionQuery, NoClip};
pub use config::{ConfigError, MovementConfig};
pub use controller::PlayerController;
pub use driver::{FrameDriver, FrameReport, FrameTimer, MAX_TICKS_PER_FRAME, StepMode};
pub use integrator::{TickOutcome, integrate, tick};
pub use script::{InputScript, ScriptError, ScriptEvent, ScriptPlayer, ScriptStep};

pub fn crate_info() -> &'static str {
    "voxwalk-kernel v0.1.0"
}
