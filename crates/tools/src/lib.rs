//! Developer Tooling: player inspector and state summaries for logs and the CLI.
//!
//! # Invariants
//! - Tools only read state; nothing here mutates a player.

mod inspector;

pub use inspector::{PlayerInspector, PlayerSummary};

pub fn crate_info() -> &'static str {
    "voxwalk-tools v0.1.0"
}
