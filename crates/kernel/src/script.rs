//! Scripted input for headless runs: timed key, mouse and capture events.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::controller::PlayerController;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("step {index} at tick {tick} comes before the previous step's tick")]
    OutOfOrder { index: usize, tick: u64 },
}

/// One input event as an input source would deliver it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    KeyDown(String),
    KeyUp(String),
    Mouse { dx: f32, dy: f32 },
    Capture(bool),
}

/// An event delivered just before tick number `tick` runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub tick: u64,
    pub event: ScriptEvent,
}

/// Events sorted by tick, replayed against a controller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn new(steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        for (index, pair) in steps.windows(2).enumerate() {
            if pair[1].tick < pair[0].tick {
                return Err(ScriptError::OutOfOrder {
                    index: index + 1,
                    tick: pair[1].tick,
                });
            }
        }
        Ok(Self { steps })
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ScriptError> {
        let steps: Vec<ScriptStep> = serde_yaml::from_str(s)?;
        Self::new(steps)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let script = Self::from_yaml_str(&text)?;
        tracing::info!(
            path = %path.as_ref().display(),
            steps = script.len(),
            "loaded input script"
        );
        Ok(script)
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Start replaying from the first step.
    pub fn player(&self) -> ScriptPlayer<'_> {
        ScriptPlayer {
            script: self,
            cursor: 0,
        }
    }
}

/// Replay cursor over an [`InputScript`].
#[derive(Debug)]
pub struct ScriptPlayer<'a> {
    script: &'a InputScript,
    cursor: usize,
}

impl ScriptPlayer<'_> {
    /// Deliver every event scheduled at or before `tick`. Returns how many
    /// were delivered.
    pub fn deliver(&mut self, tick: u64, player: &mut PlayerController) -> usize {
        let script = self.script;
        let mut delivered = 0;
        while let Some(step) = script.steps.get(self.cursor) {
            if step.tick > tick {
                break;
            }
            apply(&step.event, player);
            self.cursor += 1;
            delivered += 1;
        }
        delivered
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.script.steps.len()
    }
}

fn apply(event: &ScriptEvent, player: &mut PlayerController) {
    match event {
        ScriptEvent::KeyDown(name) => {
            if player.key_down(name).is_none() {
                tracing::trace!(name = %name, "key down ignored");
            }
        }
        ScriptEvent::KeyUp(name) => {
            player.key_up(name);
        }
        ScriptEvent::Mouse { dx, dy } => {
            if !player.mouse_motion(*dx, *dy) {
                tracing::trace!(dx, dy, "mouse motion dropped, pointer not captured");
            }
        }
        ScriptEvent::Capture(captured) => player.set_pointer_captured(*captured),
    }
}
