use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A logical movement key. Physical key names are translated into these by
/// [`KeyBindings`]; the integrator only ever sees logical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Jump,
}

impl MoveKey {
    pub const ALL: [MoveKey; 5] = [
        MoveKey::Forward,
        MoveKey::Back,
        MoveKey::Left,
        MoveKey::Right,
        MoveKey::Jump,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoveKey::Forward => "forward",
            MoveKey::Back => "back",
            MoveKey::Left => "left",
            MoveKey::Right => "right",
            MoveKey::Jump => "jump",
        }
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoveKey {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoveKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| BindingError::UnknownAction(s.to_string()))
    }
}

/// Errors from building or loading key bindings.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("unknown movement action: {0:?}")]
    UnknownAction(String),
    #[error("empty key name")]
    EmptyKeyName,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Mapping from physical key names (as delivered by the input source) to
/// logical movement keys.
///
/// Several names may map to the same logical key. Names not present in the
/// map are ignored by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    map: BTreeMap<String, MoveKey>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut b = Self::empty();
        for (name, key) in [
            ("KeyW", MoveKey::Forward),
            ("ArrowUp", MoveKey::Forward),
            ("w", MoveKey::Forward),
            ("KeyS", MoveKey::Back),
            ("ArrowDown", MoveKey::Back),
            ("s", MoveKey::Back),
            ("KeyA", MoveKey::Left),
            ("ArrowLeft", MoveKey::Left),
            ("a", MoveKey::Left),
            ("KeyD", MoveKey::Right),
            ("ArrowRight", MoveKey::Right),
            ("d", MoveKey::Right),
            ("Space", MoveKey::Jump),
            (" ", MoveKey::Jump),
        ] {
            b.map.insert(name.to_string(), key);
        }
        b
    }
}

impl KeyBindings {
    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    /// Bind a key name, replacing any previous binding for that name.
    pub fn bind(&mut self, name: impl Into<String>, key: MoveKey) -> Result<(), BindingError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BindingError::EmptyKeyName);
        }
        self.map.insert(name, key);
        Ok(())
    }

    /// Remove a key name. Returns the logical key it was bound to.
    pub fn unbind(&mut self, name: &str) -> Option<MoveKey> {
        self.map.remove(name)
    }

    pub fn resolve(&self, name: &str) -> Option<MoveKey> {
        self.map.get(name).copied()
    }

    /// All key names bound to `key`, in sorted order.
    pub fn names_for(&self, key: MoveKey) -> Vec<&str> {
        self.map
            .iter()
            .filter(|(_, k)| **k == key)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Parse bindings from YAML of the form `KeyW: forward`.
    pub fn from_yaml_str(s: &str) -> Result<Self, BindingError> {
        let bindings: Self = serde_yaml::from_str(s)?;
        if bindings.map.keys().any(|n| n.is_empty()) {
            return Err(BindingError::EmptyKeyName);
        }
        Ok(bindings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BindingError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let bindings = Self::from_yaml_str(&text)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            count = bindings.len(),
            "loaded key bindings"
        );
        Ok(bindings)
    }
}
