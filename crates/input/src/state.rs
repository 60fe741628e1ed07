use crate::action::{KeyBindings, MoveKey};

/// Pressed state of every logical movement key.
///
/// `Copy` on purpose: a tick takes its own snapshot, so key events arriving
/// later cannot change what that tick sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn is_pressed(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Forward => self.forward,
            MoveKey::Back => self.back,
            MoveKey::Left => self.left,
            MoveKey::Right => self.right,
            MoveKey::Jump => self.jump,
        }
    }

    /// Set a key and return its previous state.
    pub fn set(&mut self, key: MoveKey, pressed: bool) -> bool {
        let slot = match key {
            MoveKey::Forward => &mut self.forward,
            MoveKey::Back => &mut self.back,
            MoveKey::Left => &mut self.left,
            MoveKey::Right => &mut self.right,
            MoveKey::Jump => &mut self.jump,
        };
        std::mem::replace(slot, pressed)
    }

    /// True if any horizontal movement key is held.
    pub fn any_movement(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Builder used mostly by tests and scripted drivers.
    pub fn with(mut self, key: MoveKey) -> Self {
        self.set(key, true);
        self
    }
}

/// Translates named key events into [`InputState`] changes.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    bindings: KeyBindings,
    state: InputState,
}

impl InputTracker {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            state: InputState::default(),
        }
    }

    /// Handle a key-down event.
    ///
    /// Returns the logical key only on a press edge: the key was up before
    /// this event. Auto-repeat events and unknown names return `None`.
    pub fn key_down(&mut self, name: &str) -> Option<MoveKey> {
        let key = self.bindings.resolve(name)?;
        let was_pressed = self.state.set(key, true);
        if was_pressed {
            None
        } else {
            tracing::trace!(%key, name, "key pressed");
            Some(key)
        }
    }

    /// Handle a key-up event. Returns the logical key if one was released.
    pub fn key_up(&mut self, name: &str) -> Option<MoveKey> {
        let key = self.bindings.resolve(name)?;
        self.state.set(key, false).then(|| {
            tracing::trace!(%key, name, "key released");
            key
        })
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.state = InputState::default();
    }

    /// Copy of the current key state.
    pub fn snapshot(&self) -> InputState {
        self.state
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }
}
