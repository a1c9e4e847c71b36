//! Input system with action-based mapping
//!
//! Provides an abstraction layer between raw keyboard events and the actions
//! the movement code queries each tick.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Sprint modifier (Shift by default)
    Sprint,
}

/// Current state of all inputs for a tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Axis value in [-1, 1] built from a negative and a positive action.
    ///
    /// Holding both (or neither) gives 0.
    pub fn axis(&self, negative: InputAction, positive: InputAction) -> f32 {
        let strength = |action| if self.is_held(action) { 1.0 } else { 0.0 };
        strength(positive) - strength(negative)
    }

    /// Record a press, marking it as just pressed if it was not already held
    pub fn press(&mut self, action: InputAction) {
        if !self.held.contains(&action) {
            self.just_pressed.insert(action);
        }
        self.held.insert(action);
    }

    /// Record a release
    pub fn release(&mut self, action: InputAction) {
        if self.held.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ShiftLeft, InputAction::Sprint);
        bindings.bind(KeyCode::ShiftRight, InputAction::Sprint);

        bindings
    }
}

impl InputBindings {
    /// Create new input bindings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to an action, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind(key);
        self.bindings.insert(key, action);
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
    /// Physical keys currently down
    held_keys: HashSet<KeyCode>,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        let PhysicalKey::Code(key_code) = physical_key else {
            return;
        };
        let Some(action) = self.bindings.get_key_action(key_code) else {
            return;
        };

        match element_state {
            ElementState::Pressed => self.state.press(action),
            ElementState::Released => {
                // Another key bound to the same action may still be down
                let still_held = self
                    .bindings
                    .keys_for(action)
                    .iter()
                    .any(|k| *k != key_code && self.held_keys.contains(k));
                if !still_held {
                    self.state.release(action);
                }
            }
        }

        self.track_key(key_code, element_state);
    }

    fn track_key(&mut self, key: KeyCode, element_state: ElementState) {
        match element_state {
            ElementState::Pressed => {
                self.held_keys.insert(key);
            }
            ElementState::Released => {
                self.held_keys.remove(&key);
            }
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyD),
            Some(InputAction::MoveRight)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Space),
            Some(InputAction::Jump)
        );
        assert_eq!(bindings.keys_for(InputAction::Sprint).len(), 2);
    }

    #[test]
    fn test_rebind_replaces_old_action() {
        let mut bindings = InputBindings::default();
        bindings.bind(KeyCode::KeyD, InputAction::Jump);
        assert_eq!(bindings.get_key_action(KeyCode::KeyD), Some(InputAction::Jump));
        assert_eq!(bindings.keys_for(InputAction::MoveRight), &[KeyCode::ArrowRight]);
    }

    #[test]
    fn test_input_state() {
        let mut state = InputState::new();
        state.press(InputAction::MoveRight);
        state.press(InputAction::Jump);

        assert!(state.is_held(InputAction::MoveRight));
        assert!(state.is_just_pressed(InputAction::Jump));
        assert!(!state.is_held(InputAction::Sprint));

        state.clear_frame();
        assert!(state.is_held(InputAction::MoveRight));
        assert!(!state.is_just_pressed(InputAction::Jump));

        state.release(InputAction::Jump);
        assert!(state.is_just_released(InputAction::Jump));
        assert!(!state.is_held(InputAction::Jump));
    }

    #[test]
    fn test_axis() {
        let mut state = InputState::new();
        assert_eq!(state.axis(InputAction::MoveLeft, InputAction::MoveRight), 0.0);

        state.press(InputAction::MoveLeft);
        assert_eq!(state.axis(InputAction::MoveLeft, InputAction::MoveRight), -1.0);

        state.press(InputAction::MoveRight);
        assert_eq!(state.axis(InputAction::MoveLeft, InputAction::MoveRight), 0.0);

        state.release(InputAction::MoveLeft);
        assert_eq!(state.axis(InputAction::MoveLeft, InputAction::MoveRight), 1.0);
    }

    #[test]
    fn test_handler_key_events() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed);
        assert!(handler.state.is_just_pressed(InputAction::Jump));

        // Key repeat does not re-trigger the press edge
        handler.end_frame();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed);
        assert!(!handler.state.is_just_pressed(InputAction::Jump));
        assert!(handler.state.is_held(InputAction::Jump));

        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Released);
        assert!(handler.state.is_just_released(InputAction::Jump));
    }

    #[test]
    fn test_handler_alternate_key_keeps_action_held() {
        let mut handler = InputHandler::new();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyD), ElementState::Pressed);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ArrowRight), ElementState::Pressed);
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::KeyD), ElementState::Released);
        assert!(handler.state.is_held(InputAction::MoveRight));

        handler.handle_keyboard(PhysicalKey::Code(KeyCode::ArrowRight), ElementState::Released);
        assert!(!handler.state.is_held(InputAction::MoveRight));
    }
}
