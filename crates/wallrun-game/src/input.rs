//! Input buffering with action-based key mapping
//!
//! Raw keyboard events become a 2D movement intent and a jump edge. The
//! movement core samples the buffer once per physics tick.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
}

/// What the movement core reads on a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSample {
    /// Latest movement intent (x = lateral, y = forward)
    pub intent: Vec2,
    /// A jump press arrived since the previous sample
    pub jump: bool,
    /// Intent went from non-zero to exactly zero since the previous sample
    pub stopped: bool,
}

/// Latches the latest intent and the jump edge between ticks
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    intent: Vec2,
    previous: Vec2,
    jump_latched: bool,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the movement intent. Each axis is clamped to [-1, 1].
    pub fn set_intent(&mut self, intent: Vec2) {
        self.intent = intent.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Latest intent
    pub fn intent(&self) -> Vec2 {
        self.intent
    }

    /// Latch a jump press
    pub fn press_jump(&mut self) {
        self.jump_latched = true;
    }

    /// Consume the jump edge
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_latched)
    }

    /// Whether the whole intent vector dropped to zero since the last sample.
    ///
    /// One axis reaching zero while the other is held does not count.
    pub fn movement_stopped(&self) -> bool {
        self.previous != Vec2::ZERO && self.intent == Vec2::ZERO
    }

    /// Read the buffer for one tick, consuming the jump edge
    pub fn sample(&mut self) -> InputSample {
        let sample = InputSample {
            intent: self.intent,
            jump: self.take_jump(),
            stopped: self.movement_stopped(),
        };
        self.previous = self.intent;
        sample
    }

    /// Drop all latched input
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        // Default WASD bindings
        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        // Arrow keys as alternative
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);

        bindings
    }
}

impl InputBindings {
    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(key, action);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }
}

/// Input handler that processes raw events and updates the buffer
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Buffered intent and jump edge
    pub buffer: InputBuffer,
    /// Input bindings
    pub bindings: InputBindings,
    /// Mouse movement accumulated since the last frame
    pub mouse_delta: Vec2,
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    held: HashSet<InputAction>,
}

impl InputHandler {
    /// Create a new input handler with default bindings
    pub fn new() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            ..Default::default()
        }
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
            ElementState::Pressed => {
                // Key repeat does not produce a new edge
                if self.held.insert(action) && action == InputAction::Jump {
                    self.buffer.press_jump();
                }
            }
            ElementState::Released => {
                self.held.remove(&action);
            }
        }

        if action != InputAction::Jump {
            self.buffer.set_intent(self.held_intent());
        }
    }

    /// Feed an analog stick value directly
    pub fn handle_axis(&mut self, axis: Vec2) {
        self.buffer.set_intent(axis);
    }

    /// Handle mouse movement
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        self.mouse_delta += Vec2::new(
            delta.0 as f32 * self.mouse_sensitivity,
            delta.1 as f32 * self.mouse_sensitivity,
        );
    }

    /// Take the mouse delta accumulated this frame
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Fold held directional keys into an intent, normalized on diagonals
    fn held_intent(&self) -> Vec2 {
        let axis = |pos: InputAction, neg: InputAction| {
            (self.is_held(pos) as i32 - self.is_held(neg) as i32) as f32
        };
        let intent = Vec2::new(
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBackward),
        );
        if intent.length_squared() > 1.0 {
            intent.normalize()
        } else {
            intent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Pressed);
    }

    fn release(handler: &mut InputHandler, key: KeyCode) {
        handler.handle_keyboard(PhysicalKey::Code(key), ElementState::Released);
    }

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Space),
            Some(InputAction::Jump)
        );
    }

    #[test]
    fn test_keys_fold_into_intent() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::KeyW);
        assert_eq!(handler.buffer.intent(), Vec2::new(0.0, 1.0));

        press(&mut handler, KeyCode::KeyD);
        let intent = handler.buffer.intent();
        assert!((intent.length() - 1.0).abs() < 1e-5);
        assert!(intent.x > 0.0 && intent.y > 0.0);

        release(&mut handler, KeyCode::KeyW);
        release(&mut handler, KeyCode::KeyD);
        assert_eq!(handler.buffer.intent(), Vec2::ZERO);
    }

    #[test]
    fn test_jump_edge_ignores_repeat() {
        let mut handler = InputHandler::new();
        press(&mut handler, KeyCode::Space);
        assert!(handler.buffer.take_jump());

        // Held key repeating
        press(&mut handler, KeyCode::Space);
        assert!(!handler.buffer.take_jump());

        release(&mut handler, KeyCode::Space);
        press(&mut handler, KeyCode::Space);
        assert!(handler.buffer.take_jump());
    }

    #[test]
    fn test_stop_requires_whole_vector_zero() {
        let mut buffer = InputBuffer::new();
        buffer.set_intent(Vec2::new(1.0, 1.0));
        assert!(!buffer.sample().stopped);

        // Only the lateral axis released
        buffer.set_intent(Vec2::new(0.0, 1.0));
        assert!(!buffer.sample().stopped);

        buffer.set_intent(Vec2::ZERO);
        assert!(buffer.sample().stopped);

        // Stays zero: not a new stop
        assert!(!buffer.sample().stopped);
    }

    #[test]
    fn test_intent_is_clamped() {
        let mut buffer = InputBuffer::new();
        buffer.set_intent(Vec2::new(3.0, -2.0));
        assert_eq!(buffer.intent(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_sample_consumes_jump() {
        let mut buffer = InputBuffer::new();
        buffer.press_jump();
        assert!(buffer.sample().jump);
        assert!(!buffer.sample().jump);
    }
}
