//! Keyboard polling.
//!
//! [`update_input_state`] reads hardware input from Raylib and writes the
//! result into [`InputState`]. Called by the raylib platform once per tick.
use raylib::RaylibHandle;

use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and update `input`.
///
/// An action is active when any of its keys is held.
pub fn update_input_state(rl: &RaylibHandle, input: &mut InputState) {
    for action in input.actions_mut() {
        let keys: Vec<_> = action.keys().collect();
        let down = keys.iter().any(|key| rl.is_key_down(*key));
        let pressed = keys.iter().any(|key| rl.is_key_pressed(*key));
        let released = keys.iter().any(|key| rl.is_key_released(*key));
        action.set(down, pressed, released);
    }
}
