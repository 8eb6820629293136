//! Per-frame keyboard input snapshot.
//!
//! The platform refreshes [`InputState`] at the start of every tick, before
//! any scene runs, so scenes see one consistent view of the keyboard for the
//! whole tick. Defaults bind WASD and the arrow keys to directions.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// One action's key state for the current tick.
#[derive(Debug, Clone, Copy)]
pub struct BoolState {
    /// Held down.
    pub active: bool,
    /// Went down this tick.
    pub just_pressed: bool,
    /// Went up this tick.
    pub just_released: bool,
    pub key_binding: KeyboardKey,
    /// Second key for the same action.
    pub alt_binding: Option<KeyboardKey>,
}

impl BoolState {
    pub fn bound_to(key_binding: KeyboardKey, alt_binding: Option<KeyboardKey>) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
            alt_binding,
        }
    }

    /// Store this tick's raw key state.
    pub fn set(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }

    /// Keys that drive this action.
    pub fn keys(&self) -> impl Iterator<Item = KeyboardKey> {
        std::iter::once(self.key_binding).chain(self.alt_binding)
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound_to(KeyboardKey::KEY_NULL, None)
    }
}

/// Keyboard state of the actions the framework cares about.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub confirm: BoolState,
    pub back: BoolState,
    pub action_1: BoolState,
    pub fullscreen_toggle: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            up: BoolState::bound_to(KeyboardKey::KEY_W, Some(KeyboardKey::KEY_UP)),
            down: BoolState::bound_to(KeyboardKey::KEY_S, Some(KeyboardKey::KEY_DOWN)),
            left: BoolState::bound_to(KeyboardKey::KEY_A, Some(KeyboardKey::KEY_LEFT)),
            right: BoolState::bound_to(KeyboardKey::KEY_D, Some(KeyboardKey::KEY_RIGHT)),
            confirm: BoolState::bound_to(KeyboardKey::KEY_ENTER, None),
            back: BoolState::bound_to(KeyboardKey::KEY_ESCAPE, None),
            action_1: BoolState::bound_to(KeyboardKey::KEY_SPACE, None),
            fullscreen_toggle: BoolState::bound_to(KeyboardKey::KEY_F10, None),
        }
    }
}

impl InputState {
    /// Every action, for polling loops.
    pub fn actions_mut(&mut self) -> [&mut BoolState; 8] {
        [
            &mut self.up,
            &mut self.down,
            &mut self.left,
            &mut self.right,
            &mut self.confirm,
            &mut self.back,
            &mut self.action_1,
            &mut self.fullscreen_toggle,
        ]
    }

    /// Horizontal and vertical direction in `-1.0..=1.0`.
    pub fn direction(&self) -> Vector2 {
        let axis = |neg: &BoolState, pos: &BoolState| match (neg.active, pos.active) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vector2 {
            x: axis(&self.left, &self.right),
            y: axis(&self.up, &self.down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_action_is_idle() {
        let action = BoolState::default();
        assert!(!action.active && !action.just_pressed && !action.just_released);
        assert_eq!(action.keys().collect::<Vec<_>>(), vec![KeyboardKey::KEY_NULL]);
    }

    #[test]
    fn test_default_bindings() {
        let input = InputState::default();
        assert_eq!(input.up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.up.alt_binding, Some(KeyboardKey::KEY_UP));
        assert_eq!(input.left.key_binding, KeyboardKey::KEY_A);
        assert_eq!(input.confirm.key_binding, KeyboardKey::KEY_ENTER);
        assert_eq!(input.back.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(
            input.fullscreen_toggle.keys().collect::<Vec<_>>(),
            vec![KeyboardKey::KEY_F10]
        );
    }

    #[test]
    fn test_direction_cancels_opposites() {
        let mut input = InputState::default();
        assert_eq!(input.direction().x, 0.0);
        input.right.set(true, true, false);
        assert_eq!(input.direction().x, 1.0);
        input.left.set(true, true, false);
        assert_eq!(input.direction().x, 0.0);
        input.up.set(true, false, false);
        assert_eq!(input.direction().y, -1.0);
    }
}
