//! Keyboard/mouse polling, turned into a `MoveInput` for the world step.
use raylib::prelude::*;

use crate::config::WindowConfig;
use crate::core::player::MoveInput;
use crate::core::world::ViewMode;

#[inline]
fn axis(rl: &RaylibHandle, pos: &[KeyboardKey], neg: &[KeyboardKey]) -> f32 {
    let down = |keys: &[KeyboardKey]| keys.iter().any(|&k| rl.is_key_down(k));
    (down(pos) as i32 - down(neg) as i32) as f32
}

pub fn read_move_input(rl: &RaylibHandle, view: ViewMode, cfg: &WindowConfig) -> MoveInput {
    let forward = axis(rl, &[KeyboardKey::KEY_W, KeyboardKey::KEY_UP], &[KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN]);
    let right = axis(rl, &[KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT], &[KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT]);

    let turn = match view {
        ViewMode::TopDown => 0.0,
        ViewMode::FirstPerson => {
            let keys = axis(rl, &[KeyboardKey::KEY_E], &[KeyboardKey::KEY_Q]) * cfg.turn_speed;
            keys + rl.get_mouse_delta().x * cfg.mouse_sensitivity
        }
    };

    MoveInput { forward, right, turn }
}

/// Tab or M flips between the top-down and first-person views.
pub fn view_toggle_pressed(rl: &RaylibHandle) -> bool {
    rl.is_key_pressed(KeyboardKey::KEY_TAB) || rl.is_key_pressed(KeyboardKey::KEY_M)
}
