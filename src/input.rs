use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::prelude::*;

use crate::motion::PlayerInput;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    MoveRight,
    MoveLeft,
    Jump,
}

impl Control {
    /// D / A / Space. Anything else is not ours.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::KeyD => Some(Control::MoveRight),
            KeyCode::KeyA => Some(Control::MoveLeft),
            KeyCode::Space => Some(Control::Jump),
            _ => None,
        }
    }
}

fn set_control(input: &mut PlayerInput, key: KeyCode, held: bool) {
    let Some(control) = Control::from_key(key) else {
        return;
    };
    match control {
        Control::MoveRight => input.move_right = held,
        Control::MoveLeft => input.move_left = held,
        Control::Jump => input.jump_requested = held,
    }
}

pub fn key_down(input: &mut PlayerInput, key: KeyCode) {
    set_control(input, key, true);
}

pub fn key_up(input: &mut PlayerInput, key: KeyCode) {
    set_control(input, key, false);
}

/// Feed key-down / key-up edges from the window into the player flags.
pub fn handle_keyboard(mut events: EventReader<KeyboardInput>, mut input: ResMut<PlayerInput>) {
    for ev in events.read() {
        match ev.state {
            ButtonState::Pressed => key_down(&mut input, ev.key_code),
            ButtonState::Released => key_up(&mut input, ev.key_code),
        }
    }
}
