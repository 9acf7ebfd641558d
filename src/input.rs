/// Logical movement input, independent of any keyboard backend.

use crate::entities::GameState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Pressed(Action),
    Released(Action),
}

/// Map a key event onto the player's horizontal intent.  Releasing either
/// movement key stops the player, even if the other is still down.
pub fn apply_input(state: &GameState, input: KeyInput) -> GameState {
    let mut next = state.clone();
    let speed = next.player.speed;
    next.player.dx = match input {
        KeyInput::Pressed(Action::MoveLeft) => -speed,
        KeyInput::Pressed(Action::MoveRight) => speed,
        KeyInput::Released(_) => 0.0,
    };
    next
}
