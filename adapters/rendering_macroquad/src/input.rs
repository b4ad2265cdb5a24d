use interview_rush_core::{Direction, InputEvent};
use macroquad::input::{is_key_pressed, is_quit_requested, KeyCode};

/// Keys recognised by the adapter and the event each one produces.
const KEY_BINDINGS: [(KeyCode, InputEvent); 13] = [
    (KeyCode::Up, InputEvent::Move(Direction::Up)),
    (KeyCode::W, InputEvent::Move(Direction::Up)),
    (KeyCode::Down, InputEvent::Move(Direction::Down)),
    (KeyCode::S, InputEvent::Move(Direction::Down)),
    (KeyCode::Left, InputEvent::Move(Direction::Left)),
    (KeyCode::A, InputEvent::Move(Direction::Left)),
    (KeyCode::Right, InputEvent::Move(Direction::Right)),
    (KeyCode::D, InputEvent::Move(Direction::Right)),
    (KeyCode::Enter, InputEvent::Start),
    (KeyCode::Space, InputEvent::Start),
    (KeyCode::R, InputEvent::Restart),
    (KeyCode::Escape, InputEvent::Exit),
    (KeyCode::Q, InputEvent::Quit),
];

/// Translates the keys pressed this frame into input events.
///
/// `pressed` must report key-down edges only; held keys are expected to
/// answer `false` after their first frame.
#[doc(hidden)]
pub fn map_pressed_keys<P>(mut pressed: P) -> Vec<InputEvent>
where
    P: FnMut(KeyCode) -> bool,
{
    KEY_BINDINGS
        .iter()
        .filter(|(key, _)| pressed(*key))
        .map(|(_, event)| *event)
        .collect()
}

/// Polls macroquad for this frame's key-down edges and close requests.
pub(crate) fn poll() -> Vec<InputEvent> {
    let mut events = map_pressed_keys(is_key_pressed);
    if is_quit_requested() {
        events.push(InputEvent::Quit);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_keys_produce_nothing() {
        let events = map_pressed_keys(|key| key == KeyCode::F5);

        assert!(events.is_empty());
    }

    #[test]
    fn arrows_and_wasd_share_directions() {
        let arrows = map_pressed_keys(|key| key == KeyCode::Left);
        let wasd = map_pressed_keys(|key| key == KeyCode::A);

        assert_eq!(arrows, vec![InputEvent::Move(Direction::Left)]);
        assert_eq!(arrows, wasd);
    }
}
