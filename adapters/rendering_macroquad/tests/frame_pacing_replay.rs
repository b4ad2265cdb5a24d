use std::time::Duration;

use interview_rush_core::{Direction, InputEvent};
use interview_rush_rendering_macroquad::{map_pressed_keys, FrameClock};
use macroquad::input::KeyCode;

fn replay(frame_times_ms: &[u64]) -> Vec<u32> {
    let mut clock = FrameClock::new(30);
    frame_times_ms
        .iter()
        .map(|ms| clock.advance(Duration::from_millis(*ms)))
        .collect()
}

#[test]
fn sixty_hertz_display_steps_every_other_frame() {
    let steps = replay(&[17; 12]);

    assert_eq!(steps.iter().sum::<u32>(), 6);
    assert!(steps.iter().all(|count| *count <= 1));
}

#[test]
fn uneven_frames_carry_their_remainder_forward() {
    let frames = [5, 40, 12, 70, 33, 34, 1, 100, 16];

    assert_eq!(replay(&frames), vec![0, 1, 0, 2, 1, 1, 0, 3, 1]);
}

#[test]
fn stalls_drop_backlog_beyond_the_catch_up_limit() {
    assert_eq!(replay(&[2_000, 33, 33]), vec![4, 1, 1]);
}

#[test]
fn key_edges_map_to_session_inputs() {
    let pressed = [KeyCode::Down, KeyCode::Enter, KeyCode::R, KeyCode::Q];
    let events = map_pressed_keys(|key| pressed.contains(&key));

    assert_eq!(
        events,
        vec![
            InputEvent::Move(Direction::Down),
            InputEvent::Start,
            InputEvent::Restart,
            InputEvent::Quit,
        ]
    );
}

#[test]
fn escape_requests_exit() {
    assert_eq!(
        map_pressed_keys(|key| key == KeyCode::Escape),
        vec![InputEvent::Exit]
    );
}
