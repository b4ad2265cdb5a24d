#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure session system that drives the intro, playing, and game-over screens.
//!
//! The session owns no gameplay state. It consumes player input and world
//! events and answers with the world commands the current screen allows.

use interview_rush_core::{Command, Event, InputEvent, Screen};

/// Whether the frame loop should keep running after a session update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionFlow {
    /// Keep presenting frames.
    Continue,
    /// The player asked to leave; the loop should stop.
    Exit,
}

/// Stimulus fed into the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trigger {
    Input(InputEvent),
    RunEnded,
}

/// Outcome of a single valid transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Enter(Screen, Option<Command>),
    Stay(Command),
    Exit,
}

/// Finite state machine over the game's screens.
#[derive(Debug)]
pub struct Session {
    screen: Screen,
}

impl Session {
    /// Creates a session sitting on the intro screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            screen: Screen::Intro,
        }
    }

    /// Screen currently shown.
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// Translates one frame of input into world commands.
    ///
    /// Inputs are processed in order and the first exit request stops
    /// processing. While playing, a single [`Command::Tick`] is appended after
    /// the input-derived commands.
    pub fn handle(&mut self, inputs: &[InputEvent], out: &mut Vec<Command>) -> SessionFlow {
        for input in inputs {
            if self.fire(Trigger::Input(*input), out) == SessionFlow::Exit {
                return SessionFlow::Exit;
            }
        }

        if self.screen == Screen::Playing {
            out.push(Command::Tick);
        }

        SessionFlow::Continue
    }

    /// Reacts to events broadcast by the world.
    pub fn observe(&mut self, events: &[Event]) {
        for event in events {
            if matches!(event, Event::GameOver { .. }) {
                let mut ignored = Vec::new();
                let _ = self.fire(Trigger::RunEnded, &mut ignored);
            }
        }
    }

    fn fire(&mut self, trigger: Trigger, out: &mut Vec<Command>) -> SessionFlow {
        match next_transition(self.screen, trigger) {
            Some(Transition::Enter(screen, command)) => {
                log::info!("session: {:?} -> {:?}", self.screen, screen);
                self.screen = screen;
                out.extend(command);
                SessionFlow::Continue
            }
            Some(Transition::Stay(command)) => {
                out.push(command);
                SessionFlow::Continue
            }
            Some(Transition::Exit) => {
                log::info!("session: exit requested from {:?}", self.screen);
                SessionFlow::Exit
            }
            None => {
                log::trace!("session: ignoring {trigger:?} on {:?}", self.screen);
                SessionFlow::Continue
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn next_transition(screen: Screen, trigger: Trigger) -> Option<Transition> {
    match (screen, trigger) {
        (Screen::Intro, Trigger::Input(InputEvent::Start)) => Some(Transition::Enter(
            Screen::Playing,
            Some(Command::StartRun),
        )),
        (Screen::Intro, Trigger::Input(InputEvent::Exit | InputEvent::Quit)) => {
            Some(Transition::Exit)
        }

        (Screen::Playing, Trigger::Input(InputEvent::Move(direction))) => {
            Some(Transition::Stay(Command::MovePlayer { direction }))
        }
        (Screen::Playing, Trigger::Input(InputEvent::Quit)) => Some(Transition::Exit),
        (Screen::Playing, Trigger::RunEnded) => Some(Transition::Enter(Screen::GameOver, None)),

        (Screen::GameOver, Trigger::Input(InputEvent::Restart)) => Some(Transition::Enter(
            Screen::Playing,
            Some(Command::RestartRun),
        )),
        (Screen::GameOver, Trigger::Input(InputEvent::Exit | InputEvent::Quit)) => {
            Some(Transition::Exit)
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_rush_core::Direction;

    #[test]
    fn transition_table_matches_screens() {
        use InputEvent::*;

        let cases = [
            (
                Screen::Intro,
                Trigger::Input(Start),
                Some(Transition::Enter(Screen::Playing, Some(Command::StartRun))),
            ),
            (Screen::Intro, Trigger::Input(Exit), Some(Transition::Exit)),
            (Screen::Intro, Trigger::Input(Quit), Some(Transition::Exit)),
            (Screen::Intro, Trigger::Input(Restart), None),
            (Screen::Intro, Trigger::Input(Move(Direction::Up)), None),
            (Screen::Intro, Trigger::RunEnded, None),
            (
                Screen::Playing,
                Trigger::Input(Move(Direction::Left)),
                Some(Transition::Stay(Command::MovePlayer {
                    direction: Direction::Left,
                })),
            ),
            (Screen::Playing, Trigger::Input(Quit), Some(Transition::Exit)),
            (Screen::Playing, Trigger::Input(Exit), None),
            (Screen::Playing, Trigger::Input(Start), None),
            (Screen::Playing, Trigger::Input(Restart), None),
            (
                Screen::Playing,
                Trigger::RunEnded,
                Some(Transition::Enter(Screen::GameOver, None)),
            ),
            (
                Screen::GameOver,
                Trigger::Input(Restart),
                Some(Transition::Enter(Screen::Playing, Some(Command::RestartRun))),
            ),
            (Screen::GameOver, Trigger::Input(Exit), Some(Transition::Exit)),
            (Screen::GameOver, Trigger::Input(Quit), Some(Transition::Exit)),
            (Screen::GameOver, Trigger::Input(Start), None),
            (Screen::GameOver, Trigger::Input(Move(Direction::Down)), None),
            (Screen::GameOver, Trigger::RunEnded, None),
        ];

        for (screen, trigger, expected) in cases {
            assert_eq!(
                next_transition(screen, trigger),
                expected,
                "{screen:?} + {trigger:?}"
            );
        }
    }

    #[test]
    fn intro_waits_for_start() {
        let mut session = Session::new();
        let mut commands = Vec::new();

        let flow = session.handle(&[InputEvent::Move(Direction::Down)], &mut commands);

        assert_eq!(flow, SessionFlow::Continue);
        assert!(commands.is_empty());
        assert_eq!(session.screen(), Screen::Intro);
    }

    #[test]
    fn start_begins_ticking_in_the_same_frame() {
        let mut session = Session::new();
        let mut commands = Vec::new();

        let _ = session.handle(&[InputEvent::Start], &mut commands);

        assert_eq!(commands, vec![Command::StartRun, Command::Tick]);
        assert_eq!(session.screen(), Screen::Playing);
    }

    #[test]
    fn moves_precede_the_frame_tick() {
        let mut session = Session::new();
        let mut commands = Vec::new();
        let _ = session.handle(&[InputEvent::Start], &mut commands);
        commands.clear();

        let _ = session.handle(
            &[
                InputEvent::Move(Direction::Down),
                InputEvent::Move(Direction::Right),
            ],
            &mut commands,
        );

        assert_eq!(
            commands,
            vec![
                Command::MovePlayer {
                    direction: Direction::Down,
                },
                Command::MovePlayer {
                    direction: Direction::Right,
                },
                Command::Tick,
            ]
        );
    }

    #[test]
    fn quit_stops_processing_remaining_inputs() {
        let mut session = Session::new();
        let mut commands = Vec::new();
        let _ = session.handle(&[InputEvent::Start], &mut commands);
        commands.clear();

        let flow = session.handle(
            &[InputEvent::Quit, InputEvent::Move(Direction::Up)],
            &mut commands,
        );

        assert_eq!(flow, SessionFlow::Exit);
        assert!(commands.is_empty());
    }

    #[test]
    fn game_over_event_stops_ticks_until_restart() {
        let mut session = Session::new();
        let mut commands = Vec::new();
        let _ = session.handle(&[InputEvent::Start], &mut commands);

        session.observe(&[Event::GameOver { level: 3 }]);
        commands.clear();
        let _ = session.handle(&[InputEvent::Move(Direction::Up)], &mut commands);

        assert_eq!(session.screen(), Screen::GameOver);
        assert!(commands.is_empty());

        let _ = session.handle(&[InputEvent::Restart], &mut commands);
        assert_eq!(commands, vec![Command::RestartRun, Command::Tick]);
        assert_eq!(session.screen(), Screen::Playing);
    }
}
