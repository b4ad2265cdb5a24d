#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the text shown around a run.

use interview_rush_core::Screen;
use interview_rush_world::{query, World};

/// Produces the copy shown on each screen.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Title screen text, banner first.
    #[must_use]
    pub fn intro_lines(&self, world: &World) -> Vec<String> {
        vec![
            self.welcome_banner(world).to_owned(),
            "Cross every lane to reach the interview room.".to_owned(),
            "Arrow keys hop one lane. Ride boats across the river.".to_owned(),
            "Press Enter to start or Esc to leave.".to_owned(),
        ]
    }

    /// Status line drawn over the playfield.
    #[must_use]
    pub fn hud_line(&self, world: &World) -> String {
        let score = query::score(world);
        format!("Level {}   Lives {}", score.level(), score.lives())
    }

    /// Text for the screen reached once every life is spent.
    #[must_use]
    pub fn game_over_lines(&self, world: &World) -> Vec<String> {
        vec![
            "Game over".to_owned(),
            format!("You reached level {}.", query::score(world).level()),
            "Press R to try again or Esc to leave.".to_owned(),
        ]
    }

    /// Text lines for `screen`, in drawing order.
    #[must_use]
    pub fn lines_for(&self, screen: Screen, world: &World) -> Vec<String> {
        match screen {
            Screen::Intro => self.intro_lines(world),
            Screen::Playing => vec![self.hud_line(world)],
            Screen::GameOver => self.game_over_lines(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_rush_core::{Command, Rules};
    use interview_rush_world as world;

    fn world() -> World {
        World::new(Rules::default(), 7).expect("default rules are valid")
    }

    #[test]
    fn intro_opens_with_banner() {
        let world = world();
        let lines = Bootstrap.lines_for(Screen::Intro, &world);

        assert_eq!(lines[0], "Welcome to Interview Rush.");
        assert!(lines.iter().any(|line| line.contains("Enter")));
    }

    #[test]
    fn hud_reports_level_and_lives() {
        let mut world = world();
        let mut events = Vec::new();
        world::apply(&mut world, Command::StartRun, &mut events);

        assert_eq!(
            Bootstrap.lines_for(Screen::Playing, &world),
            vec!["Level 1   Lives 5".to_owned()]
        );
    }

    #[test]
    fn game_over_mentions_level_reached() {
        let world = world();
        let lines = Bootstrap.game_over_lines(&world);

        assert_eq!(lines[1], "You reached level 1.");
    }
}
