#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Interview Rush.

mod field;
mod lane;
mod obstacle;
mod player;
mod score;

use glam::Vec2;
use interview_rush_core::{Command, ConfigError, Event, Rules, WELCOME_BANNER};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use field::LaneField;
pub use lane::{Lane, LaneOutcome, LifeLoss};
pub use obstacle::Obstacle;
pub use player::Player;
pub use score::Score;

/// Axis-aligned rectangle used for hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec2,
    max: Vec2,
}

impl Bounds {
    /// Creates a square of side `side` centred on `center`.
    #[must_use]
    pub fn centered(center: Vec2, side: f32) -> Self {
        let half = Vec2::splat(side * 0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Width and height of the rectangle.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Reports whether the rectangles overlap. Touching edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Represents the authoritative Interview Rush world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    rng: ChaCha8Rng,
    score: Score,
    player: Player,
    field: Option<LaneField>,
    frame: u64,
}

impl World {
    /// Creates a world waiting for its first run, seeding lane generation with `seed`.
    pub fn new(rules: Rules, seed: u64) -> Result<Self, ConfigError> {
        rules.validate()?;
        Ok(Self {
            banner: WELCOME_BANNER,
            score: Score::new(rules.starting_lives),
            player: Player::from_rules(&rules),
            rng: ChaCha8Rng::seed_from_u64(seed),
            field: None,
            frame: 0,
            rules,
        })
    }

    fn begin_run(&mut self, out_events: &mut Vec<Event>) {
        self.frame = 0;
        self.player.reset();
        out_events.push(Event::RunStarted {
            level: self.score.level(),
            lives: self.score.lives(),
        });
        self.regenerate(out_events);
    }

    fn regenerate(&mut self, out_events: &mut Vec<Event>) {
        let previous_height = self.field.as_ref().map(LaneField::surface_height);
        let field = LaneField::build(self.score.level(), &self.rules, &mut self.rng);
        let height = field.surface_height();

        out_events.push(Event::FieldRegenerated {
            level: field.level(),
            lane_count: field.lanes().len(),
        });
        if previous_height != Some(height) {
            out_events.push(Event::SurfaceResized { height });
        }

        self.field = Some(field);
        self.player.reset();
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        if self.score.is_game_over() {
            return;
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };

        self.frame = self.frame.saturating_add(1);
        out_events.push(Event::TimeAdvanced { frame: self.frame });

        let previous = self.player.attached();
        let carry = previous
            .and_then(|handle| field.obstacle(handle))
            .map_or(0.0, Obstacle::velocity);
        self.player
            .advance(carry, &self.rules, field.surface_height());

        field.advance_obstacles(&self.rules);

        let index = field.lane_index_at(self.player.position().y, &self.rules);
        let Some(lane) = field.lanes().get(index) else {
            return;
        };
        let outcome = lane.check_player(&mut self.player, &mut self.score);

        for loss in &outcome.losses {
            out_events.push(Event::LifeLost {
                cause: loss.cause,
                lives_remaining: loss.lives_remaining,
            });
        }

        if let Some(handle) = outcome.attached {
            if previous != Some(handle) {
                out_events.push(Event::PlayerBoarded { handle });
            }
        }

        if outcome.finished {
            let completed = self.score.level();
            self.score.advance_level();
            log::info!("level {completed} cleared");
            out_events.push(Event::LevelCompleted {
                completed,
                next: self.score.level(),
            });
            self.regenerate(out_events);
        }

        if self.score.is_game_over() {
            out_events.push(Event::GameOver {
                level: self.score.level(),
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRun => world.begin_run(out_events),
        Command::RestartRun => {
            world.score = Score::new(world.rules.starting_lives);
            world.begin_run(out_events);
        }
        Command::MovePlayer { direction } => {
            if world.field.is_none() || world.score.is_game_over() {
                return;
            }
            world.player.move_by(direction, world.rules.lane_height);
            out_events.push(Event::PlayerMoved { direction });
        }
        Command::Tick => world.tick(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Lane, LaneField, Player, Score, World};
    use interview_rush_core::Rules;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Lives, level, and game-over state of the current run.
    #[must_use]
    pub fn score(world: &World) -> &Score {
        &world.score
    }

    /// Player state.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Current lane field, absent until the first run starts.
    #[must_use]
    pub fn field(world: &World) -> Option<&LaneField> {
        world.field.as_ref()
    }

    /// Lanes of the current field, empty before the first run.
    #[must_use]
    pub fn lanes(world: &World) -> &[Lane] {
        world.field.as_ref().map(LaneField::lanes).unwrap_or(&[])
    }

    /// Index of the lane the player currently occupies.
    #[must_use]
    pub fn current_lane(world: &World) -> Option<usize> {
        world
            .field
            .as_ref()
            .map(|field| field.lane_index_at(world.player.position().y, &world.rules))
    }

    /// Height of the rendering surface required by the current field.
    #[must_use]
    pub fn surface_height(world: &World) -> f32 {
        world
            .field
            .as_ref()
            .map_or(world.rules.screen_height, LaneField::surface_height)
    }

    /// Frames simulated since the current run started.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }
}
