#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Interview Rush engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems translate player input into
//! [`Command`] values, the world executes those commands via its `apply` entry
//! point, and then broadcasts [`Event`] values describing what happened during
//! the frame. Gameplay setbacks such as collisions or running out of lives are
//! ordinary events, never errors.

mod config;

pub use config::{ConfigError, Rules};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Interview Rush.";

/// Screens the game loop moves between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Title screen shown before the first run starts.
    Intro,
    /// Active run where the simulation advances every frame.
    Playing,
    /// Terminal screen shown once every life has been spent.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Builds the lane field for the current level and places the player at spawn.
    StartRun,
    /// Discards the score and lane field and begins a fresh run at level one.
    RestartRun,
    /// Moves the player a single grid step in the provided direction.
    MovePlayer {
        /// Direction of the requested step.
        direction: Direction,
    },
    /// Advances the simulation by exactly one frame.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A run began or restarted.
    RunStarted {
        /// Level the run starts on.
        level: u32,
        /// Lives available at the start of the run.
        lives: u32,
    },
    /// The lane field was rebuilt for a level.
    FieldRegenerated {
        /// Level the field was generated for.
        level: u32,
        /// Number of lanes composing the new field, including safe and finish lanes.
        lane_count: usize,
    },
    /// The playable surface changed height after a field rebuild.
    SurfaceResized {
        /// New height of the surface in world units.
        height: f32,
    },
    /// One simulation frame elapsed.
    TimeAdvanced {
        /// Number of frames simulated since the run started.
        frame: u64,
    },
    /// The player stepped in the provided direction.
    PlayerMoved {
        /// Direction of the step.
        direction: Direction,
    },
    /// The player landed on a platform other than the one it rode on the previous frame.
    PlayerBoarded {
        /// Platform the player is now riding.
        handle: ObstacleHandle,
    },
    /// The player lost a life and was returned to spawn.
    LifeLost {
        /// Reason the life was lost.
        cause: LifeLossCause,
        /// Lives left after the deduction.
        lives_remaining: u32,
    },
    /// The player reached the finish lane.
    LevelCompleted {
        /// Level that was just cleared.
        completed: u32,
        /// Level the regenerated field belongs to.
        next: u32,
    },
    /// The run ended because no lives remain.
    GameOver {
        /// Level the run ended on.
        level: u32,
    },
}

/// Discrete events yielded by input adapters from key-down transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// The window or terminal requested the process to close.
    Quit,
    /// A directional key was pressed.
    Move(Direction),
    /// Restart the run from the game-over screen.
    Restart,
    /// Leave the intro or game-over screen and terminate.
    Exit,
    /// Start the first run from the intro screen.
    Start,
}

/// Grid directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing lane indices.
    Up,
    /// Movement toward increasing lane indices.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// Unit step along each axis expressed as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Category of a horizontal lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Starting strip without hazards.
    Safe,
    /// Road carrying cars that reset the player on contact.
    Car,
    /// River the player may only cross riding a boat.
    Water,
    /// Goal strip that completes the level.
    Finish,
}

impl LaneKind {
    /// Kind of obstacle populating lanes of this category, if any.
    #[must_use]
    pub const fn obstacle_kind(self) -> Option<ObstacleKind> {
        match self {
            Self::Car => Some(ObstacleKind::Car),
            Self::Water => Some(ObstacleKind::Boat),
            Self::Safe | Self::Finish => None,
        }
    }
}

/// Category of a moving lane entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Hazard that costs a life on contact.
    Car,
    /// Platform that carries the player across water.
    Boat,
}

/// Reason a life was deducted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifeLossCause {
    /// The player's hit box overlapped a car.
    Hit,
    /// The player finished a frame on water without riding a boat.
    Drowned,
}

/// Non-owning reference to an obstacle inside the current lane field.
///
/// Handles are plain indices. They are only meaningful until the next field
/// rebuild, which always clears the player's attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleHandle {
    lane: usize,
    obstacle: usize,
}

impl ObstacleHandle {
    /// Creates a handle addressing an obstacle by lane and slot.
    #[must_use]
    pub const fn new(lane: usize, obstacle: usize) -> Self {
        Self { lane, obstacle }
    }

    /// Index of the lane holding the obstacle.
    #[must_use]
    pub const fn lane(&self) -> usize {
        self.lane
    }

    /// Index of the obstacle within its lane.
    #[must_use]
    pub const fn obstacle(&self) -> usize {
        self.obstacle
    }
}
