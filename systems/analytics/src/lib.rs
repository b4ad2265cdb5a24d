#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that summarises each run from world events.

use interview_rush_core::{Event, LifeLossCause};

/// Statistics gathered over a single run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    frames: u64,
    hits: u32,
    drownings: u32,
    levels_completed: u32,
    best_level: u32,
    boats_boarded: u32,
}

impl RunReport {
    /// Frames simulated during the run.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Lives lost to cars.
    #[must_use]
    pub const fn hits(&self) -> u32 {
        self.hits
    }

    /// Lives lost to water.
    #[must_use]
    pub const fn drownings(&self) -> u32 {
        self.drownings
    }

    /// Finish lanes reached.
    #[must_use]
    pub const fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    /// Highest level the run reached.
    #[must_use]
    pub const fn best_level(&self) -> u32 {
        self.best_level
    }

    /// Times the player climbed onto a boat.
    #[must_use]
    pub const fn boats_boarded(&self) -> u32 {
        self.boats_boarded
    }

    /// One-line human readable digest.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "level {} after {} frames, {} cleared, {} hits, {} drownings, {} boats",
            self.best_level,
            self.frames,
            self.levels_completed,
            self.hits,
            self.drownings,
            self.boats_boarded
        )
    }
}

/// Pure analytics system that folds world events into [`RunReport`] values.
#[derive(Debug, Default)]
pub struct RunAnalytics {
    current: RunReport,
    last_finished: Option<RunReport>,
}

impl RunAnalytics {
    /// Creates an analytics system with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for the run in progress.
    #[must_use]
    pub fn current(&self) -> &RunReport {
        &self.current
    }

    /// Report of the most recently finished run, if any.
    #[must_use]
    pub fn last_finished(&self) -> Option<&RunReport> {
        self.last_finished.as_ref()
    }

    /// Consumes world events, publishing the completed report when a run ends.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<RunReport>) {
        for event in events {
            match event {
                Event::RunStarted { level, .. } => {
                    self.current = RunReport {
                        best_level: *level,
                        ..RunReport::default()
                    };
                }
                Event::TimeAdvanced { frame } => self.current.frames = *frame,
                Event::LifeLost { cause, .. } => match cause {
                    LifeLossCause::Hit => self.current.hits += 1,
                    LifeLossCause::Drowned => self.current.drownings += 1,
                },
                Event::PlayerBoarded { .. } => self.current.boats_boarded += 1,
                Event::LevelCompleted { next, .. } => {
                    self.current.levels_completed += 1;
                    self.current.best_level = self.current.best_level.max(*next);
                }
                Event::GameOver { .. } => {
                    self.last_finished = Some(self.current.clone());
                    out.push(self.current.clone());
                }
                Event::FieldRegenerated { .. }
                | Event::SurfaceResized { .. }
                | Event::PlayerMoved { .. } => {}
            }
        }
    }
}
