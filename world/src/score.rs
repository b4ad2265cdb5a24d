/// Lives, level, and game-over bookkeeping for a single run.
///
/// A finished run is never revived: restarting replaces the whole value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    lives: u32,
    level: u32,
    game_over: bool,
}

impl Score {
    /// Creates a fresh score on level one.
    #[must_use]
    pub const fn new(lives: u32) -> Self {
        Self {
            lives,
            level: 1,
            game_over: lives == 0,
        }
    }

    /// Deducts a life, flagging the run as over once none remain.
    pub fn remove_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.game_over = true;
        }
    }

    /// Moves the run to the next level.
    pub fn advance_level(&mut self) {
        self.level = self.level.saturating_add(1);
    }

    /// Lives left in the run.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Level currently being played.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }
}
