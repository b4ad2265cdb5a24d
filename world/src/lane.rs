use interview_rush_core::{LaneKind, LifeLossCause, ObstacleHandle, Rules};
use rand::Rng;

use crate::{Obstacle, Player, Score};

/// Horizontal strip of the playfield.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    index: usize,
    kind: LaneKind,
    y: f32,
    speed_level: u32,
    obstacles: Vec<Obstacle>,
}

impl Lane {
    /// Rolls a lane holding `obstacle_count` obstacles tuned for `speed_level`.
    ///
    /// Safe and finish lanes never hold obstacles regardless of the count.
    pub fn generate<R>(
        index: usize,
        kind: LaneKind,
        obstacle_count: usize,
        speed_level: u32,
        rules: &Rules,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let y = index as f32 * rules.lane_height;
        let obstacles = match kind.obstacle_kind() {
            Some(obstacle_kind) => (0..obstacle_count)
                .map(|_| Obstacle::spawn(y, obstacle_kind, speed_level, rules, rng))
                .collect(),
            None => Vec::new(),
        };

        Self {
            index,
            kind,
            y,
            speed_level,
            obstacles,
        }
    }

    /// Assembles a lane from explicit obstacles.
    ///
    /// Obstacles supplied for safe or finish lanes are discarded.
    #[must_use]
    pub fn from_obstacles(
        index: usize,
        kind: LaneKind,
        speed_level: u32,
        rules: &Rules,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        let obstacles = if kind.obstacle_kind().is_some() {
            obstacles
        } else {
            Vec::new()
        };

        Self {
            index,
            kind,
            y: index as f32 * rules.lane_height,
            speed_level,
            obstacles,
        }
    }

    /// Advances every obstacle in the lane by one frame.
    pub fn advance_obstacles(&mut self, rules: &Rules) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(rules);
        }
    }

    /// Resolves the player's interaction with this lane for the current frame.
    ///
    /// The attachment is always cleared first and re-established only when the
    /// player overlaps a boat. Overlaps are tested against the hit box the
    /// player had on entry and applied in obstacle order, so every car the
    /// player touches costs a life.
    pub fn check_player(&self, player: &mut Player, score: &mut Score) -> LaneOutcome {
        player.attach(None);

        let mut outcome = LaneOutcome::default();
        if self.kind == LaneKind::Finish {
            outcome.finished = true;
            return outcome;
        }

        let hit_box = player.bounds();
        for (slot, obstacle) in self.obstacles.iter().enumerate() {
            if !hit_box.intersects(&obstacle.bounds()) {
                continue;
            }

            match self.kind {
                LaneKind::Car => {
                    player.reset();
                    score.remove_life();
                    outcome.losses.push(LifeLoss {
                        cause: LifeLossCause::Hit,
                        lives_remaining: score.lives(),
                    });
                }
                LaneKind::Water => {
                    let handle = ObstacleHandle::new(self.index, slot);
                    player.attach(Some(handle));
                    outcome.attached = Some(handle);
                }
                LaneKind::Safe | LaneKind::Finish => {}
            }
        }

        if self.kind == LaneKind::Water && outcome.attached.is_none() {
            player.reset();
            score.remove_life();
            outcome.losses.push(LifeLoss {
                cause: LifeLossCause::Drowned,
                lives_remaining: score.lives(),
            });
        }

        outcome
    }

    /// Position of the lane within the field.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Category of the lane.
    #[must_use]
    pub const fn kind(&self) -> LaneKind {
        self.kind
    }

    /// Top edge of the lane in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Level used to scale the lane's obstacle speeds.
    #[must_use]
    pub const fn speed_level(&self) -> u32 {
        self.speed_level
    }

    /// Obstacles travelling along the lane.
    #[must_use]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

/// Result of checking the player against a lane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaneOutcome {
    /// The player stands on the finish lane.
    pub finished: bool,
    /// Lives deducted during the check, in the order they were lost.
    pub losses: Vec<LifeLoss>,
    /// Boat the player ended up riding.
    pub attached: Option<ObstacleHandle>,
}

/// Single life deduction recorded by a lane check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeLoss {
    /// What cost the life.
    pub cause: LifeLossCause,
    /// Lives left immediately after the deduction.
    pub lives_remaining: u32,
}
