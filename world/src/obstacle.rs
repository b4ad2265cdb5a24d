use glam::Vec2;
use interview_rush_core::{ObstacleKind, Rules};
use rand::Rng;

use crate::Bounds;

/// Moving hazard or platform travelling along a single lane.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    kind: ObstacleKind,
    x: f32,
    y: f32,
    velocity: f32,
    width: f32,
    size: f32,
    hazard_marker: Option<Vec2>,
}

impl Obstacle {
    /// Creates an obstacle with explicit placement and velocity.
    #[must_use]
    pub fn new(kind: ObstacleKind, x: f32, y: f32, velocity: f32, rules: &Rules) -> Self {
        Self {
            kind,
            x,
            y,
            velocity,
            width: rules.obstacle_width,
            size: rules.obstacle_size,
            hazard_marker: None,
        }
    }

    /// Rolls a new obstacle for a lane whose top edge sits at `lane_y`.
    ///
    /// The draw order is fixed (position, direction, magnitude, then the
    /// pothole roll for cars) so the same seed yields the same base speed at
    /// every level.
    pub(crate) fn spawn<R>(
        lane_y: f32,
        kind: ObstacleKind,
        level: u32,
        rules: &Rules,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        let x = rng.gen_range(0.0..rules.screen_width);
        let rightward = rng.gen_bool(0.5);
        let magnitude = rng.gen_range(rules.min_speed..=rules.max_speed);
        let speed = (magnitude * rules.speed_multiplier(level)) as f32;
        let velocity = if rightward { speed } else { -speed };

        let mut obstacle = Self::new(kind, x, lane_y, velocity, rules);
        if kind == ObstacleKind::Car && rng.gen_bool(rules.hazard_probability) {
            obstacle.hazard_marker = Some(Vec2::new(x, lane_y + rules.marker_offset));
        }
        obstacle
    }

    /// Moves the obstacle by its velocity, wrapping to the opposite edge once
    /// it leaves the visible width.
    pub(crate) fn advance(&mut self, rules: &Rules) {
        self.x += self.velocity;

        if self.velocity > 0.0 && self.x > rules.screen_width + rules.wrap_margin {
            self.x = -self.width;
        } else if self.velocity < 0.0 && self.x < -self.width {
            self.x = rules.screen_width;
        }
    }

    /// Kind of the obstacle.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Current position of the obstacle's anchor.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Signed horizontal speed in world units per frame.
    #[must_use]
    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Pothole left on the road by a car, fixed where the car spawned.
    #[must_use]
    pub const fn hazard_marker(&self) -> Option<Vec2> {
        self.hazard_marker
    }

    /// Square hit box centred on the anchor.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.position(), self.size)
    }
}
