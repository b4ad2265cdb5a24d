use glam::Vec2;
use interview_rush_core::{Direction, ObstacleHandle, Rules};

use crate::Bounds;

/// Player-controlled frog.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Vec2,
    spawn: Vec2,
    size: f32,
    attached: Option<ObstacleHandle>,
}

impl Player {
    /// Creates a player resting at `spawn` with a square hit box of side `size`.
    #[must_use]
    pub fn new(spawn: Vec2, size: f32) -> Self {
        Self {
            position: spawn,
            spawn,
            size,
            attached: None,
        }
    }

    /// Creates a player at the spawn point described by the rules.
    #[must_use]
    pub fn from_rules(rules: &Rules) -> Self {
        Self::new(Vec2::new(rules.spawn_x, rules.spawn_y), rules.frog_size)
    }

    /// Translates the player one grid step of length `step`.
    pub fn move_by(&mut self, direction: Direction, step: f32) {
        let (dx, dy) = direction.delta();
        self.position += Vec2::new(dx as f32, dy as f32) * step;
    }

    /// Applies the platform carry and clamps the player inside the surface.
    ///
    /// `carry` is the velocity of the attached platform, zero when unattached.
    /// Leaving the top edge does not clamp to zero: the player is pushed back to
    /// `top_reentry` so it always maps onto the first lane.
    pub fn advance(&mut self, carry: f32, rules: &Rules, surface_height: f32) {
        self.position.x += carry;

        if self.position.x + rules.edge_margin > rules.screen_width {
            self.position.x = rules.screen_width - rules.edge_margin;
        }
        if self.position.x < 0.0 {
            self.position.x = 0.0;
        }
        if self.position.y + rules.edge_margin > surface_height {
            self.position.y = surface_height - rules.edge_margin;
        }
        if self.position.y < 0.0 {
            self.position.y = rules.top_reentry;
        }
    }

    /// Couples the player to a platform, or decouples it with `None`.
    pub fn attach(&mut self, handle: Option<ObstacleHandle>) {
        self.attached = handle;
    }

    /// Returns the player to spawn and drops any attachment.
    pub fn reset(&mut self) {
        self.position = self.spawn;
        self.attached = None;
    }

    /// Current position of the player's centre.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Position the player returns to on reset.
    #[must_use]
    pub const fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Platform the player is currently riding.
    #[must_use]
    pub const fn attached(&self) -> Option<ObstacleHandle> {
        self.attached
    }

    /// Square hit box centred on the player.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> (Player, Rules) {
        let rules = Rules::default();
        (Player::from_rules(&rules), rules)
    }

    #[test]
    fn moves_one_lane_per_step() {
        let (mut player, rules) = player();

        player.move_by(Direction::Down, rules.lane_height);
        assert_eq!(player.position(), Vec2::new(640.0, 184.0));

        player.move_by(Direction::Left, rules.lane_height);
        assert_eq!(player.position(), Vec2::new(512.0, 184.0));
    }

    #[test]
    fn leaving_the_top_edge_reenters_at_fixed_offset() {
        let (mut player, rules) = player();

        player.move_by(Direction::Up, rules.lane_height);
        player.advance(0.0, &rules, rules.screen_height);

        assert_eq!(player.position().y, rules.top_reentry);
    }

    #[test]
    fn clamps_to_right_and_bottom_margins() {
        let (mut player, rules) = player();

        for _ in 0..10 {
            player.move_by(Direction::Right, rules.lane_height);
            player.move_by(Direction::Down, rules.lane_height);
        }
        player.advance(0.0, &rules, rules.screen_height);

        assert_eq!(player.position(), Vec2::new(1264.0, 704.0));
    }

    #[test]
    fn clamps_left_edge_to_zero() {
        let (mut player, rules) = player();

        for _ in 0..6 {
            player.move_by(Direction::Left, rules.lane_height);
        }
        player.advance(0.0, &rules, rules.screen_height);

        assert_eq!(player.position().x, 0.0);
    }

    #[test]
    fn bottom_clamp_follows_surface_height() {
        let (mut player, rules) = player();

        for _ in 0..8 {
            player.move_by(Direction::Down, rules.lane_height);
        }
        player.advance(0.0, &rules, 976.0);

        assert_eq!(player.position().y, 960.0);
    }

    #[test]
    fn carry_is_applied_before_clamping() {
        let (mut player, rules) = player();

        player.advance(-5.0, &rules, rules.screen_height);
        assert_eq!(player.position().x, 635.0);

        player.advance(2_000.0, &rules, rules.screen_height);
        assert_eq!(player.position().x, rules.screen_width - rules.edge_margin);
    }

    #[test]
    fn reset_clears_attachment() {
        let (mut player, rules) = player();
        player.move_by(Direction::Down, rules.lane_height);
        player.attach(Some(ObstacleHandle::new(1, 0)));

        player.reset();

        assert_eq!(player.position(), player.spawn());
        assert!(player.attached().is_none());
    }
}
