//! Tunable rules describing the playfield geometry and difficulty curve.

use serde::Deserialize;
use thiserror::Error;

/// Gameplay constants shared by the world, systems, and adapters.
///
/// Every field falls back to the classic tuning when omitted from a
/// configuration file, so partial overrides are accepted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Width of the visible surface in world units.
    pub screen_width: f32,
    /// Height of the visible surface before any level-driven growth.
    pub screen_height: f32,
    /// Extra surface height granted for each intermediate lane in the growth band.
    pub height_step: f32,
    /// Height of a single lane, also the length of one player step.
    pub lane_height: f32,
    /// Horizontal spawn coordinate of the player.
    pub spawn_x: f32,
    /// Vertical spawn coordinate of the player; also the lane index origin.
    pub spawn_y: f32,
    /// Side length of the player's square hit box.
    pub frog_size: f32,
    /// Distance kept between the player and the right and bottom edges.
    pub edge_margin: f32,
    /// Vertical position the player is pushed back to after leaving the top edge.
    pub top_reentry: f32,
    /// Lives granted at the start of every run.
    pub starting_lives: u32,
    /// Side length of an obstacle's square hit box.
    pub obstacle_size: f32,
    /// Span used when wrapping obstacles around the screen.
    pub obstacle_width: f32,
    /// Overrun past the right edge tolerated before a rightward obstacle wraps.
    pub wrap_margin: f32,
    /// Slowest base obstacle speed in world units per frame.
    pub min_speed: u32,
    /// Fastest base obstacle speed in world units per frame.
    pub max_speed: u32,
    /// Chance that a car drags a pothole marker along its lane.
    pub hazard_probability: f64,
    /// Vertical offset of a pothole below its car's spawn position.
    pub marker_offset: f32,
    /// Highest level that still uses the mixed car/water layout.
    pub difficulty_cap_level: u32,
    /// Number of car lanes generated beyond the difficulty cap.
    pub capped_lane_count: usize,
    /// Obstacle speed multiplies only on levels divisible by this value.
    pub speed_step_levels: u32,
    /// Target simulation rate.
    pub frames_per_second: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            height_step: 128.0,
            lane_height: 128.0,
            spawn_x: 640.0,
            spawn_y: 56.0,
            frog_size: 32.0,
            edge_margin: 16.0,
            top_reentry: 32.0,
            starting_lives: 5,
            obstacle_size: 120.0,
            obstacle_width: 256.0,
            wrap_margin: 64.0,
            min_speed: 3,
            max_speed: 7,
            hazard_probability: 0.7,
            marker_offset: 64.0,
            difficulty_cap_level: 8,
            capped_lane_count: 9,
            speed_step_levels: 5,
            frames_per_second: 30,
        }
    }
}

impl Rules {
    /// Checks that the rules describe a playable field.
    ///
    /// Sizes must be strictly positive; offsets and margins may be zero but
    /// never negative or non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("lane_height", self.lane_height),
            ("frog_size", self.frog_size),
            ("obstacle_size", self.obstacle_size),
            ("obstacle_width", self.obstacle_width),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("height_step", self.height_step),
            ("spawn_x", self.spawn_x),
            ("spawn_y", self.spawn_y),
            ("edge_margin", self.edge_margin),
            ("top_reentry", self.top_reentry),
            ("wrap_margin", self.wrap_margin),
            ("marker_offset", self.marker_offset),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.min_speed == 0 || self.min_speed > self.max_speed {
            return Err(ConfigError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if !(0.0..=1.0).contains(&self.hazard_probability) {
            return Err(ConfigError::Probability(self.hazard_probability));
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }

        if self.speed_step_levels == 0 {
            return Err(ConfigError::ZeroSpeedStep);
        }

        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        Ok(())
    }

    /// Speed multiplier applied to obstacles generated for `level`.
    ///
    /// Only levels that are multiples of [`Rules::speed_step_levels`] speed up;
    /// every other level runs at base speed.
    #[must_use]
    pub fn speed_multiplier(&self, level: u32) -> u32 {
        let step = self.speed_step_levels.max(1);
        if level != 0 && level % step == 0 {
            level / step + 1
        } else {
            1
        }
    }
}

/// Reasons a [`Rules`] value is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A geometric quantity must be strictly positive.
    #[error("{field} must be positive (received {value})")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for the field.
        value: f32,
    },
    /// An offset or margin must be finite and not negative.
    #[error("{field} must be zero or positive (received {value})")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied for the field.
        value: f32,
    },
    /// The obstacle speed range is empty or starts at zero.
    #[error("obstacle speed range {min}..={max} is empty or includes zero")]
    SpeedRange {
        /// Configured minimum speed.
        min: u32,
        /// Configured maximum speed.
        max: u32,
    },
    /// The hazard probability lies outside `0.0..=1.0`.
    #[error("hazard_probability must lie within 0..=1 (received {0})")]
    Probability(f64),
    /// Runs must start with at least one life.
    #[error("starting_lives must be at least one")]
    NoLives,
    /// The speed step divisor must be positive.
    #[error("speed_step_levels must be at least one")]
    ZeroSpeedStep,
    /// The simulation needs a positive frame rate.
    #[error("frames_per_second must be at least one")]
    ZeroFrameRate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        assert_eq!(Rules::default().validate(), Ok(()));
    }

    #[test]
    fn speed_multiplier_only_changes_on_step_levels() {
        let rules = Rules::default();
        for level in 1..5 {
            assert_eq!(rules.speed_multiplier(level), 1, "level {level}");
        }
        assert_eq!(rules.speed_multiplier(5), 2);
        assert_eq!(rules.speed_multiplier(6), 1);
        assert_eq!(rules.speed_multiplier(10), 3);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let rules: Rules = toml::from_str("starting_lives = 3\nmax_speed = 9\n")
            .expect("partial rules parse");

        assert_eq!(rules.starting_lives, 3);
        assert_eq!(rules.max_speed, 9);
        assert_eq!(rules.screen_width, Rules::default().screen_width);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<Rules, _> = toml::from_str("lanes = 4\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn validation_rejects_empty_speed_range() {
        let rules = Rules {
            min_speed: 8,
            max_speed: 2,
            ..Rules::default()
        };
        assert_eq!(
            rules.validate(),
            Err(ConfigError::SpeedRange { min: 8, max: 2 })
        );
    }

    #[test]
    fn validation_rejects_non_positive_geometry() {
        let rules = Rules {
            lane_height: 0.0,
            ..Rules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(ConfigError::NonPositive {
                field: "lane_height",
                ..
            })
        ));
    }

    #[test]
    fn validation_rejects_negative_or_non_finite_offsets() {
        let shrinking = Rules {
            height_step: -128.0,
            ..Rules::default()
        };
        assert_eq!(
            shrinking.validate(),
            Err(ConfigError::Negative {
                field: "height_step",
                value: -128.0,
            })
        );

        let lost_spawn = Rules {
            spawn_y: f32::NAN,
            ..Rules::default()
        };
        assert!(matches!(
            lost_spawn.validate(),
            Err(ConfigError::Negative {
                field: "spawn_y",
                ..
            })
        ));

        let flush = Rules {
            wrap_margin: 0.0,
            marker_offset: 0.0,
            ..Rules::default()
        };
        assert_eq!(flush.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_out_of_range_probability() {
        let rules = Rules {
            hazard_probability: 1.5,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(ConfigError::Probability(1.5)));
    }
}
