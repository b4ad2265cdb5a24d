use interview_rush_core::{LaneKind, ObstacleHandle, Rules};
use rand::Rng;

use crate::{Lane, Obstacle};

/// Speed level of the roads generated past the difficulty cap.
const BASE_SPEED_LEVEL: u32 = 1;

/// Intermediate lane indices (1-based) that stretch the surface height.
const GROWTH_BAND: std::ops::Range<usize> = 4..9;

/// Ordered stack of lanes forming a single level.
///
/// Lane zero is always the safe starting strip and the last lane is always the
/// finish line.
#[derive(Clone, Debug, PartialEq)]
pub struct LaneField {
    level: u32,
    lanes: Vec<Lane>,
    surface_height: f32,
}

impl LaneField {
    /// Generates the lane layout for `level`.
    ///
    /// Up to the difficulty cap each intermediate lane is a coin flip between
    /// road and river with one obstacle scaled for the level. Past the cap the
    /// field becomes a fixed run of roads at base speed.
    pub fn build<R>(level: u32, rules: &Rules, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut lanes = Vec::new();
        lanes.push(Lane::generate(0, LaneKind::Safe, 0, level, rules, rng));

        if level <= rules.difficulty_cap_level {
            for index in 1..=level as usize {
                let kind = if rng.gen_bool(0.5) {
                    LaneKind::Car
                } else {
                    LaneKind::Water
                };
                lanes.push(Lane::generate(index, kind, 1, level, rules, rng));
            }
        } else {
            for index in 1..=rules.capped_lane_count {
                lanes.push(Lane::generate(
                    index,
                    LaneKind::Car,
                    1,
                    BASE_SPEED_LEVEL,
                    rules,
                    rng,
                ));
            }
        }

        let finish_index = lanes.len();
        lanes.push(Lane::generate(
            finish_index,
            LaneKind::Finish,
            0,
            level,
            rules,
            rng,
        ));

        log::debug!(
            "built level {level}: {} lanes ({})",
            lanes.len(),
            describe(&lanes)
        );

        Self::from_lanes(level, lanes, rules)
    }

    /// Wraps hand-assembled lanes, deriving the surface height from their count.
    #[must_use]
    pub fn from_lanes(level: u32, lanes: Vec<Lane>, rules: &Rules) -> Self {
        let intermediate = lanes.len().saturating_sub(2);
        let surface_height = surface_height_for(intermediate, rules);
        Self {
            level,
            lanes,
            surface_height,
        }
    }

    /// Maps a vertical player position onto a lane index.
    ///
    /// Positions above the first lane or below the last one saturate to the
    /// nearest valid lane.
    #[must_use]
    pub fn lane_index_at(&self, y: f32, rules: &Rules) -> usize {
        let raw = ((y - rules.spawn_y) / rules.lane_height).floor();
        let last = self.lanes.len().saturating_sub(1);
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        }
    }

    /// Advances every obstacle in every lane by one frame.
    pub fn advance_obstacles(&mut self, rules: &Rules) {
        for lane in &mut self.lanes {
            lane.advance_obstacles(rules);
        }
    }

    /// Resolves a handle to the obstacle it addresses.
    #[must_use]
    pub fn obstacle(&self, handle: ObstacleHandle) -> Option<&Obstacle> {
        self.lanes
            .get(handle.lane())
            .and_then(|lane| lane.obstacles().get(handle.obstacle()))
    }

    /// Level the field was generated for.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Lanes ordered from the start strip to the finish line.
    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Height the rendering surface needs to show every lane.
    #[must_use]
    pub const fn surface_height(&self) -> f32 {
        self.surface_height
    }
}

fn surface_height_for(intermediate: usize, rules: &Rules) -> f32 {
    let grown = (1..=intermediate)
        .filter(|index| GROWTH_BAND.contains(index))
        .count();
    rules.screen_height + rules.height_step * grown as f32
}

fn describe(lanes: &[Lane]) -> String {
    lanes
        .iter()
        .map(|lane| match lane.kind() {
            LaneKind::Safe => 'S',
            LaneKind::Car => 'C',
            LaneKind::Water => 'W',
            LaneKind::Finish => 'F',
        })
        .collect()
}
