use glam::Vec2;
use interview_rush_core::{LaneKind, ObstacleKind, Screen};
use interview_rush_rendering::{
    Color, LanePresentation, Scene, SpriteInstance, SpriteKey, TextPresentation,
};
use interview_rush_system_bootstrap::Bootstrap;
use interview_rush_world::{query, World};

const TEXT_COLOR: Color = Color::from_rgb_u8(245, 245, 245);
const TITLE_SIZE: f32 = 48.0;
const BODY_SIZE: f32 = 28.0;
const LINE_SPACING: f32 = 1.6;
const HUD_ORIGIN: Vec2 = Vec2::new(16.0, 32.0);
const POTHOLE_SIZE: f32 = 40.0;
const OCCUPIED_LANE_LIGHTEN: f32 = 0.15;

/// Rewrites `scene` to show the world as seen from `screen`.
///
/// `extra_lines` are appended below the screen's own text.
pub(crate) fn populate(
    scene: &mut Scene,
    world: &World,
    screen: Screen,
    bootstrap: &Bootstrap,
    extra_lines: &[String],
) {
    scene.clear();
    let rules = query::rules(world);
    scene.width = rules.screen_width;
    scene.height = query::surface_height(world);

    let mut lines = bootstrap.lines_for(screen, world);
    lines.extend(extra_lines.iter().cloned());

    match screen {
        Screen::Intro | Screen::GameOver => push_centered_text(scene, &lines),
        Screen::Playing => {
            push_field(scene, world);
            push_hud(scene, &lines);
        }
    }
}

fn push_field(scene: &mut Scene, world: &World) {
    let rules = query::rules(world);
    let occupied = query::current_lane(world);

    for lane in query::lanes(world) {
        let mut color = lane_color(lane.kind());
        if occupied == Some(lane.index()) {
            color = color.lighten(OCCUPIED_LANE_LIGHTEN);
        }
        scene.lanes.push(LanePresentation::new(
            lane.kind(),
            lane.y(),
            rules.lane_height,
            color,
        ));
    }

    for lane in query::lanes(world) {
        for obstacle in lane.obstacles() {
            if let Some(marker) = obstacle.hazard_marker() {
                scene.sprites.push(SpriteInstance::new(
                    SpriteKey::Pothole,
                    marker,
                    Vec2::splat(POTHOLE_SIZE),
                ));
            }
        }
    }

    for lane in query::lanes(world) {
        for obstacle in lane.obstacles() {
            let sprite = match obstacle.kind() {
                ObstacleKind::Car => SpriteKey::Car,
                ObstacleKind::Boat => SpriteKey::Boat,
            };
            scene.sprites.push(SpriteInstance::new(
                sprite,
                obstacle.position(),
                obstacle.bounds().size(),
            ));
        }
    }

    let player = query::player(world);
    scene.sprites.push(SpriteInstance::new(
        SpriteKey::Frog,
        player.position(),
        player.bounds().size(),
    ));
}

fn push_hud(scene: &mut Scene, lines: &[String]) {
    for (index, line) in lines.iter().enumerate() {
        let offset = index as f32 * BODY_SIZE * LINE_SPACING;
        scene.text.push(TextPresentation::new(
            line.clone(),
            HUD_ORIGIN + Vec2::new(0.0, offset),
            BODY_SIZE,
            TEXT_COLOR,
        ));
    }
}

fn push_centered_text(scene: &mut Scene, lines: &[String]) {
    let left = scene.width * 0.1;
    let mut baseline = scene.height * 0.3;

    for (index, line) in lines.iter().enumerate() {
        let size = if index == 0 { TITLE_SIZE } else { BODY_SIZE };
        scene.text.push(TextPresentation::new(
            line.clone(),
            Vec2::new(left, baseline),
            size,
            TEXT_COLOR,
        ));
        baseline += size * LINE_SPACING;
    }
}

fn lane_color(kind: LaneKind) -> Color {
    match kind {
        LaneKind::Safe => Color::from_rgb_u8(58, 125, 68),
        LaneKind::Car => Color::from_rgb_u8(64, 64, 72),
        LaneKind::Water => Color::from_rgb_u8(38, 94, 170),
        LaneKind::Finish => Color::from_rgb_u8(214, 170, 48),
    }
}
