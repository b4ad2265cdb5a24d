#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Interview Rush.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter steps the simulation on a fixed clock independent of the
//! display refresh rate, so frames are presented as fast as vsync allows while
//! the game advances at the configured rate.

mod clock;
mod input;
mod sprites;

use anyhow::Result;
use glam::Vec2;
use interview_rush_core::LaneKind;
use interview_rush_rendering::{
    Color, FrameControl, FrameInput, Presentation, RenderingBackend, Scene, SpriteInstance,
    SpriteKey, TextPresentation,
};
use macroquad::{
    input::prevent_quit,
    shapes::{draw_circle, draw_rectangle},
    text::{draw_text_ex, Font, TextParams},
};
use std::{path::PathBuf, sync::mpsc, time::Duration};

pub use self::clock::FrameClock;
pub use self::input::map_pressed_keys;

use self::sprites::Assets;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    sprite_manifest: Option<PathBuf>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Loads sprites and an optional font from the manifest at `path`.
    ///
    /// Without a manifest every sprite is drawn as a primitive shape.
    #[must_use]
    pub fn with_sprite_manifest(mut self, path: Option<PathBuf>) -> Self {
        self.sprite_manifest = path;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a presented frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            sprite_manifest,
        } = self;

        let step = presentation.frame_step();
        let Presentation {
            window_title,
            clear_color,
            scene,
            ..
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.width.round() as i32,
            window_height: scene.height.round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let mut init_sender = Some(init_sender);
            let assets = match sprite_manifest
                .as_deref()
                .map(Assets::from_manifest_path)
                .transpose()
            {
                Ok(assets) => assets,
                Err(error) => {
                    if let Some(sender) = init_sender.take() {
                        let _ = sender.send(Err(error));
                    }
                    return;
                }
            };
            if let Some(sender) = init_sender.take() {
                let _ = sender.send(Ok(()));
            }

            prevent_quit();

            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut surface = (scene.width, scene.height);
            let mut clock = FrameClock::with_step(step);
            let mut pending_input = Vec::new();
            let mut fps_counter = FpsCounter::default();
            let mut announced_primitives = false;

            'frames: loop {
                pending_input.extend(input::poll());

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                for _ in 0..clock.advance(frame_dt) {
                    let frame_input = FrameInput {
                        events: std::mem::take(&mut pending_input),
                    };
                    if update_scene(clock.step(), frame_input, &mut scene) == FrameControl::Exit {
                        break 'frames;
                    }
                }

                if assets.is_none() && !announced_primitives && scene.requests_sprites() {
                    announced_primitives = true;
                    log::info!("no sprite manifest supplied; drawing primitive shapes");
                }

                if surface != (scene.width, scene.height) {
                    surface = (scene.width, scene.height);
                    log::debug!("resizing window to {}x{}", scene.width, scene.height);
                    macroquad::window::request_new_screen_size(scene.width, scene.height);
                }

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_scene(&scene, &metrics, assets.as_ref());

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        log::info!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

const LANE_EDGE_THICKNESS: f32 = 4.0;
const LANE_EDGE_LIGHTEN: f32 = 0.25;
const FINISH_CHECK_ROWS: u32 = 2;

/// Uniform world-to-screen transform that letterboxes the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let scale = if scene.width <= f32::EPSILON || scene.height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / scene.width).min(screen_height / scene.height)
        };

        let offset = Vec2::new(
            ((screen_width - scene.width * scale) * 0.5).max(0.0),
            ((screen_height - scene.height * scale) * 0.5).max(0.0),
        );

        Self { scale, offset }
    }

    fn to_screen(&self, world: Vec2) -> Vec2 {
        self.offset + world * self.scale
    }
}

fn draw_scene(scene: &Scene, metrics: &SceneMetrics, assets: Option<&Assets>) {
    for lane in &scene.lanes {
        let top_left = metrics.to_screen(Vec2::new(0.0, lane.top));
        let width = scene.width * metrics.scale;
        draw_rectangle(
            top_left.x,
            top_left.y,
            width,
            lane.height * metrics.scale,
            to_macroquad_color(lane.color),
        );
        draw_rectangle(
            top_left.x,
            top_left.y,
            width,
            LANE_EDGE_THICKNESS * metrics.scale,
            to_macroquad_color(lane.color.lighten(LANE_EDGE_LIGHTEN)),
        );
        if lane.kind == LaneKind::Finish {
            draw_finish_checks(top_left, width, lane.height * metrics.scale);
        }
    }

    for sprite in &scene.sprites {
        match assets {
            Some(assets) => {
                let top_left = metrics.to_screen(sprite.top_left());
                if let Err(error) =
                    assets
                        .atlas
                        .draw(sprite.sprite, top_left, sprite.size * metrics.scale)
                {
                    log::warn!("{error:#}");
                }
            }
            None => draw_primitive_sprite(sprite, metrics),
        }
    }

    let font = assets.and_then(|assets| assets.font);
    for line in &scene.text {
        draw_text_line(line, metrics, font);
    }
}

fn draw_finish_checks(top_left: Vec2, width: f32, height: f32) {
    let side = height / FINISH_CHECK_ROWS as f32;
    for offset in finish_check_offsets(width, side) {
        let corner = top_left + offset;
        draw_rectangle(corner.x, corner.y, side, side, macroquad::color::WHITE);
    }
}

/// Top-left offsets of the white squares in a finish band of checks `side` wide.
fn finish_check_offsets(width: f32, side: f32) -> Vec<Vec2> {
    if side <= f32::EPSILON {
        return Vec::new();
    }
    let columns = (width / side).ceil() as u32;
    (0..FINISH_CHECK_ROWS)
        .flat_map(|row| {
            (row % 2..columns)
                .step_by(2)
                .map(move |column| Vec2::new(column as f32 * side, row as f32 * side))
        })
        .collect()
}

fn draw_primitive_sprite(sprite: &SpriteInstance, metrics: &SceneMetrics) {
    let color = to_macroquad_color(primitive_color(sprite.sprite));
    match sprite.sprite {
        SpriteKey::Pothole => {
            let center = metrics.to_screen(sprite.center);
            let radius = sprite.size.x.min(sprite.size.y) * 0.5 * metrics.scale;
            draw_circle(center.x, center.y, radius, color);
        }
        SpriteKey::Frog | SpriteKey::Car | SpriteKey::Boat => {
            let top_left = metrics.to_screen(sprite.top_left());
            let size = sprite.size * metrics.scale;
            draw_rectangle(top_left.x, top_left.y, size.x, size.y, color);
        }
    }
}

fn primitive_color(key: SpriteKey) -> Color {
    match key {
        SpriteKey::Frog => Color::from_rgb_u8(76, 187, 23),
        SpriteKey::Car => Color::from_rgb_u8(200, 40, 40),
        SpriteKey::Boat => Color::from_rgb_u8(139, 90, 43),
        SpriteKey::Pothole => Color::from_rgb_u8(30, 30, 30),
    }
}

fn draw_text_line(line: &TextPresentation, metrics: &SceneMetrics, font: Option<Font>) {
    let origin = metrics.to_screen(line.position);
    let mut params = TextParams {
        font_size: (line.font_size * metrics.scale).round().max(1.0) as u16,
        color: to_macroquad_color(line.color),
        ..TextParams::default()
    };
    if let Some(font) = font {
        params.font = font;
    }
    draw_text_ex(&line.text, origin.x, origin.y, params);
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
