#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Interview Rush experience.

mod config;
mod scene;
mod simulation;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use interview_rush_rendering::{Color, Presentation, RenderingBackend, Scene};
use interview_rush_rendering_macroquad::MacroquadBackend;

use crate::simulation::Simulation;

const WINDOW_TITLE: &str = "Interview Rush";
const CLEAR_COLOR: Color = Color::from_rgb_u8(18, 18, 24);

/// Command-line arguments for the Interview Rush binary.
#[derive(Debug, Parser)]
#[command(name = "interview-rush")]
#[command(about = "Hop across traffic and river lanes to reach the interview room")]
struct Args {
    /// Seed for lane generation. A random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default gameplay rules.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// TOML manifest naming sprite textures and an optional font.
    #[arg(long, value_name = "PATH")]
    sprites: Option<PathBuf>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    vsync: bool,

    /// Log the presented frame rate once per second.
    #[arg(long, default_value_t = false)]
    show_fps: bool,
}

/// Entry point for the Interview Rush command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "starting with seed {seed}, vsync {}, config {:?}, sprites {:?}",
        args.vsync,
        args.config,
        args.sprites
    );

    let rules = config::load_rules(args.config.as_deref())?;
    let frames_per_second = rules.frames_per_second;
    let mut scene = Scene::new(rules.screen_width, rules.screen_height)?;
    let mut simulation = Simulation::new(rules, seed)?;
    simulation.populate(&mut scene);

    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, frames_per_second, scene);

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_sprite_manifest(args.sprites)
        .run(presentation, move |_, input, scene| simulation.step(input, scene))
}
