#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Interview Rush adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use interview_rush_core::{InputEvent, LaneKind};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Only key-down transitions are reported, so a held key yields one event.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Discrete input events in the order they were observed.
    pub events: Vec<InputEvent>,
}

/// Decision returned by the scene update closure after each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop the render loop and return from [`RenderingBackend::run`].
    Exit,
}

/// Logical sprite names resolved by backends to concrete textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// Player character.
    Frog,
    /// Road hazard.
    Car,
    /// River platform.
    Boat,
    /// Pot-hole marker trailing a car.
    Pothole,
}

impl SpriteKey {
    /// Every sprite a complete manifest must provide, in load order.
    pub const ALL: [SpriteKey; 4] = [Self::Frog, Self::Car, Self::Boat, Self::Pothole];

    /// Name used for the sprite in asset manifests.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            Self::Frog => "frog",
            Self::Car => "car",
            Self::Boat => "boat",
            Self::Pothole => "pothole",
        }
    }

    /// Resolves a manifest name back into a key.
    #[must_use]
    pub fn from_manifest_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.manifest_name() == name)
    }
}

/// Sprite drawn centred on a world-space position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Sprite to draw.
    pub sprite: SpriteKey,
    /// Centre of the sprite in world units.
    pub center: Vec2,
    /// Width and height of the sprite in world units.
    pub size: Vec2,
}

impl SpriteInstance {
    /// Creates a new sprite instance descriptor.
    #[must_use]
    pub const fn new(sprite: SpriteKey, center: Vec2, size: Vec2) -> Self {
        Self {
            sprite,
            center,
            size,
        }
    }

    /// Upper-left corner of the sprite in world units.
    #[must_use]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.size * 0.5
    }
}

/// Line of text anchored at its baseline origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPresentation {
    /// Text to draw.
    pub text: String,
    /// Left end of the baseline in world units.
    pub position: Vec2,
    /// Font size in world units.
    pub font_size: f32,
    /// Fill color of the glyphs.
    pub color: Color,
}

impl TextPresentation {
    /// Creates a new text descriptor.
    #[must_use]
    pub fn new<T>(text: T, position: Vec2, font_size: f32, color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            text: text.into(),
            position,
            font_size,
            color,
        }
    }
}

/// Horizontal band painted behind a lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LanePresentation {
    /// Category of the lane, used by backends that theme lanes themselves.
    pub kind: LaneKind,
    /// Top edge of the band in world units.
    pub top: f32,
    /// Height of the band in world units.
    pub height: f32,
    /// Fill color of the band.
    pub color: Color,
}

impl LanePresentation {
    /// Creates a new lane band descriptor.
    #[must_use]
    pub const fn new(kind: LaneKind, top: f32, height: f32, color: Color) -> Self {
        Self {
            kind,
            top,
            height,
            color,
        }
    }
}

/// Scene description combining lane bands, sprites and text.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width of the drawing surface in world units.
    pub width: f32,
    /// Height of the drawing surface in world units.
    pub height: f32,
    /// Lane bands painted first, top to bottom.
    pub lanes: Vec<LanePresentation>,
    /// Sprites painted over the lanes in order.
    pub sprites: Vec<SpriteInstance>,
    /// Text painted last.
    pub text: Vec<TextPresentation>,
}

impl Scene {
    /// Creates an empty scene for a surface of the given size.
    ///
    /// Returns an error when either dimension is not strictly positive.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderingError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(RenderingError::InvalidSurface { width, height });
        }

        Ok(Self {
            width,
            height,
            lanes: Vec::new(),
            sprites: Vec::new(),
            text: Vec::new(),
        })
    }

    /// Drops every drawable while keeping the surface size.
    pub fn clear(&mut self) {
        self.lanes.clear();
        self.sprites.clear();
        self.text.clear();
    }

    /// Reports whether any sprite instances are queued.
    #[must_use]
    pub fn requests_sprites(&self) -> bool {
        !self.sprites.is_empty()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Number of simulation frames stepped per second.
    pub frames_per_second: u32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, frames_per_second: u32, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            frames_per_second,
            scene,
        }
    }

    /// Fixed simulation step derived from the frame rate.
    #[must_use]
    pub fn frame_step(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}

/// Rendering backend capable of presenting Interview Rush scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure is invoked once per simulation step
    /// with the fixed step duration and the input captured since the previous
    /// step. It may rewrite the scene before it is rendered and returns
    /// [`FrameControl::Exit`] to stop the loop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Surfaces must have a positive area.
    InvalidSurface {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSurface { width, height } => {
                write!(
                    f,
                    "surface dimensions must be positive (received {width}x{height})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
