use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use glam::Vec2;
use interview_rush_rendering::SpriteKey;
use macroquad::{
    color::WHITE,
    math::Vec2 as MacroquadVec2,
    text::{load_ttf_font_from_bytes, Font},
    texture::{self, DrawTextureParams, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Cache of textures loaded from the sprite manifest.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Draws the requested sprite stretched over the screen-space rectangle.
    pub(crate) fn draw(&self, key: SpriteKey, top_left: Vec2, size: Vec2) -> Result<()> {
        let texture = *self
            .textures
            .get(&key)
            .with_context(|| format!("sprite {key:?} missing from atlas"))?;

        let params = DrawTextureParams {
            dest_size: Some(MacroquadVec2::new(size.x, size.y)),
            ..DrawTextureParams::default()
        };
        texture::draw_texture_ex(texture, top_left.x, top_left.y, WHITE, params);

        Ok(())
    }

    /// Returns whether the atlas contains the provided key.
    #[cfg(test)]
    fn contains(&self, key: SpriteKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Returns the number of textures stored in the atlas.
    pub(crate) fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn from_entries(
        entries: Vec<(SpriteKey, PathBuf)>,
        loader: &mut impl FnMut(SpriteKey, &Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(key, &path).with_context(|| {
                format!("failed to load sprite {key:?} from {}", path.display())
            })?;
            if textures.insert(key, texture).is_some() {
                bail!("duplicate sprite entry for {key:?}");
            }
        }
        Ok(Self { textures })
    }
}

/// Textures and the optional font described by a manifest.
pub(crate) struct Assets {
    pub(crate) atlas: SpriteAtlas,
    pub(crate) font: Option<Font>,
}

impl Assets {
    /// Loads every asset named by the manifest at `path`.
    ///
    /// Missing or unreadable files are fatal; there is no partial fallback.
    pub(crate) fn from_manifest_path(path: &Path) -> Result<Self> {
        let manifest = read_manifest(path)?;
        let atlas = SpriteAtlas::from_entries(manifest.sprites, &mut default_loader)?;
        let font = manifest
            .font
            .as_deref()
            .map(load_font)
            .transpose()?;

        log::info!(
            "loaded {} sprites{} from {}",
            atlas.texture_count(),
            if font.is_some() { " and a font" } else { "" },
            path.display()
        );

        Ok(Self { atlas, font })
    }
}

fn default_loader(_key: SpriteKey, path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}

fn load_font(path: &Path) -> Result<Font> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read font at {}", path.display()))?;
    load_ttf_font_from_bytes(&bytes)
        .map_err(|error| anyhow!("failed to parse font at {}: {error:?}", path.display()))
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    font: Option<String>,
    sprites: HashMap<String, String>,
}

/// Manifest contents with paths resolved against the manifest's directory.
#[derive(Debug, PartialEq)]
struct ResolvedManifest {
    sprites: Vec<(SpriteKey, PathBuf)>,
    font: Option<PathBuf>,
}

fn read_manifest(manifest_path: &Path) -> Result<ResolvedManifest> {
    let contents = fs::read_to_string(manifest_path).with_context(|| {
        format!(
            "failed to read sprite manifest at {}",
            manifest_path.display()
        )
    })?;
    let base = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse_manifest(&contents, &base)
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<ResolvedManifest> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.sprites {
        let key = SpriteKey::from_manifest_name(&name)
            .with_context(|| format!("unknown sprite key `{name}` in manifest"))?;
        let _ = resolved.insert(key, base_path.join(relative_path));
    }

    let mut ordered = Vec::with_capacity(SpriteKey::ALL.len());
    for key in SpriteKey::ALL {
        let Some(path) = resolved.remove(&key) else {
            bail!(
                "sprite manifest missing entry for `{}`",
                key.manifest_name()
            );
        };
        ordered.push((key, path));
    }

    Ok(ResolvedManifest {
        sprites: ordered,
        font: manifest.font.map(|font| base_path.join(font)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn parse_manifest_requires_all_known_keys() {
        let manifest = r#"
            version = 1

            [sprites]
            frog = "frog.png"
            car = "car.png"
            boat = "boat.png"
        "#;

        let result = parse_manifest(manifest, Path::new("assets"));
        assert!(result.is_err(), "manifest missing pothole should fail");
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        let manifest = r#"
            version = 1

            [sprites]
            frog = "frog.png"
            car = "car.png"
            boat = "boat.png"
            pothole = "pothole.png"
            tower = "tower.png"
        "#;

        let result = parse_manifest(manifest, Path::new("assets"));
        assert!(result.is_err(), "unknown keys must be rejected");
    }

    #[test]
    fn manifest_rejects_other_versions() {
        let manifest = r#"
            version = 2

            [sprites]
        "#;

        assert!(parse_manifest(manifest, Path::new("assets")).is_err());
    }

    #[test]
    fn manifest_resolves_paths_relative_to_base_directory() {
        let manifest = r#"
            version = 1
            font = "fonts/arcade.ttf"

            [sprites]
            pothole = "road/pothole.png"
            boat = "river/boat.png"
            frog = "frog.png"
            car = "road/car.png"
        "#;

        let parsed = parse_manifest(manifest, Path::new("root")).expect("manifest should parse");
        let expected = ResolvedManifest {
            sprites: vec![
                (SpriteKey::Frog, PathBuf::from("root/frog.png")),
                (SpriteKey::Car, PathBuf::from("root/road/car.png")),
                (SpriteKey::Boat, PathBuf::from("root/river/boat.png")),
                (SpriteKey::Pothole, PathBuf::from("root/road/pothole.png")),
            ],
            font: Some(PathBuf::from("root/fonts/arcade.ttf")),
        };
        assert_eq!(parsed, expected);
    }

    #[test]
    fn font_is_optional() {
        let manifest = r#"
            version = 1

            [sprites]
            frog = "frog.png"
            car = "car.png"
            boat = "boat.png"
            pothole = "pothole.png"
        "#;

        let parsed = parse_manifest(manifest, Path::new(".")).expect("manifest should parse");
        assert!(parsed.font.is_none());
    }

    #[test]
    fn atlas_loads_textures_using_deterministic_order() {
        let manifest = r#"
            version = 1

            [sprites]
            boat = "boat.png"
            pothole = "pothole.png"
            car = "car.png"
            frog = "frog.png"
        "#;
        let parsed = parse_manifest(manifest, Path::new("assets"))
            .expect("manifest should parse into canonical order");
        let load_order = RefCell::new(Vec::new());
        let atlas = SpriteAtlas::from_entries(parsed.sprites, &mut |key, _| {
            load_order.borrow_mut().push(key);
            Ok(Texture2D::empty())
        })
        .expect("atlas should load using provided loader");

        assert_eq!(load_order.borrow().as_slice(), &SpriteKey::ALL);
        assert_eq!(atlas.texture_count(), SpriteKey::ALL.len());
        for key in SpriteKey::ALL {
            assert!(atlas.contains(key));
        }
    }

    #[test]
    fn loader_failures_abort_atlas_creation() {
        let entries = vec![
            (SpriteKey::Frog, PathBuf::from("frog.png")),
            (SpriteKey::Car, PathBuf::from("car.png")),
        ];

        let result = SpriteAtlas::from_entries(entries, &mut |key, _| {
            if key == SpriteKey::Car {
                bail!("corrupt image");
            }
            Ok(Texture2D::empty())
        });

        assert!(result.is_err());
    }
}
