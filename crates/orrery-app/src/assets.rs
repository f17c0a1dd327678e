//! Body texture loading with procedural fallbacks.
//!
//! Looks for `<body>_diffuse.{png,jpg}` and `<body>_specular.{png,jpg}` under
//! the configured assets directory. A missing or undecodable file falls back
//! to a generated pattern, so the application always starts.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Resolution of generated fallback textures.
const FALLBACK_WIDTH: u32 = 256;
const FALLBACK_HEIGHT: u32 = 128;

/// Errors from texture file loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// No candidate file exists for the map.
    #[error("no texture file found for {0}")]
    NotFound(String),

    /// The file exists but could not be decoded.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// A CPU-side RGBA8 image ready for GPU upload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The diffuse/specular pair for one body.
#[derive(Debug, Clone)]
pub struct BodyTextures {
    pub diffuse: TextureData,
    pub specular: TextureData,
}

/// Load both maps for a body, substituting procedural patterns for anything
/// missing. The specular map is forced to the diffuse dimensions; a
/// mismatched file is replaced rather than stretched.
pub fn load_body_textures(assets_dir: &Path, body: &str) -> BodyTextures {
    let diffuse = match load_map(assets_dir, body, "diffuse") {
        Ok(data) => data,
        Err(err) => {
            warn!("{err}; using procedural diffuse for {body}");
            procedural_diffuse(body, FALLBACK_WIDTH, FALLBACK_HEIGHT)
        }
    };

    let specular = match load_map(assets_dir, body, "specular") {
        Ok(data) if (data.width, data.height) == (diffuse.width, diffuse.height) => data,
        Ok(data) => {
            warn!(
                "specular map for {body} is {}x{}, diffuse is {}x{}; using procedural specular",
                data.width, data.height, diffuse.width, diffuse.height
            );
            procedural_specular(body, diffuse.width, diffuse.height)
        }
        Err(err) => {
            warn!("{err}; using procedural specular for {body}");
            procedural_specular(body, diffuse.width, diffuse.height)
        }
    };

    BodyTextures { diffuse, specular }
}

/// Try `<body>_<map>.png` then `<body>_<map>.jpg` under `assets_dir`.
fn load_map(assets_dir: &Path, body: &str, map: &str) -> Result<TextureData, AssetError> {
    for ext in ["png", "jpg"] {
        let path = assets_dir.join(format!("{body}_{map}.{ext}"));
        if !path.exists() {
            continue;
        }
        let img = image::open(&path).map_err(|source| AssetError::Decode {
            path: path.clone(),
            source,
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        return Ok(TextureData {
            pixels: rgba.into_raw(),
            width,
            height,
        });
    }
    Err(AssetError::NotFound(format!("{body}_{map}")))
}

/// Generate a diffuse fallback pattern for a body.
///
/// The sun gets warm latitude-graded yellows; the earth gets oceans with
/// banded continents; anything else gets neutral gray. Patterns are pure
/// functions of the pixel coordinate, so regeneration is deterministic.
pub fn procedural_diffuse(body: &str, width: u32, height: u32) -> TextureData {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let [r, g, b] = match body {
                "sun" => sun_color(u, v),
                "earth" => earth_color(u, v),
                _ => [128, 128, 128],
            };
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    TextureData {
        pixels,
        width,
        height,
    }
}

/// Generate a specular fallback: for the earth, water (where the diffuse
/// pattern is ocean) reflects and land does not; other bodies get a flat
/// low-gloss mask.
pub fn procedural_specular(body: &str, width: u32, height: u32) -> TextureData {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let u = x as f32 / width as f32;
            let v = y as f32 / height as f32;
            let level = match body {
                "earth" => {
                    if is_land(u, v) {
                        24
                    } else {
                        160
                    }
                }
                _ => 32,
            };
            pixels.extend_from_slice(&[level, level, level, 255]);
        }
    }
    TextureData {
        pixels,
        width,
        height,
    }
}

fn sun_color(u: f32, v: f32) -> [u8; 3] {
    // Granulation-ish ripple over a warm base.
    let ripple = ((u * 40.0).sin() * (v * 20.0).sin() * 0.5 + 0.5) * 0.25;
    let heat = 1.0 - (v - 0.5).abs() * 0.6;
    let r = 255.0 * heat;
    let g = (200.0 + 40.0 * ripple) * heat;
    let b = 60.0 * heat;
    [r as u8, g as u8, b as u8]
}

fn earth_color(u: f32, v: f32) -> [u8; 3] {
    if is_land(u, v) {
        [46, 120, 50]
    } else {
        [18, 52, 120]
    }
}

/// Continent mask: overlapping low-frequency sine blobs.
fn is_land(u: f32, v: f32) -> bool {
    let blob = (u * std::f32::consts::TAU * 3.0).sin() * (v * std::f32::consts::PI * 2.0).sin()
        + (u * std::f32::consts::TAU * 5.0 + 1.3).sin() * 0.5;
    blob > 0.55
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_diffuse_dimensions() {
        let data = procedural_diffuse("earth", 64, 32);
        assert_eq!(data.width, 64);
        assert_eq!(data.height, 32);
        assert_eq!(data.pixels.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_procedural_textures_are_deterministic() {
        let a = procedural_diffuse("sun", 32, 16);
        let b = procedural_diffuse("sun", 32, 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_procedural_pixels_are_opaque() {
        let data = procedural_diffuse("earth", 16, 8);
        for alpha in data.pixels.chunks(4).map(|px| px[3]) {
            assert_eq!(alpha, 255);
        }
    }

    #[test]
    fn test_earth_specular_distinguishes_land_and_sea() {
        let data = procedural_specular("earth", 64, 32);
        let levels: std::collections::HashSet<u8> =
            data.pixels.chunks(4).map(|px| px[0]).collect();
        assert!(levels.contains(&24), "no land in specular mask");
        assert!(levels.contains(&160), "no water in specular mask");
    }

    #[test]
    fn test_unknown_body_gets_neutral_diffuse() {
        let data = procedural_diffuse("phobos", 8, 4);
        assert_eq!(&data.pixels[0..4], &[128, 128, 128, 255]);
    }

    #[test]
    fn test_missing_files_fall_back() {
        let dir = std::env::temp_dir().join("orrery-no-assets-here");
        let textures = load_body_textures(&dir, "earth");
        assert_eq!(textures.diffuse.width, FALLBACK_WIDTH);
        assert_eq!(textures.diffuse.height, FALLBACK_HEIGHT);
        assert_eq!(
            (textures.specular.width, textures.specular.height),
            (textures.diffuse.width, textures.diffuse.height)
        );
    }

    #[test]
    fn test_load_map_reports_not_found() {
        let dir = std::env::temp_dir().join("orrery-no-assets-here");
        let err = load_map(&dir, "earth", "diffuse").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
