// ABOUTME: Font resolution and text drawing for placeholder images
// ABOUTME: Tries a TrueType font from disk first, falls back to a built-in 5x7 bitmap font

use glob::{MatchOptions, Pattern};
use image::{Rgb, RgbImage};
use log::{debug, info, warn};
use rusttype::{point, Font, Scale};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which resolution tier produced the fonts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontTier {
    Primary { path: PathBuf },
    Fallback { reason: String },
}

impl FontTier {
    pub fn is_fallback(&self) -> bool {
        matches!(self, FontTier::Fallback { .. })
    }
}

impl fmt::Display for FontTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontTier::Primary { path } => write!(f, "primary ({})", path.display()),
            FontTier::Fallback { reason } => write!(f, "fallback ({})", reason),
        }
    }
}

/// A font at one size, able to draw a single line of text
#[derive(Clone)]
pub enum FontFace {
    TrueType { font: Font<'static>, scale: Scale },
    Bitmap { scale: u32 },
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFace::TrueType { scale, .. } => write!(f, "TrueType({}px)", scale.y),
            FontFace::Bitmap { scale } => write!(f, "Bitmap(x{})", scale),
        }
    }
}

impl FontFace {
    /// Size a TrueType font so its em square is `px` pixels tall
    pub fn truetype(font: Font<'static>, px: f32) -> Self {
        let metrics = font.v_metrics_unscaled();
        let units_per_em = font.units_per_em().max(1) as f32;
        let height = px * (metrics.ascent - metrics.descent) / units_per_em;
        FontFace::TrueType {
            font,
            scale: Scale::uniform(height),
        }
    }

    /// Bitmap glyphs are 8 rows tall, magnified to approximate `px`
    pub fn bitmap(px: f32) -> Self {
        FontFace::Bitmap {
            scale: ((px / 8.0).round() as u32).max(1),
        }
    }

    /// Draw `text` with its top-left corner at `origin`. Text running past the
    /// canvas is clipped, never wrapped.
    pub fn draw_text(&self, canvas: &mut RgbImage, origin: (i32, i32), text: &str, color: Rgb<u8>) {
        match self {
            FontFace::TrueType { font, scale } => {
                let ascent = font.v_metrics(*scale).ascent;
                let start = point(origin.0 as f32, origin.1 as f32 + ascent);
                for glyph in font.layout(text, *scale, start) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, coverage| {
                            let (x, y) = (bb.min.x + gx as i32, bb.min.y + gy as i32);
                            blend(canvas, x, y, color, coverage);
                        });
                    }
                }
            }
            FontFace::Bitmap { scale } => draw_bitmap_text(canvas, origin, text, color, *scale),
        }
    }
}

fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let coverage = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in pixel.0.iter_mut().zip(color.0.iter()) {
        *dst = (*dst as f32 * (1.0 - coverage) + *src as f32 * coverage).round() as u8;
    }
}

/// Title and subtitle faces plus the tier they came from
#[derive(Debug, Clone)]
pub struct ResolvedFonts {
    pub title: FontFace,
    pub subtitle: FontFace,
    pub tier: FontTier,
}

/// Two-tier font lookup: a named TrueType file, else the built-in bitmap font
#[derive(Debug, Clone)]
pub struct FontResolver {
    file_name: String,
    search_dirs: Vec<PathBuf>,
}

impl FontResolver {
    pub fn new(file_name: impl Into<String>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            search_dirs,
        }
    }

    /// Resolve both sizes from the same source. Failing to load either size
    /// drops both to the bitmap font.
    pub fn resolve(&self, title_px: f32, subtitle_px: f32) -> ResolvedFonts {
        match self.load_primary() {
            Ok((path, font)) => {
                info!("Using font {:?}", path);
                ResolvedFonts {
                    title: FontFace::truetype(font.clone(), title_px),
                    subtitle: FontFace::truetype(font, subtitle_px),
                    tier: FontTier::Primary { path },
                }
            }
            Err(reason) => {
                warn!(
                    "Font {} unavailable, using built-in bitmap font: {}",
                    self.file_name, reason
                );
                ResolvedFonts {
                    title: FontFace::bitmap(title_px),
                    subtitle: FontFace::bitmap(subtitle_px),
                    tier: FontTier::Fallback { reason },
                }
            }
        }
    }

    fn load_primary(&self) -> std::result::Result<(PathBuf, Font<'static>), String> {
        let path = self
            .locate()
            .ok_or_else(|| format!("{} not found", self.file_name))?;
        let data = std::fs::read(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let font = Font::try_from_vec(data)
            .ok_or_else(|| format!("{} is not a usable TrueType font", path.display()))?;
        Ok((path, font))
    }

    /// The working directory first, then each search directory recursively
    fn locate(&self) -> Option<PathBuf> {
        let direct = Path::new(&self.file_name);
        if direct.is_file() {
            return Some(direct.to_path_buf());
        }
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        for dir in self.search_dirs.iter().filter(|d| d.is_dir()) {
            let pattern = format!(
                "{}/**/{}",
                Pattern::escape(&dir.to_string_lossy()),
                Pattern::escape(&self.file_name)
            );
            debug!("Searching fonts with {}", pattern);
            let Ok(paths) = glob::glob_with(&pattern, options) else {
                continue;
            };
            if let Some(found) = paths.flatten().find(|p| p.is_file()) {
                return Some(found);
            }
        }
        None
    }
}

fn draw_bitmap_text(
    canvas: &mut RgbImage,
    origin: (i32, i32),
    text: &str,
    color: Rgb<u8>,
    scale: u32,
) {
    let scale = scale as i32;
    let advance = (GLYPH_WIDTH as i32 + 1) * scale;
    let mut x = origin.0;
    for c in text.chars() {
        let columns = glyph(c);
        for (col, bits) in columns.iter().enumerate() {
            for row in 0..8 {
                if bits >> row & 1 == 0 {
                    continue;
                }
                let px = x + col as i32 * scale;
                let py = origin.1 + row * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        blend(canvas, px + dx, py + dy, color, 1.0);
                    }
                }
            }
        }
        x += advance;
    }
}

const GLYPH_WIDTH: usize = 5;

/// Column bitmaps for a printable ASCII character; anything else draws as `?`
fn glyph(c: char) -> &'static [u8; GLYPH_WIDTH] {
    let code = c as u32;
    if (0x20..0x7f).contains(&code) {
        &BITMAP_FONT[(code - 0x20) as usize]
    } else {
        &BITMAP_FONT[(b'?' - 0x20) as usize]
    }
}

// 5x7 glyphs, one byte per column, least significant bit at the top.
#[rustfmt::skip]
static BITMAP_FONT: [[u8; GLYPH_WIDTH]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00],
    [0x14, 0x7F, 0x14, 0x7F, 0x14], [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x36, 0x49, 0x56, 0x20, 0x50], [0x00, 0x08, 0x07, 0x03, 0x00], [0x00, 0x1C, 0x22, 0x41, 0x00],
    [0x00, 0x41, 0x22, 0x1C, 0x00], [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], [0x08, 0x08, 0x3E, 0x08, 0x08],
    [0x00, 0x80, 0x70, 0x30, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x00, 0x60, 0x60, 0x00],
    [0x20, 0x10, 0x08, 0x04, 0x02], [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x72, 0x49, 0x49, 0x49, 0x46], [0x21, 0x41, 0x49, 0x4D, 0x33], [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39], [0x3C, 0x4A, 0x49, 0x49, 0x31], [0x41, 0x21, 0x11, 0x09, 0x07],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x46, 0x49, 0x49, 0x29, 0x1E], [0x00, 0x00, 0x14, 0x00, 0x00],
    [0x00, 0x40, 0x34, 0x00, 0x00], [0x00, 0x08, 0x14, 0x22, 0x41], [0x14, 0x14, 0x14, 0x14, 0x14],
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x59, 0x09, 0x06], [0x3E, 0x41, 0x5D, 0x59, 0x4E],
    [0x7C, 0x12, 0x11, 0x12, 0x7C], [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x41, 0x3E], [0x7F, 0x49, 0x49, 0x49, 0x41], [0x7F, 0x09, 0x09, 0x09, 0x01],
    [0x3E, 0x41, 0x41, 0x51, 0x73], [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41], [0x7F, 0x40, 0x40, 0x40, 0x40],
    [0x7F, 0x02, 0x1C, 0x02, 0x7F], [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], [0x7F, 0x09, 0x19, 0x29, 0x46],
    [0x26, 0x49, 0x49, 0x49, 0x32], [0x03, 0x01, 0x7F, 0x01, 0x03], [0x3F, 0x40, 0x40, 0x40, 0x3F],
    [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x3F, 0x40, 0x38, 0x40, 0x3F], [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x03, 0x04, 0x78, 0x04, 0x03], [0x61, 0x59, 0x49, 0x4D, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x41],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x41, 0x7F], [0x04, 0x02, 0x01, 0x02, 0x04],
    [0x40, 0x40, 0x40, 0x40, 0x40], [0x00, 0x03, 0x07, 0x08, 0x00], [0x20, 0x54, 0x54, 0x78, 0x40],
    [0x7F, 0x28, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x28], [0x38, 0x44, 0x44, 0x28, 0x7F],
    [0x38, 0x54, 0x54, 0x54, 0x18], [0x00, 0x08, 0x7E, 0x09, 0x02], [0x18, 0xA4, 0xA4, 0x9C, 0x78],
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], [0x20, 0x40, 0x40, 0x3D, 0x00],
    [0x7F, 0x10, 0x28, 0x44, 0x00], [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x78, 0x04, 0x78],
    [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], [0xFC, 0x18, 0x24, 0x24, 0x18],
    [0x18, 0x24, 0x24, 0x18, 0xFC], [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x24],
    [0x04, 0x04, 0x3F, 0x44, 0x24], [0x3C, 0x40, 0x40, 0x20, 0x7C], [0x1C, 0x20, 0x40, 0x20, 0x1C],
    [0x3C, 0x40, 0x30, 0x40, 0x3C], [0x44, 0x28, 0x10, 0x28, 0x44], [0x4C, 0x90, 0x90, 0x90, 0x7C],
    [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], [0x00, 0x00, 0x77, 0x00, 0x00],
    [0x00, 0x41, 0x36, 0x08, 0x00], [0x02, 0x01, 0x02, 0x04, 0x02],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_falls_back() {
        let resolver = FontResolver::new(
            "definitely-not-a-font-9f1c.ttf",
            vec![PathBuf::from("/nonexistent")],
        );
        let fonts = resolver.resolve(64.0, 34.0);
        assert!(fonts.tier.is_fallback());
        assert!(matches!(fonts.title, FontFace::Bitmap { scale: 8 }));
        assert!(matches!(fonts.subtitle, FontFace::Bitmap { scale: 4 }));
    }

    #[test]
    fn test_system_truetype_font_is_primary() {
        let dirs = vec![
            PathBuf::from("/usr/share/fonts"),
            PathBuf::from("/usr/local/share/fonts"),
        ];
        let fonts = FontResolver::new("dejavusans.ttf", dirs).resolve(64.0, 34.0);
        let path = match &fonts.tier {
            FontTier::Primary { path } => path.clone(),
            FontTier::Fallback { reason } => {
                eprintln!("skipping, no DejaVu Sans installed: {}", reason);
                return;
            }
        };
        assert!(!fonts.tier.is_fallback());
        assert!(fonts.tier.to_string().contains(&path.display().to_string()));
        assert!(matches!(fonts.title, FontFace::TrueType { .. }));
        assert!(matches!(fonts.subtitle, FontFace::TrueType { .. }));

        let background = Rgb([28, 45, 86]);
        let mut canvas = RgbImage::from_pixel(1280, 720, background);
        fonts
            .title
            .draw_text(&mut canvas, (110, 220), "Жанры", Rgb([255, 255, 255]));

        let lit: Vec<(u32, u32)> = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != background)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| x >= 110 && (220..300).contains(&y)));
        assert!(lit.iter().any(|&(_, y)| y < 250));
    }

    #[test]
    fn test_corrupt_font_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("Broken.TTF"), b"not a font").unwrap();
        let resolver = FontResolver::new("broken.ttf", vec![dir.path().to_path_buf()]);
        let fonts = resolver.resolve(64.0, 34.0);
        match fonts.tier {
            FontTier::Fallback { reason } => assert!(reason.contains("not a usable")),
            other => panic!("expected fallback, got {}", other),
        }
    }

    #[test]
    fn test_bitmap_text_is_clipped_not_wrapped() {
        let mut canvas = RgbImage::from_pixel(40, 20, Rgb([0, 0, 0]));
        let face = FontFace::bitmap(16.0);
        face.draw_text(&mut canvas, (30, 2), "WWWWWWWW", Rgb([255, 255, 255]));
        assert_eq!(canvas.dimensions(), (40, 20));
        assert!(canvas.pixels().any(|p| p.0 == [255, 255, 255]));
        // Nothing drawn left of the origin
        assert!((0..30).all(|x| (0..20).all(|y| canvas.get_pixel(x, y).0 == [0, 0, 0])));
    }

    #[test]
    fn test_non_ascii_draws_placeholder_glyph() {
        assert_eq!(glyph('Ж'), glyph('?'));
        assert_eq!(glyph(' '), &[0u8; 5]);
    }
}
