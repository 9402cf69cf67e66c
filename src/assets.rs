// ABOUTME: Placeholder image synthesis for the docdeck application
// ABOUTME: Renders a bordered title card per slide and saves it as PNG

use crate::config::ImageStyle;
use crate::content::ImageSpec;
use crate::errors::Result;
use crate::fonts::{FontResolver, FontTier, ResolvedFonts};
use crate::utils;
use image::{ImageFormat, Rgb, RgbImage};
use log::info;
use std::path::{Path, PathBuf};

/// An image written to disk, ready to be embedded in a slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Render one title card to `path`, overwriting any existing file.
///
/// `color` overrides the style's background. The output is always
/// `style.width` x `style.height` no matter how long the text is.
pub fn make_image(
    path: &Path,
    title: &str,
    subtitle: &str,
    color: Option<Rgb<u8>>,
    style: &ImageStyle,
    fonts: &ResolvedFonts,
) -> Result<GeneratedAsset> {
    let background = color.unwrap_or(style.background);
    let mut canvas = RgbImage::from_pixel(style.width, style.height, background);

    draw_border(&mut canvas, style);
    fonts
        .title
        .draw_text(&mut canvas, style.title_origin, title, style.title_color);
    fonts
        .subtitle
        .draw_text(&mut canvas, style.subtitle_origin, subtitle, style.subtitle_color);

    utils::ensure_parent_directory_exists(path)?;
    canvas.save_with_format(path, ImageFormat::Png)?;

    Ok(GeneratedAsset {
        path: path.to_path_buf(),
        width: canvas.width(),
        height: canvas.height(),
    })
}

/// Outline rectangle inset on every side, stroked inwards
fn draw_border(canvas: &mut RgbImage, style: &ImageStyle) {
    let (width, height) = canvas.dimensions();
    let inset = style.border_inset;
    if width <= inset * 2 || height <= inset * 2 {
        return;
    }
    let (left, top) = (inset, inset);
    let (right, bottom) = ((width - inset).min(width - 1), (height - inset).min(height - 1));
    let stroke = style.border_width.min((right - left) / 2).min((bottom - top) / 2);

    for y in top..=bottom {
        for x in left..=right {
            let on_edge = x < left + stroke
                || x + stroke > right
                || y < top + stroke
                || y + stroke > bottom;
            if on_edge {
                canvas.put_pixel(x, y, style.border_color);
            }
        }
    }
}

/// Renders the image table into the asset directory
pub struct AssetGenerator {
    assets_dir: PathBuf,
    style: ImageStyle,
    fonts: ResolvedFonts,
}

impl AssetGenerator {
    /// Resolve fonts once for every image this generator renders
    pub fn new(assets_dir: &Path, style: ImageStyle) -> Self {
        let resolver = FontResolver::new(style.font_file.clone(), style.font_dirs.clone());
        let fonts = resolver.resolve(style.title_size, style.subtitle_size);
        Self::with_fonts(assets_dir, style, fonts)
    }

    pub fn with_fonts(assets_dir: &Path, style: ImageStyle, fonts: ResolvedFonts) -> Self {
        Self {
            assets_dir: assets_dir.to_path_buf(),
            style,
            fonts,
        }
    }

    pub fn font_tier(&self) -> &FontTier {
        &self.fonts.tier
    }

    pub fn asset_path(&self, spec: &ImageSpec) -> PathBuf {
        self.assets_dir.join(spec.file_name)
    }

    /// Create the asset directory if needed and render every spec in order
    pub fn generate(&self, specs: &[ImageSpec]) -> Result<Vec<GeneratedAsset>> {
        utils::ensure_directory_exists(&self.assets_dir)?;
        info!(
            "Rendering {} images into {:?} with {} font",
            specs.len(),
            self.assets_dir,
            self.fonts.tier
        );

        specs
            .iter()
            .map(|spec| {
                let path = self.asset_path(spec);
                info!("Rendering image {:?}", path);
                let background = Some(spec.background);
                make_image(&path, spec.title, spec.subtitle, background, &self.style, &self.fonts)
            })
            .collect()
    }
}
