// ABOUTME: Configuration module for the docdeck application
// ABOUTME: Holds the fixed input/output paths and the rendering and deck styles

use crate::{content, units};
use image::Rgb;
use std::path::{Path, PathBuf};

pub const TARGET_DOCX: &str =
    "Курсовая_Обзор_компьютерных_игр_Жамалов_Салман_Имаммединович.docx";
pub const EXAMPLE_DOCX_1: &str = "Пример/Пример ИП_1 .docx";
pub const EXAMPLE_DOCX_2: &str = "Пример/Пример ИП_2.docx";
pub const PPTX_OUTPUT: &str =
    "Презентация_Обзор_компьютерных_игр_Жамалов_Салман_Имаммединович.pptx";
pub const ASSETS_DIR: &str = "ppt_assets";

/// Paths consumed and produced by one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub target_docx: PathBuf,
    pub example_docx: [PathBuf; 2],
    pub pptx_output: PathBuf,
    pub assets_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_docx: PathBuf::from(TARGET_DOCX),
            example_docx: [PathBuf::from(EXAMPLE_DOCX_1), PathBuf::from(EXAMPLE_DOCX_2)],
            pptx_output: PathBuf::from(PPTX_OUTPUT),
            assets_dir: PathBuf::from(ASSETS_DIR),
        }
    }
}

impl Config {
    /// The default layout rebased onto `root` instead of the working directory
    pub fn with_root(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            target_docx: root.join(defaults.target_docx),
            example_docx: defaults.example_docx.map(|p| root.join(p)),
            pptx_output: root.join(defaults.pptx_output),
            assets_dir: root.join(defaults.assets_dir),
        }
    }

    /// Documents in the order their summaries are printed
    pub fn inspected_documents(&self) -> [&Path; 3] {
        [
            self.target_docx.as_path(),
            self.example_docx[0].as_path(),
            self.example_docx[1].as_path(),
        ]
    }
}

/// Placeholder image geometry, colours and font lookup
#[derive(Debug, Clone)]
pub struct ImageStyle {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub border_color: Rgb<u8>,
    pub border_inset: u32,
    pub border_width: u32,
    pub title_origin: (i32, i32),
    pub title_size: f32,
    pub title_color: Rgb<u8>,
    pub subtitle_origin: (i32, i32),
    pub subtitle_size: f32,
    pub subtitle_color: Rgb<u8>,
    /// Font file tried relative to the working directory, then in `font_dirs`
    pub font_file: String,
    pub font_dirs: Vec<PathBuf>,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            background: content::CARD_BACKGROUND,
            border_color: Rgb([255, 255, 255]),
            border_inset: 60,
            border_width: 4,
            title_origin: (110, 220),
            title_size: 64.0,
            title_color: Rgb([255, 255, 255]),
            subtitle_origin: (110, 330),
            subtitle_size: 34.0,
            subtitle_color: Rgb([225, 225, 225]),
            font_file: "arial.ttf".to_string(),
            font_dirs: default_font_dirs(),
        }
    }
}

/// The usual system font locations, searched recursively
fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        dirs.push(home.join(".fonts"));
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    dirs
}

/// Text and picture formatting applied to every slide
#[derive(Debug, Clone)]
pub struct DeckStyle {
    pub font_family: String,
    pub title_size_pt: f64,
    pub title_bold: bool,
    pub title_color: Rgb<u8>,
    pub body_size_pt: f64,
    pub body_color: Rgb<u8>,
    /// EMU offset of the picture frame (left, top)
    pub picture_offset: (i64, i64),
    /// EMU size of the picture frame (width, height)
    pub picture_size: (i64, i64),
    /// EMU slide size (width, height)
    pub slide_size: (i64, i64),
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            title_size_pt: 36.0,
            title_bold: true,
            title_color: Rgb([24, 24, 24]),
            body_size_pt: 22.0,
            body_color: Rgb([30, 30, 30]),
            picture_offset: (units::inches(7.0), units::inches(1.3)),
            picture_size: (units::inches(6.0), units::inches(3.4)),
            // 13.333in x 7.5in; a 10in 4:3 slide would crop the picture frame at 13in
            slide_size: (12_192_000, 6_858_000),
        }
    }
}
