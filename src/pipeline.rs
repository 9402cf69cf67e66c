// ABOUTME: Orchestrates a full docdeck run
// ABOUTME: Inspects the DOCX inputs, renders the image assets, then writes the deck

use crate::assets::{AssetGenerator, GeneratedAsset};
use crate::config::{Config, DeckStyle, ImageStyle};
use crate::content::{IMAGES, SLIDES};
use crate::docx::{self, DocumentSummary};
use crate::errors::Result;
use crate::fonts::FontTier;
use crate::pptx;
use log::info;
use std::io::Write;
use std::path::PathBuf;

/// What a successful run produced
#[derive(Debug)]
pub struct RunReport {
    pub summaries: Vec<DocumentSummary>,
    pub assets: Vec<GeneratedAsset>,
    pub font_tier: FontTier,
    pub slide_count: usize,
    pub pptx_path: PathBuf,
}

/// Summarise every input document; the first failure aborts the run
pub fn inspect_documents(config: &Config) -> Result<Vec<DocumentSummary>> {
    config
        .inspected_documents()
        .iter()
        .map(|path| docx::docx_summary(path))
        .collect()
}

/// Inspect, print the check block, render assets, write the deck and print
/// `PPTX_CREATED`. Nothing is printed until all three documents were read.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<RunReport> {
    run_with_styles(config, ImageStyle::default(), &DeckStyle::default(), out)
}

pub fn run_with_styles<W: Write>(
    config: &Config,
    image_style: ImageStyle,
    deck_style: &DeckStyle,
    out: &mut W,
) -> Result<RunReport> {
    let summaries = inspect_documents(config)?;
    out.write_all(docx::render_check_block(&summaries).as_bytes())?;
    out.flush()?;

    let generator = AssetGenerator::new(&config.assets_dir, image_style);
    let assets = generator.generate(&IMAGES)?;
    let font_tier = generator.font_tier().clone();

    let deck = pptx::generate_pptx(&SLIDES, &config.assets_dir, &config.pptx_output, deck_style)?;
    writeln!(out, "PPTX_CREATED: {}", config.pptx_output.display())?;
    info!("Run complete: {} slides, {} images", deck.len(), assets.len());

    Ok(RunReport {
        summaries,
        assets,
        font_tier,
        slide_count: deck.len(),
        pptx_path: config.pptx_output.clone(),
    })
}
