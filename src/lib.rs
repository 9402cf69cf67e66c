// ABOUTME: Library module for the docdeck program.
// ABOUTME: Contains DOCX inspection, placeholder image rendering and PPTX generation.

pub mod assets;
pub mod config;
pub mod content;
pub mod docx;
pub mod errors;
pub mod fonts;
pub mod opc;
pub mod outline;
pub mod pipeline;
pub mod pptx;
pub mod units;
pub mod utils;

// Reexport common types and functions
pub use assets::{AssetGenerator, GeneratedAsset, make_image};
pub use config::{Config, DeckStyle, ImageStyle};
pub use content::{IMAGES, ImageSpec, SLIDES, SlideSpec};
pub use docx::{DocumentSummary, LineSpacing, docx_summary, render_check_block};
pub use errors::{DeckError, Result};
pub use fonts::{FontResolver, FontTier};
pub use outline::{SlideOutline, read_outline};
pub use pipeline::{RunReport, inspect_documents, run};
pub use pptx::{Deck, assemble_deck, generate_pptx};
