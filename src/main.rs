// ABOUTME: Main entry point for the docdeck program.
// ABOUTME: Runs the full pipeline by default, or one stage via a subcommand.

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the DOCX formatting check block only
    CheckDocx,

    /// Print the slide outline of a generated PPTX
    Outline {
        /// Path to the PPTX file
        pptx: PathBuf,
    },
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = docdeck::Config::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        None => {
            docdeck::run(&config, &mut out)?;
        }
        Some(Commands::CheckDocx) => {
            let summaries = docdeck::inspect_documents(&config)?;
            out.write_all(docdeck::render_check_block(&summaries).as_bytes())?;
        }
        Some(Commands::Outline { pptx }) => {
            for (i, slide) in docdeck::read_outline(pptx)?.iter().enumerate() {
                write!(out, "{}. {}", i + 1, slide)?;
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
