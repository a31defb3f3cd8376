//! dhv-deck: turns the DHV A-Schein question PDFs into a flashcard deck.
//!
//! `dhv-deck questions.pdf pictures.pdf pictures/ deck.tsv`
//!
//! Pass `-` for both picture arguments to build a deck without images.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use deck_core::options::{DeckOptions, ImagePolicy, PicturesSource};
use deck_core::pipeline::PipelineBuilder;
use deck_input_pdf::{PdfImageReader, PdfQuestionReader};
use deck_output_tsv::TsvDeckWriter;

/// Stands for "no pictures" in the picture arguments.
const SKIP: &str = "-";

#[derive(Parser)]
#[command(
    name = "dhv-deck",
    version,
    about = "Convert the DHV exam question PDFs into a flashcard deck"
)]
struct Cli {
    /// Question bank PDF
    #[arg(required_unless_present = "dump_config")]
    questions_pdf: Option<PathBuf>,

    /// Picture appendix PDF, or "-" to skip pictures
    #[arg(required_unless_present = "dump_config")]
    pictures_pdf: Option<PathBuf>,

    /// Output directory for pictures (cleared first), or "-" to skip pictures
    #[arg(required_unless_present = "dump_config")]
    pictures_dir: Option<PathBuf>,

    /// Output TSV file
    #[arg(required_unless_present = "dump_config")]
    output_tsv: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Keep PNG/JPEG/GIF images as extracted instead of converting all to PNG
    #[arg(long)]
    keep_images_as_is: bool,

    /// JPEG quality for transcoded images (1-100)
    #[arg(long)]
    jpeg_quality: Option<u8>,

    /// Dump effective merged config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Load config from global and project-local TOML files.
/// The project-local file replaces the global one. Missing files are ignored.
fn load_config() -> DeckOptions {
    let mut opts = DeckOptions::default();

    // 1. Global config: ~/.config/dhv-deck/config.toml
    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("dhv-deck").join("config.toml");
        if let Some(parsed) = read_config(&global_path) {
            opts = parsed;
        }
    }

    // 2. Project-local config: ./.dhv-deck.toml
    if let Some(parsed) = read_config(Path::new(".dhv-deck.toml")) {
        opts = parsed;
    }

    opts
}

fn read_config(path: &Path) -> Option<DeckOptions> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<DeckOptions>(&contents) {
        Ok(parsed) => {
            log::debug!("Loaded config from {}", path.display());
            Some(parsed)
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides when the CLI flag was explicitly provided.
fn apply_cli_overrides(opts: &mut DeckOptions, cli: &Cli) {
    let matches = Cli::command().get_matches_from(std::env::args_os());

    if matches.value_source("verbose") == Some(clap::parser::ValueSource::CommandLine) {
        opts.verbose = cli.verbose;
    }

    if cli.keep_images_as_is {
        opts.image_policy = ImagePolicy::Preserve;
    }

    if let Some(quality) = cli.jpeg_quality {
        opts.jpeg_quality = quality;
    }
}

/// Interpret the two picture arguments; both must be "-" or neither.
fn pictures_source(pdf: &Path, dir: &Path) -> Result<Option<PicturesSource>> {
    match (pdf.as_os_str() == SKIP, dir.as_os_str() == SKIP) {
        (true, true) => Ok(None),
        (false, false) => Ok(Some(PicturesSource {
            pdf: pdf.to_path_buf(),
            output_dir: dir.to_path_buf(),
        })),
        _ => anyhow::bail!(
            "Pictures PDF and pictures directory must both be \"-\" or both be given"
        ),
    }
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn main() {
    let cli = Cli::parse();

    let mut opts = load_config();
    apply_cli_overrides(&mut opts, &cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(opts.verbose)))
        .init();

    // Handle --dump-config
    if cli.dump_config {
        match toml::to_string_pretty(&opts) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = run(&cli, opts) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli, mut options: DeckOptions) -> Result<()> {
    let (Some(questions), Some(pictures_pdf), Some(pictures_dir), Some(output)) = (
        cli.questions_pdf.as_deref(),
        cli.pictures_pdf.as_deref(),
        cli.pictures_dir.as_deref(),
        cli.output_tsv.as_deref(),
    ) else {
        anyhow::bail!("Usage: dhv-deck <questions.pdf> <pictures.pdf|-> <pictures-dir|-> <output.tsv>");
    };

    options.pictures = pictures_source(pictures_pdf, pictures_dir)?;

    if !questions.is_file() {
        anyhow::bail!("Question PDF not found: {}", questions.display());
    }
    if let Some(ref source) = options.pictures {
        if !source.pdf.is_file() {
            anyhow::bail!("Pictures PDF not found: {}", source.pdf.display());
        }
    }

    log::info!(
        "Converting {} → {}",
        questions.display(),
        output.display()
    );

    let pipeline = PipelineBuilder::new()
        .questions(Box::new(PdfQuestionReader))
        .images(Box::new(PdfImageReader))
        .writer(Box::new(TsvDeckWriter))
        .progress_reporter(Box::new(|frac, msg| {
            if frac < 1.0 {
                log::info!("[{:3.0}%] {}", frac * 100.0, msg);
            } else {
                log::info!("Done!");
            }
        }))
        .build()
        .context("Failed to build pipeline")?;

    pipeline
        .run(questions, output, &options)
        .with_context(|| format!("Converting {}", questions.display()))?;

    Ok(())
}
