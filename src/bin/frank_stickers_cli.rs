//! Frank Stickers CLI
//!
//! Commands: generate, gallery, downloads, catalog, validate
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 when a catalog fails validation

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use frank_stickers::{
    catalog::StickerSpec,
    config::{DownloadLink, ProjectConfig},
    downloads::build_downloads,
    gallery::build_gallery,
    Catalog, NoopExporter, StickerPipeline,
};

#[derive(Parser)]
#[command(name = "frank-stickers")]
#[command(about = "Frank sticker pack - SVG/PNG generator and embedded HTML pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON project config; flags below override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate SVG documents, PNG bitmaps, cover icons and manifest
    Generate {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Catalog JSON replacing the built-in pack
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// PNG edge length in pixels
        #[arg(short, long)]
        size: Option<u32>,

        /// Write SVG documents only
        #[arg(long)]
        no_raster: bool,
    },

    /// Build the self-contained gallery page
    Gallery {
        /// Directory of PNG files
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output HTML file
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },

    /// Build the download links page
    Downloads {
        /// File to embed, as PATH=LABEL (repeatable)
        #[arg(short, long = "link", value_parser = parse_link)]
        links: Vec<DownloadLink>,

        /// Output HTML file
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },

    /// Print the catalog as JSON
    Catalog {
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Validate a catalog file
    Validate {
        /// Catalog JSON file
        catalog: PathBuf,
    },
}

fn parse_link(raw: &str) -> Result<DownloadLink, String> {
    let (path, label) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=LABEL, got '{}'", raw))?;
    if path.is_empty() {
        return Err("link path is empty".to_string());
    }
    Ok(DownloadLink {
        path: PathBuf::from(path),
        label: label.to_string(),
    })
}

fn fail(error: impl std::fmt::Display) -> ExitCode {
    let output = serde_json::json!({
        "success": false,
        "error": error.to_string(),
    });
    println!("{}", output);
    ExitCode::FAILURE
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, frank_stickers::CatalogError> {
    match path {
        Some(p) => Catalog::load_from_file(p),
        None => Ok(Catalog::builtin()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", e);
    }

    let project = match &cli.config {
        Some(path) => match ProjectConfig::load_from_file(path) {
            Ok(c) => c,
            Err(e) => return fail(e),
        },
        None => ProjectConfig::default(),
    };

    match cli.command {
        Commands::Generate { output_dir, catalog, size, no_raster } => {
            let catalog = match load_catalog(catalog.as_ref().or(project.catalog.as_ref())) {
                Ok(c) => c,
                Err(e) => return fail(e),
            };

            let mut build = project.build;
            if let Some(dir) = output_dir {
                build.output_dir = dir;
            }
            if let Some(size) = size {
                build.raster_size = size;
            }

            let pipeline = if no_raster {
                StickerPipeline::new(catalog, build, Box::new(NoopExporter))
            } else {
                StickerPipeline::with_detected_exporter(catalog, build)
            };

            match pipeline.run() {
                Ok(report) => {
                    let output = serde_json::json!({
                        "success": true,
                        "report": report,
                    });
                    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e),
            }
        }

        Commands::Gallery { source, dest } => {
            let mut gallery = project.gallery;
            if let Some(source) = source {
                gallery.source_dir = source;
            }
            if let Some(dest) = dest {
                gallery.destination = dest;
            }

            match build_gallery(&gallery) {
                Ok(report) => {
                    let output = serde_json::json!({
                        "success": true,
                        "destination": report.destination,
                        "cards": report.cards,
                    });
                    println!("{}", output);
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e),
            }
        }

        Commands::Downloads { links, dest } => {
            let mut downloads = project.downloads;
            if !links.is_empty() {
                downloads.links = links;
            }
            if let Some(dest) = dest {
                downloads.destination = dest;
            }

            match build_downloads(&downloads) {
                Ok(report) => {
                    let output = serde_json::json!({
                        "success": true,
                        "destination": report.destination,
                        "links": report.links,
                    });
                    println!("{}", output);
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e),
            }
        }

        Commands::Catalog { catalog } => {
            match load_catalog(catalog.as_ref().or(project.catalog.as_ref())) {
                Ok(c) => {
                    println!("{}", serde_json::to_string_pretty(&c).unwrap_or_default());
                    ExitCode::SUCCESS
                }
                Err(e) => fail(e),
            }
        }

        Commands::Validate { catalog } => {
            let specs: Vec<StickerSpec> = match std::fs::read_to_string(&catalog)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
            {
                Ok(s) => s,
                Err(e) => {
                    println!(r#"{{"valid": false, "error": {}}}"#, serde_json::Value::String(e));
                    return ExitCode::FAILURE;
                }
            };

            let result = Catalog::check(&specs);
            println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
            if result.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Validation failure
            }
        }
    }
}
