//! # Asset Image Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio dell'optimizer
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, max-width, size-threshold, quality)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Crea un oggetto Config con tutti i parametri
//! 4. Istanzia ImageOptimizer e avvia il processo
//!
//! Una directory inesistente produce una scansione vuota, non un errore:
//! l'eseguibile termina comunque con exit code 0.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! image-optimizer assets/images --max-width 1600 --quality 85 --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use asset_image_optimizer::{Config, ImageOptimizer};

#[derive(Parser)]
#[command(name = "image-optimizer")]
#[command(about = "Resize oversized images in place for web delivery")]
struct Args {
    /// Directory to scan for images (defaults to frontend/src/assets/images)
    directory: Option<PathBuf>,

    /// Maximum width in pixels; wider images are resized down to this
    #[arg(short, long, default_value = "1600")]
    max_width: u32,

    /// Size threshold in bytes; heavier files are re-encoded
    #[arg(short, long, default_value = "1048576")]
    size_threshold: u64,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "80")]
    quality: u8,

    /// Dry run - report what would change without rewriting files
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let image_dir = match args.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?
            .join("frontend")
            .join("src")
            .join("assets")
            .join("images"),
    };

    let config = Config {
        max_width: args.max_width,
        size_threshold_bytes: args.size_threshold,
        jpeg_quality: args.quality,
        dry_run: args.dry_run,
    };

    let optimizer = ImageOptimizer::new(config)?;
    optimizer.run(&image_dir).await?;

    Ok(())
}
