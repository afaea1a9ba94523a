//! # Asset Image Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per le operazioni per-file
//! - `codec`: Decodifica/ricodifica JPEG e PNG, dispatch per estensione
//! - `file_manager`: Operazioni sui file e discovery dei candidati
//! - `image_processor`: Pipeline per-file (probe, resize, riscrittura)
//! - `optimizer`: Orchestratore principale del processo
//! - `progress`: Progress tracking e report della corsa
//!
//! ## Utilizzo:
//! ```no_run
//! use asset_image_optimizer::{Config, ImageOptimizer};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let optimizer = ImageOptimizer::new(Config::default())?;
//!     let report = optimizer.run(Path::new("assets/images")).await?;
//!     println!("{}", report.format_summary());
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod optimizer;
pub mod progress;

pub use config::Config;
pub use error::OptimizeError;
pub use image_processor::{ImageProcessor, ResizedImage};
pub use optimizer::ImageOptimizer;
pub use progress::{FileFailure, RunReport};
