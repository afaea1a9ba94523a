//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery delle immagini.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file immagine candidati in una directory
//! - Lettura della dimensione su disco dei file
//! - Utilità per calcoli di riduzione e formattazione delle dimensioni
//!
//! ## Selezione dei candidati:
//! Un file è candidato quando la sua estensione (case-insensitive) ha un
//! codec registrato: `.png`, `.jpg`, `.jpeg`. Tutto il resto viene ignorato
//! durante la scansione.
//!
//! ## Directory mancanti:
//! Una directory inesistente non è un errore: la scansione produce
//! semplicemente zero candidati e la corsa termina con successo.
//!
//! ## Esempio:
//! ```no_run
//! use asset_image_optimizer::file_manager::FileManager;
//! use std::path::Path;
//!
//! let files = FileManager::find_image_files(Path::new("assets/images")).unwrap();
//! println!("found {} candidate images", files.len());
//! ```

use crate::codec;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// Get the on-disk size of a file in bytes
    pub async fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path).await?;
        Ok(metadata.len())
    }

    /// Find all candidate image files under a directory, recursively.
    ///
    /// Walk errors are skipped, so a missing or unreadable directory yields
    /// an empty list rather than a failure.
    pub fn find_image_files(image_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(image_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            if Self::is_candidate(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Check if a file has a rewritable image extension
    pub fn is_candidate(path: &Path) -> bool {
        codec::codec_for(path).is_some()
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}
