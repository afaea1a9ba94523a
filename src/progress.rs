//! # Progress Tracking and Run Report Module
//!
//! Questo modulo gestisce il progress tracking e il riepilogo della corsa.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Raccolta del riepilogo strutturato della corsa (`RunReport`)
//! - Calcolo percentuali di riduzione e byte risparmiati
//!
//! ## Componenti principali:
//! - `ProgressManager`: Gestisce la progress bar principale
//! - `RunReport`: Riepilogo cumulativo restituito al chiamante
//! - `FileFailure`: Singolo fallimento per-file, con path e motivo
//!
//! ## Riepilogo tracciato:
//! - **files_examined**: Totale file candidati esaminati
//! - **files_resized**: File effettivamente ridimensionati e riscritti
//! - **files_skipped**: File sotto entrambe le soglie (lasciati intatti)
//! - **failures**: Elenco dei file falliti con il motivo
//! - **total_bytes_saved**: Byte totali risparmiati
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:02:15] [========================================] 150/150 (100%) ✅ photo.jpg: 45.2% saved
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Manages progress reporting for image optimization
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// One failed file, recorded instead of aborting the run
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Aggregated outcome of one optimization run
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub files_examined: usize,
    pub files_resized: usize,
    pub files_skipped: usize,
    pub failures: Vec<FileFailure>,
    pub total_original_size: u64,
    pub total_bytes_saved: u64,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resized(&mut self, original_size: u64, new_size: u64) {
        self.files_examined += 1;
        self.files_resized += 1;
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn add_skipped(&mut self, original_size: u64) {
        self.files_examined += 1;
        self.files_skipped += 1;
        self.total_original_size += original_size;
    }

    pub fn add_failure(&mut self, path: PathBuf, reason: String) {
        self.files_examined += 1;
        self.failures.push(FileFailure { path, reason });
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Examined: {} files | Resized: {} | Skipped: {} | Errors: {} | Total saved: {} ({:.2}%)",
            self.files_examined,
            self.files_resized,
            self.files_skipped,
            self.error_count(),
            crate::file_manager::FileManager::format_size(self.total_bytes_saved),
            self.overall_reduction_percent()
        )
    }
}
