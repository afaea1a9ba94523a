//! # Main Optimizer Orchestrator Module
//!
//! Questo è il modulo principale che orchestra tutto il processo di ottimizzazione.
//!
//! ## Responsabilità:
//! - Coordinamento degli altri moduli
//! - Orchestrazione del flusso: discovery → processing → report
//! - Verifica del supporto codec prima dell'avvio
//! - Report finale con statistiche aggregate
//!
//! ## Flusso di esecuzione:
//! 1. **Inizializzazione**: Validazione config
//! 2. **Capability check**: Verifica codec JPEG/PNG compilati nel binario
//! 3. **File discovery**: Trova i candidati nella directory (ricorsivo)
//! 4. **Sequential processing**: Un file alla volta, in ordine di discovery
//! 5. **Progress tracking**: Aggiorna la progress bar per ogni file
//! 6. **Reporting**: Riepilogo con conteggi e byte risparmiati
//!
//! ## Error handling:
//! - Gli errori sui singoli file non bloccano la corsa
//! - Ogni fallimento finisce nel `RunReport` con path e motivo
//! - La corsa termina con successo anche quando alcuni file falliscono
//!
//! ## Dry run mode:
//! - Simula tutte le operazioni senza modificare file
//! - Il report riflette cosa verrebbe riscritto

use crate::{
    codec,
    config::Config,
    file_manager::FileManager,
    image_processor::ImageProcessor,
    progress::{ProgressManager, RunReport},
};
use anyhow::Result;
use std::path::Path;
use tracing::{error, info};

/// Main image optimizer orchestrator
pub struct ImageOptimizer {
    config: Config,
}

impl ImageOptimizer {
    /// Create a new optimizer instance with a validated configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the optimization process over a directory tree.
    ///
    /// Files are processed strictly one at a time, in discovery order.
    /// Per-file failures are recorded in the returned report and never abort
    /// the run.
    pub async fn run(&self, image_dir: &Path) -> Result<RunReport> {
        info!("Scanning {}...", image_dir.display());
        info!(
            "🎯 Triggers: width > {} px or size > {}",
            self.config.max_width,
            FileManager::format_size(self.config.size_threshold_bytes)
        );
        info!(
            "🎯 Target: {} px wide, Lanczos resampling (JPEG quality: {})",
            self.config.max_width, self.config.jpeg_quality
        );
        if self.config.dry_run {
            info!("🧪 Dry run mode: No files will be modified");
        }

        codec::ensure_codec_support()?;

        let files = FileManager::find_image_files(image_dir)?;
        info!("Found {} candidate images", files.len());

        let mut report = RunReport::new();
        if files.is_empty() {
            return Ok(report);
        }

        let progress = ProgressManager::new(files.len() as u64);
        let processor = ImageProcessor::new(self.config.clone());

        for file_path in files {
            let file_name = file_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();

            match processor.process(&file_path).await {
                Ok(Some(resized)) => {
                    info!("Resized: {}", file_name);
                    progress.update(&format!(
                        "✅ {}: {:.1}% saved",
                        file_name, resized.reduction_percent
                    ));
                    report.add_resized(resized.original_size, resized.optimized_size);
                }
                Ok(None) => {
                    progress.update(&format!("⏩ {}: below thresholds", file_name));
                    let size = FileManager::file_size(&file_path).await.unwrap_or(0);
                    report.add_skipped(size);
                }
                Err(e) => {
                    error!("Error processing {}: {}", file_name, e);
                    progress.update(&format!("❌ {}: error", file_name));
                    report.add_failure(file_path.clone(), e.to_string());
                }
            }
        }

        progress.finish(&report.format_summary());
        self.print_final_stats(&report);

        Ok(report)
    }

    fn print_final_stats(&self, report: &RunReport) {
        info!("=== Optimization Complete ===");
        info!("Files examined: {}", report.files_examined);
        info!("Files resized: {}", report.files_resized);
        info!("Files skipped: {}", report.files_skipped);
        info!("Errors: {}", report.error_count());
        info!(
            "Bytes saved: {}",
            FileManager::format_size(report.total_bytes_saved)
        );
        info!("Average reduction: {:.2}%", report.overall_reduction_percent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_image(path: &PathBuf, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, image::Rgb([90, 120, 200]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = Config {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(ImageOptimizer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_run_resizes_whole_tree() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        let wide = dir.path().join("a.png");
        let nested = dir.path().join("sub").join("b.jpg");
        write_image(&wide, 2000, 1000);
        write_image(&nested, 800, 600);

        let config = Config {
            size_threshold_bytes: 1,
            ..Default::default()
        };
        let report = ImageOptimizer::new(config)
            .unwrap()
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.files_examined, 2);
        assert_eq!(report.files_resized, 2);
        assert_eq!(report.error_count(), 0);
        assert_eq!(image::image_dimensions(&wide).unwrap(), (1600, 800));
        assert_eq!(image::image_dimensions(&nested).unwrap(), (1600, 1200));
    }

    #[tokio::test]
    async fn test_run_continues_after_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.png");
        let broken = dir.path().join("broken.jpg");
        let last = dir.path().join("c.png");
        write_image(&first, 2000, 1000);
        std::fs::write(&broken, b"not an image").unwrap();
        write_image(&last, 1800, 900);

        let report = ImageOptimizer::new(Config::default())
            .unwrap()
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.files_examined, 3);
        assert_eq!(report.files_resized, 2);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.failures[0].path, broken);
        assert_eq!(std::fs::read(&broken).unwrap(), b"not an image");
        assert_eq!(image::image_dimensions(&first).unwrap(), (1600, 800));
        assert_eq!(image::image_dimensions(&last).unwrap(), (1600, 800));
    }

    #[tokio::test]
    async fn test_second_run_skips_width_triggered_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        write_image(&path, 2400, 1200);

        let optimizer = ImageOptimizer::new(Config::default()).unwrap();

        let first = optimizer.run(dir.path()).await.unwrap();
        assert_eq!(first.files_resized, 1);
        let after_first = std::fs::read(&path).unwrap();

        let second = optimizer.run(dir.path()).await.unwrap();
        assert_eq!(second.files_examined, 1);
        assert_eq!(second.files_resized, 0);
        assert_eq!(second.files_skipped, 1);
        assert_eq!(std::fs::read(&path).unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_size_trigger_rewrites_on_every_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.png");
        write_image(&path, 300, 200);

        let config = Config {
            size_threshold_bytes: 1,
            ..Default::default()
        };
        let optimizer = ImageOptimizer::new(config).unwrap();

        let first = optimizer.run(dir.path()).await.unwrap();
        assert_eq!(first.files_resized, 1);
        assert_eq!(image::image_dimensions(&path).unwrap(), (1600, 1066));

        // Every byte on disk stays above the threshold, so the file is
        // selected and rewritten again.
        let second = optimizer.run(dir.path()).await.unwrap();
        assert_eq!(second.files_resized, 1);
        assert_eq!(image::image_dimensions(&path).unwrap(), (1600, 1066));
    }

    #[tokio::test]
    async fn test_empty_directory_reports_zeros() {
        let dir = TempDir::new().unwrap();

        let report = ImageOptimizer::new(Config::default())
            .unwrap()
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.files_examined, 0);
        assert_eq!(report.files_resized, 0);
        assert_eq!(report.error_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does_not_exist");

        let report = ImageOptimizer::new(Config::default())
            .unwrap()
            .run(&missing)
            .await
            .unwrap();

        assert_eq!(report.files_examined, 0);
    }

    #[tokio::test]
    async fn test_uppercase_extension_is_processed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IMAGE.PNG");
        write_image(&path, 2000, 1000);

        let report = ImageOptimizer::new(Config::default())
            .unwrap()
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.files_resized, 1);
        assert_eq!(image::image_dimensions(&path).unwrap(), (1600, 800));
    }

    #[tokio::test]
    async fn test_non_candidates_are_ignored() {
        let dir = TempDir::new().unwrap();
        let notes = dir.path().join("notes.txt");
        let anim = dir.path().join("anim.gif");
        std::fs::write(&notes, b"plain text").unwrap();
        std::fs::write(&anim, b"GIF89a").unwrap();

        let report = ImageOptimizer::new(Config::default())
            .unwrap()
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.files_examined, 0);
        assert_eq!(std::fs::read(&notes).unwrap(), b"plain text");
        assert_eq!(std::fs::read(&anim).unwrap(), b"GIF89a");
    }
}
