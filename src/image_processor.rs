//! # Image Processing Module
//!
//! Questo modulo implementa la pipeline per-file: probe, selezione,
//! ridimensionamento e riscrittura in-place.
//!
//! ## Pipeline di elaborazione
//!
//! 1. **Dispatch codec**: Estensione file (case-insensitive) verso il codec
//! 2. **Probe leggero**: Dimensione su disco + dimensioni in pixel dall'header
//! 3. **Selezione**: Larghezza > `max_width` oppure bytes > `size_threshold_bytes`
//! 4. **Decodifica completa**: Solo per i file selezionati
//! 5. **Ricampionamento**: Lanczos verso larghezza `max_width`, aspect ratio preservato
//! 6. **Ricodifica**: JPEG con qualità configurata, PNG lossless
//! 7. **Riscrittura in-place**: Il file originale viene sovrascritto (salvo dry-run)
//!
//! ## Criteri di selezione
//!
//! I due trigger sono indipendenti e basta uno dei due. Entrambi portano la
//! larghezza finale a `max_width`, quindi un file pesante ma più stretto di
//! `max_width` viene ingrandito fino a quella larghezza.
//!
//! ## Ricampionamento
//!
//! L'altezza finale è `floor(original_height * max_width / original_width)`,
//! calcolata in f64 e troncata. Il filtro è Lanczos3.

use crate::codec;
use crate::config::Config;
use crate::error::OptimizeError;
use crate::file_manager::FileManager;
use image::imageops::FilterType;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// Outcome of one rewritten file
#[derive(Debug, Clone, Serialize)]
pub struct ResizedImage {
    pub path: PathBuf,
    pub original_size: u64,
    pub optimized_size: u64,
    pub reduction_percent: f64,
    pub original_width: u32,
    pub original_height: u32,
    pub new_width: u32,
    pub new_height: u32,
}

/// Scaled height for a target width, preserving aspect ratio.
///
/// Computed in f64 and truncated, so 1601x999 at target 1600 gives 998.
pub fn scaled_height(original_width: u32, original_height: u32, new_width: u32) -> u32 {
    if original_width == 0 {
        return 0;
    }
    let ratio = new_width as f64 / original_width as f64;
    (original_height as f64 * ratio) as u32
}

/// Processes single images: probe, resize, re-encode, overwrite
pub struct ImageProcessor {
    config: Config,
}

impl ImageProcessor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Check the selection triggers against probed width and on-disk size
    fn qualifies(&self, width: u32, size_bytes: u64) -> bool {
        width > self.config.max_width || size_bytes > self.config.size_threshold_bytes
    }

    /// Process one candidate file.
    ///
    /// Returns `Ok(None)` when the file is below both thresholds and was left
    /// untouched, `Ok(Some(_))` when it was resized and rewritten in place.
    /// The probe reads only the image header, so files that are skipped are
    /// never fully decoded.
    pub async fn process(&self, path: &Path) -> Result<Option<ResizedImage>, OptimizeError> {
        let codec = codec::codec_for(path)
            .ok_or_else(|| OptimizeError::UnsupportedFormat(path.display().to_string()))?;

        let original_size = tokio::fs::metadata(path).await?.len();
        let (original_width, original_height) =
            image::image_dimensions(path).map_err(OptimizeError::Decode)?;

        if !self.qualifies(original_width, original_size) {
            debug!(
                "Below thresholds ({}x{}, {}): {}",
                original_width,
                original_height,
                FileManager::format_size(original_size),
                path.display()
            );
            return Ok(None);
        }

        let start_time = Instant::now();
        let bytes = tokio::fs::read(path).await?;
        let image = codec.decode(&bytes)?;

        // Both triggers share the same target: the result is always
        // max_width wide, even when that means scaling up.
        let new_width = self.config.max_width;
        let new_height = scaled_height(original_width, original_height, new_width);

        let resized = image.resize_exact(new_width, new_height, FilterType::Lanczos3);
        let encoded = codec.encode(&resized, self.config.jpeg_quality)?;
        let optimized_size = encoded.len() as u64;

        if !self.config.dry_run {
            tokio::fs::write(path, &encoded).await?;
        }

        debug!(
            "Resized {} from {}x{} to {}x{} in {:?}",
            path.display(),
            original_width,
            original_height,
            new_width,
            new_height,
            start_time.elapsed()
        );

        Ok(Some(ResizedImage {
            path: path.to_path_buf(),
            original_size,
            optimized_size,
            reduction_percent: FileManager::calculate_reduction(original_size, optimized_size),
            original_width,
            original_height,
            new_width,
            new_height,
        }))
    }
}
