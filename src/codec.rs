//! # Image Codec Module
//!
//! Questo modulo definisce l'interfaccia di capacità verso i formati
//! immagine supportati: decodifica, ricodifica e dispatch per estensione.
//!
//! ## Responsabilità:
//! - Trait `ImageCodec` con le operazioni per-formato (decode/encode)
//! - Implementazioni concrete per JPEG e PNG
//! - Dispatch dal path del file al codec giusto (`codec_for`)
//! - Controllo di capacità all'avvio (`ensure_codec_support`)
//!
//! ## Formati supportati
//!
//! | Formato | Estensioni     | Ricodifica                                |
//! |---------|----------------|-------------------------------------------|
//! | JPEG    | `.jpg` `.jpeg` | Lossy, qualità configurabile (default 80) |
//! | PNG     | `.png`         | Lossless, compressione massima            |
//!
//! Il parametro qualità è significativo solo per gli encoder JPEG; per i
//! PNG viene ignorato, coerentemente con la semantica tipica degli encoder.
//!
//! ## Dipendenze:
//! Il supporto ai formati è una dipendenza dichiarata a build-time (crate
//! `image` con le feature `jpeg` e `png`), non installata a runtime.
//! `ensure_codec_support()` fallisce subito con un messaggio chiaro se un
//! coder/decoder richiesto non è compilato nel binario.

use crate::error::OptimizeError;
use anyhow::Result;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ImageEncoder, ImageFormat};
use std::path::Path;

/// Capability interface for one supported image format.
///
/// Implementations only differ in how they re-encode; decoding goes through
/// the format's registered decoder in all cases.
pub trait ImageCodec: Send + Sync {
    /// The format this codec reads and writes.
    fn format(&self) -> ImageFormat;

    /// Decode a full image from raw file bytes.
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, OptimizeError> {
        image::load_from_memory_with_format(bytes, self.format()).map_err(OptimizeError::Decode)
    }

    /// Re-encode an image, applying lossy parameters where the format
    /// supports them.
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>, OptimizeError>;
}

/// Quality-controlled lossy JPEG re-encoding.
pub struct JpegCodec;

impl ImageCodec for JpegCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Jpeg
    }

    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>, OptimizeError> {
        let mut buffer = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

        // JPEG carries no alpha channel: grayscale sources stay grayscale,
        // anything else is flattened to RGB8 before encoding.
        let encoded = if image.color().has_color() {
            encoder.encode_image(&image.to_rgb8())
        } else {
            encoder.encode_image(&image.to_luma8())
        };
        encoded.map_err(OptimizeError::Encode)?;

        Ok(buffer)
    }
}

/// Lossless PNG re-encoding at maximum compression.
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn format(&self) -> ImageFormat {
        ImageFormat::Png
    }

    fn encode(&self, image: &DynamicImage, _quality: u8) -> Result<Vec<u8>, OptimizeError> {
        let mut buffer = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive);

        encoder
            .write_image(image.as_bytes(), image.width(), image.height(), image.color())
            .map_err(OptimizeError::Encode)?;

        Ok(buffer)
    }
}

static JPEG_CODEC: JpegCodec = JpegCodec;
static PNG_CODEC: PngCodec = PngCodec;

/// Select the codec for a file from its lowercased extension.
///
/// Returns `None` for anything that is not a `.png`/`.jpg`/`.jpeg` file, so
/// candidate filtering and encode dispatch can never disagree.
pub fn codec_for(path: &Path) -> Option<&'static dyn ImageCodec> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(&JPEG_CODEC),
        "png" => Some(&PNG_CODEC),
        _ => None,
    }
}

/// Verify that the coders/decoders for every rewritten format are compiled
/// into this binary.
///
/// Called once at startup so a missing capability surfaces as one clear
/// error instead of a failure on every file.
pub fn ensure_codec_support() -> Result<()> {
    let mut missing = Vec::new();

    for format in [ImageFormat::Jpeg, ImageFormat::Png] {
        if !format.can_read() || !format.can_write() {
            missing.push(format!("{:?}", format));
        }
    }

    if !missing.is_empty() {
        return Err(anyhow::anyhow!(
            "Image codec support missing for: {}. Rebuild with the matching `image` crate features enabled.",
            missing.join(", ")
        ));
    }

    Ok(())
}
