//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non leggibili, permessi, disco pieno)
//! - `Decode`: File corrotto o non decodificabile come immagine
//! - `Encode`: Ricodifica fallita durante il salvataggio
//! - `UnsupportedFormat`: Estensione non gestita da nessun codec
//!
//! ## Propagazione:
//! Tutti gli errori vengono catturati a granularità di singolo file:
//! vengono loggati con il nome del file, registrati nel `RunReport`, e il
//! processo continua con il file successivo. Nessun errore per-file
//! interrompe la run o cambia l'exit code.

/// Custom error types for image optimization
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(image::ImageError),

    #[error("Image encode error: {0}")]
    Encode(image::ImageError),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}
