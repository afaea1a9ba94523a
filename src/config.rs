//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di ottimizzazione
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento/salvataggio configurazione da/verso file JSON
//! - Fornisce valori di default identici al comportamento storico del tool
//!
//! ## Parametri di configurazione:
//! - `max_width`: Larghezza in pixel imposta a ogni file ricodificato
//!   (default: 1600)
//! - `size_threshold_bytes`: Soglia in byte oltre la quale un file viene
//!   ricodificato anche se abbastanza stretto (default: 1 MiB)
//! - `jpeg_quality`: Qualità JPEG (1-100, default: 80; ignorata dai PNG)
//! - `dry_run`: Simulazione senza sovrascrivere file (default: false)
//!
//! ## Validazione:
//! - Controlla che jpeg_quality sia 1-100
//! - Controlla che max_width sia > 0
//! - Controlla che size_threshold_bytes sia > 0

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a single optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pixel width imposed on every qualifying file's output
    pub max_width: u32,
    /// Byte size above which a file qualifies even when narrow enough
    pub size_threshold_bytes: u64,
    /// JPEG quality (1-100); a no-op for PNG re-encoding
    pub jpeg_quality: u8,
    /// Dry run - don't actually overwrite files
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_width: 1600,
            size_threshold_bytes: 1024 * 1024,
            jpeg_quality: 80,
            dry_run: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(anyhow::anyhow!("JPEG quality must be between 1 and 100"));
        }

        if self.max_width == 0 {
            return Err(anyhow::anyhow!("Max width must be greater than 0"));
        }

        if self.size_threshold_bytes == 0 {
            return Err(anyhow::anyhow!("Size threshold must be greater than 0"));
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.jpeg_quality = 0;
        assert!(config.validate().is_err());
        config.jpeg_quality = 101;
        assert!(config.validate().is_err());

        config.jpeg_quality = 80;
        config.max_width = 0;
        assert!(config.validate().is_err());

        config.max_width = 1600;
        config.size_threshold_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_width, 1600);
        assert_eq!(config.size_threshold_bytes, 1_048_576);
        assert_eq!(config.jpeg_quality, 80);
        assert!(!config.dry_run);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            max_width: 1280,
            size_threshold_bytes: 512 * 1024,
            jpeg_quality: 85,
            dry_run: true,
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert_eq!(loaded_config.max_width, 1280);
        assert_eq!(loaded_config.size_threshold_bytes, 524_288);
        assert_eq!(loaded_config.jpeg_quality, 85);
        assert!(loaded_config.dry_run);
    }

    #[tokio::test]
    async fn test_config_missing_file_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("no_such_config.json");

        let config = Config::from_file(&config_path).await.unwrap();
        assert_eq!(config.max_width, Config::default().max_width);
    }
}
