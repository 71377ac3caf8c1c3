//! Configuration du serveur web
//!
//! `config.toml` (facultatif) puis variables `ADNSEQ__SECTION__CLE`.

use adnseq_core::{AnalyzerConfig, DEFAULT_MIN_ORF_LENGTH};
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration du serveur
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub static_files: PathBuf,
    pub templates: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 4,
            static_files: PathBuf::from("./static"),
            templates: PathBuf::from("./templates"),
        }
    }
}

/// Configuration de la base de données
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let defaults = adnseq_storage::DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
        }
    }
}

impl From<&DatabaseSettings> for adnseq_storage::DatabaseConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
        }
    }
}

/// Configuration du logging
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Réglages par défaut de l'analyseur
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    pub allow_ambiguous: bool,
    pub min_orf_length: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            allow_ambiguous: false,
            min_orf_length: DEFAULT_MIN_ORF_LENGTH,
        }
    }
}

impl AnalyzerSettings {
    /// Réglages d'une requête ; `allow_ambiguous` de la requête prime
    pub fn for_request(&self, allow_ambiguous: Option<bool>, min_orf_length: Option<usize>) -> AnalyzerConfig {
        AnalyzerConfig {
            allow_ambiguous: allow_ambiguous.unwrap_or(self.allow_ambiguous),
            min_orf_length: min_orf_length.unwrap_or(self.min_orf_length),
        }
    }
}

/// Configuration complète de l'application
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub analyzer: AnalyzerSettings,
}

impl AppConfig {
    /// Charge le fichier s'il existe, puis l'environnement
    pub fn load_from_file(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("ADNSEQ").separator("__"))
            .build()?
            .try_deserialize::<AppConfig>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load_from_file("/nonexistent/adnseq").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite://dna_sequences.db");
        assert_eq!(config.analyzer.min_orf_length, DEFAULT_MIN_ORF_LENGTH);
        assert_eq!(config.logging.format, "compact");
    }

    #[test]
    fn test_request_overrides() {
        let settings = AnalyzerSettings::default();
        let config = settings.for_request(Some(true), None);
        assert!(config.allow_ambiguous);
        assert_eq!(config.min_orf_length, DEFAULT_MIN_ORF_LENGTH);

        assert!(!settings.for_request(None, Some(30)).allow_ambiguous);
    }
}
