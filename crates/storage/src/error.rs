//! Gestion des erreurs pour le module de stockage

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Erreur de base de données: {0}")]
    DatabaseError(String),

    #[error("Erreur de configuration: {0}")]
    ConfigError(String),

    #[error("Champ obligatoire manquant: {0}")]
    MissingField(&'static str),

    #[error("Erreur de connexion: {0}")]
    ConnectionError(String),

    #[error("Jeton de confirmation inconnu ou déjà utilisé")]
    InvalidToken,

    #[error("Jeton de confirmation expiré")]
    TokenExpired,

    #[error("Erreur d'export: {0}")]
    ExportError(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::DatabaseError(err.to_string())
    }
}

impl From<csv::Error> for StorageError {
    fn from(err: csv::Error) -> Self {
        StorageError::ExportError(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::ExportError(err.to_string())
    }
}
