//! Module de base de données SQLite pour les séquences ADN

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Table unique de l'application
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS dna_sequences (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        sequence TEXT NOT NULL,
        length INTEGER,
        gc_content REAL,
        a_count INTEGER,
        t_count INTEGER,
        g_count INTEGER,
        c_count INTEGER,
        at_content REAL,
        melting_temp REAL,
        ambiguous_count INTEGER,
        date_added TEXT,
        description TEXT
    )";

/// Configuration de la base de données
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite://chemin.db`, `sqlite::memory:` ou un simple chemin de fichier
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://dna_sequences.db".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    fn normalized_url(&self) -> String {
        if self.url.starts_with("sqlite:") {
            self.url.clone()
        } else {
            format!("sqlite://{}", self.url)
        }
    }

    fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Base de données : possède le pool, distribue des sessions
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connecte à la base et crée la table si besoin
    #[instrument(skip(config), fields(url = %config.url))]
    pub async fn initialize(config: &DatabaseConfig) -> crate::Result<Self> {
        let db = Self::connect(config).await?;
        db.create_schema().await?;
        Ok(db)
    }

    /// Connecte à la base de données
    pub async fn connect(config: &DatabaseConfig) -> crate::Result<Self> {
        info!("Connexion à la base de données SQLite...");

        let options = SqliteConnectOptions::from_str(&config.normalized_url())
            .map_err(|e| crate::StorageError::ConfigError(e.to_string()))?
            .create_if_missing(true);

        // Chaque connexion à ":memory:" ouvre une base distincte
        let max_connections = if config.is_memory() {
            1
        } else {
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| crate::StorageError::ConnectionError(e.to_string()))?;

        info!("Connexion établie avec succès");
        Ok(Self { pool })
    }

    /// Crée la table `dna_sequences` si elle n'existe pas
    pub async fn create_schema(&self) -> crate::Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        debug!("Schéma vérifié");
        Ok(())
    }

    /// Ouvre une session (une connexion du pool), rendue au pool au drop
    pub async fn session(&self) -> crate::Result<Session> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| crate::StorageError::ConnectionError(e.to_string()))?;
        Ok(Session { conn })
    }

    /// Vérifie l'état de santé de la base de données
    pub async fn health_check(&self) -> crate::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Ferme le pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Session de stockage : une connexion exclusive pour une requête ou une
/// commande
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
