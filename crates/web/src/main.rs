//! ADN Seq Web Server
//!
//! Formulaire de saisie, consultation de la base et API JSON

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod routes;

use config::AppConfig;
use models::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Charger la configuration
    let config = match AppConfig::load_from_file("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Erreur de chargement de la configuration: {}. Utilisation des valeurs par défaut.", e);
            AppConfig::default()
        }
    };

    init_logging(&config.logging);

    let database = adnseq_storage::Database::initialize(&(&config.database).into())
        .await
        .map_err(|e| std::io::Error::other(format!("Base de données indisponible: {e}")))?;

    let templates = format!("{}/**/*.html", config.server.templates.display());
    let tera = tera::Tera::new(&templates)
        .map_err(|e| std::io::Error::other(format!("Erreur d'initialisation de Tera: {e}")))?;

    let app_state = web::Data::new(AppState::new(tera, config.clone(), database.clone()));

    tracing::info!(
        "🧬 Démarrage du serveur ADN Seq sur http://{}:{}",
        config.server.host,
        config.server.port
    );

    let static_files = config.server.static_files.clone();
    let result = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(app_state.clone())
            .configure(routes::configure)
            .service(Files::new("/static", &static_files))
    })
    .workers(config.server.workers)
    .bind((config.server.host.clone(), config.server.port))?
    .run()
    .await;

    database.close().await;
    result
}

/// Niveau par défaut lu dans la configuration ; valeur inconnue → info
fn default_level(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// `RUST_LOG` prime sur le niveau de la configuration
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level(level)))
}

/// Initialise le système de logging
fn init_logging(config: &config::LoggingConfig) {
    let filter = env_filter(&config.level);

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_normalization() {
        assert_eq!(default_level("DEBUG"), "debug");
        assert_eq!(default_level("Warn"), "warn");
        assert_eq!(default_level("verbeux"), "info");
    }

    #[test]
    fn test_env_filter_falls_back_to_config() {
        if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            return;
        }
        assert_eq!(env_filter("error").to_string(), "error");
    }
}
