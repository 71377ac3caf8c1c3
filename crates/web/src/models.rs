//! Modèles de données pour l'API web

use adnseq_core::{OrfMatch, SequenceMetrics};
use adnseq_storage::{ConfirmationGate, Database, DestructiveAction};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::AppConfig;

/// État global de l'application
pub struct AppState {
    pub tera: tera::Tera,
    pub config: AppConfig,
    pub database: Database,
    pub gate: Mutex<ConfirmationGate>,
}

impl AppState {
    pub fn new(tera: tera::Tera, config: AppConfig, database: Database) -> Self {
        Self {
            tera,
            config,
            database,
            gate: Mutex::new(ConfirmationGate::default()),
        }
    }
}

/// Requête d'analyse sans enregistrement
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub sequence: String,
    pub allow_ambiguous: Option<bool>,
    #[serde(default)]
    pub find_orfs: bool,
    #[serde(default)]
    pub reverse_complement: bool,
    pub min_orf_length: Option<usize>,
}

/// Résultat d'une analyse
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub sequence: String,
    pub metrics: SequenceMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orfs: Option<Vec<OrfMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_complement: Option<String>,
}

/// Requête d'enregistrement
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSequenceRequest {
    pub name: String,
    pub description: Option<String>,
    pub sequence: String,
    pub allow_ambiguous: Option<bool>,
}

/// Réponse d'enregistrement.
///
/// `id` est absent et `notice` renseigné si l'analyse a réussi mais pas
/// l'insertion.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSequenceResponse {
    pub id: Option<i64>,
    pub stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub sequence: String,
    pub metrics: SequenceMetrics,
}

/// Paramètres de recherche par motif
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub pattern: String,
}

/// Formulaire d'ajout (page d'accueil)
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceForm {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sequence: String,
    /// Case à cocher : présente seulement si cochée
    pub allow_ambiguous: Option<String>,
    pub find_orfs: Option<String>,
    pub reverse_complement: Option<String>,
}

/// Recherche de la page `/search` : motif ou bornes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPageQuery {
    pub pattern: Option<String>,
    pub min_length: Option<i64>,
    pub max_length: Option<i64>,
    pub min_gc: Option<f64>,
    pub max_gc: Option<f64>,
}

impl SearchPageQuery {
    pub fn has_range(&self) -> bool {
        self.min_length.is_some()
            || self.max_length.is_some()
            || self.min_gc.is_some()
            || self.max_gc.is_some()
    }
}

/// Comparaison demandée sur la page de statistiques
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareQuery {
    pub left: Option<i64>,
    pub right: Option<i64>,
}

/// Formulaire de la page de confirmation
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmForm {
    pub token: String,
    /// `confirm` ou `cancel`
    pub decision: String,
}

/// Résultat d'une action confirmée
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationOutcome {
    pub action: DestructiveAction,
    pub removed: u64,
}

/// Réponse d'erreur standard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: String, code: u16) -> Self {
        Self {
            error,
            details: None,
            code,
        }
    }

    pub fn with_details(error: String, details: String, code: u16) -> Self {
        Self {
            error,
            details: Some(details),
            code,
        }
    }
}
