//! Routes de l'API web

use actix_web::{delete, get, post, web, HttpResponse};
use adnseq_core::{reverse_complement, SequenceAnalyzer, ANALYZER_VERSION};
use adnseq_storage::{execute, submit_to_database, DestructiveAction, RangeFilter, SequenceStore};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::WebError;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, AppState, ConfirmationOutcome, CreateSequenceRequest,
    CreateSequenceResponse, SearchQuery,
};

pub mod pages;

type ApiResult = Result<HttpResponse, WebError>;

/// Enregistre toutes les routes (pages, API, fichiers statiques exclus)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::index)
        .service(pages::create_sequence)
        .service(pages::list_sequences)
        .service(pages::search)
        .service(pages::stats)
        .service(pages::export_csv)
        .service(pages::request_clear)
        .service(pages::request_delete)
        .service(pages::confirm)
        .service(api_analyze)
        .service(api_create_sequence)
        .service(api_list_sequences)
        .service(api_get_sequence)
        .service(api_search)
        .service(api_filter)
        .service(api_request_confirmation)
        .service(api_confirm)
        .service(api_cancel_confirmation)
        .service(health_check);
}

pub(crate) fn parse_token(raw: &str) -> Result<Uuid, WebError> {
    Uuid::parse_str(raw.trim()).map_err(|_| WebError::BadRequest(format!("jeton mal formé: {raw}")))
}

/// Consomme le jeton puis applique l'action ; le verrou n'est pas gardé
/// pendant l'accès à la base
pub(crate) async fn confirm_and_execute(data: &AppState, token: Uuid) -> Result<ConfirmationOutcome, WebError> {
    let action = data.gate.lock().await.confirm(token)?;

    let mut session = data.database.session().await?;
    let removed = execute(&mut session, action).await?;
    Ok(ConfirmationOutcome { action, removed })
}

/// Analyse sans enregistrement
#[post("/api/analyze")]
#[instrument(skip(data, req))]
pub async fn api_analyze(data: web::Data<AppState>, req: web::Json<AnalyzeRequest>) -> ApiResult {
    let config = data
        .config
        .analyzer
        .for_request(req.allow_ambiguous, req.min_orf_length);
    let analyzer = SequenceAnalyzer::new(config);
    let analysis = analyzer.run(&req.sequence)?;

    let sequence = analysis.sequence();
    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        sequence: sequence.to_string(),
        metrics: analysis.metrics().clone(),
        orfs: req.find_orfs.then(|| analyzer.find_orfs(sequence)),
        reverse_complement: req.reverse_complement.then(|| reverse_complement(sequence.as_str())),
    }))
}

/// Analyse et enregistre une séquence
#[post("/api/sequences")]
#[instrument(skip(data, req), fields(name = %req.name))]
pub async fn api_create_sequence(
    data: web::Data<AppState>,
    req: web::Json<CreateSequenceRequest>,
) -> ApiResult {
    let req = req.into_inner();
    if req.name.trim().is_empty() {
        return Err(WebError::BadRequest("le nom est obligatoire".to_string()));
    }

    let analyzer = SequenceAnalyzer::new(data.config.analyzer.for_request(req.allow_ambiguous, None));
    let submission =
        submit_to_database(&data.database, &analyzer, &req.name, req.description, &req.sequence).await?;

    let body = CreateSequenceResponse {
        id: submission.id(),
        stored: submission.stored.is_ok(),
        notice: submission.stored.as_ref().err().map(|e| e.to_string()),
        sequence: submission.analysis.sequence().to_string(),
        metrics: submission.analysis.metrics().clone(),
    };

    match submission.stored {
        Ok(id) => {
            info!("Séquence créée: {}", id);
            Ok(HttpResponse::Created().json(body))
        }
        Err(e) => {
            warn!("Analyse rendue sans enregistrement: {}", e);
            Ok(HttpResponse::Ok().json(body))
        }
    }
}

#[get("/api/sequences")]
pub async fn api_list_sequences(data: web::Data<AppState>) -> ApiResult {
    let mut session = data.database.session().await?;
    Ok(HttpResponse::Ok().json(session.list_all().await?))
}

#[get("/api/sequences/{id}")]
pub async fn api_get_sequence(data: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    let id = id.into_inner();
    let mut session = data.database.session().await?;
    match session.get(id).await? {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(WebError::NotFound(id)),
    }
}

#[get("/api/search")]
pub async fn api_search(data: web::Data<AppState>, query: web::Query<SearchQuery>) -> ApiResult {
    if query.pattern.trim().is_empty() {
        return Err(WebError::BadRequest("motif de recherche vide".to_string()));
    }
    let mut session = data.database.session().await?;
    Ok(HttpResponse::Ok().json(session.find_by_substring(&query.pattern).await?))
}

/// Filtre par bornes inclusives ; bornes absentes = valeurs par défaut
#[get("/api/filter")]
pub async fn api_filter(data: web::Data<AppState>, filter: web::Query<RangeFilter>) -> ApiResult {
    let filter = filter.into_inner();
    if filter.min_length > filter.max_length || filter.min_gc > filter.max_gc {
        return Err(WebError::BadRequest("minimum supérieur au maximum".to_string()));
    }
    let mut session = data.database.session().await?;
    Ok(HttpResponse::Ok().json(session.find_by_range(&filter).await?))
}

/// Première étape d'une suppression : émet un jeton
#[post("/api/confirmations")]
#[instrument(skip(data))]
pub async fn api_request_confirmation(
    data: web::Data<AppState>,
    action: web::Json<DestructiveAction>,
) -> ApiResult {
    let issued = data.gate.lock().await.request(action.into_inner());
    Ok(HttpResponse::Accepted().json(issued))
}

/// Seconde étape : consomme le jeton et exécute
#[post("/api/confirmations/{token}")]
#[instrument(skip(data))]
pub async fn api_confirm(data: web::Data<AppState>, token: web::Path<String>) -> ApiResult {
    let token = parse_token(&token)?;
    let outcome = confirm_and_execute(&data, token).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[delete("/api/confirmations/{token}")]
pub async fn api_cancel_confirmation(data: web::Data<AppState>, token: web::Path<String>) -> ApiResult {
    let token = parse_token(&token)?;
    if data.gate.lock().await.cancel(token) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(adnseq_storage::StorageError::InvalidToken.into())
    }
}

/// Route pour la santé de l'API
#[get("/health")]
pub async fn health_check(data: web::Data<AppState>) -> HttpResponse {
    let database = match data.database.health_check().await {
        Ok(()) => "ok".to_string(),
        Err(e) => {
            warn!("Base indisponible: {}", e);
            e.to_string()
        }
    };
    let healthy = database == "ok";

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "database": database,
        "analyzer_version": ANALYZER_VERSION,
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION")
    });
    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
