//! Pages HTML rendues avec Tera

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse};
use adnseq_core::stats::{compare, describe_records, gc_histogram, pooled_composition};
use adnseq_core::{longest_orf, reverse_complement, CollectionSummary, SequenceAnalyzer};
use adnseq_storage::{export_file_name, submit_to_database, to_csv_string, DestructiveAction, RangeFilter, SequenceStore};
use chrono::Local;
use serde_json::json;
use tracing::{info, instrument};

use super::{confirm_and_execute, parse_token, ApiResult};
use crate::error::WebError;
use crate::models::{AppState, CompareQuery, ConfirmForm, SearchPageQuery, SequenceForm};

/// Nombre d'intervalles de l'histogramme GC
const GC_BINS: usize = 20;

fn render(data: &AppState, template: &str, ctx: &tera::Context, status: StatusCode) -> ApiResult {
    let body = data.tera.render(template, ctx)?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

fn base_context(data: &AppState, title: &str) -> tera::Context {
    let mut ctx = tera::Context::new();
    ctx.insert("title", title);
    ctx.insert("version", env!("CARGO_PKG_VERSION"));
    ctx.insert("allow_ambiguous", &data.config.analyzer.allow_ambiguous);
    ctx.insert("min_orf_length", &data.config.analyzer.min_orf_length);
    ctx
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Page d'accueil : formulaire de saisie
#[get("/")]
pub async fn index(data: web::Data<AppState>) -> ApiResult {
    let ctx = base_context(&data, "Analyse de séquences ADN");
    render(&data, "index.html", &ctx, StatusCode::OK)
}

/// Soumission du formulaire : valide, analyse, enregistre, affiche
#[post("/sequences")]
#[instrument(skip(data, form), fields(name = %form.name))]
pub async fn create_sequence(data: web::Data<AppState>, form: web::Form<SequenceForm>) -> ApiResult {
    let form = form.into_inner();
    let config = data
        .config
        .analyzer
        .for_request(Some(form.allow_ambiguous.is_some()), None);
    let analyzer = SequenceAnalyzer::new(config);

    let form_error = |message: String| {
        let mut ctx = base_context(&data, "Analyse de séquences ADN");
        ctx.insert("error", &message);
        ctx.insert("form", &json!({
            "name": form.name,
            "description": form.description,
            "sequence": form.sequence,
        }));
        ctx.insert("allow_ambiguous", &config.allow_ambiguous);
        render(&data, "index.html", &ctx, StatusCode::BAD_REQUEST)
    };

    if form.name.trim().is_empty() {
        return form_error("Veuillez entrer un nom pour la séquence".to_string());
    }

    let description = Some(form.description.clone());
    let submitted =
        submit_to_database(&data.database, &analyzer, &form.name, description, &form.sequence).await;
    let submission = match submitted {
        Ok(submission) => submission,
        Err(e) => return form_error(e.to_string()),
    };

    let analysis = &submission.analysis;
    let sequence = analysis.sequence();
    let orfs = form.find_orfs.is_some().then(|| analyzer.find_orfs(sequence));

    let mut ctx = base_context(&data, "Résultats de l'analyse");
    ctx.insert("name", form.name.trim());
    ctx.insert("sequence", sequence.as_str());
    ctx.insert("metrics", analysis.metrics());
    ctx.insert("purine_percent", &analysis.metrics().purine_percent());
    ctx.insert("pyrimidine_percent", &analysis.metrics().pyrimidine_percent());
    ctx.insert("min_orf_length", &config.min_orf_length);
    if let Some(orfs) = &orfs {
        ctx.insert("orfs", orfs);
        ctx.insert("longest_orf", &longest_orf(orfs));
    }
    if form.reverse_complement.is_some() {
        ctx.insert("reverse_complement", &reverse_complement(sequence.as_str()));
    }
    match &submission.stored {
        Ok(id) => ctx.insert("stored_id", id),
        Err(e) => ctx.insert("notice", &e.to_string()),
    }

    render(&data, "result.html", &ctx, StatusCode::OK)
}

async fn render_sequences(data: &AppState, message: Option<String>, error: Option<String>) -> ApiResult {
    let mut session = data.database.session().await?;
    let records = session.list_all().await?;

    let mut ctx = base_context(data, "Séquences enregistrées");
    ctx.insert("records", &records);
    if let Some(message) = message {
        ctx.insert("message", &message);
    }
    if let Some(error) = error {
        ctx.insert("error", &error);
    }
    render(data, "sequences.html", &ctx, StatusCode::OK)
}

#[get("/sequences")]
pub async fn list_sequences(data: web::Data<AppState>) -> ApiResult {
    render_sequences(&data, None, None).await
}

/// Recherche par motif ou par bornes de longueur et de GC
#[get("/search")]
pub async fn search(data: web::Data<AppState>, query: web::Query<SearchPageQuery>) -> ApiResult {
    let query = query.into_inner();
    let mut ctx = base_context(&data, "Recherche");
    let defaults = RangeFilter::default();
    let filter = RangeFilter {
        min_length: query.min_length.unwrap_or(defaults.min_length),
        max_length: query.max_length.unwrap_or(defaults.max_length),
        min_gc: query.min_gc.unwrap_or(defaults.min_gc),
        max_gc: query.max_gc.unwrap_or(defaults.max_gc),
    };
    ctx.insert("filter", &filter);

    let pattern = query.pattern.as_deref().map(str::trim).filter(|p| !p.is_empty());
    let mut session = data.database.session().await?;
    let results = if let Some(pattern) = pattern {
        ctx.insert("pattern", pattern);
        Some(session.find_by_substring(pattern).await?)
    } else if query.has_range() {
        if filter.min_length > filter.max_length || filter.min_gc > filter.max_gc {
            ctx.insert("error", "Bornes incohérentes: minimum supérieur au maximum");
            None
        } else {
            Some(session.find_by_range(&filter).await?)
        }
    } else {
        None
    };

    if let Some(results) = &results {
        ctx.insert("results", results);
    }
    render(&data, "search.html", &ctx, StatusCode::OK)
}

/// Statistiques de la base et comparaison de deux séquences
#[get("/stats")]
pub async fn stats(data: web::Data<AppState>, query: web::Query<CompareQuery>) -> ApiResult {
    let mut session = data.database.session().await?;
    let records = session.list_all().await?;

    let mut ctx = base_context(&data, "Statistiques");
    ctx.insert("records", &records);
    ctx.insert("summary", &CollectionSummary::from_records(&records));
    let describe: Vec<_> = describe_records(&records)
        .into_iter()
        .filter_map(|(column, d)| d.map(|stats| json!({ "column": column, "stats": stats })))
        .collect();
    ctx.insert("describe", &describe);
    ctx.insert("histogram", &gc_histogram(&records, GC_BINS));
    if let Some(composition) = pooled_composition(&records) {
        ctx.insert("composition", &composition);
    }

    if let (Some(left), Some(right)) = (query.left, query.right) {
        if left == right {
            ctx.insert("compare_error", "Choisissez deux séquences différentes");
        } else {
            let find = |id: i64| records.iter().find(|r| r.id == id);
            match (find(left), find(right)) {
                (Some(a), Some(b)) => {
                    ctx.insert("compare_names", &[&a.name, &b.name]);
                    ctx.insert("comparison", &compare(a, b));
                }
                _ => ctx.insert("compare_error", "Séquence introuvable"),
            }
        }
    }

    render(&data, "stats.html", &ctx, StatusCode::OK)
}

/// Téléchargement CSV de toute la base
#[get("/export.csv")]
pub async fn export_csv(data: web::Data<AppState>) -> ApiResult {
    let mut session = data.database.session().await?;
    let records = session.list_all().await?;
    let body = to_csv_string(&records)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export_file_name(Local::now()))],
        })
        .body(body))
}

async fn request_confirmation(data: &AppState, action: DestructiveAction) -> ApiResult {
    let issued = data.gate.lock().await.request(action);

    let mut ctx = base_context(data, "Confirmation");
    ctx.insert("action", &action.to_string());
    ctx.insert("token", &issued.token.to_string());
    ctx.insert(
        "expires_at",
        &issued.expires_at.with_timezone(&Local).format("%H:%M:%S").to_string(),
    );
    render(data, "confirm.html", &ctx, StatusCode::OK)
}

#[post("/sequences/clear")]
pub async fn request_clear(data: web::Data<AppState>) -> ApiResult {
    request_confirmation(&data, DestructiveAction::DeleteAll).await
}

#[post("/sequences/{id}/delete")]
pub async fn request_delete(data: web::Data<AppState>, id: web::Path<i64>) -> ApiResult {
    request_confirmation(&data, DestructiveAction::Delete { id: id.into_inner() }).await
}

/// Seconde étape : applique ou abandonne l'action
#[post("/confirm")]
#[instrument(skip(data, form))]
pub async fn confirm(data: web::Data<AppState>, form: web::Form<ConfirmForm>) -> ApiResult {
    let token = parse_token(&form.token)?;

    if form.decision != "confirm" {
        data.gate.lock().await.cancel(token);
        info!("Suppression annulée");
        return Ok(see_other("/sequences"));
    }

    match confirm_and_execute(&data, token).await {
        Ok(outcome) => {
            let message = format!("{} séquence(s) supprimée(s)", outcome.removed);
            render_sequences(&data, Some(message), None).await
        }
        Err(WebError::Storage(e)) => render_sequences(&data, None, Some(e.to_string())).await,
        Err(e) => Err(e),
    }
}
