//! Commandes d'analyse (sans et avec enregistrement)

use crate::display::{self, visualizer};
use crate::{input, ReportArgs};
use adnseq_core::{reverse_complement, Analysis, OrfMatch, SequenceAnalyzer, SequenceMetrics};
use adnseq_core::ValidationError;
use adnseq_storage::{save_to_database, Database, DatabaseConfig, Submission};
use anyhow::Result;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

/// Rapport complet d'une analyse, tel qu'écrit en JSON
#[derive(Serialize)]
struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    sequence: &'a str,
    metrics: &'a SequenceMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    orfs: Option<Vec<OrfMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reverse_complement: Option<String>,
}

impl<'a> Report<'a> {
    fn build(
        analyzer: &SequenceAnalyzer,
        analysis: &'a Analysis,
        report: ReportArgs,
        id: Option<i64>,
    ) -> Self {
        let sequence = analysis.sequence();
        Self {
            id,
            sequence: sequence.as_str(),
            metrics: analysis.metrics(),
            orfs: report.orfs.then(|| analyzer.find_orfs(sequence)),
            reverse_complement: report.revcomp.then(|| reverse_complement(sequence.as_str())),
        }
    }

    fn print(&self, title: &str, min_orf_length: usize) {
        visualizer::display_metrics(title, self.metrics);
        if let Some(orfs) = &self.orfs {
            visualizer::display_orfs(orfs, min_orf_length);
        }
        if let Some(revcomp) = &self.reverse_complement {
            visualizer::display_reverse_complement(revcomp);
        }
    }
}

/// Analyse une séquence sans l'enregistrer
pub fn run(
    sequence: Option<String>,
    file: Option<PathBuf>,
    iupac: bool,
    report: ReportArgs,
    json: bool,
) -> Result<()> {
    let raw = input::read_sequence(sequence, file)?;
    let analyzer = SequenceAnalyzer::new(report.analyzer_config(iupac));
    let analysis = analyzer.run(&raw)?;

    let out = Report::build(&analyzer, &analysis, report, None);
    if json {
        return display::print_json(&out);
    }

    println!("{} Séquence valide", style("✓").green());
    out.print("séquence", report.min_orf_length);
    Ok(())
}

/// Analyse `raw` puis ouvre la base pour l'enregistrer.
///
/// Une base injoignable donne une soumission non enregistrée, l'analyse reste.
async fn analyze_and_store(
    url: &str,
    analyzer: &SequenceAnalyzer,
    name: &str,
    description: Option<String>,
    raw: &str,
) -> Result<Submission, ValidationError> {
    let analysis = analyzer.run(raw)?;
    let config = DatabaseConfig {
        url: url.to_string(),
        max_connections: 1,
    };

    let submission = match Database::initialize(&config).await {
        Ok(db) => {
            let submission = save_to_database(&db, name, description, analysis).await;
            db.close().await;
            submission
        }
        Err(e) => Submission::unsaved(analysis, e),
    };
    Ok(submission)
}

/// Analyse puis enregistre une séquence.
///
/// Un échec d'enregistrement est signalé sans masquer l'analyse.
pub async fn add(
    url: &str,
    name: &str,
    description: Option<String>,
    raw: &str,
    iupac: bool,
    report: ReportArgs,
    json: bool,
) -> Result<()> {
    let analyzer = SequenceAnalyzer::new(report.analyzer_config(iupac));
    let submission = analyze_and_store(url, &analyzer, name, description, raw).await?;

    let out = Report::build(&analyzer, &submission.analysis, report, submission.id());
    if json {
        display::print_json(&out)?;
    } else {
        match &submission.stored {
            Ok(id) => println!(
                "{} Séquence '{}' enregistrée (id {})",
                style("✓").green(),
                name.trim(),
                id
            ),
            Err(e) => println!(
                "{} Séquence analysée mais non sauvegardée: {}",
                style("⚠").yellow(),
                e
            ),
        }
        out.print(name.trim(), report.min_orf_length);
    }

    submission.stored.map(|_| ()).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adnseq_storage::{SequenceStore, StorageError};

    #[tokio::test]
    async fn test_unreachable_database_keeps_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("absent").join("base.db");
        let analyzer = SequenceAnalyzer::default();

        let submission = analyze_and_store(url.to_str().unwrap(), &analyzer, "gene", None, "atgc")
            .await
            .unwrap();

        assert!(matches!(submission.stored, Err(StorageError::ConnectionError(_))));
        assert_eq!(submission.analysis.sequence().as_str(), "ATGC");
        assert_eq!(submission.analysis.metrics().length, 4);
        assert!((submission.analysis.metrics().gc_content - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invalid_sequence_skips_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = dir.path().join("absent").join("base.db");
        let analyzer = SequenceAnalyzer::default();

        let err = analyze_and_store(url.to_str().unwrap(), &analyzer, "gene", None, "ACGX")
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCharacters(_)));
    }

    #[tokio::test]
    async fn test_add_stores_in_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("base.db");
        let url = path.to_str().unwrap();
        let analyzer = SequenceAnalyzer::default();

        let submission = analyze_and_store(url, &analyzer, "gene", Some("essai".into()), "GGCC")
            .await
            .unwrap();
        let id = submission.id().unwrap();

        let db = Database::initialize(&DatabaseConfig {
            url: url.to_string(),
            max_connections: 1,
        })
        .await
        .unwrap();
        let record = db.session().await.unwrap().get(id).await.unwrap().unwrap();
        assert_eq!(record.sequence, "GGCC");
        db.close().await;
    }
}
