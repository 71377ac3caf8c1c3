//! Import FASTA : chaque enregistrement passe par la même chaîne que `add`

use crate::create_progress_bar;
use adnseq_core::{log_operation, AnalyzerConfig, SequenceAnalyzer};
use adnseq_storage::{submit, SequenceStore};
use anyhow::{Context, Result};
use bio::io::fasta;
use console::style;
use std::fs::File;
use std::path::Path;
use tracing::warn;

/// Bilan d'un import
#[derive(Debug, Default)]
pub struct ImportReport {
    pub stored: Vec<i64>,
    /// (identifiant FASTA, motif du rejet)
    pub rejected: Vec<(String, String)>,
}

/// Lit tous les enregistrements d'un fichier FASTA
pub fn read_fasta(path: &Path) -> Result<Vec<fasta::Record>> {
    log_operation!("read_fasta", {
        let file = File::open(path)
            .with_context(|| format!("Ouverture impossible: {}", path.display()))?;
        fasta::Reader::new(file)
            .records()
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("FASTA invalide: {}", path.display()))
    })
}

/// Soumet chaque enregistrement ; l'identifiant FASTA sert de nom
pub async fn import_records<S>(
    store: &mut S,
    analyzer: &SequenceAnalyzer,
    records: &[fasta::Record],
) -> Result<ImportReport>
where
    S: SequenceStore + ?Sized,
{
    let pb = create_progress_bar(records.len() as u64, "Import des séquences...")?;
    let mut report = ImportReport::default();

    for record in records {
        let raw = String::from_utf8_lossy(record.seq());
        let description = record.desc().map(str::to_string);

        match submit(store, analyzer, record.id(), description, &raw).await {
            Ok(submission) => match submission.stored {
                Ok(id) => report.stored.push(id),
                Err(e) => report.rejected.push((record.id().to_string(), e.to_string())),
            },
            Err(e) => {
                warn!("Enregistrement '{}' rejeté: {}", record.id(), e);
                report.rejected.push((record.id().to_string(), e.to_string()));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("{} séquences importées", report.stored.len()));
    Ok(report)
}

pub async fn run<S>(store: &mut S, input: &Path, iupac: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    println!("🧬 Import de: {}", input.display());

    let records = read_fasta(input)?;
    let analyzer = SequenceAnalyzer::new(AnalyzerConfig {
        allow_ambiguous: iupac,
        ..AnalyzerConfig::default()
    });
    let report = import_records(store, &analyzer, &records).await?;

    println!(
        "{} {} séquence(s) enregistrée(s) sur {}",
        style("✓").green(),
        report.stored.len(),
        records.len()
    );
    for (id, reason) in &report.rejected {
        println!("   {} {}: {}", style("✗").red(), id, reason);
    }
    Ok(())
}
