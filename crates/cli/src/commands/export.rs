//! Commande d'export CSV

use adnseq_core::{log_operation, SequenceRecord};
use adnseq_storage::{export_file_name, write_csv, SequenceStore};
use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Écrit les enregistrements en CSV dans `path`
pub fn write_export(path: &Path, records: &[SequenceRecord]) -> Result<usize> {
    log_operation!("export_csv", {
        let file = File::create(path)
            .with_context(|| format!("Création impossible: {}", path.display()))?;
        Ok(write_csv(records, BufWriter::new(file))?)
    })
}

pub async fn run<S>(store: &mut S, output: Option<PathBuf>) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    let output = output.unwrap_or_else(|| PathBuf::from(export_file_name(Local::now())));
    let records = store.list_all().await?;

    let written = write_export(&output, &records)?;

    println!(
        "{} {} séquence(s) exportée(s) vers {}",
        style("✓").green(),
        written,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use adnseq_core::SequenceAnalyzer;
    use adnseq_storage::{submit, Database, DatabaseConfig, CSV_HEADER};

    #[tokio::test]
    async fn test_export_writes_header_and_rows() {
        let db = Database::initialize(&DatabaseConfig::in_memory()).await.unwrap();
        let mut session = db.session().await.unwrap();
        submit(&mut session, &SequenceAnalyzer::default(), "gene", None, "ACGT")
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        run(&mut session, Some(path.clone())).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert!(lines.next().unwrap().contains(",gene,ACGT,4,"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("out.csv");

        let err = write_export(&path, &[]).unwrap_err();
        assert!(err.to_string().contains("Création impossible"));
    }

    #[test]
    fn test_export_empty_base_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vide.csv");

        assert_eq!(write_export(&path, &[]).unwrap(), 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
