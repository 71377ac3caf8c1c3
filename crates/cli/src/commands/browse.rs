//! Consultation de la base : liste, fiche, recherche, filtre

use crate::display::{self, visualizer};
use crate::ReportArgs;
use adnseq_core::{find_orfs, reverse_complement, SequenceRecord};
use adnseq_storage::{RangeFilter, SequenceStore};
use anyhow::{bail, Result};

fn print_records(records: &[SequenceRecord], json: bool) -> Result<()> {
    if json {
        return display::print_json(records);
    }
    visualizer::display_records(records);
    Ok(())
}

pub async fn list<S>(store: &mut S, json: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    let records = store.list_all().await?;
    print_records(&records, json)
}

/// Fiche d'une séquence, avec ORF et complément inverse sur demande
pub async fn show<S>(store: &mut S, id: i64, report: ReportArgs, json: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    let Some(record) = store.get(id).await? else {
        bail!("Séquence {id} introuvable");
    };

    let orfs = report.orfs.then(|| find_orfs(&record.sequence, report.min_orf_length));
    let revcomp = report.revcomp.then(|| reverse_complement(&record.sequence));

    if json {
        return display::print_json(&serde_json::json!({
            "record": record,
            "composition": record.composition(),
            "orfs": orfs,
            "reverse_complement": revcomp,
        }));
    }

    visualizer::display_record(&record);
    if let Some(orfs) = &orfs {
        visualizer::display_orfs(orfs, report.min_orf_length);
    }
    if let Some(revcomp) = &revcomp {
        visualizer::display_reverse_complement(revcomp);
    }
    Ok(())
}

pub async fn search<S>(store: &mut S, pattern: &str, json: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    if pattern.trim().is_empty() {
        bail!("Motif de recherche vide");
    }
    let records = store.find_by_substring(pattern).await?;
    print_records(&records, json)
}

pub async fn filter<S>(store: &mut S, filter: &RangeFilter, json: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    if filter.min_length > filter.max_length || filter.min_gc > filter.max_gc {
        bail!("Bornes de filtrage incohérentes: minimum supérieur au maximum");
    }
    let records = store.find_by_range(filter).await?;
    print_records(&records, json)
}
