//! Statistiques de la base et comparaison de deux séquences

use crate::display::{self, stats as view};
use adnseq_core::stats::{compare as compare_records, describe_records, gc_histogram, pooled_composition};
use adnseq_core::CollectionSummary;
use adnseq_storage::SequenceStore;
use anyhow::{bail, Result};
use serde_json::json;

/// Nombre d'intervalles de l'histogramme GC
const GC_BINS: usize = 20;

pub async fn summary<S>(store: &mut S, json: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    let records = store.list_all().await?;
    let summary = CollectionSummary::from_records(&records);
    let describe = describe_records(&records);
    let histogram = gc_histogram(&records, GC_BINS);
    let composition = pooled_composition(&records);

    if json {
        let describe: serde_json::Map<_, _> = describe
            .iter()
            .map(|(column, d)| (column.to_string(), json!(d)))
            .collect();
        return display::print_json(&json!({
            "summary": summary,
            "describe": describe,
            "gc_histogram": histogram,
            "composition": composition,
        }));
    }

    if records.is_empty() {
        println!("Aucune séquence enregistrée.");
        return Ok(());
    }

    view::display_summary(&summary);
    view::display_describe(&describe);
    view::display_histogram(&histogram);
    if let Some(composition) = &composition {
        view::display_composition(composition);
    }
    Ok(())
}

pub async fn compare<S>(store: &mut S, left: i64, right: i64, json: bool) -> Result<()>
where
    S: SequenceStore + ?Sized,
{
    if left == right {
        bail!("Choisissez deux séquences différentes");
    }

    let Some(a) = store.get(left).await? else {
        bail!("Séquence {left} introuvable");
    };
    let Some(b) = store.get(right).await? else {
        bail!("Séquence {right} introuvable");
    };

    let rows = compare_records(&a, &b);
    if json {
        return display::print_json(&json!({
            "left": { "id": a.id, "name": a.name },
            "right": { "id": b.id, "name": b.name },
            "rows": rows,
        }));
    }

    view::display_comparison(&a.name, &b.name, &rows);
    Ok(())
}
