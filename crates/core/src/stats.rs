//! Statistiques sur l'ensemble des séquences stockées

use crate::record::{BaseComposition, SequenceRecord};
use serde::Serialize;

/// Vue d'ensemble de la base
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub count: usize,
    pub mean_length: f64,
    pub mean_gc: f64,
    pub max_length: i64,
    pub total_bases: i64,
}

impl CollectionSummary {
    pub fn from_records(records: &[SequenceRecord]) -> Self {
        let count = records.len();
        let total_bases: i64 = records.iter().map(|r| r.length).sum();
        let max_length = records.iter().map(|r| r.length).max().unwrap_or(0);

        let (mean_length, mean_gc) = if count == 0 {
            (0.0, 0.0)
        } else {
            let gc_sum: f64 = records.iter().map(|r| r.gc_content).sum();
            (total_bases as f64 / count as f64, gc_sum / count as f64)
        };

        Self {
            count,
            mean_length,
            mean_gc,
            max_length,
            total_bases,
        }
    }
}

/// Résumé d'une colonne numérique (count, mean, std, min, quartiles, max)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Écart-type d'échantillon (n - 1) ; NaN pour une seule valeur
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

/// `None` si aucune valeur. Quantiles par interpolation linéaire.
pub fn describe(values: &[f64]) -> Option<Describe> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let var = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    } else {
        f64::NAN
    };

    Some(Describe {
        count: n,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        q50: quantile(&sorted, 0.50),
        q75: quantile(&sorted, 0.75),
        max: sorted[n - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Colonnes résumées par [`describe_records`]
pub const DESCRIBED_COLUMNS: [&str; 4] = ["length", "gc_content", "at_content", "melting_temp"];

/// Une ligne par colonne de [`DESCRIBED_COLUMNS`] ; les valeurs absentes
/// (colonnes optionnelles) sont ignorées.
pub fn describe_records(records: &[SequenceRecord]) -> Vec<(&'static str, Option<Describe>)> {
    let length: Vec<f64> = records.iter().map(|r| r.length as f64).collect();
    let gc: Vec<f64> = records.iter().map(|r| r.gc_content).collect();
    let at: Vec<f64> = records.iter().filter_map(|r| r.at_content).collect();
    let tm: Vec<f64> = records.iter().filter_map(|r| r.melting_temp).collect();

    DESCRIBED_COLUMNS
        .into_iter()
        .zip([length, gc, at, tm])
        .map(|(name, values)| (name, describe(&values)))
        .collect()
}

/// Intervalle d'histogramme GC, [lower, upper)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Histogramme du GC sur [0, 100], dernier intervalle fermé à droite
pub fn gc_histogram(records: &[SequenceRecord], bins: usize) -> Vec<HistogramBin> {
    let bins = bins.max(1);
    let width = 100.0 / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for gc in records.iter().map(|r| r.gc_content.clamp(0.0, 100.0)) {
        let idx = ((gc / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}

/// Composition cumulée de toute la base ; `None` si aucune base canonique
pub fn pooled_composition(records: &[SequenceRecord]) -> Option<BaseComposition> {
    let (a, t, g, c) = records.iter().fold((0, 0, 0, 0), |(a, t, g, c), r| {
        (a + r.a_count, t + r.t_count, g + r.g_count, c + r.c_count)
    });
    let total = (a + t + g + c) as f64;
    if total == 0.0 {
        return None;
    }

    let share = |n: i64| n as f64 * 100.0 / total;
    Some(BaseComposition {
        a: share(a),
        t: share(t),
        g: share(g),
        c: share(c),
    })
}

/// Ligne de comparaison entre deux enregistrements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub property: &'static str,
    pub left: String,
    pub right: String,
}

pub fn compare(left: &SequenceRecord, right: &SequenceRecord) -> Vec<ComparisonRow> {
    let opt = |v: Option<f64>| v.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".to_string());

    vec![
        ComparisonRow {
            property: "Longueur (pb)",
            left: left.length.to_string(),
            right: right.length.to_string(),
        },
        ComparisonRow {
            property: "Contenu GC (%)",
            left: format!("{:.1}", left.gc_content),
            right: format!("{:.1}", right.gc_content),
        },
        ComparisonRow {
            property: "Contenu AT (%)",
            left: opt(left.at_content),
            right: opt(right.at_content),
        },
        ComparisonRow {
            property: "Tm (°C)",
            left: opt(left.melting_temp),
            right: opt(right.melting_temp),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, length: i64, gc: f64) -> SequenceRecord {
        SequenceRecord {
            id,
            name: format!("seq{id}"),
            sequence: "A".repeat(length as usize),
            length,
            gc_content: gc,
            a_count: 0,
            t_count: 0,
            g_count: 0,
            c_count: 0,
            at_content: Some(100.0 - gc),
            melting_temp: None,
            ambiguous_count: Some(0),
            date_added: "2024-01-01 00:00:00".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_summary() {
        let records = vec![record(1, 10, 40.0), record(2, 30, 60.0)];
        let summary = CollectionSummary::from_records(&records);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_bases, 40);
        assert_eq!(summary.max_length, 30);
        assert_eq!(summary.mean_length, 20.0);
        assert_eq!(summary.mean_gc, 50.0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = CollectionSummary::from_records(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean_length, 0.0);
        assert_eq!(summary.max_length, 0);
    }

    #[test]
    fn test_describe_quartiles() {
        let d = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(d.count, 4);
        assert_eq!(d.mean, 2.5);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.q25, 1.75);
        assert_eq!(d.q50, 2.5);
        assert_eq!(d.q75, 3.25);
        assert_eq!(d.max, 4.0);
        assert!((d.std - 1.2909944).abs() < 1e-6);
    }

    #[test]
    fn test_describe_edge_cases() {
        assert!(describe(&[]).is_none());
        let single = describe(&[5.0]).unwrap();
        assert!(single.std.is_nan());
        assert_eq!(single.q75, 5.0);
    }

    #[test]
    fn test_describe_records_skips_missing_values() {
        let rows = describe_records(&[record(1, 10, 40.0)]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, "length");
        assert!(rows[3].1.is_none());
    }

    #[test]
    fn test_gc_histogram() {
        let records = vec![record(1, 5, 0.0), record(2, 5, 52.0), record(3, 5, 100.0)];
        let hist = gc_histogram(&records, 20);

        assert_eq!(hist.len(), 20);
        assert_eq!(hist[0].count, 1);
        assert_eq!(hist[10].count, 1);
        assert_eq!(hist[19].count, 1);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_compare_rows() {
        let rows = compare(&record(1, 10, 40.0), &record(2, 12, 55.5));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].left, "10");
        assert_eq!(rows[1].right, "55.5");
        assert_eq!(rows[3].left, "-");
    }

    #[test]
    fn test_pooled_composition() {
        let mut first = record(1, 4, 50.0);
        (first.a_count, first.t_count, first.g_count, first.c_count) = (1, 1, 1, 1);
        let mut second = record(2, 4, 100.0);
        (second.g_count, second.c_count) = (2, 2);

        let comp = pooled_composition(&[first, second]).unwrap();
        assert!((comp.a - 12.5).abs() < 1e-9);
        assert!((comp.g - 37.5).abs() < 1e-9);
        assert!((comp.a + comp.t + comp.g + comp.c - 100.0).abs() < 1e-9);

        assert!(pooled_composition(&[record(3, 4, 0.0)]).is_none());
    }
}
