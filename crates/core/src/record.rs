//! Enregistrements de séquences persistés

use crate::analyzer::{Analysis, SequenceMetrics};
use crate::sequence::CleanSequence;
use chrono::Local;
use serde::{Deserialize, Serialize};

/// Format de `date_added`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Horodatage local au format de stockage
pub fn timestamp_now() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Enregistrement prêt à être inséré.
///
/// Construit uniquement à partir d'une [`Analysis`], ce qui garantit que
/// `length` et les comptages correspondent à la séquence stockée.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSequence {
    name: String,
    sequence: CleanSequence,
    metrics: SequenceMetrics,
    date_added: String,
    description: Option<String>,
}

impl NewSequence {
    pub fn new(name: impl Into<String>, description: Option<String>, analysis: &Analysis) -> Self {
        Self::with_date(name, description, analysis, timestamp_now())
    }

    pub fn with_date(
        name: impl Into<String>,
        description: Option<String>,
        analysis: &Analysis,
        date_added: String,
    ) -> Self {
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Self {
            name: name.into().trim().to_string(),
            sequence: analysis.sequence().clone(),
            metrics: analysis.metrics().clone(),
            date_added,
            description,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &CleanSequence {
        &self.sequence
    }

    pub fn metrics(&self) -> &SequenceMetrics {
        &self.metrics
    }

    pub fn date_added(&self) -> &str {
        &self.date_added
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Ligne de la table `dna_sequences`.
///
/// L'ordre des champs est celui des colonnes, repris tel quel en en-tête
/// de l'export CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: i64,
    pub name: String,
    pub sequence: String,
    pub length: i64,
    pub gc_content: f64,
    pub a_count: i64,
    pub t_count: i64,
    pub g_count: i64,
    pub c_count: i64,
    pub at_content: Option<f64>,
    pub melting_temp: Option<f64>,
    pub ambiguous_count: Option<i64>,
    pub date_added: String,
    pub description: Option<String>,
}

/// Composition en pourcentage sur A+T+G+C
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaseComposition {
    pub a: f64,
    pub t: f64,
    pub g: f64,
    pub c: f64,
}

impl SequenceRecord {
    /// Part de chaque base canonique ; zéro partout si aucune base canonique
    pub fn composition(&self) -> BaseComposition {
        let total = (self.a_count + self.t_count + self.g_count + self.c_count) as f64;
        let share = |n: i64| if total > 0.0 { n as f64 * 100.0 / total } else { 0.0 };

        BaseComposition {
            a: share(self.a_count),
            t: share(self.t_count),
            g: share(self.g_count),
            c: share(self.c_count),
        }
    }

    /// Extrait tronqué pour l'affichage en tableau
    pub fn preview(&self, max: usize) -> String {
        if self.sequence.chars().count() <= max {
            self.sequence.clone()
        } else {
            let head: String = self.sequence.chars().take(max).collect();
            format!("{head}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::SequenceAnalyzer;

    fn record(id: i64, sequence: &str) -> SequenceRecord {
        let m = crate::analyzer::analyze(sequence);
        SequenceRecord {
            id,
            name: format!("seq{id}"),
            sequence: sequence.to_string(),
            length: m.length as i64,
            gc_content: m.gc_content,
            a_count: m.a_count as i64,
            t_count: m.t_count as i64,
            g_count: m.g_count as i64,
            c_count: m.c_count as i64,
            at_content: Some(m.at_content),
            melting_temp: Some(m.melting_temp),
            ambiguous_count: Some(m.ambiguous_count as i64),
            date_added: "2024-01-01 00:00:00".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_new_sequence_trims_fields() {
        let analysis = SequenceAnalyzer::default().run("acgt").unwrap();
        let new = NewSequence::new("  Gene_BRCA1 ", Some("   ".to_string()), &analysis);

        assert_eq!(new.name(), "Gene_BRCA1");
        assert_eq!(new.description(), None);
        assert_eq!(new.sequence().as_str(), "ACGT");
        assert_eq!(new.metrics().length, 4);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_composition() {
        let r = record(1, "AAGC");
        let comp = r.composition();
        assert_eq!(comp.a, 50.0);
        assert_eq!(comp.g, 25.0);
        assert_eq!(comp.t, 0.0);

        let empty = record(2, "NNN").composition();
        assert_eq!(empty.a + empty.t + empty.g + empty.c, 0.0);
    }

    #[test]
    fn test_preview() {
        let r = record(1, "ACGTACGT");
        assert_eq!(r.preview(4), "ACGT...");
        assert_eq!(r.preview(8), "ACGTACGT");
    }
}
