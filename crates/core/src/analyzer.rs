//! Validation et métriques descriptives des séquences ADN
//!
//! Toutes les fonctions de ce module sont pures : aucune ne touche au
//! stockage ni à l'affichage.

use crate::error::{Result, ValidationError};
use crate::orf::{find_orfs, OrfMatch, DEFAULT_MIN_ORF_LENGTH};
use crate::sequence::{Alphabet, CleanSequence, IupacBase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Version des règles d'analyse, exposée par les front-ends
pub const ANALYZER_VERSION: &str = "1.0";

/// Nettoie et valide un texte brut.
///
/// Supprime les espaces (et les chiffres en mode IUPAC), passe en
/// majuscules puis vérifie chaque symbole contre l'alphabet.
pub fn validate(raw: &str, allow_ambiguous: bool) -> Result<CleanSequence> {
    let alphabet = Alphabet::from_allow_ambiguous(allow_ambiguous);

    let cleaned: String = raw
        .chars()
        .filter(|c| !alphabet.strips(*c))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let invalid: BTreeSet<char> = cleaned.chars().filter(|c| !alphabet.accepts(*c)).collect();
    if !invalid.is_empty() {
        return Err(ValidationError::InvalidCharacters(invalid));
    }

    if cleaned.is_empty() {
        return Err(ValidationError::Empty);
    }

    Ok(CleanSequence::new_unchecked(cleaned))
}

/// Métriques descriptives d'une séquence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceMetrics {
    pub length: usize,
    pub a_count: usize,
    pub t_count: usize,
    pub g_count: usize,
    pub c_count: usize,
    /// Pourcentage G+C (0-100)
    pub gc_content: f64,
    /// Pourcentage A+T (0-100)
    pub at_content: f64,
    /// Règle de Wallace, en °C
    pub melting_temp: f64,
    pub ambiguous_count: usize,
    pub purine_count: usize,
    pub pyrimidine_count: usize,
}

impl SequenceMetrics {
    /// Pourcentage de purines (A+G) sur la longueur totale
    pub fn purine_percent(&self) -> f64 {
        percent(self.purine_count, self.length)
    }

    /// Pourcentage de pyrimidines (T+C) sur la longueur totale
    pub fn pyrimidine_percent(&self) -> f64 {
        percent(self.pyrimidine_count, self.length)
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Calcule les métriques d'une séquence déjà validée.
///
/// Une séquence vide donne des pourcentages nuls.
pub fn analyze(sequence: &str) -> SequenceMetrics {
    let mut a_count = 0;
    let mut t_count = 0;
    let mut g_count = 0;
    let mut c_count = 0;
    let mut length = 0;

    for c in sequence.chars() {
        length += 1;
        match c {
            'A' => a_count += 1,
            'T' => t_count += 1,
            'G' => g_count += 1,
            'C' => c_count += 1,
            _ => {}
        }
    }

    let gc = g_count + c_count;
    let at = a_count + t_count;

    SequenceMetrics {
        length,
        a_count,
        t_count,
        g_count,
        c_count,
        gc_content: percent(gc, length),
        at_content: percent(at, length),
        melting_temp: wallace_melting_temp(at, gc),
        ambiguous_count: length - (at + gc),
        purine_count: a_count + g_count,
        pyrimidine_count: t_count + c_count,
    }
}

/// Tm = 2 °C × (A+T) + 4 °C × (G+C).
///
/// Heuristique grossière, à peu près correcte pour des oligos courts
/// (< 14 nt) en conditions salines standard. Ce n'est pas un calcul
/// thermodynamique : ni plus proches voisins, ni sel, ni concentration.
fn wallace_melting_temp(at: usize, gc: usize) -> f64 {
    (2 * at + 4 * gc) as f64
}

/// Complément inverse.
///
/// Les symboles absents de la table IUPAC (minuscules, caractères
/// arbitraires) sont recopiés tels quels, sans erreur.
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .chars()
        .rev()
        .map(|c| match IupacBase::from_symbol(c) {
            Some(base) => base.complement().as_char(),
            None => c,
        })
        .collect()
}

/// Configuration de l'analyseur partagée par les front-ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Accepter les codes IUPAC ambigus
    pub allow_ambiguous: bool,
    /// Longueur minimale d'une ORF rapportée (en nucléotides)
    pub min_orf_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            allow_ambiguous: false,
            min_orf_length: DEFAULT_MIN_ORF_LENGTH,
        }
    }
}

/// Résultat de validation + analyse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    sequence: CleanSequence,
    metrics: SequenceMetrics,
}

impl Analysis {
    pub fn sequence(&self) -> &CleanSequence {
        &self.sequence
    }

    pub fn metrics(&self) -> &SequenceMetrics {
        &self.metrics
    }
}

/// Point d'entrée unique des front-ends
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceAnalyzer {
    config: AnalyzerConfig,
}

impl SequenceAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Valide selon le mode configuré
    pub fn validate(&self, raw: &str) -> Result<CleanSequence> {
        validate(raw, self.config.allow_ambiguous)
    }

    /// Valide puis calcule les métriques
    pub fn run(&self, raw: &str) -> Result<Analysis> {
        let sequence = self.validate(raw).inspect_err(|e| debug!("Séquence rejetée: {}", e))?;
        let metrics = analyze(sequence.as_str());
        debug!(length = metrics.length, gc = metrics.gc_content, "Séquence analysée");
        Ok(Analysis { sequence, metrics })
    }

    /// Recherche d'ORF avec la longueur minimale configurée
    pub fn find_orfs(&self, sequence: &CleanSequence) -> Vec<OrfMatch> {
        find_orfs(sequence.as_str(), self.config.min_orf_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uppercases_and_strips_whitespace() {
        assert_eq!(validate("atgc", false).unwrap().as_str(), "ATGC");
        assert_eq!(validate("AT GC\n", false).unwrap().as_str(), "ATGC");
        assert_eq!(validate("\tat\r\ngc  ", false).unwrap().as_str(), "ATGC");
    }

    #[test]
    fn test_validate_reports_offending_characters() {
        let err = validate("ATXC", false).unwrap_err();
        assert_eq!(err, ValidationError::InvalidCharacters(['X'].into_iter().collect()));

        let err = validate("ATNNxz", false).unwrap_err();
        assert_eq!(err.offending(), ['N', 'X', 'Z'].into_iter().collect());
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate("", false).unwrap_err(), ValidationError::Empty);
        assert_eq!(validate("  \n\t", true).unwrap_err(), ValidationError::Empty);
        assert_eq!(validate("123 456", true).unwrap_err(), ValidationError::Empty);
    }

    #[test]
    fn test_digits_only_stripped_in_permissive_mode() {
        assert_eq!(validate("1 atgc 5 nnry", true).unwrap().as_str(), "ATGCNNRY");

        let err = validate("1 atgc", false).unwrap_err();
        assert_eq!(err.offending(), ['1'].into_iter().collect());
    }

    #[test]
    fn test_analyze_atgc() {
        let m = analyze("ATGC");
        assert_eq!(m.length, 4);
        assert_eq!((m.a_count, m.t_count, m.g_count, m.c_count), (1, 1, 1, 1));
        assert_eq!(m.gc_content, 50.0);
        assert_eq!(m.at_content, 50.0);
        assert_eq!(m.melting_temp, 12.0);
        assert_eq!(m.ambiguous_count, 0);
        assert_eq!(m.purine_count, 2);
        assert_eq!(m.pyrimidine_count, 2);
    }

    #[test]
    fn test_analyze_empty_is_zero() {
        let m = analyze("");
        assert_eq!(m.length, 0);
        assert_eq!(m.gc_content, 0.0);
        assert_eq!(m.at_content, 0.0);
        assert_eq!(m.melting_temp, 0.0);
        assert_eq!(m.purine_percent(), 0.0);
    }

    #[test]
    fn test_ambiguous_bases_excluded_from_content() {
        let m = analyze("GCNN");
        assert_eq!(m.ambiguous_count, 2);
        assert_eq!(m.gc_content, 50.0);
        assert_eq!(m.at_content, 0.0);
        assert!(m.gc_content + m.at_content < 100.0);
        assert_eq!(m.melting_temp, 8.0);
    }

    #[test]
    fn test_purine_pyrimidine_percent() {
        let m = analyze("AAGT");
        assert_eq!(m.purine_percent(), 75.0);
        assert_eq!(m.pyrimidine_percent(), 25.0);
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ATGC"), "GCAT");
        assert_eq!(reverse_complement("AACG"), "CGTT");
        assert_eq!(reverse_complement("RYKMBVDHSWN"), "NWSDHBVKMRY");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_reverse_complement_passes_unknown_symbols_through() {
        assert_eq!(reverse_complement("AxG-"), "-CxT");
    }

    #[test]
    fn test_analyzer_run_uses_config() {
        let strict = SequenceAnalyzer::default();
        assert!(strict.run("ACGN").is_err());

        let permissive = SequenceAnalyzer::new(AnalyzerConfig {
            allow_ambiguous: true,
            ..Default::default()
        });
        let analysis = permissive.run("acgn").unwrap();
        assert_eq!(analysis.sequence().as_str(), "ACGN");
        assert_eq!(analysis.metrics().ambiguous_count, 1);
        assert_eq!(analysis.metrics().length, analysis.sequence().len());
    }
}
