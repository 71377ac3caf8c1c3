//! Bases IUPAC, alphabets acceptés et séquences nettoyées

use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes IUPAC pour les nucléotides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IupacBase {
    A,  // Adénine
    C,  // Cytosine
    G,  // Guanine
    T,  // Thymine
    R,  // A ou G (purine)
    Y,  // C ou T (pyrimidine)
    S,  // G ou C (strong)
    W,  // A ou T (weak)
    K,  // G ou T (keto)
    M,  // A ou C (amino)
    B,  // C ou G ou T
    D,  // A ou G ou T
    H,  // A ou C ou T
    V,  // A ou C ou G
    N,  // Any base
}

impl IupacBase {
    /// Convertit un symbole majuscule en base IUPAC.
    ///
    /// Les minuscules ne sont pas reconnues : la normalisation de casse
    /// appartient à la validation.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'A' => Some(IupacBase::A),
            'C' => Some(IupacBase::C),
            'G' => Some(IupacBase::G),
            'T' => Some(IupacBase::T),
            'R' => Some(IupacBase::R),
            'Y' => Some(IupacBase::Y),
            'S' => Some(IupacBase::S),
            'W' => Some(IupacBase::W),
            'K' => Some(IupacBase::K),
            'M' => Some(IupacBase::M),
            'B' => Some(IupacBase::B),
            'D' => Some(IupacBase::D),
            'H' => Some(IupacBase::H),
            'V' => Some(IupacBase::V),
            'N' => Some(IupacBase::N),
            _ => None,
        }
    }

    /// Convertit une base en caractère
    pub fn as_char(self) -> char {
        match self {
            IupacBase::A => 'A',
            IupacBase::C => 'C',
            IupacBase::G => 'G',
            IupacBase::T => 'T',
            IupacBase::R => 'R',
            IupacBase::Y => 'Y',
            IupacBase::S => 'S',
            IupacBase::W => 'W',
            IupacBase::K => 'K',
            IupacBase::M => 'M',
            IupacBase::B => 'B',
            IupacBase::D => 'D',
            IupacBase::H => 'H',
            IupacBase::V => 'V',
            IupacBase::N => 'N',
        }
    }

    /// Vérifie si c'est une base standard (non ambiguë)
    pub fn is_standard(self) -> bool {
        matches!(self, IupacBase::A | IupacBase::C | IupacBase::G | IupacBase::T)
    }

    /// Base complémentaire (brin opposé)
    pub fn complement(self) -> Self {
        match self {
            IupacBase::A => IupacBase::T,
            IupacBase::T => IupacBase::A,
            IupacBase::G => IupacBase::C,
            IupacBase::C => IupacBase::G,
            IupacBase::R => IupacBase::Y,
            IupacBase::Y => IupacBase::R,
            IupacBase::S => IupacBase::S,
            IupacBase::W => IupacBase::W,
            IupacBase::K => IupacBase::M,
            IupacBase::M => IupacBase::K,
            IupacBase::B => IupacBase::V,
            IupacBase::V => IupacBase::B,
            IupacBase::D => IupacBase::H,
            IupacBase::H => IupacBase::D,
            IupacBase::N => IupacBase::N,
        }
    }
}

impl fmt::Display for IupacBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Alphabet accepté à la validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// {A, T, G, C}
    #[default]
    Strict,
    /// Codes IUPAC complets, chiffres ignorés (numérotation FASTA/GenBank)
    Iupac,
}

impl Alphabet {
    pub fn from_allow_ambiguous(allow_ambiguous: bool) -> Self {
        if allow_ambiguous {
            Alphabet::Iupac
        } else {
            Alphabet::Strict
        }
    }

    pub fn accepts(self, c: char) -> bool {
        match IupacBase::from_symbol(c) {
            Some(base) => self == Alphabet::Iupac || base.is_standard(),
            None => false,
        }
    }

    /// Caractères supprimés avant la vérification
    pub fn strips(self, c: char) -> bool {
        c.is_whitespace() || (self == Alphabet::Iupac && c.is_ascii_digit())
    }
}

/// Séquence validée : majuscules, sans espaces, non vide.
///
/// Ne se construit que via [`crate::analyzer::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CleanSequence(String);

impl CleanSequence {
    pub(crate) fn new_unchecked(sequence: String) -> Self {
        Self(sequence)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for CleanSequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iupac_base_conversion() {
        assert_eq!(IupacBase::from_symbol('A'), Some(IupacBase::A));
        assert_eq!(IupacBase::from_symbol('a'), None);
        assert_eq!(IupacBase::from_symbol('X'), None);
        assert_eq!(IupacBase::N.to_string(), "N");
    }

    #[test]
    fn test_complement_pairs() {
        assert_eq!(IupacBase::K.complement(), IupacBase::M);
        assert_eq!(IupacBase::B.complement(), IupacBase::V);
        assert_eq!(IupacBase::D.complement(), IupacBase::H);
        assert_eq!(IupacBase::S.complement(), IupacBase::S);
        assert_eq!(IupacBase::W.complement(), IupacBase::W);
    }

    #[test]
    fn test_alphabet_acceptance() {
        assert!(Alphabet::Strict.accepts('G'));
        assert!(!Alphabet::Strict.accepts('N'));
        assert!(Alphabet::Iupac.accepts('N'));
        assert!(!Alphabet::Iupac.accepts('X'));
        assert!(!Alphabet::Strict.strips('7'));
        assert!(Alphabet::Iupac.strips('7'));
        assert!(Alphabet::Strict.strips('\t'));
    }
}
