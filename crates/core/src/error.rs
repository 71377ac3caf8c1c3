//! Types d'erreurs pour l'analyse de séquences

use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("La séquence ne peut pas être vide")]
    Empty,

    #[error("La séquence contient des caractères invalides: {}", join_chars(.0))]
    InvalidCharacters(BTreeSet<char>),
}

impl ValidationError {
    /// Caractères rejetés (vide pour `Empty`)
    pub fn offending(&self) -> BTreeSet<char> {
        match self {
            ValidationError::Empty => BTreeSet::new(),
            ValidationError::InvalidCharacters(chars) => chars.clone(),
        }
    }
}

fn join_chars(chars: &BTreeSet<char>) -> String {
    chars
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_characters_message() {
        let err = ValidationError::InvalidCharacters(['Z', 'X', '1'].into_iter().collect());
        assert_eq!(
            err.to_string(),
            "La séquence contient des caractères invalides: 1, X, Z"
        );
    }

    #[test]
    fn test_offending_set() {
        assert!(ValidationError::Empty.offending().is_empty());
        let err = ValidationError::InvalidCharacters(['X'].into_iter().collect());
        assert!(err.offending().contains(&'X'));
    }
}
