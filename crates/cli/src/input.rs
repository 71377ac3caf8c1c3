//! Lecture du texte brut à analyser

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;

/// Argument en ligne de commande, sinon fichier, sinon entrée standard
pub fn read_sequence(sequence: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(sequence) = sequence {
        return Ok(sequence);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Lecture impossible: {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Lecture de l'entrée standard")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_argument_wins() {
        let raw = read_sequence(Some("ACGT".into()), Some(PathBuf::from("/nonexistent"))).unwrap();
        assert_eq!(raw, "ACGT");
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "acgt\nacgt").unwrap();

        let raw = read_sequence(None, Some(file.path().to_path_buf())).unwrap();
        assert_eq!(raw, "acgt\nacgt\n");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_sequence(None, Some(PathBuf::from("/nonexistent/seq.txt"))).is_err());
    }
}
