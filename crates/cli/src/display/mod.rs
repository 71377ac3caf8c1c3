//! Rendu console

pub mod stats;
pub mod visualizer;

use serde::Serialize;

/// Écrit une valeur en JSON indenté sur la sortie standard
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
