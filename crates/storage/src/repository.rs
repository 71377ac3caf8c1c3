//! Repository pour les enregistrements de séquences ADN

use crate::database::Session;
use crate::{Result, StorageError};
use adnseq_core::{NewSequence, SequenceRecord};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::{info, instrument};

const SELECT_COLUMNS: &str = "SELECT id, name, sequence, length, gc_content, a_count, t_count, \
     g_count, c_count, at_content, melting_temp, ambiguous_count, date_added, description \
     FROM dna_sequences";

const ORDER_RECENT_FIRST: &str = "ORDER BY date_added DESC, id DESC";

/// Modèle de séquence ADN pour la base de données
#[derive(Debug, FromRow)]
pub struct DbSequence {
    pub id: i64,
    pub name: String,
    pub sequence: String,
    pub length: Option<i64>,
    pub gc_content: Option<f64>,
    pub a_count: Option<i64>,
    pub t_count: Option<i64>,
    pub g_count: Option<i64>,
    pub c_count: Option<i64>,
    pub at_content: Option<f64>,
    pub melting_temp: Option<f64>,
    pub ambiguous_count: Option<i64>,
    pub date_added: Option<String>,
    pub description: Option<String>,
}

impl From<DbSequence> for SequenceRecord {
    fn from(row: DbSequence) -> Self {
        // Les colonnes facultatives absentes (bases créées à la main) se
        // replient sur la séquence elle-même
        let length = row.length.unwrap_or(row.sequence.len() as i64);

        SequenceRecord {
            id: row.id,
            name: row.name,
            sequence: row.sequence,
            length,
            gc_content: row.gc_content.unwrap_or(0.0),
            a_count: row.a_count.unwrap_or(0),
            t_count: row.t_count.unwrap_or(0),
            g_count: row.g_count.unwrap_or(0),
            c_count: row.c_count.unwrap_or(0),
            at_content: row.at_content,
            melting_temp: row.melting_temp,
            ambiguous_count: row.ambiguous_count,
            date_added: row.date_added.unwrap_or_default(),
            description: row.description,
        }
    }
}

/// Bornes inclusives de filtrage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeFilter {
    pub min_length: i64,
    pub max_length: i64,
    pub min_gc: f64,
    pub max_gc: f64,
}

impl Default for RangeFilter {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: 10_000,
            min_gc: 0.0,
            max_gc: 100.0,
        }
    }
}

/// Opérations de stockage des séquences
#[async_trait]
pub trait SequenceStore: Send {
    /// Insère un enregistrement et retourne l'identifiant attribué
    async fn insert(&mut self, record: &NewSequence) -> Result<i64>;

    async fn get(&mut self, id: i64) -> Result<Option<SequenceRecord>>;

    /// Tous les enregistrements, les plus récents d'abord
    async fn list_all(&mut self) -> Result<Vec<SequenceRecord>>;

    /// Enregistrements dont la séquence contient `pattern`
    async fn find_by_substring(&mut self, pattern: &str) -> Result<Vec<SequenceRecord>>;

    async fn find_by_range(&mut self, filter: &RangeFilter) -> Result<Vec<SequenceRecord>>;

    /// `false` si l'identifiant n'existait pas
    async fn delete(&mut self, id: i64) -> Result<bool>;

    /// Retourne le nombre d'enregistrements supprimés
    async fn delete_all(&mut self) -> Result<u64>;

    async fn count(&mut self) -> Result<i64>;
}

/// Normalise un motif de recherche comme une séquence saisie
pub fn normalize_pattern(pattern: &str) -> String {
    pattern
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[async_trait]
impl SequenceStore for Session {
    #[instrument(skip(self, record), fields(name = record.name()))]
    async fn insert(&mut self, record: &NewSequence) -> Result<i64> {
        if record.name().trim().is_empty() {
            return Err(StorageError::MissingField("name"));
        }
        if record.sequence().is_empty() {
            return Err(StorageError::MissingField("sequence"));
        }

        let m = record.metrics();
        let result = sqlx::query(
            "INSERT INTO dna_sequences
             (name, sequence, length, gc_content, a_count, t_count, g_count, c_count,
              at_content, melting_temp, ambiguous_count, date_added, description)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.name())
        .bind(record.sequence().as_str())
        .bind(m.length as i64)
        .bind(m.gc_content)
        .bind(m.a_count as i64)
        .bind(m.t_count as i64)
        .bind(m.g_count as i64)
        .bind(m.c_count as i64)
        .bind(m.at_content)
        .bind(m.melting_temp)
        .bind(m.ambiguous_count as i64)
        .bind(record.date_added())
        .bind(record.description())
        .execute(self.conn())
        .await?;

        let id = result.last_insert_rowid();
        info!("Séquence sauvegardée avec ID: {}", id);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get(&mut self, id: i64) -> Result<Option<SequenceRecord>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = ?");
        let row = sqlx::query_as::<_, DbSequence>(&query)
            .bind(id)
            .fetch_optional(self.conn())
            .await?;
        Ok(row.map(SequenceRecord::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&mut self) -> Result<Vec<SequenceRecord>> {
        let query = format!("{SELECT_COLUMNS} {ORDER_RECENT_FIRST}");
        let rows = sqlx::query_as::<_, DbSequence>(&query)
            .fetch_all(self.conn())
            .await?;
        Ok(rows.into_iter().map(SequenceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_substring(&mut self, pattern: &str) -> Result<Vec<SequenceRecord>> {
        // instr() plutôt que LIKE : '%' et '_' restent littéraux
        let query = format!("{SELECT_COLUMNS} WHERE instr(sequence, ?) > 0 {ORDER_RECENT_FIRST}");
        let rows = sqlx::query_as::<_, DbSequence>(&query)
            .bind(normalize_pattern(pattern))
            .fetch_all(self.conn())
            .await?;
        Ok(rows.into_iter().map(SequenceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_range(&mut self, filter: &RangeFilter) -> Result<Vec<SequenceRecord>> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE length BETWEEN ? AND ? AND gc_content BETWEEN ? AND ? \
             {ORDER_RECENT_FIRST}"
        );
        let rows = sqlx::query_as::<_, DbSequence>(&query)
            .bind(filter.min_length)
            .bind(filter.max_length)
            .bind(filter.min_gc)
            .bind(filter.max_gc)
            .fetch_all(self.conn())
            .await?;
        Ok(rows.into_iter().map(SequenceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM dna_sequences WHERE id = ?")
            .bind(id)
            .execute(self.conn())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all(&mut self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM dna_sequences")
            .execute(self.conn())
            .await?;
        info!("{} séquences supprimées", result.rows_affected());
        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dna_sequences")
            .fetch_one(self.conn())
            .await?;
        Ok(count)
    }
}
