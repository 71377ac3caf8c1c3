//! Chaîne validation → analyse → insertion partagée par les front-ends

use crate::database::Database;
use crate::repository::SequenceStore;
use crate::StorageError;
use adnseq_core::{Analysis, NewSequence, SequenceAnalyzer, ValidationError};
use tracing::{instrument, warn};

/// Résultat d'une soumission validée.
///
/// L'analyse reste disponible même si l'insertion a échoué.
#[derive(Debug)]
pub struct Submission {
    pub analysis: Analysis,
    pub stored: Result<i64, StorageError>,
}

impl Submission {
    /// Analyse qui n'a pas pu être enregistrée
    pub fn unsaved(analysis: Analysis, error: StorageError) -> Self {
        warn!("Séquence analysée mais non sauvegardée: {}", error);
        Self {
            analysis,
            stored: Err(error),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.stored.as_ref().ok().copied()
    }
}

/// Valide et analyse `raw`, puis tente l'insertion.
///
/// Une erreur de validation interrompt tout sans toucher au stockage ;
/// une erreur de stockage est rendue dans [`Submission::stored`].
#[instrument(skip(store, analyzer, raw, description))]
pub async fn submit<S>(
    store: &mut S,
    analyzer: &SequenceAnalyzer,
    name: &str,
    description: Option<String>,
    raw: &str,
) -> Result<Submission, ValidationError>
where
    S: SequenceStore + ?Sized,
{
    let analysis = analyzer.run(raw)?;
    Ok(save_analysis(store, name, description, analysis).await)
}

/// Comme [`submit`], la session n'étant ouverte qu'après l'analyse.
///
/// Une session impossible à obtenir donne une soumission non enregistrée.
#[instrument(skip(db, analyzer, raw, description))]
pub async fn submit_to_database(
    db: &Database,
    analyzer: &SequenceAnalyzer,
    name: &str,
    description: Option<String>,
    raw: &str,
) -> Result<Submission, ValidationError> {
    let analysis = analyzer.run(raw)?;
    Ok(save_to_database(db, name, description, analysis).await)
}

/// Insère une analyse déjà faite
pub async fn save_analysis<S>(
    store: &mut S,
    name: &str,
    description: Option<String>,
    analysis: Analysis,
) -> Submission
where
    S: SequenceStore + ?Sized,
{
    let record = NewSequence::new(name, description, &analysis);
    match store.insert(&record).await {
        Ok(id) => Submission {
            analysis,
            stored: Ok(id),
        },
        Err(e) => Submission::unsaved(analysis, e),
    }
}

/// Ouvre une session puis insère ; l'analyse survit à un échec de connexion
pub async fn save_to_database(
    db: &Database,
    name: &str,
    description: Option<String>,
    analysis: Analysis,
) -> Submission {
    match db.session().await {
        Ok(mut session) => save_analysis(&mut session, name, description, analysis).await,
        Err(e) => Submission::unsaved(analysis, e),
    }
}
