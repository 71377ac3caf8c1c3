//! Confirmation en deux temps des actions destructrices
//!
//! `request` émet un jeton à usage unique, `confirm` le consomme et rend
//! l'action autorisée, `execute` l'applique sur une session.

use crate::repository::SequenceStore;
use crate::{Result, StorageError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Durée de validité par défaut d'un jeton
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DestructiveAction {
    Delete { id: i64 },
    DeleteAll,
}

impl fmt::Display for DestructiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestructiveAction::Delete { id } => write!(f, "supprimer la séquence {id}"),
            DestructiveAction::DeleteAll => write!(f, "supprimer toutes les séquences"),
        }
    }
}

/// Jeton émis par [`ConfirmationGate::request`]
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationToken {
    pub token: Uuid,
    pub action: DestructiveAction,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Pending {
    action: DestructiveAction,
    expires_at: DateTime<Utc>,
}

/// Registre des confirmations en attente
#[derive(Debug)]
pub struct ConfirmationGate {
    pending: HashMap<Uuid, Pending>,
    ttl: Duration,
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TOKEN_TTL_SECS))
    }
}

impl ConfirmationGate {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: HashMap::new(),
            ttl,
        }
    }

    /// Première étape : enregistre l'intention et émet un jeton
    pub fn request(&mut self, action: DestructiveAction) -> ConfirmationToken {
        self.request_at(action, Utc::now())
    }

    fn request_at(&mut self, action: DestructiveAction, now: DateTime<Utc>) -> ConfirmationToken {
        self.purge_expired(now);

        let token = Uuid::new_v4();
        let expires_at = now + self.ttl;
        self.pending.insert(token, Pending { action, expires_at });

        info!("Confirmation demandée: {} ({})", action, token);
        ConfirmationToken {
            token,
            action,
            expires_at,
        }
    }

    /// Seconde étape : consomme le jeton et retourne l'action autorisée
    pub fn confirm(&mut self, token: Uuid) -> Result<DestructiveAction> {
        self.confirm_at(token, Utc::now())
    }

    fn confirm_at(&mut self, token: Uuid, now: DateTime<Utc>) -> Result<DestructiveAction> {
        let pending = self.pending.remove(&token).ok_or(StorageError::InvalidToken)?;
        if now > pending.expires_at {
            warn!("Jeton expiré: {}", token);
            return Err(StorageError::TokenExpired);
        }
        Ok(pending.action)
    }

    /// Abandonne une demande ; `false` si le jeton était inconnu
    pub fn cancel(&mut self, token: Uuid) -> bool {
        self.pending.remove(&token).is_some()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn purge_expired(&mut self, now: DateTime<Utc>) {
        self.pending.retain(|_, p| p.expires_at >= now);
    }
}

/// Applique une action confirmée ; retourne le nombre de lignes supprimées
pub async fn execute<S>(store: &mut S, action: DestructiveAction) -> Result<u64>
where
    S: SequenceStore + ?Sized,
{
    let removed = match action {
        DestructiveAction::Delete { id } => u64::from(store.delete(id).await?),
        DestructiveAction::DeleteAll => store.delete_all().await?,
    };
    info!("Action exécutée: {} ({} lignes)", action, removed);
    Ok(removed)
}
