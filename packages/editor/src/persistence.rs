//! # Persistence Adapter
//!
//! Bridge between an editor session and a [`FunnelStore`].
//!
//! Fetching never fails: a missing funnel, a missing document, a store
//! outage or an undecodable document all fall back to the empty bootstrap
//! document, and the [`LoadOutcome`] says which case happened. Writes
//! replace the whole document and their errors reach the caller.

use funnel_model::{Funnel, PublishedData, SkippedBlock};
use funnel_store::{FunnelStore, StoreResult};
use std::sync::Arc;

/// How a document was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored document
    Loaded,

    /// The funnel exists but has no document yet
    Bootstrapped,

    /// Something went wrong; editing continues on an empty document.
    /// Saving in this state overwrites whatever is stored.
    Degraded { reason: String },
}

impl LoadOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadOutcome::Degraded { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Fetched {
    pub document: PublishedData,
    pub outcome: LoadOutcome,
    /// Blocks left out of a loaded document
    pub skipped: Vec<SkippedBlock>,
}

impl Fetched {
    fn empty(outcome: LoadOutcome) -> Self {
        Self {
            document: PublishedData::empty(),
            outcome,
            skipped: Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn FunnelStore>,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn FunnelStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn FunnelStore> {
        &self.store
    }

    pub async fn fetch_document(&self, funnel_id: &str) -> Fetched {
        let funnel = match self.store.get(funnel_id).await {
            Ok(funnel) => funnel,
            Err(e) => {
                tracing::warn!(funnel_id, error = %e, "Could not fetch funnel; starting empty");
                return Fetched::empty(LoadOutcome::Degraded {
                    reason: e.to_string(),
                });
            }
        };

        match funnel.document() {
            None => {
                tracing::info!(funnel_id, "Funnel has no document yet");
                Fetched::empty(LoadOutcome::Bootstrapped)
            }
            Some(Ok(decoded)) => {
                tracing::info!(
                    funnel_id,
                    blocks = decoded.document.blocks.len(),
                    skipped = decoded.skipped.len(),
                    "Loaded document"
                );
                Fetched {
                    document: decoded.document,
                    outcome: LoadOutcome::Loaded,
                    skipped: decoded.skipped,
                }
            }
            Some(Err(e)) => {
                tracing::warn!(funnel_id, error = %e, "Stored document is unreadable; starting empty");
                Fetched::empty(LoadOutcome::Degraded {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Replace the funnel's stored document with `document`
    pub async fn write_document(
        &self,
        funnel_id: &str,
        document: &PublishedData,
    ) -> StoreResult<Funnel> {
        let value = serde_json::to_value(document)?;
        self.store.update_published_data(funnel_id, value).await
    }
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter").finish_non_exhaustive()
    }
}
