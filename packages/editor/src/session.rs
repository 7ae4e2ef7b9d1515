//! # Edit Session
//!
//! One open funnel: an [`EditorStore`] bound to the adapter it was loaded
//! from and will be saved to.
//!
//! `save` takes `&mut self`, so at most one save is ever in flight per
//! session.

use crate::commands::{Command, CommandOutcome};
use crate::persistence::{LoadOutcome, PersistenceAdapter};
use crate::store::EditorStore;
use crate::EditorError;
use funnel_model::SkippedBlock;

#[derive(Debug)]
pub struct EditSession {
    /// Funnel being edited
    pub funnel_id: String,

    store: EditorStore,
    adapter: PersistenceAdapter,
    outcome: LoadOutcome,
    skipped: Vec<SkippedBlock>,
}

impl EditSession {
    /// Fetch the funnel's document and hydrate a fresh store
    pub async fn open(funnel_id: impl Into<String>, adapter: PersistenceAdapter) -> Self {
        let funnel_id = funnel_id.into();
        let fetched = adapter.fetch_document(&funnel_id).await;

        Self {
            store: EditorStore::loaded(Some(fetched.document)),
            outcome: fetched.outcome,
            skipped: fetched.skipped,
            funnel_id,
            adapter,
        }
    }

    pub fn store(&self) -> &EditorStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut EditorStore {
        &mut self.store
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Stored blocks this session could not read; they are lost on save
    pub fn skipped_blocks(&self) -> &[SkippedBlock] {
        &self.skipped
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, EditorError> {
        Ok(self.store.apply(command)?)
    }

    /// Write the current document. On failure the session stays dirty.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let revision = self.store.revision();
        let document = self.store.snapshot();

        match self.adapter.write_document(&self.funnel_id, &document).await {
            Ok(_) => {
                self.store.mark_saved(revision);
                tracing::info!(
                    funnel_id = %self.funnel_id,
                    blocks = document.blocks.len(),
                    "Saved document"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(funnel_id = %self.funnel_id, error = %e, "Save failed");
                Err(EditorError::Save(e))
            }
        }
    }

    /// Discard local changes and fetch the stored document again
    pub async fn reload(&mut self) {
        let fetched = self.adapter.fetch_document(&self.funnel_id).await;
        self.store.load(Some(fetched.document));
        self.outcome = fetched.outcome;
        self.skipped = fetched.skipped;
    }
}
