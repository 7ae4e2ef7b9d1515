//! # Editor State Store
//!
//! Single owner of one open document: the ordered block list, the
//! selection and the dirty flag.
//!
//! ## Lifecycle
//!
//! ```text
//!           load / mark_saved(current revision)
//!        ┌──────────────────────────────────────┐
//!        ↓                                      │
//!     Clean ──add/update/delete/reorder──→ Dirty ┘
//!                                          │  ↑
//!                                          └──┘ any mutation
//! ```
//!
//! Every mutation bumps `revision`. A save snapshots the revision it
//! wrote, and `mark_saved` only clears the dirty flag if nothing changed
//! since.

use crate::commands::{Command, CommandOutcome, MutationError};
use funnel_model::{renumber, Block, BlockId, BlockPatch, PublishedData, Theme, DOCUMENT_VERSION};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct EditorStore {
    blocks: Vec<Block>,
    selected: Option<BlockId>,
    dirty: bool,

    /// Increments on every mutation and load
    revision: u64,

    /// Ids removed during this session; never handed out again
    retired: HashSet<BlockId>,

    /// Carried through from the loaded document
    theme: Option<Theme>,
}

impl EditorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store hydrated from `document`, or from the empty bootstrap document
    pub fn loaded(document: Option<PublishedData>) -> Self {
        let mut store = Self::new();
        store.load(document);
        store
    }

    /// Replace the whole document; clears dirty and selection
    pub fn load(&mut self, document: Option<PublishedData>) {
        let document = document.unwrap_or_else(PublishedData::empty).normalized();

        let mut seen = HashSet::new();
        let mut blocks = Vec::with_capacity(document.blocks.len());
        for block in document.blocks {
            if seen.insert(block.id().clone()) {
                blocks.push(block);
            } else {
                tracing::warn!(id = %block.id(), "Dropping block with duplicate id");
            }
        }

        self.blocks = blocks;
        renumber(&mut self.blocks);
        self.theme = document.theme;
        self.selected = None;
        self.retired.clear();
        self.dirty = false;
        self.revision += 1;

        tracing::debug!(blocks = self.blocks.len(), "Loaded document");
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|block| block.id().clone()).collect()
    }

    pub fn selected(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.block(id))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn theme(&self) -> Option<&Theme> {
        self.theme.as_ref()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether `id` is live or was used earlier in this session
    pub fn is_id_taken(&self, id: &BlockId) -> bool {
        self.retired.contains(id) || self.block(id).is_some()
    }

    /// Append a block; its `order` is overwritten
    pub fn add_block(&mut self, block: Block) -> Result<(), MutationError> {
        if self.is_id_taken(block.id()) {
            return Err(MutationError::DuplicateBlockId(block.id().clone()));
        }

        self.blocks.push(block);
        renumber(&mut self.blocks);
        self.touch();
        Ok(())
    }

    /// Merge `patch` into the block with `id`
    pub fn update_block(
        &mut self,
        id: &BlockId,
        patch: &BlockPatch,
    ) -> Result<CommandOutcome, MutationError> {
        let Some(block) = self.blocks.iter_mut().find(|block| block.id() == id) else {
            tracing::debug!(id = %id, "updateBlock for unknown id ignored");
            return Ok(CommandOutcome::Ignored);
        };

        block.merge(patch)?;
        self.touch();
        Ok(CommandOutcome::Applied)
    }

    pub fn delete_block(&mut self, id: &BlockId) -> CommandOutcome {
        let Some(index) = self.blocks.iter().position(|block| block.id() == id) else {
            tracing::debug!(id = %id, "deleteBlock for unknown id ignored");
            return CommandOutcome::Ignored;
        };

        let removed = self.blocks.remove(index);
        renumber(&mut self.blocks);
        if self.selected.as_ref() == Some(removed.id()) {
            self.selected = None;
        }
        self.retired.insert(removed.id().clone());
        self.touch();
        CommandOutcome::Applied
    }

    /// Set or clear the selection. Never dirties the document.
    pub fn select_block(&mut self, id: Option<&BlockId>) -> Result<(), MutationError> {
        match id {
            Some(id) if self.block(id).is_none() => Err(MutationError::BlockNotFound(id.clone())),
            _ => {
                self.selected = id.cloned();
                Ok(())
            }
        }
    }

    /// Rearrange blocks to follow `ids`, which must name every block once
    pub fn reorder_blocks(&mut self, ids: &[BlockId]) -> Result<(), MutationError> {
        let current: HashSet<&BlockId> = self.blocks.iter().map(Block::id).collect();
        let requested: HashSet<&BlockId> = ids.iter().collect();
        if ids.len() != self.blocks.len() || requested.len() != ids.len() || requested != current {
            return Err(MutationError::NotAPermutation);
        }

        let mut by_id: HashMap<BlockId, Block> = self
            .blocks
            .drain(..)
            .map(|block| (block.id().clone(), block))
            .collect();
        self.blocks = ids.iter().filter_map(|id| by_id.remove(id)).collect();
        renumber(&mut self.blocks);
        self.touch();
        Ok(())
    }

    /// Serializable document for the current blocks
    pub fn snapshot(&self) -> PublishedData {
        PublishedData {
            version: DOCUMENT_VERSION.to_string(),
            blocks: self.blocks.clone(),
            theme: self.theme.clone(),
        }
    }

    /// Clear dirty after a successful save of the snapshot taken at `revision`
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if revision == self.revision {
            self.dirty = false;
            true
        } else {
            tracing::debug!(
                saved = revision,
                current = self.revision,
                "Document changed during save; staying dirty"
            );
            false
        }
    }

    /// Apply a serialized command
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, MutationError> {
        tracing::debug!(command = command.name(), "Applying command");

        match command {
            Command::AddBlock { block } => {
                self.add_block(block)?;
                Ok(CommandOutcome::Applied)
            }
            Command::UpdateBlock { id, patch } => self.update_block(&id, &patch),
            Command::DeleteBlock { id } => Ok(self.delete_block(&id)),
            Command::SelectBlock { id } => {
                self.select_block(id.as_ref())?;
                Ok(CommandOutcome::Applied)
            }
            Command::ReorderBlocks { ids } => {
                self.reorder_blocks(&ids)?;
                Ok(CommandOutcome::Applied)
            }
        }
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_model::{
        Align, AspectRatio, HeadingLevel, HeadingPatch, HeadingProps, VideoPatch, VideoProps,
    };

    fn heading(id: &str, text: &str) -> Block {
        Block::heading(
            id,
            HeadingProps {
                text: text.to_string(),
                level: HeadingLevel::H2,
                align: Align::Left,
            },
        )
    }

    fn video(id: &str) -> Block {
        Block::video(
            id,
            VideoProps {
                url: String::new(),
                title: String::new(),
                aspect_ratio: AspectRatio::Widescreen,
            },
        )
    }

    fn ids(store: &EditorStore) -> Vec<&str> {
        store.blocks().iter().map(|block| block.id().as_str()).collect()
    }

    #[test]
    fn test_load_none_bootstraps_empty_document() {
        let store = EditorStore::loaded(None);
        assert!(store.is_empty());
        assert!(!store.is_dirty());
        assert_eq!(store.snapshot(), PublishedData::empty());
    }

    #[test]
    fn test_add_then_reorder_scenario() {
        let mut store = EditorStore::loaded(None);
        store.add_block(heading("h1", "Title")).unwrap();
        store.add_block(video("v2")).unwrap();
        assert!(store.is_dirty());

        store
            .reorder_blocks(&[BlockId::new("v2"), BlockId::new("h1")])
            .unwrap();

        assert_eq!(ids(&store), vec!["v2", "h1"]);
        assert_eq!(store.blocks()[0].order(), 0);
        assert_eq!(store.blocks()[1].order(), 1);
    }

    #[test]
    fn test_add_rejects_reused_ids() {
        let mut store = EditorStore::new();
        store.add_block(heading("a", "A")).unwrap();
        assert_eq!(
            store.add_block(heading("a", "again")),
            Err(MutationError::DuplicateBlockId(BlockId::new("a")))
        );

        store.delete_block(&BlockId::new("a"));
        assert!(matches!(
            store.add_block(video("a")),
            Err(MutationError::DuplicateBlockId(_))
        ));
    }

    #[test]
    fn test_update_unknown_id_is_ignored_and_clean() {
        let mut store = EditorStore::loaded(Some(PublishedData::with_blocks(vec![heading(
            "a", "A",
        )])));
        let patch = BlockPatch::Heading(HeadingPatch {
            text: Some("B".to_string()),
            ..Default::default()
        });

        let outcome = store.update_block(&BlockId::new("zzz"), &patch).unwrap();
        assert_eq!(outcome, CommandOutcome::Ignored);
        assert!(!store.is_dirty());

        let outcome = store.update_block(&BlockId::new("a"), &patch).unwrap();
        assert_eq!(outcome, CommandOutcome::Applied);
        assert!(store.is_dirty());
        match store.block(&BlockId::new("a")) {
            Some(Block::Heading { props, .. }) => assert_eq!(props.text, "B"),
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_update_with_wrong_variant_patch() {
        let mut store = EditorStore::loaded(Some(PublishedData::with_blocks(vec![heading(
            "a", "A",
        )])));
        let patch = BlockPatch::Video(VideoPatch::default());

        let err = store.update_block(&BlockId::new("a"), &patch).unwrap_err();
        assert!(matches!(err, MutationError::KindMismatch(_)));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_delete_clears_matching_selection_only() {
        let mut store = EditorStore::new();
        store.add_block(heading("a", "A")).unwrap();
        store.add_block(heading("b", "B")).unwrap();
        store.add_block(heading("c", "C")).unwrap();

        store.select_block(Some(&BlockId::new("b"))).unwrap();
        store.delete_block(&BlockId::new("c"));
        assert_eq!(store.selected(), Some(&BlockId::new("b")));

        store.delete_block(&BlockId::new("b"));
        assert_eq!(store.selected(), None);
        assert_eq!(ids(&store), vec!["a"]);
        assert_eq!(store.blocks()[0].order(), 0);
    }

    #[test]
    fn test_delete_from_middle_closes_order_gap() {
        let mut store = EditorStore::new();
        for id in ["a", "b", "c", "d"] {
            store.add_block(heading(id, id)).unwrap();
        }

        store.delete_block(&BlockId::new("b"));

        assert_eq!(ids(&store), vec!["a", "c", "d"]);
        let orders: Vec<u32> = store.blocks().iter().map(|block| block.order()).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(store.snapshot().blocks, store.blocks());
    }

    #[test]
    fn test_delete_unknown_keeps_clean() {
        let mut store = EditorStore::loaded(None);
        assert_eq!(store.delete_block(&BlockId::new("x")), CommandOutcome::Ignored);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_select_is_not_a_mutation() {
        let mut store = EditorStore::loaded(Some(PublishedData::with_blocks(vec![heading(
            "a", "A",
        )])));
        store.select_block(Some(&BlockId::new("a"))).unwrap();
        assert!(!store.is_dirty());

        assert_eq!(
            store.select_block(Some(&BlockId::new("ghost"))),
            Err(MutationError::BlockNotFound(BlockId::new("ghost")))
        );
        assert_eq!(store.selected(), Some(&BlockId::new("a")));

        store.select_block(None).unwrap();
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_reorder_rejects_non_permutations() {
        let mut store = EditorStore::new();
        store.add_block(heading("a", "A")).unwrap();
        store.add_block(heading("b", "B")).unwrap();
        store.mark_saved(store.revision());

        let bad: [&[BlockId]; 3] = [
            &[BlockId::new("a")],
            &[BlockId::new("a"), BlockId::new("a")],
            &[BlockId::new("a"), BlockId::new("z")],
        ];
        for sequence in bad {
            assert_eq!(store.reorder_blocks(sequence), Err(MutationError::NotAPermutation));
            assert_eq!(ids(&store), vec!["a", "b"]);
        }
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_mark_saved_respects_revision() {
        let mut store = EditorStore::new();
        store.add_block(heading("a", "A")).unwrap();

        let revision = store.revision();
        store.add_block(heading("b", "B")).unwrap();
        assert!(!store.mark_saved(revision));
        assert!(store.is_dirty());

        assert!(store.mark_saved(store.revision()));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_load_normalizes_and_keeps_theme() {
        let mut a = heading("a", "A");
        a.set_order(7);
        let mut b = heading("b", "B");
        b.set_order(2);
        let mut document = PublishedData::with_blocks(vec![a, b]);
        document.theme = Some(Theme {
            primary_color: Some("#ff0000".to_string()),
            font_family: None,
        });

        let store = EditorStore::loaded(Some(document.clone()));
        assert_eq!(ids(&store), vec!["b", "a"]);
        assert_eq!(store.snapshot().theme, document.theme);
        assert_eq!(store.snapshot(), document.normalized());
    }
}
