//! # Editor Commands
//!
//! Every change to an open document goes through one of these commands.
//!
//! ## Command Semantics
//!
//! ### addBlock
//! - Appends a fully formed block, renumbers `order`
//! - Fails if the id is in use or was used earlier in the session
//!
//! ### updateBlock
//! - Shallow merge of the supplied fields into the block
//! - Unknown id is ignored (document stays clean)
//! - Patch for another variant fails
//!
//! ### deleteBlock
//! - Removes the block, clears the selection if it pointed at it
//! - Unknown id is ignored
//!
//! ### selectBlock
//! - UI state only, never dirties the document
//!
//! ### reorderBlocks
//! - Full id sequence, must be a permutation of the current blocks

use funnel_model::{Block, BlockId, BlockPatch, PatchMismatch};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializable editor command, e.g.
/// `{ "command": "deleteBlock", "id": "block-1" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    AddBlock {
        block: Block,
    },

    UpdateBlock {
        id: BlockId,
        patch: BlockPatch,
    },

    DeleteBlock {
        id: BlockId,
    },

    SelectBlock {
        #[serde(default)]
        id: Option<BlockId>,
    },

    ReorderBlocks {
        ids: Vec<BlockId>,
    },
}

/// What a command did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command took effect
    Applied,

    /// The command named a block that does not exist; nothing changed
    Ignored,
}

impl CommandOutcome {
    pub fn is_applied(self) -> bool {
        self == CommandOutcome::Applied
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block id already used in this document: {0}")]
    DuplicateBlockId(BlockId),

    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),

    #[error("Reorder sequence is not a permutation of the current blocks")]
    NotAPermutation,

    #[error("Kind mismatch: {0}")]
    KindMismatch(#[from] PatchMismatch),
}

impl Command {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBlock { .. } => "addBlock",
            Command::UpdateBlock { .. } => "updateBlock",
            Command::DeleteBlock { .. } => "deleteBlock",
            Command::SelectBlock { .. } => "selectBlock",
            Command::ReorderBlocks { .. } => "reorderBlocks",
        }
    }

    /// Whether a successful application marks the document dirty
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Command::SelectBlock { .. })
    }
}
