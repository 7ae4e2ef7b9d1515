//! # Funnel Editor
//!
//! Editing engine for funnel landing pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ store: FunnelStore (memory / file / http)   │
//! └─────────────────────────────────────────────┘
//!                     ↓ fetch / write
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - PersistenceAdapter (degrading fetch)     │
//! │  - EditorStore (blocks, selection, dirty)   │
//! │  - Commands from factory/inspector/reorder  │
//! └─────────────────────────────────────────────┘
//!                     ↓ blocks + selection
//! ┌─────────────────────────────────────────────┐
//! │ renderer: authoring / public HTML           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One owner**: the session owns the document; renderers borrow it
//! 2. **Commands only**: every change goes through an [`EditorStore`] method
//! 3. **Dirty means unsaved**: only a load or a successful save clears it
//! 4. **Ids are forever**: a block id is never reused within a session
//!
//! ## Usage
//!
//! ```rust,ignore
//! use funnel_editor::{BlockFactory, EditSession, PersistenceAdapter};
//! use funnel_model::BlockKind;
//!
//! let adapter = PersistenceAdapter::new(store);
//! let mut session = EditSession::open("funnel-1", adapter).await;
//!
//! let mut factory = BlockFactory::new();
//! let block = factory.create_for(session.store(), BlockKind::Heading);
//! session.store_mut().add_block(block)?;
//!
//! session.save().await?;
//! ```

mod commands;
mod errors;
mod factory;
pub mod inspector;
mod persistence;
pub mod reorder;
mod session;
mod store;

pub use commands::{Command, CommandOutcome, MutationError};
pub use errors::EditorError;
pub use factory::{default_block, BlockFactory};
pub use persistence::{Fetched, LoadOutcome, PersistenceAdapter};
pub use reorder::{closest_center, move_id, DragController, Point, Rect};
pub use session::EditSession;
pub use store::EditorStore;
