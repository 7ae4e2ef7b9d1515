//! # Funnel Model
//!
//! Data model for landing-page ("funnel") documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Block / PublishedData / Funnel       │
//! │  - Closed block union (exhaustive matching) │
//! │  - Versioned, lenient document decoding     │
//! │  - Partial property patches                 │
//! └─────────────────────────────────────────────┘
//!           ↓                         ↓
//! ┌──────────────────────┐  ┌──────────────────────┐
//! │ editor: live store   │  │ renderer: HTML       │
//! └──────────────────────┘  └──────────────────────┘
//! ```
//!
//! The wire format keeps the historical split between `props` (heading,
//! video, button) and `content` (image, code) so stored documents keep
//! loading.

mod block;
mod document;
mod error;
mod funnel;
mod patch;
mod visitor;

pub use block::{
    renumber, Align, AspectRatio, Block, BlockId, BlockKind, ButtonProps, ButtonSize, ButtonVariant,
    CodeContent, HeadingLevel, HeadingProps, ImageContent, VideoProps, SUGGESTED_LANGUAGES,
};
pub use document::{
    decode_document, decode_document_str, Decoded, PublishedData, SchemaVersion, SkippedBlock,
    Theme, DOCUMENT_VERSION,
};
pub use error::DecodeError;
pub use funnel::{normalize_slug, Funnel};
pub use patch::{BlockPatch, ButtonPatch, CodePatch, HeadingPatch, ImagePatch, PatchMismatch, VideoPatch};
pub use visitor::{walk_block, walk_blocks, BlockVisitor};
