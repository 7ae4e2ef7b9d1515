//! # Funnel Store
//!
//! Storage backends for funnels and their published documents.
//!
//! - [`MemoryFunnelStore`]: in-process map, for tests and demos
//! - [`FileFunnelStore`]: one JSON file per funnel in a directory
//! - [`HttpFunnelStore`]: client for a remote funnel API
//!
//! All backends replace a funnel's `publishedData` as a whole; the last
//! writer wins.

mod error;
mod file;
mod http;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileFunnelStore;
pub use http::HttpFunnelStore;
pub use memory::MemoryFunnelStore;
pub use store::{generate_funnel_id, validate_funnel_id, FunnelStore};
