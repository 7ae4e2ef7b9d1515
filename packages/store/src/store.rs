use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use funnel_model::Funnel;
use serde_json::Value;

/// Storage for funnels.
///
/// `update_published_data` replaces the whole stored document and refreshes
/// `updated_at`; there is no merge and no concurrency token.
#[async_trait]
pub trait FunnelStore: Send + Sync {
    async fn get(&self, id: &str) -> StoreResult<Funnel>;

    /// Look up a funnel by its public slug (compared after normalization)
    async fn find_by_slug(&self, slug: &str) -> StoreResult<Funnel>;

    async fn update_published_data(&self, id: &str, published_data: Value) -> StoreResult<Funnel>;

    async fn create(&self, funnel: Funnel) -> StoreResult<Funnel>;

    async fn set_published(&self, id: &str, is_published: bool) -> StoreResult<Funnel>;

    async fn list(&self) -> StoreResult<Vec<Funnel>>;
}

/// Fresh funnel id for the create flow
pub fn generate_funnel_id() -> String {
    format!(
        "funnel-{}",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0)
    )
}

/// Ids double as file names and URL path segments, so only
/// `[A-Za-z0-9_-]` is accepted.
pub fn validate_funnel_id(id: &str) -> StoreResult<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(())
}
