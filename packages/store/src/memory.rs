use crate::error::{StoreError, StoreResult};
use crate::store::{validate_funnel_id, FunnelStore};
use async_trait::async_trait;
use chrono::Utc;
use funnel_model::{normalize_slug, Funnel};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-memory funnel store
#[derive(Debug, Default)]
pub struct MemoryFunnelStore {
    funnels: RwLock<HashMap<String, Funnel>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryFunnelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_funnels(funnels: impl IntoIterator<Item = Funnel>) -> Self {
        let map = funnels
            .into_iter()
            .map(|mut funnel| {
                funnel.slug = normalize_slug(&funnel.slug);
                (funnel.id.clone(), funnel)
            })
            .collect();

        Self {
            funnels: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Make every read fail with `Unavailable` (simulates an outage)
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write fail with `Unavailable` (simulates an outage)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> StoreResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }

    fn check_writes(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl FunnelStore for MemoryFunnelStore {
    async fn get(&self, id: &str) -> StoreResult<Funnel> {
        self.check_reads()?;
        self.funnels
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Funnel> {
        self.check_reads()?;
        let slug = normalize_slug(slug);
        self.funnels
            .read()
            .await
            .values()
            .find(|funnel| funnel.slug == slug)
            .cloned()
            .ok_or(StoreError::NotFound(slug))
    }

    async fn update_published_data(&self, id: &str, published_data: Value) -> StoreResult<Funnel> {
        self.check_writes()?;
        let mut funnels = self.funnels.write().await;
        let funnel = funnels
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        funnel.published_data = Some(published_data);
        funnel.updated_at = Utc::now();
        Ok(funnel.clone())
    }

    async fn create(&self, mut funnel: Funnel) -> StoreResult<Funnel> {
        self.check_writes()?;
        validate_funnel_id(&funnel.id)?;
        funnel.slug = normalize_slug(&funnel.slug);

        let mut funnels = self.funnels.write().await;
        if funnels.contains_key(&funnel.id) {
            return Err(StoreError::AlreadyExists(funnel.id));
        }
        if funnels.values().any(|existing| existing.slug == funnel.slug) {
            return Err(StoreError::SlugTaken(funnel.slug));
        }

        funnels.insert(funnel.id.clone(), funnel.clone());
        Ok(funnel)
    }

    async fn set_published(&self, id: &str, is_published: bool) -> StoreResult<Funnel> {
        self.check_writes()?;
        let mut funnels = self.funnels.write().await;
        let funnel = funnels
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        funnel.is_published = is_published;
        funnel.updated_at = Utc::now();
        Ok(funnel.clone())
    }

    async fn list(&self) -> StoreResult<Vec<Funnel>> {
        self.check_reads()?;
        let mut funnels: Vec<Funnel> = self.funnels.read().await.values().cloned().collect();
        funnels.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(funnels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryFunnelStore::new();
        let err = store.get("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let store = MemoryFunnelStore::with_funnels([Funnel::new("f1", "Spring", "spring")]);
        let before = store.get("f1").await.unwrap().updated_at;

        store
            .update_published_data("f1", json!({ "version": "1.0", "blocks": [1] }))
            .await
            .unwrap();
        let updated = store
            .update_published_data("f1", json!({ "version": "1.0", "blocks": [] }))
            .await
            .unwrap();

        assert_eq!(
            updated.published_data,
            Some(json!({ "version": "1.0", "blocks": [] }))
        );
        assert!(updated.updated_at >= before);
    }

    #[tokio::test]
    async fn test_slug_lookup_is_normalized() {
        let store = MemoryFunnelStore::with_funnels([Funnel::new("f1", "Spring", "/lp/spring")]);
        let funnel = store.find_by_slug("lp/spring/").await.unwrap();
        assert_eq!(funnel.id, "f1");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let store = MemoryFunnelStore::new();
        store.create(Funnel::new("a", "A", "same")).await.unwrap();

        let err = store.create(Funnel::new("b", "B", "/same")).await.unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken(slug) if slug == "same"));
    }

    #[tokio::test]
    async fn test_create_rejects_path_unsafe_id() {
        let store = MemoryFunnelStore::new();
        let err = store.create(Funnel::new("f1?x=1", "A", "a")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(id) if id == "f1?x=1"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_injection() {
        let store = MemoryFunnelStore::with_funnels([Funnel::new("f1", "Spring", "spring")]);
        store.set_fail_writes(true);

        let result = store.update_published_data("f1", json!({})).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));

        store.set_fail_writes(false);
        assert!(store.update_published_data("f1", json!({})).await.is_ok());
    }
}
