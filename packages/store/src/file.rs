//! # Directory-backed Funnel Store
//!
//! Each funnel lives in `<root>/<id>.json`. Writes go to a temp file that
//! is renamed over the target, so readers never see a half-written
//! document.

use crate::error::{StoreError, StoreResult};
use crate::store::{validate_funnel_id, FunnelStore};
use async_trait::async_trait;
use chrono::Utc;
use funnel_model::{normalize_slug, Funnel};
use serde_json::Value;
use std::path::PathBuf;
use tokio::sync::Mutex;

const EXTENSION: &str = "json";

#[derive(Debug)]
pub struct FileFunnelStore {
    root: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileFunnelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create the store directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::new(root);
        tokio::fs::create_dir_all(&store.root).await?;
        Ok(store)
    }

    fn path_for(&self, id: &str) -> StoreResult<PathBuf> {
        validate_funnel_id(id)?;
        Ok(self.root.join(format!("{}.{}", id, EXTENSION)))
    }

    async fn read(&self, id: &str) -> StoreResult<Funnel> {
        let path = self.path_for(id)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(source) => Ok(serde_json::from_str(&source)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, funnel: &Funnel) -> StoreResult<()> {
        let path = self.path_for(&funnel.id)?;
        let tmp = path.with_extension(format!("{}.tmp", EXTENSION));

        let json = serde_json::to_string_pretty(funnel)?;
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(path = ?path, "Wrote funnel");
        Ok(())
    }

    async fn read_all(&self) -> StoreResult<Vec<Funnel>> {
        let mut funnels = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(funnels),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map(|e| e == EXTENSION).unwrap_or(false) {
                let source = tokio::fs::read_to_string(&path).await?;
                match serde_json::from_str::<Funnel>(&source) {
                    Ok(funnel) => funnels.push(funnel),
                    Err(e) => {
                        tracing::warn!(path = ?path, error = %e, "Skipping unreadable funnel file");
                    }
                }
            }
        }

        Ok(funnels)
    }

    async fn modify<F>(&self, id: &str, change: F) -> StoreResult<Funnel>
    where
        F: FnOnce(&mut Funnel) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut funnel = self.read(id).await?;
        change(&mut funnel);
        funnel.updated_at = Utc::now();
        self.write(&funnel).await?;
        Ok(funnel)
    }
}

#[async_trait]
impl FunnelStore for FileFunnelStore {
    async fn get(&self, id: &str) -> StoreResult<Funnel> {
        self.read(id).await
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Funnel> {
        let slug = normalize_slug(slug);
        self.read_all()
            .await?
            .into_iter()
            .find(|funnel| normalize_slug(&funnel.slug) == slug)
            .ok_or(StoreError::NotFound(slug))
    }

    async fn update_published_data(&self, id: &str, published_data: Value) -> StoreResult<Funnel> {
        self.modify(id, move |funnel| funnel.published_data = Some(published_data))
            .await
    }

    async fn create(&self, mut funnel: Funnel) -> StoreResult<Funnel> {
        funnel.slug = normalize_slug(&funnel.slug);

        let _guard = self.write_lock.lock().await;
        tokio::fs::create_dir_all(&self.root).await?;

        if tokio::fs::try_exists(self.path_for(&funnel.id)?).await? {
            return Err(StoreError::AlreadyExists(funnel.id));
        }
        let existing = self.read_all().await?;
        if existing
            .iter()
            .any(|other| normalize_slug(&other.slug) == funnel.slug)
        {
            return Err(StoreError::SlugTaken(funnel.slug));
        }

        self.write(&funnel).await?;
        Ok(funnel)
    }

    async fn set_published(&self, id: &str, is_published: bool) -> StoreResult<Funnel> {
        self.modify(id, move |funnel| funnel.is_published = is_published)
            .await
    }

    async fn list(&self) -> StoreResult<Vec<Funnel>> {
        let mut funnels = self.read_all().await?;
        funnels.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(funnels)
    }
}
