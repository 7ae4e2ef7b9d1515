//! # Remote Funnel Store
//!
//! Client for the funnel HTTP API:
//!
//! - `GET    /api/funnels/{id}`            → funnel, 404 if absent
//! - `PATCH  /api/funnels/{id}`            `{ publishedData }` → funnel
//! - `GET    /api/funnels?slug=…`          → funnel list
//! - `POST   /api/funnels`                 `{ id?, name, slug }` → funnel
//! - `POST   /api/funnels/{id}/publish`    `{ isPublished }` → funnel

use crate::error::{StoreError, StoreResult};
use crate::store::FunnelStore;
use async_trait::async_trait;
use funnel_model::{normalize_slug, Funnel};
use serde::Deserialize;
use serde_json::{json, Value};
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpFunnelStore {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpFunnelStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` plus `segments`, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn funnels_url(&self) -> StoreResult<Url> {
        self.endpoint(&["api", "funnels"])
    }

    fn funnel_url(&self, id: &str) -> StoreResult<Url> {
        self.endpoint(&["api", "funnels", id])
    }

    /// Map a response to a funnel, turning error statuses into `StoreError`
    async fn expect_funnel(response: reqwest::Response, id: &str) -> StoreResult<Funnel> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Funnel>().await?);
        }
        Err(Self::status_error(response, id).await)
    }

    async fn status_error(response: reqwest::Response, id: &str) -> StoreError {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return StoreError::NotFound(id.to_string());
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        StoreError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl FunnelStore for HttpFunnelStore {
    async fn get(&self, id: &str) -> StoreResult<Funnel> {
        tracing::debug!(id, "GET funnel");
        let response = self.client.get(self.funnel_url(id)?).send().await?;
        Self::expect_funnel(response, id).await
    }

    async fn find_by_slug(&self, slug: &str) -> StoreResult<Funnel> {
        let slug = normalize_slug(slug);
        let response = self
            .client
            .get(self.funnels_url()?)
            .query(&[("slug", slug.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, &slug).await);
        }

        response
            .json::<Vec<Funnel>>()
            .await?
            .into_iter()
            .find(|funnel| normalize_slug(&funnel.slug) == slug)
            .ok_or(StoreError::NotFound(slug))
    }

    async fn update_published_data(&self, id: &str, published_data: Value) -> StoreResult<Funnel> {
        tracing::debug!(id, "PATCH funnel publishedData");
        let response = self
            .client
            .patch(self.funnel_url(id)?)
            .json(&json!({ "publishedData": published_data }))
            .send()
            .await?;
        Self::expect_funnel(response, id).await
    }

    async fn create(&self, funnel: Funnel) -> StoreResult<Funnel> {
        let response = self
            .client
            .post(self.funnels_url()?)
            .json(&json!({
                "id": funnel.id,
                "name": funnel.name,
                "slug": funnel.slug,
            }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Err(StoreError::SlugTaken(funnel.slug));
        }
        Self::expect_funnel(response, &funnel.id).await
    }

    async fn set_published(&self, id: &str, is_published: bool) -> StoreResult<Funnel> {
        let response = self
            .client
            .post(self.endpoint(&["api", "funnels", id, "publish"])?)
            .json(&json!({ "isPublished": is_published }))
            .send()
            .await?;
        Self::expect_funnel(response, id).await
    }

    async fn list(&self) -> StoreResult<Vec<Funnel>> {
        let response = self.client.get(self.funnels_url()?).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response, "").await);
        }
        Ok(response.json::<Vec<Funnel>>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_trim_trailing_slash() {
        let store = HttpFunnelStore::new("http://localhost:3030/");
        assert_eq!(store.base_url(), "http://localhost:3030");
        assert_eq!(
            store.funnel_url("f1").unwrap().as_str(),
            "http://localhost:3030/api/funnels/f1"
        );
        assert_eq!(
            store.funnels_url().unwrap().as_str(),
            "http://localhost:3030/api/funnels"
        );
    }

    #[test]
    fn test_ids_stay_in_one_path_segment() {
        let store = HttpFunnelStore::new("http://localhost:3030");

        let url = store.funnel_url("f1?x=1").unwrap();
        assert_eq!(url.path(), "/api/funnels/f1%3Fx=1");
        assert_eq!(url.query(), None);

        let url = store.funnel_url("a/b#c").unwrap();
        assert_eq!(url.path(), "/api/funnels/a%2Fb%23c");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_base_path_is_kept() {
        let store = HttpFunnelStore::new("http://localhost:3030/dashboard/");
        assert_eq!(
            store.funnel_url("f1").unwrap().as_str(),
            "http://localhost:3030/dashboard/api/funnels/f1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let store = HttpFunnelStore::new("not a url");
        assert!(matches!(store.funnels_url(), Err(StoreError::InvalidUrl(_))));
    }
}
