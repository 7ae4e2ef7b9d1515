use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use funnel_model::{decode_document, normalize_slug, Funnel};
use funnel_renderer::{render_published_funnel, RenderError};
use funnel_store::{generate_funnel_id, validate_funnel_id};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

type ApiResult<T> = Result<T, ApiError>;

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    slug: Option<String>,
}

pub async fn list_funnels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Funnel>>> {
    let mut funnels = state.store.list().await?;
    if let Some(slug) = query.slug {
        let slug = normalize_slug(&slug);
        funnels.retain(|funnel| normalize_slug(&funnel.slug) == slug);
    }
    Ok(Json(funnels))
}

#[derive(Debug, Deserialize)]
pub struct CreateFunnel {
    #[serde(default)]
    id: Option<String>,
    name: String,
    slug: String,
}

pub async fn create_funnel(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateFunnel>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Funnel>)> {
    let Json(body) = payload?;
    let slug = normalize_slug(&body.slug);
    if slug.is_empty() {
        return Err(ApiError::bad_request("slug must not be empty"));
    }

    let id = body
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_funnel_id);
    validate_funnel_id(&id)?;
    let funnel = state.store.create(Funnel::new(id, body.name, &slug)).await?;
    tracing::info!(id = %funnel.id, slug = %funnel.slug, "Created funnel");

    Ok((StatusCode::CREATED, Json(funnel)))
}

pub async fn get_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Funnel>> {
    Ok(Json(state.store.get(&id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFunnel {
    #[serde(default)]
    published_data: Option<Value>,
}

pub async fn update_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFunnel>, JsonRejection>,
) -> ApiResult<Json<Funnel>> {
    let Json(body) = payload?;
    let published_data = body
        .published_data
        .ok_or_else(|| ApiError::bad_request("publishedData is required"))?;

    // Stored as sent; decoding only checks that editors can load it again
    let decoded = decode_document(published_data.clone())
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    if !decoded.skipped.is_empty() {
        tracing::warn!(id = %id, skipped = decoded.skipped.len(), "Document has unknown blocks");
    }

    let funnel = state.store.update_published_data(&id, published_data).await?;
    tracing::info!(id = %id, blocks = decoded.document.blocks.len(), "Saved published data");

    Ok(Json(funnel))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishFunnel {
    is_published: bool,
}

pub async fn publish_funnel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<PublishFunnel>, JsonRejection>,
) -> ApiResult<Json<Funnel>> {
    let Json(body) = payload?;
    let funnel = state.store.set_published(&id, body.is_published).await?;
    tracing::info!(id = %id, is_published = funnel.is_published, "Publish state changed");
    Ok(Json(funnel))
}

pub async fn public_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let funnel = match state.store.find_by_slug(&slug).await {
        Ok(funnel) => funnel,
        Err(e) if e.is_not_found() => return not_found_page(),
        Err(e) => return ApiError::from(e).into_response(),
    };

    match render_published_funnel(&funnel, state.render.clone()) {
        Ok(html) => Html(html).into_response(),
        Err(RenderError::NotFound(_)) => not_found_page(),
        Err(e) => {
            tracing::error!(slug = %slug, error = %e, "Failed to render public page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Internal Server Error</h1>".to_string()),
            )
                .into_response()
        }
    }
}

fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html("<h1>Not Found</h1>".to_string())).into_response()
}
