//! `HttpFunnelStore` against a live server

use funnel_model::Funnel;
use funnel_server::{build_router, serve, AppState};
use funnel_store::{FunnelStore, HttpFunnelStore, MemoryFunnelStore, StoreError};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn start() -> (Arc<MemoryFunnelStore>, HttpFunnelStore) {
    let mut published = Funnel::new("f1", "Spring", "lp/spring");
    published.is_published = true;
    published.published_data = Some(json!({ "version": "1.0", "blocks": [] }));

    let backing = Arc::new(MemoryFunnelStore::with_funnels([published]));
    let router = build_router(AppState::new(backing.clone()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        serve(listener, router).await.unwrap();
    });

    (backing, HttpFunnelStore::new(format!("http://{}", addr)))
}

#[tokio::test]
async fn test_get_and_not_found() {
    let (_, client) = start().await;

    let funnel = client.get("f1").await.unwrap();
    assert_eq!(funnel.name, "Spring");
    assert!(funnel.is_published);

    let err = client.get("nope").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_odd_id_does_not_address_another_funnel() {
    let (backing, client) = start().await;

    for id in ["f1?x=1", "f1#x", "f1/publish"] {
        let err = client.get(id).await.unwrap_err();
        assert!(err.is_not_found(), "{:?} resolved to {:?}", id, err);

        let doc = json!({ "version": "1.0", "blocks": [], "theme": { "primaryColor": "#000" } });
        let result = client.update_published_data(id, doc).await;
        assert!(result.is_err(), "{:?} was written", id);
    }

    let untouched = backing.get("f1").await.unwrap();
    assert_eq!(
        untouched.published_data,
        Some(json!({ "version": "1.0", "blocks": [] }))
    );
}

#[tokio::test]
async fn test_update_published_data() {
    let (backing, client) = start().await;
    let doc = json!({
        "version": "1.0",
        "blocks": [{ "id": "h1", "type": "heading", "order": 0,
                     "props": { "text": "Hi", "level": 1, "align": "left" } }]
    });

    let funnel = client.update_published_data("f1", doc.clone()).await.unwrap();
    assert_eq!(funnel.published_data, Some(doc.clone()));
    assert_eq!(backing.get("f1").await.unwrap().published_data, Some(doc));
}

#[tokio::test]
async fn test_rejected_document_maps_to_status() {
    let (_, client) = start().await;

    let err = client
        .update_published_data("f1", json!({ "version": "9.9", "blocks": [] }))
        .await
        .unwrap_err();
    match err {
        StoreError::Status { status, message } => {
            assert_eq!(status, 400);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_find_by_slug() {
    let (_, client) = start().await;

    assert_eq!(client.find_by_slug("/lp/spring/").await.unwrap().id, "f1");
    assert!(client.find_by_slug("lp/autumn").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_create_publish_and_list() {
    let (_, client) = start().await;

    let created = client
        .create(Funnel::new("f2", "Autumn", "autumn"))
        .await
        .unwrap();
    assert_eq!(created.id, "f2");
    assert!(!created.is_published);

    let err = client
        .create(Funnel::new("f3", "Again", "autumn"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::SlugTaken(slug) if slug == "autumn"));

    let published = client.set_published("f2", true).await.unwrap();
    assert!(published.is_published);

    let ids: Vec<String> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|funnel| funnel.id)
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"f1".to_string()));
    assert!(ids.contains(&"f2".to_string()));
}
