//! Integration tests for edit sessions against a funnel store

use funnel_editor::{BlockFactory, Command, EditSession, EditorError, LoadOutcome, PersistenceAdapter};
use funnel_model::{decode_document, BlockId, BlockKind, Funnel, PublishedData};
use funnel_store::{FunnelStore, MemoryFunnelStore};
use serde_json::json;
use std::sync::Arc;

fn adapter(store: &Arc<MemoryFunnelStore>) -> PersistenceAdapter {
    PersistenceAdapter::new(store.clone())
}

fn stored_document() -> serde_json::Value {
    json!({
        "version": "1.0",
        "blocks": [
            { "id": "h1", "type": "heading", "order": 0,
              "props": { "text": "Welcome", "level": 1, "align": "center" } },
            { "id": "b1", "type": "button", "order": 1,
              "props": { "text": "Go", "url": "https://x.test", "variant": "primary", "size": "md" } },
            { "id": "i1", "type": "image", "order": 2,
              "content": { "imageUrl": "https://x.test/a.png" } }
        ],
        "theme": { "primaryColor": "#0044ff" }
    })
}

#[tokio::test]
async fn test_nonexistent_funnel_opens_empty_and_clean() {
    let store = Arc::new(MemoryFunnelStore::new());
    let session = EditSession::open("missing", adapter(&store)).await;

    assert_eq!(session.store().snapshot(), PublishedData::empty());
    assert!(!session.is_dirty());
    assert!(session.load_outcome().is_degraded());
}

#[tokio::test]
async fn test_new_funnel_bootstraps() {
    let store = Arc::new(MemoryFunnelStore::with_funnels([Funnel::new("f1", "New", "new")]));
    let session = EditSession::open("f1", adapter(&store)).await;

    assert_eq!(session.load_outcome(), &LoadOutcome::Bootstrapped);
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_store_outage_degrades() {
    let store = Arc::new(MemoryFunnelStore::with_funnels([Funnel::new("f1", "A", "a")]));
    store.set_fail_reads(true);

    let session = EditSession::open("f1", adapter(&store)).await;
    assert!(matches!(session.load_outcome(), LoadOutcome::Degraded { .. }));
    assert!(session.store().is_empty());
}

#[tokio::test]
async fn test_load_then_save_round_trips() -> anyhow::Result<()> {
    let mut funnel = Funnel::new("f1", "Spring", "spring");
    funnel.published_data = Some(stored_document());
    let store = Arc::new(MemoryFunnelStore::with_funnels([funnel]));

    let mut session = EditSession::open("f1", adapter(&store)).await;
    assert_eq!(session.load_outcome(), &LoadOutcome::Loaded);
    session.save().await?;

    let saved = store.get("f1").await?.published_data.unwrap();
    assert_eq!(saved, stored_document());
    Ok(())
}

#[tokio::test]
async fn test_save_failure_keeps_dirty() -> anyhow::Result<()> {
    let store = Arc::new(MemoryFunnelStore::with_funnels([Funnel::new("f1", "A", "a")]));
    let mut session = EditSession::open("f1", adapter(&store)).await;

    let mut factory = BlockFactory::seeded(11);
    let block = factory.create_for(session.store(), BlockKind::Heading);
    session.apply(Command::AddBlock { block })?;
    assert!(session.is_dirty());

    store.set_fail_writes(true);
    let err = session.save().await.unwrap_err();
    assert!(matches!(err, EditorError::Save(_)));
    assert!(session.is_dirty());

    // Retry once the store is back
    store.set_fail_writes(false);
    session.save().await?;
    assert!(!session.is_dirty());

    let stored = store.get("f1").await?.published_data.unwrap();
    let decoded = decode_document(stored)?;
    assert_eq!(decoded.document.blocks.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_blocks_are_reported_on_open() {
    let mut funnel = Funnel::new("f1", "A", "a");
    funnel.published_data = Some(json!({
        "version": "1.0",
        "blocks": [
            { "id": "x", "type": "carousel", "order": 0, "props": {} },
            { "id": "c1", "type": "code", "order": 1, "content": { "code": "ls" } }
        ]
    }));
    let store = Arc::new(MemoryFunnelStore::with_funnels([funnel]));

    let session = EditSession::open("f1", adapter(&store)).await;
    assert_eq!(session.store().block_ids(), vec![BlockId::new("c1")]);
    assert_eq!(session.store().blocks()[0].order(), 0);
    assert_eq!(session.skipped_blocks().len(), 1);
    assert_eq!(session.skipped_blocks()[0].block_type.as_deref(), Some("carousel"));
}

#[tokio::test]
async fn test_commands_from_json() -> anyhow::Result<()> {
    let mut funnel = Funnel::new("f1", "Spring", "spring");
    funnel.published_data = Some(stored_document());
    let store = Arc::new(MemoryFunnelStore::with_funnels([funnel]));
    let mut session = EditSession::open("f1", adapter(&store)).await;

    let commands: Vec<Command> = serde_json::from_value(json!([
        { "command": "selectBlock", "id": "b1" },
        { "command": "updateBlock", "id": "b1", "patch": { "type": "button", "variant": "outline" } },
        { "command": "reorderBlocks", "ids": ["b1", "h1", "i1"] },
        { "command": "deleteBlock", "id": "i1" }
    ]))?;
    for command in commands {
        session.apply(command)?;
    }

    assert_eq!(
        session.store().block_ids(),
        vec![BlockId::new("b1"), BlockId::new("h1")]
    );
    assert_eq!(session.store().selected(), Some(&BlockId::new("b1")));
    session.save().await?;

    let saved = store.get("f1").await?.published_data.unwrap();
    assert_eq!(saved["blocks"][0]["props"]["variant"], "outline");
    assert_eq!(saved["theme"]["primaryColor"], "#0044ff");
    Ok(())
}

#[tokio::test]
async fn test_reload_discards_local_changes() -> anyhow::Result<()> {
    let mut funnel = Funnel::new("f1", "Spring", "spring");
    funnel.published_data = Some(stored_document());
    let store = Arc::new(MemoryFunnelStore::with_funnels([funnel]));
    let mut session = EditSession::open("f1", adapter(&store)).await;

    session.apply(Command::DeleteBlock { id: BlockId::new("h1") })?;
    assert!(session.is_dirty());

    session.reload().await;
    assert!(!session.is_dirty());
    assert_eq!(session.store().len(), 3);
    Ok(())
}
