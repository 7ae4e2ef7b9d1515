use criterion::{black_box, criterion_group, criterion_main, Criterion};
use funnel_model::{decode_document, PublishedData};
use funnel_renderer::{render_authoring, render_public, AuthoringView, RenderOptions};
use serde_json::json;

fn landing_page(copies: usize) -> PublishedData {
    let mut blocks = Vec::new();
    for i in 0..copies {
        let base = i * 5;
        blocks.push(json!({ "id": format!("h{}", i), "type": "heading", "order": base,
            "props": { "text": "New Year Sale", "level": 1, "align": "center" } }));
        blocks.push(json!({ "id": format!("v{}", i), "type": "video", "order": base + 1,
            "props": { "url": "https://www.youtube.com/embed/abc", "title": "Intro", "aspectRatio": "16:9" } }));
        blocks.push(json!({ "id": format!("b{}", i), "type": "button", "order": base + 2,
            "props": { "text": "Join", "url": "https://line.me/x", "variant": "primary", "size": "lg" } }));
        blocks.push(json!({ "id": format!("i{}", i), "type": "image", "order": base + 3,
            "content": { "imageUrl": "https://cdn.test/banner.png", "caption": "Banner" } }));
        blocks.push(json!({ "id": format!("c{}", i), "type": "code", "order": base + 4,
            "content": { "code": "console.log('hi')", "language": "javascript" } }));
    }

    decode_document(json!({ "version": "1.0", "blocks": blocks }))
        .unwrap()
        .document
}

fn render_small_page(c: &mut Criterion) {
    let doc = landing_page(1);

    c.bench_function("render_public_small", |b| {
        b.iter(|| render_public(black_box(&doc), RenderOptions::default()))
    });
}

fn render_large_page(c: &mut Criterion) {
    let doc = landing_page(100);

    c.bench_function("render_public_large", |b| {
        b.iter(|| render_public(black_box(&doc), RenderOptions::default()))
    });
}

fn render_authoring_page(c: &mut Criterion) {
    let doc = landing_page(20);
    let view = AuthoringView::new();
    let selected = doc.blocks[3].id().clone();

    c.bench_function("render_authoring_medium", |b| {
        b.iter(|| {
            render_authoring(
                black_box(&doc.blocks),
                Some(&selected),
                &view,
                RenderOptions::fragment(),
            )
        })
    });
}

criterion_group!(
    benches,
    render_small_page,
    render_large_page,
    render_authoring_page
);
criterion_main!(benches);
