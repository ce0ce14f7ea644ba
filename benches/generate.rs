//! Benchmarks for JSON-LD generation and head rendering

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use webpage_head::{
    GenerateOptions, OpenGraph, SeoHead, SiteConfig, StructuredData, TypedSchemaBuilder,
};

fn product() -> Value {
    json!({
        "type": "Product",
        "name": "EcoChatka 70",
        "description": "A compact garden house",
        "image": ["https://example.com/1.jpg", "https://example.com/2.jpg"],
        "brand": "GreenHaus",
        "offers": [{
            "price": "129900",
            "priceCurrency": "PLN",
            "availability": "InStock",
            "url": "https://example.com/p",
            "priceValidUntil": "2026-12-31"
        }],
        "aggregateRating": {"ratingValue": 4.8, "reviewCount": 37}
    })
}

fn breadcrumb_items(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| json!({"name": format!("Level {i}"), "item": format!("https://example.com/{i}")}))
        .collect();
    json!({"type": "BreadcrumbList", "items": items})
}

fn bench_core_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_builder");
    let sd = StructuredData::new(SiteConfig::new().locale("pl_PL"));
    let options = GenerateOptions::default();

    let product = product();
    group.bench_function("product", |b| {
        b.iter(|| sd.generate(black_box(&product), &options))
    });

    let invalid = json!({"type": "Organization", "name": "ACME", "url": "not a url", "logo": "nope"});
    group.bench_function("organization_with_warnings", |b| {
        b.iter(|| sd.generate(black_box(&invalid), &options))
    });

    group.finish();
}

fn bench_list_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("breadcrumb_list");
    let sd = StructuredData::new(SiteConfig::new());
    let options = GenerateOptions::default();

    for count in [3, 10, 100] {
        let data = breadcrumb_items(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("items", count), &data, |b, data| {
            b.iter(|| sd.generate(black_box(data), &options))
        });
    }

    group.finish();
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("modes");
    let options = GenerateOptions::default();
    let product = product();

    let typed = StructuredData::new(SiteConfig::new()).with_strategy(TypedSchemaBuilder::new());
    group.bench_function("typed_strategy", |b| {
        b.iter(|| typed.generate(black_box(&product), &options))
    });

    let sd = StructuredData::new(SiteConfig::new());
    let raw = json!({"schemas": [
        {"@type": "Organization", "name": "Test Org", "url": "https://example.com"},
        {"@type": "WebSite", "name": "Test Site", "url": "https://example.com"},
        {"@type": "Article", "headline": "Test Article", "author": {"@type": "Person", "name": "John"}},
        {"@type": "BreadcrumbList", "itemListElement": [{"@type": "ListItem", "position": 1, "name": "Home"}]}
    ]});
    group.bench_function("raw_graph", |b| {
        b.iter(|| sd.generate(black_box(&raw), &options))
    });

    group.finish();
}

fn bench_render_head(c: &mut Criterion) {
    let mut head = SeoHead::new(SiteConfig::new().locale("en_US").site_name("Example"));
    head.meta_mut()
        .title("Widgets", None)
        .description("All the widgets")
        .canonical("https://example.com/widgets")
        .og(OpenGraph::new().image("https://example.com/og.png"));
    head.assets_mut()
        .preload("/fonts/inter.woff2", "font", Some("anonymous"))
        .stylesheet("/app.css", None)
        .lazy_stylesheet("/late.css")
        .script("/app.js", true, false, &[]);
    head.hreflang_mut()
        .add_alternate("https://example.com/widgets", "en")
        .add_alternate("https://example.com/pl/widgets", "pl");

    c.bench_function("render_head", |b| {
        b.iter(|| black_box(&head).render_head(Some("https://example.com/widgets")))
    });
}

criterion_group!(
    benches,
    bench_core_builder,
    bench_list_sizes,
    bench_modes,
    bench_render_head,
);
criterion_main!(benches);
