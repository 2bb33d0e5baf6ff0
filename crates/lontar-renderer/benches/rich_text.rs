//! Benchmarks for rich text rendering.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lontar_renderer::{ContentBlock, GalleryIds, RichTextRenderer};
use lontar_resolver::{Language, Localized};
use serde_json::{Value, json};

/// Generate a body with headings, marked paragraphs, lists and media.
fn generate_blocks(sections: usize, paragraphs_per_section: usize) -> Vec<Value> {
    let mut blocks = Vec::with_capacity(sections * (paragraphs_per_section + 5));
    for i in 0..sections {
        blocks.push(json!({
            "_type": "block",
            "style": "h2",
            "children": [{"text": format!("Bagian {i}")}]
        }));
        for j in 0..paragraphs_per_section {
            blocks.push(json!({
                "_type": "block",
                "children": [
                    {"text": format!("Paragraf {j} di bagian {i} berisi "), "marks": []},
                    {"text": "teks tebal", "marks": ["strong"]},
                    {"text": " dan ", "marks": []},
                    {"text": "tautan", "marks": ["l1", "em"]}
                ],
                "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com/?a=1&b=2"}]
            }));
        }
        for kind in ["bullet", "bullet", "number"] {
            blocks.push(json!({
                "_type": "block",
                "listItem": kind,
                "children": [{"text": "Butir daftar"}]
            }));
        }
        blocks.push(json!({
            "_type": "image",
            "asset": {"_ref": "image-abc123-1200x800-jpg"},
            "alt": {"id": "Foto", "en": "Photo"},
            "caption": {"id": "Keterangan"}
        }));
        blocks.push(json!({
            "_type": "gallery",
            "layout": "slideshow",
            "images": [
                {"asset": {"_ref": "image-a1-800x600-png"}},
                {"asset": {"_ref": "image-a2-800x600-png"}},
                {"asset": {"_ref": "image-a3-800x600-png"}}
            ]
        }));
    }
    blocks
}

fn decode(values: Vec<Value>) -> Vec<ContentBlock> {
    values.into_iter().map(ContentBlock::from_value).collect()
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = RichTextRenderer::new(Language::En).with_cdn_base("https://cdn.example.com");
    let mut group = c.benchmark_group("render_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let blocks = decode(generate_blocks(sections, paragraphs));
        group.throughput(Throughput::Elements(blocks.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("blocks", format!("{sections}s_{paragraphs}p")),
            &blocks,
            |b, blocks| b.iter(|| renderer.render(blocks)),
        );
    }

    group.finish();
}

fn bench_decode_blocks(c: &mut Criterion) {
    let body = Value::Array(generate_blocks(20, 3));
    let source = body.to_string();

    c.bench_function("decode_bilingual_body", |b| {
        b.iter(|| {
            let body: Localized<Vec<ContentBlock>> =
                serde_json::from_str(&format!(r#"{{"id": {source}}}"#)).unwrap();
            body
        });
    });
}

fn bench_gallery_ids(c: &mut Criterion) {
    let blocks = decode(generate_blocks(20, 1));
    let sequential = RichTextRenderer::new(Language::Id);
    let random = RichTextRenderer::new(Language::Id).with_gallery_ids(GalleryIds::Random);

    let mut group = c.benchmark_group("gallery_ids");
    group.bench_function("sequential", |b| b.iter(|| sequential.render(&blocks)));
    group.bench_function("random", |b| b.iter(|| random.render(&blocks)));
    group.finish();
}

criterion_group!(
    benches,
    bench_render_varying_sizes,
    bench_decode_blocks,
    bench_gallery_ids
);
criterion_main!(benches);
