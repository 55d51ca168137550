//! Benchmarks for docscrub rendering and cleaning performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks test the cleaning pipeline at various document sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docscrub::{Cleaner, CleaningLevel, Document, Paragraph, RenderOptions, Table};

/// Creates a synthetic call-script document with the given number of sections.
fn create_test_document(section_count: usize) -> Document {
    let mut doc = Document::with_title("Скрипт звонка [Бенчмарк]");
    doc.push_paragraph(Paragraph::text("Конфиденциально"));
    doc.push_paragraph(Paragraph::text("Автор: Иванов И.И."));
    doc.push_paragraph(Paragraph::text("Версия: 1.0"));
    doc.push_paragraph(Paragraph::text("Термины:\nЛид - потенциальный клиент"));

    for i in 0..section_count {
        doc.push_paragraph(Paragraph::heading(1, format!("Этап {}", i)));
        doc.push_paragraph(Paragraph::text(format!(
            "Здравствуйте, __имя__! Раздел {} описан в https://docs.google.com/document/d/id{}/edit. \
             Переведите сделку на этап \"Презентация\" в Битрикс24 [см. регламент].",
            i, i
        )));
        doc.push_table(Table::from_text_rows([
            vec!["Вопрос".to_string(), "Ответ".to_string()],
            vec![format!("Бюджет {}", i), String::new()],
            vec![String::new(), String::new()],
        ]));
    }

    doc
}

/// Benchmark the full cleaning pipeline per level.
fn bench_cleaning_levels(c: &mut Criterion) {
    let cleaner = Cleaner::default();

    for level in CleaningLevel::ALL {
        let mut group = c.benchmark_group(format!("clean_{}", level));

        for section_count in [10, 100, 500].iter() {
            let doc = create_test_document(*section_count);
            let markdown = docscrub::render_document(&doc, &RenderOptions::default()).to_markdown();

            group.throughput(Throughput::Bytes(markdown.len() as u64));
            group.bench_with_input(
                BenchmarkId::new("sections", section_count),
                &markdown,
                |b, markdown| {
                    b.iter(|| cleaner.clean_level(black_box(markdown), level));
                },
            );
        }

        group.finish();
    }
}

/// Benchmark document rendering to Markdown.
fn bench_markdown_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("markdown_rendering");

    for section_count in [10, 100, 500].iter() {
        let document = create_test_document(*section_count);

        group.bench_with_input(
            BenchmarkId::new("sections", section_count),
            &document,
            |b, doc| {
                b.iter(|| {
                    let options = RenderOptions::default();
                    let _ = docscrub::render_document(black_box(doc), &options);
                });
            },
        );
    }

    group.finish();
}

/// Benchmark building the default rule registry.
fn bench_registry(c: &mut Criterion) {
    c.bench_function("registry_default", |b| {
        b.iter(docscrub::PatternRegistry::default);
    });
}

criterion_group!(
    benches,
    bench_registry,
    bench_markdown_rendering,
    bench_cleaning_levels,
);
criterion_main!(benches);
