//! Benchmarks for the question parser and the answer-key scan.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use deck_core::options::DeckOptions;
use deck_input_pdf::answer_key::AnswerKeyScanner;
use deck_input_pdf::questions::parse_questions;

/// Generate `pdftotext -layout` style output with N questions per section.
fn generate_questions(sections: u32, per_section: u32) -> String {
    let mut text = String::new();
    for s in 0..sections {
        text.push_str(&format!("\x0c                 Kapitel {}\n\n", s + 1));
        for n in 1..=per_section {
            let figure = if n % 7 == 0 {
                format!("Abbildung {}: ", s * per_section + n)
            } else {
                String::new()
            };
            text.push_str(&format!(
                "{})   {}Welche Aussage über die    Thermik ist\n     richtig?\n\
                 A)   Thermik entsteht durch ungleichmäßige Erwärmung\n\
                 B)   Thermik gibt es nur im Winter\n\
                 C)   Thermik entsteht über Wasser stärker als über\n     Fels\n\
                 D)   Keine der Antworten\n\n",
                n, figure
            ));
        }
    }
    text
}

/// Generate decompressed page content with one checkbox group per question.
fn generate_content(questions: usize) -> String {
    let mut content = String::from("BT /F1 9 Tf 56.69 770.00 Td (Fragenkatalog) Tj ET\n");
    for q in 0..questions {
        for slot in 0..4 {
            let mark = if slot == q % 4 { 'B' } else { 'S' };
            content.push_str(&format!(
                "0.5 w\n42.52 {}.{:02} 8.50 -8.50 re {}\n",
                700 - slot * 14,
                q % 100,
                mark
            ));
        }
    }
    content
}

fn bench_parse_questions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Questions");

    for per_section in [50u32, 200] {
        let text = generate_questions(6, per_section);
        group.bench_function(format!("parse_{}_questions", 6 * per_section), |b| {
            b.iter(|| {
                let records = parse_questions(black_box(&text)).unwrap();
                black_box(records);
            })
        });
    }

    group.finish();
}

fn bench_answer_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("AnswerKey");
    let scanner = AnswerKeyScanner::new(&DeckOptions::default()).unwrap();

    for n in [300usize, 1200] {
        let content = generate_content(n);
        group.bench_function(format!("scan_{}_groups", n), |b| {
            b.iter(|| black_box(scanner.scan(black_box(&content)).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_questions, bench_answer_key);
criterion_main!(benches);
