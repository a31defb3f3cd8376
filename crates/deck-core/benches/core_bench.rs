//! Benchmarks for row assembly and field escaping.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use deck_core::assemble::{assemble, escape};
use deck_core::record::{ImageCatalog, QuestionRecord};

fn make_questions(n: u32) -> (Vec<QuestionRecord>, Vec<usize>, ImageCatalog) {
    let mut catalog = ImageCatalog::new();
    let mut questions = Vec::new();
    let mut answers = Vec::new();
    for i in 0..n {
        let image_ref = if i % 10 == 0 {
            catalog.insert(i, "png");
            Some(i)
        } else {
            None
        };
        questions.push(QuestionRecord {
            section: i / 100 + 1,
            local_number: i % 100 + 1,
            text: format!(
                "{}.{}. Welche Aussage zum \"Abreißen der Strömung\" ist richtig?",
                i / 100 + 1,
                i % 100 + 1
            ),
            image_ref,
            options: [
                "Die Strömung reißt bei zu hohem Anstellwinkel ab.".to_string(),
                "Die Strömung reißt bei zu geringer Geschwindigkeit nie ab.".to_string(),
                "Ein \\\"Strömungsabriss\\\" ist ungefährlich.".to_string(),
                "Keine der Aussagen ist richtig.".to_string(),
            ],
        });
        answers.push((i % 4) as usize);
    }
    (questions, answers, catalog)
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("Assemble");

    for n in [100u32, 1000] {
        let (questions, answers, catalog) = make_questions(n);
        group.bench_function(format!("assemble_{}_questions", n), |b| {
            b.iter(|| {
                let rows = assemble(&questions, &answers, &catalog, "DHV-Fragen-Abbildung").unwrap();
                black_box(rows);
            })
        });
    }

    group.finish();
}

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("Escape");
    let text = "Er sagte \"Startabbruch!\" \\ und drehte ab. ".repeat(20);

    group.bench_function("escape_800_chars", |b| {
        b.iter(|| black_box(escape(black_box(&text))))
    });

    group.finish();
}

criterion_group!(benches, bench_assemble, bench_escape);
criterion_main!(benches);
