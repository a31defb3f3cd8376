//! Runs the PDF readers against shell scripts standing in for qpdf and poppler.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use deck_core::error::DeckError;
use deck_core::options::{DeckOptions, PicturesSource};
use deck_core::plugin::{ImageReader, QuestionReader};
use deck_input_pdf::{PdfImageReader, PdfQuestionReader};

const QUESTIONS_TEXT: &str = "\
                    DHV Fragenkatalog A-Schein

1)   Abbildung 3: What is shown?
A)   Cat
B)   Dog
C)   Bird
D)   Fish

2)   Which way does
     the wind blow?
A)   Up
B)   Down
C)   Left
D)   Right

\x0c";

const CONTENT: &str = "\
%PDF-1.4
q 0.5 w
42.52 700.00 8.50 -8.50 re S
42.52 686.00 8.50 -8.50 re B
42.52 672.00 8.50 -8.50 re S
42.52 658.00 8.50 -8.50 re S
42.52 600.00 8.50 -8.50 re S
42.52 586.00 8.50 -8.50 re S
42.52 572.00 8.50 -8.50 re S
42.52 558.00 8.50 -8.50 re B
Q
";

/// Write an executable script into `dir`.
fn script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().to_string()
}

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    options: DeckOptions,
}

fn fixture(qpdf_exit: i32) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    fs::write(root.join("content.txt"), CONTENT).unwrap();
    fs::write(root.join("questions.txt"), QUESTIONS_TEXT).unwrap();
    fs::write(root.join("images.txt"), "Abbildung 3\nAbbildung 4\n").unwrap();
    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([9, 9, 9]));
    img.save(root.join("figure.png")).unwrap();

    let mut options = DeckOptions::default();
    // qpdf <flags> <in> <out>
    options.tools.qpdf = script(
        &root,
        "qpdf",
        &format!(
            "for last; do :; done\ncp '{}' \"$last\"\nexit {}",
            root.join("content.txt").display(),
            qpdf_exit
        ),
    );
    // pdftotext [-layout] <in> <out>
    options.tools.pdftotext = script(
        &root,
        "pdftotext",
        &format!(
            "for last; do :; done\nif [ \"$1\" = \"-layout\" ]; then cp '{q}' \"$last\"; else cp '{i}' \"$last\"; fi",
            q = root.join("questions.txt").display(),
            i = root.join("images.txt").display()
        ),
    );
    // pdfimages -all <in> <prefix>
    options.tools.pdfimages = script(
        &root,
        "pdfimages",
        &format!(
            "for last; do :; done\ncp '{f}' \"$last-000.png\"\nhead -c 78247 /dev/zero > \"$last-001.png\"\ncp '{f}' \"$last-002.png\"",
            f = root.join("figure.png").display()
        ),
    );

    Fixture {
        _dir: dir,
        root,
        options,
    }
}

#[test]
fn question_reader_combines_answer_key_and_text() {
    let fx = fixture(0);
    let work = tempfile::tempdir().unwrap();

    let bank = PdfQuestionReader
        .read(&fx.root.join("in.pdf"), work.path(), &fx.options)
        .unwrap();

    assert_eq!(bank.answers, vec![1, 3]);
    assert_eq!(bank.questions.len(), 2);
    assert_eq!(bank.questions[0].text, "1.1. What is shown?");
    assert_eq!(bank.questions[0].image_ref, Some(3));
    assert_eq!(bank.questions[1].text, "1.2. Which way does the wind blow?");
    assert_eq!(bank.questions[1].options[3], "Right");
}

#[test]
fn qpdf_warning_exit_is_accepted_by_default() {
    let fx = fixture(3);
    let work = tempfile::tempdir().unwrap();
    let bank = PdfQuestionReader
        .read(&fx.root.join("in.pdf"), work.path(), &fx.options)
        .unwrap();
    assert_eq!(bank.answers.len(), 2);
}

#[test]
fn qpdf_warning_exit_can_be_rejected() {
    let mut fx = fixture(3);
    fx.options.accept_qpdf_warnings = false;
    let work = tempfile::tempdir().unwrap();
    let err = PdfQuestionReader
        .read(&fx.root.join("in.pdf"), work.path(), &fx.options)
        .unwrap_err();
    assert!(matches!(err, DeckError::Tool { .. }));
}

#[test]
fn qpdf_failure_is_fatal() {
    let fx = fixture(2);
    let work = tempfile::tempdir().unwrap();
    let err = PdfQuestionReader
        .read(&fx.root.join("in.pdf"), work.path(), &fx.options)
        .unwrap_err();
    assert!(matches!(err, DeckError::Tool { .. }));
}

#[test]
fn image_reader_filters_and_renames() {
    let fx = fixture(0);
    let work = tempfile::tempdir().unwrap();
    let out = fx.root.join("pictures");
    let source = PicturesSource {
        pdf: fx.root.join("pictures.pdf"),
        output_dir: out.clone(),
    };

    let catalog = PdfImageReader.read(&source, work.path(), &fx.options).unwrap();

    assert_eq!(catalog.suffix(3), Some("png"));
    assert_eq!(catalog.suffix(4), Some("png"));
    assert!(out.join("DHV-Fragen-Abbildung-003.png").is_file());
    assert!(out.join("DHV-Fragen-Abbildung-004.png").is_file());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
}
