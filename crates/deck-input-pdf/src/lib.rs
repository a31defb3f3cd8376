//! PDF readers: questions and answer key from the question bank, figures from
//! the picture appendix.

pub mod answer_key;
pub mod images;
pub mod questions;
pub mod tools;

use std::path::Path;

use deck_core::error::Result;
use deck_core::options::{DeckOptions, PicturesSource};
use deck_core::plugin::{ImageReader, QuestionReader};
use deck_core::record::{ImageCatalog, QuestionBank};
use deck_utils::encoding;

use crate::answer_key::AnswerKeyScanner;

pub struct PdfQuestionReader;

impl QuestionReader for PdfQuestionReader {
    fn name(&self) -> &str {
        "PDF Question Reader"
    }

    fn read(&self, pdf: &Path, work_dir: &Path, options: &DeckOptions) -> Result<QuestionBank> {
        log::info!("Reading question bank: {}", pdf.display());

        let scanner = AnswerKeyScanner::new(options)?;
        let decompressed = work_dir.join("questions.pdf");
        tools::decompress_pdf(pdf, &decompressed, options)?;
        let content = encoding::decode_latin1(&std::fs::read(&decompressed)?);
        let answers = scanner.scan(&content)?;

        let text_path = work_dir.join("questions.txt");
        tools::pdf_to_text(pdf, &text_path, true, options)?;
        let (text, enc) = encoding::decode_to_utf8(&std::fs::read(&text_path)?);
        log::debug!("Question text decoded as {}", enc);
        let questions = questions::parse_questions(&text)?;

        Ok(QuestionBank { questions, answers })
    }
}

pub struct PdfImageReader;

impl ImageReader for PdfImageReader {
    fn name(&self) -> &str {
        "PDF Image Reader"
    }

    fn read(
        &self,
        source: &PicturesSource,
        work_dir: &Path,
        options: &DeckOptions,
    ) -> Result<ImageCatalog> {
        log::info!("Reading picture appendix: {}", source.pdf.display());

        let text_path = work_dir.join("images.txt");
        tools::pdf_to_text(&source.pdf, &text_path, false, options)?;
        let (text, _) = encoding::decode_to_utf8(&std::fs::read(&text_path)?);
        let figures = images::figure_numbers(&text);
        log::info!("Picture appendix lists {} figures", figures.len());

        let staging = work_dir.join("images");
        std::fs::create_dir_all(&staging)?;
        tools::extract_images(&source.pdf, &staging, options)?;

        images::build_catalog(&staging, &source.output_dir, &figures, options)
    }
}
