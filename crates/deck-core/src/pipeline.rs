//! Pipeline orchestrator: runs the full conversion.
//!
//! The pipeline runs in four phases:
//!   Phase 1 (0-40%): Question reader → questions + answer key
//!   Phase 2 (40-80%): Image reader → image catalog (skipped without an appendix)
//!   Phase 3 (80-90%): Assembly into deck rows
//!   Phase 4 (90-100%): Deck writer → output file

use std::path::Path;

use log::info;

use crate::assemble::assemble;
use crate::error::{DeckError, Result};
use crate::options::DeckOptions;
use crate::plugin::{DeckWriter, ImageReader, ProgressReporter, QuestionReader};
use crate::record::ImageCatalog;

/// The conversion pipeline orchestrator.
pub struct Pipeline {
    question_reader: Box<dyn QuestionReader>,
    image_reader: Option<Box<dyn ImageReader>>,
    writer: Box<dyn DeckWriter>,
    progress_reporter: Option<ProgressReporter>,
}

impl Pipeline {
    pub fn new(question_reader: Box<dyn QuestionReader>, writer: Box<dyn DeckWriter>) -> Self {
        Self {
            question_reader,
            image_reader: None,
            writer,
            progress_reporter: None,
        }
    }

    pub fn set_image_reader(&mut self, reader: Box<dyn ImageReader>) {
        self.image_reader = Some(reader);
    }

    /// Set a progress reporter callback.
    pub fn set_progress_reporter(&mut self, reporter: ProgressReporter) {
        self.progress_reporter = Some(reporter);
    }

    /// Run the full conversion. Intermediate files live in a temporary
    /// directory that is removed on every exit path.
    pub fn run(&self, questions_pdf: &Path, output_path: &Path, options: &DeckOptions) -> Result<()> {
        options.validate()?;
        self.report_progress(0.0, "Starting conversion...");

        let work_dir = tempfile::TempDir::new()?;

        // Phase 1: Questions
        info!("Running {}...", self.question_reader.name());
        self.report_progress(0.01, &format!("Running {}", self.question_reader.name()));
        let bank = self
            .question_reader
            .read(questions_pdf, work_dir.path(), options)?;
        info!(
            "Read {} questions and {} answer-key entries",
            bank.questions.len(),
            bank.answers.len()
        );
        self.report_progress(0.40, "Questions extracted");

        // Phase 2: Images
        let catalog = match (&self.image_reader, &options.pictures) {
            (Some(reader), Some(source)) => {
                info!("Running {}...", reader.name());
                self.report_progress(0.41, &format!("Running {}", reader.name()));
                let catalog = reader.read(source, work_dir.path(), options)?;
                info!(
                    "Catalogued {} images in {}",
                    catalog.len(),
                    source.output_dir.display()
                );
                catalog
            }
            (None, Some(_)) => {
                return Err(DeckError::Pipeline(
                    "An image appendix was given but no image reader is configured".to_string(),
                ));
            }
            (_, None) => {
                info!("No image appendix, skipping images");
                ImageCatalog::new()
            }
        };
        self.report_progress(0.80, "Images extracted");

        // Phase 3: Assembly
        let rows = assemble(&bank.questions, &bank.answers, &catalog, &options.image_prefix)?;
        self.report_progress(0.90, "Rows assembled");

        // Phase 4: Output
        info!("Running {}...", self.writer.name());
        self.writer.write(&rows, output_path, options)?;

        self.report_progress(1.0, "Conversion complete");
        info!("{} rows written to {}", rows.len(), output_path.display());

        Ok(())
    }

    fn report_progress(&self, fraction: f64, message: &str) {
        if let Some(ref reporter) = self.progress_reporter {
            reporter(fraction, message);
        }
    }
}

/// Builder for constructing a pipeline.
pub struct PipelineBuilder {
    question_reader: Option<Box<dyn QuestionReader>>,
    image_reader: Option<Box<dyn ImageReader>>,
    writer: Option<Box<dyn DeckWriter>>,
    progress_reporter: Option<ProgressReporter>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            question_reader: None,
            image_reader: None,
            writer: None,
            progress_reporter: None,
        }
    }

    pub fn questions(mut self, reader: Box<dyn QuestionReader>) -> Self {
        self.question_reader = Some(reader);
        self
    }

    pub fn images(mut self, reader: Box<dyn ImageReader>) -> Self {
        self.image_reader = Some(reader);
        self
    }

    pub fn writer(mut self, writer: Box<dyn DeckWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn progress_reporter(mut self, reporter: ProgressReporter) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    pub fn build(self) -> Result<Pipeline> {
        let question_reader = self
            .question_reader
            .ok_or_else(|| DeckError::Pipeline("No question reader specified".to_string()))?;
        let writer = self
            .writer
            .ok_or_else(|| DeckError::Pipeline("No deck writer specified".to_string()))?;

        let mut pipeline = Pipeline::new(question_reader, writer);
        if let Some(reader) = self.image_reader {
            pipeline.set_image_reader(reader);
        }
        if let Some(reporter) = self.progress_reporter {
            pipeline.set_progress_reporter(reporter);
        }
        Ok(pipeline)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
