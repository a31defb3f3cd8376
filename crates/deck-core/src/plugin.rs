//! Stage traits for the question reader, image reader, and deck writer.

use std::path::Path;

use crate::error::Result;
use crate::options::{DeckOptions, PicturesSource};
use crate::record::{ImageCatalog, OutputRow, QuestionBank};

/// Progress reporter callback type.
pub type ProgressReporter = Box<dyn Fn(f64, &str)>;

/// Reads questions and their answer key from the question-bank PDF.
pub trait QuestionReader {
    /// Human-readable name of this reader.
    fn name(&self) -> &str;

    /// Extract the questions and answer key.
    /// `work_dir` is a scratch directory removed after the run.
    fn read(&self, pdf: &Path, work_dir: &Path, options: &DeckOptions) -> Result<QuestionBank>;
}

/// Extracts the illustrations of the image appendix into the output directory.
pub trait ImageReader {
    fn name(&self) -> &str;

    /// Populate `source.output_dir` and return the catalog of written images.
    fn read(
        &self,
        source: &PicturesSource,
        work_dir: &Path,
        options: &DeckOptions,
    ) -> Result<ImageCatalog>;
}

/// Serializes assembled rows to the deck file.
pub trait DeckWriter {
    fn name(&self) -> &str;

    fn write(&self, rows: &[OutputRow], output_path: &Path, options: &DeckOptions) -> Result<()>;
}
