//! Intermediate representation shared by the extractors and the assembler.

use std::collections::BTreeMap;

/// Number of answer options every question carries (A, B, C, D).
pub const OPTION_COUNT: usize = 4;

/// Option markers in document order.
pub const OPTION_LETTERS: [char; OPTION_COUNT] = ['A', 'B', 'C', 'D'];

/// One parsed exam question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Exam chapter, counted from 1 in document order.
    pub section: u32,
    /// Question number as printed, restarting in every section.
    pub local_number: u32,
    /// Display text, already prefixed with `"<section>.<local_number>. "`.
    pub text: String,
    /// `Abbildung` number referenced by the question, if any.
    pub image_ref: Option<u32>,
    /// Option texts in A/B/C/D order.
    pub options: [String; OPTION_COUNT],
}

impl QuestionRecord {
    /// The `<section>.<local_number>` label used in diagnostics.
    pub fn label(&self) -> String {
        format!("{}.{}", self.section, self.local_number)
    }
}

/// Index of the correct option (0..4) for each question, in document order.
pub type AnswerKey = Vec<usize>;

/// Everything recovered from the question-bank PDF.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pub questions: Vec<QuestionRecord>,
    pub answers: AnswerKey,
}

/// File stem for an illustration, e.g. `DHV-Fragen-Abbildung-007`.
pub fn image_stem(prefix: &str, image: u32) -> String {
    format!("{}-{:03}", prefix, image)
}

/// Maps an `Abbildung` number to the extension of its output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCatalog {
    suffixes: BTreeMap<u32, String>,
}

impl ImageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: u32, suffix: impl Into<String>) {
        self.suffixes.insert(image, suffix.into());
    }

    pub fn suffix(&self, image: u32) -> Option<&str> {
        self.suffixes.get(&image).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

/// A flashcard row: question, correct answer, then the three distractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub question: String,
    pub correct: String,
    pub incorrect: [String; OPTION_COUNT - 1],
}

impl OutputRow {
    /// Fields in column order.
    pub fn fields(&self) -> [&str; OPTION_COUNT + 1] {
        [
            &self.question,
            &self.correct,
            &self.incorrect[0],
            &self.incorrect[1],
            &self.incorrect[2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_stem_pads_to_three_digits() {
        assert_eq!(image_stem("DHV-Fragen-Abbildung", 3), "DHV-Fragen-Abbildung-003");
        assert_eq!(image_stem("DHV-Fragen-Abbildung", 123), "DHV-Fragen-Abbildung-123");
        assert_eq!(image_stem("x", 1234), "x-1234");
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = ImageCatalog::new();
        assert!(catalog.is_empty());
        catalog.insert(3, "png");
        catalog.insert(1, "jpg");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.suffix(3), Some("png"));
        assert_eq!(catalog.suffix(1), Some("jpg"));
        assert_eq!(catalog.suffix(2), None);
    }

    #[test]
    fn test_output_row_fields_order() {
        let row = OutputRow {
            question: "Q".into(),
            correct: "right".into(),
            incorrect: ["w1".into(), "w2".into(), "w3".into()],
        };
        assert_eq!(row.fields(), ["Q", "right", "w1", "w2", "w3"]);
    }
}
