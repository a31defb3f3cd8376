//! Joins questions with the answer key and the image catalog into deck rows.

use crate::error::{DeckError, Result};
use crate::record::{image_stem, ImageCatalog, OutputRow, QuestionRecord, OPTION_COUNT};

/// Make text safe for a quoted deck field.
///
/// The source occasionally contains a stray pre-escaped quote, so every
/// backslash is dropped before quotes are escaped. Applying it twice gives
/// the same result as applying it once.
pub fn escape(text: &str) -> String {
    text.replace('\\', "").replace('"', "\\\"")
}

/// Build one row per question. Fails before producing anything when the
/// question count and answer-key length disagree.
///
/// Every referenced image must be in `catalog`; an empty catalog stands for
/// a run without the picture appendix.
pub fn assemble(
    questions: &[QuestionRecord],
    answers: &[usize],
    catalog: &ImageCatalog,
    image_prefix: &str,
) -> Result<Vec<OutputRow>> {
    if questions.len() != answers.len() {
        return Err(DeckError::CountMismatch {
            questions: questions.len(),
            answers: answers.len(),
        });
    }

    questions
        .iter()
        .zip(answers)
        .map(|(question, &correct)| assemble_row(question, correct, catalog, image_prefix))
        .collect()
}

fn assemble_row(
    question: &QuestionRecord,
    correct: usize,
    catalog: &ImageCatalog,
    image_prefix: &str,
) -> Result<OutputRow> {
    if correct >= OPTION_COUNT {
        return Err(DeckError::Pipeline(format!(
            "answer index {} out of range for question {}",
            correct,
            question.label()
        )));
    }

    let mut display = String::new();
    if let Some(image) = question.image_ref {
        let suffix = catalog.suffix(image).ok_or_else(|| DeckError::MissingImage {
            question: question.label(),
            image,
        })?;
        display.push_str(&format!(
            "<img src=\"{}.{}\" alt=\"Abbildung {}\"><br>",
            image_stem(image_prefix, image),
            suffix,
            image
        ));
    }
    display.push_str(&escape(&question.text));

    let mut incorrect = question
        .options
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != correct)
        .map(|(_, text)| escape(text));

    // Exactly three remain after removing the correct option.
    let mut next = || incorrect.next().unwrap_or_default();
    let incorrect = [next(), next(), next()];

    Ok(OutputRow {
        question: display,
        correct: escape(&question.options[correct]),
        incorrect,
    })
}
