//! Recover the correct answers from checkbox drawing operators.
//!
//! After decompression each answer checkbox appears in the page content as a
//! rectangle operator at a fixed x position and size, followed by `S`
//! (stroke only: empty box) or `B` (fill and stroke: marked box):
//!
//! ```text
//! 42.52 612.35 8.50 -8.50 re S
//! ```
//!
//! Every four boxes belong to one question.

use regex::Regex;

use deck_core::error::{DeckError, Result};
use deck_core::options::DeckOptions;
use deck_core::record::{AnswerKey, OPTION_COUNT};

/// Scans page content for answer checkboxes.
pub struct AnswerKeyScanner {
    checkbox: Regex,
}

impl AnswerKeyScanner {
    /// Build a scanner for the checkbox geometry in `options`.
    pub fn new(options: &DeckOptions) -> Result<Self> {
        let pattern = format!(
            r"^{} \d+\.\d+ {} -{} re ([BS])",
            regex::escape(&options.checkbox_x),
            regex::escape(&options.checkbox_size),
            regex::escape(&options.checkbox_size),
        );
        let checkbox = Regex::new(&pattern)
            .map_err(|e| DeckError::Config(format!("invalid checkbox pattern: {}", e)))?;
        Ok(Self { checkbox })
    }

    /// Scan decompressed page content and return one answer index per question.
    pub fn scan(&self, content: &str) -> Result<AnswerKey> {
        let mut answers = AnswerKey::new();
        let mut group = String::with_capacity(OPTION_COUNT);

        for line in content.lines() {
            let Some(caps) = self.checkbox.captures(line.trim()) else {
                continue;
            };
            group.push_str(&caps[1]);
            if group.len() == OPTION_COUNT {
                answers.push(decode_group(&group, answers.len())?);
                group.clear();
            }
        }

        if !group.is_empty() {
            return Err(DeckError::IncompleteAnswerGroup { pattern: group });
        }

        log::info!("Answer key: {} questions", answers.len());
        Ok(answers)
    }
}

/// Map a four-box group to the index of its single marked box.
/// Any other combination means the layout is not the one we know.
fn decode_group(group: &str, index: usize) -> Result<usize> {
    match group {
        "BSSS" => Ok(0),
        "SBSS" => Ok(1),
        "SSBS" => Ok(2),
        "SSSB" => Ok(3),
        _ => Err(DeckError::AnswerPattern {
            pattern: group.to_string(),
            group: index,
        }),
    }
}
