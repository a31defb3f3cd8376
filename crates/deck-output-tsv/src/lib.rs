//! TSV output: one fully quoted, tab-separated record per flashcard.

use std::path::Path;

use deck_core::error::{DeckError, Result};
use deck_core::options::DeckOptions;
use deck_core::plugin::DeckWriter;
use deck_core::record::OutputRow;
use deck_utils::files;

/// Record terminator of the quote-all dialect flashcard importers expect.
const LINE_TERMINATOR: &str = "\r\n";

pub struct TsvDeckWriter;

impl DeckWriter for TsvDeckWriter {
    fn name(&self) -> &str {
        "TSV Writer"
    }

    fn write(&self, rows: &[OutputRow], output_path: &Path, _options: &DeckOptions) -> Result<()> {
        log::info!("Writing TSV: {}", output_path.display());

        let text = render_tsv(rows);
        files::write_atomic(output_path, text.as_bytes()).map_err(|e| {
            DeckError::Pipeline(format!("Failed to write {}: {}", output_path.display(), e))
        })?;

        Ok(())
    }
}

/// Serialize rows with every field quoted and embedded quotes doubled.
pub fn render_tsv(rows: &[OutputRow]) -> String {
    let mut out = String::new();
    for row in rows {
        for (i, field) in row.fields().iter().enumerate() {
            if i > 0 {
                out.push('\t');
            }
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        }
        out.push_str(LINE_TERMINATOR);
    }
    out
}
