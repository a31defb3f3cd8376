//! Invocation of the external PDF utilities (qpdf, poppler-utils).
//!
//! Every tool is a blocking call; its exit status is checked before the next
//! stage reads the output.

use std::path::Path;
use std::process::{Command, Output};

use deck_core::error::{DeckError, Result};
use deck_core::options::DeckOptions;

const POPPLER_HINT: &str = "Install with: brew install poppler (macOS) or apt install poppler-utils (Linux)";
const QPDF_HINT: &str = "Install with: brew install qpdf (macOS) or apt install qpdf (Linux)";

/// qpdf's "operation succeeded with warnings" exit status.
const QPDF_WARNING_EXIT: i32 = 3;

/// Check that `tool` is available on the system.
pub fn check_tool(tool: &str, hint: &str) -> Result<()> {
    let which = Command::new("which")
        .arg(tool)
        .output()
        .map_err(|e| DeckError::Tool {
            tool: "which".to_string(),
            message: format!("failed to check for {}: {}", tool, e),
        })?;

    if !which.status.success() {
        return Err(DeckError::ToolMissing {
            tool: tool.to_string(),
            hint: hint.to_string(),
        });
    }
    Ok(())
}

/// Run `command`, accepting only the listed exit codes.
fn run(tool: &str, command: &mut Command, accepted: &[i32]) -> Result<Output> {
    log::debug!("Running {:?}", command);
    let output = command.output().map_err(|e| DeckError::Tool {
        tool: tool.to_string(),
        message: format!("failed to start: {}", e),
    })?;

    match output.status.code() {
        Some(code) if accepted.contains(&code) => Ok(output),
        code => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let status = code
                .map(|c| format!("exit status {}", c))
                .unwrap_or_else(|| "terminated by signal".to_string());
            Err(DeckError::Tool {
                tool: tool.to_string(),
                message: format!("{}: {}", status, stderr.trim()),
            })
        }
    }
}

/// Write a copy of `source` with every stream filter decoded and stream
/// compression disabled, exposing page drawing operators as plain text.
pub fn decompress_pdf(source: &Path, destination: &Path, options: &DeckOptions) -> Result<()> {
    let qpdf = options.tools.qpdf.as_str();
    check_tool(qpdf, QPDF_HINT)?;

    log::info!("Decompressing {} with qpdf...", source.display());

    let accepted: &[i32] = if options.accept_qpdf_warnings {
        &[0, QPDF_WARNING_EXIT]
    } else {
        &[0]
    };

    let output = run(
        qpdf,
        Command::new(qpdf)
            .arg("--decode-level=all")
            .arg("--compress-streams=n")
            .arg(source.as_os_str())
            .arg(destination.as_os_str()),
        accepted,
    )?;

    // Status 3 may accompany a partial decode.
    if output.status.code() == Some(QPDF_WARNING_EXIT) {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::warn!(
            "qpdf finished with warnings for {}: {}",
            source.display(),
            stderr.trim()
        );
    }
    Ok(())
}

/// Convert a PDF to plain text with `pdftotext`, optionally preserving layout.
pub fn pdf_to_text(
    pdf: &Path,
    destination: &Path,
    layout: bool,
    options: &DeckOptions,
) -> Result<()> {
    let pdftotext = options.tools.pdftotext.as_str();
    check_tool(pdftotext, POPPLER_HINT)?;

    log::info!(
        "Running pdftotext{} on {}...",
        if layout { " -layout" } else { "" },
        pdf.display()
    );

    let mut command = Command::new(pdftotext);
    if layout {
        command.arg("-layout");
    }
    command.arg(pdf.as_os_str()).arg(destination.as_os_str());
    run(pdftotext, &mut command, &[0])?;
    Ok(())
}

/// Dump every embedded raster of `pdf` into `staging_dir` as `x-NNN.<ext>`,
/// keeping each image's native encoding.
pub fn extract_images(pdf: &Path, staging_dir: &Path, options: &DeckOptions) -> Result<()> {
    let pdfimages = options.tools.pdfimages.as_str();
    check_tool(pdfimages, POPPLER_HINT)?;

    log::info!("Extracting images from {} with pdfimages...", pdf.display());

    let prefix = staging_dir.join("x");
    run(
        pdfimages,
        Command::new(pdfimages)
            .arg("-all")
            .arg(pdf.as_os_str())
            .arg(prefix.as_os_str()),
        &[0],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_reported() {
        let err = check_tool("definitely-not-a-real-pdf-tool-xyz", POPPLER_HINT).unwrap_err();
        match err {
            DeckError::ToolMissing { tool, hint } => {
                assert_eq!(tool, "definitely-not-a-real-pdf-tool-xyz");
                assert!(hint.contains("poppler"));
            }
            // `which` itself may be absent in minimal containers.
            DeckError::Tool { tool, .. } => assert_eq!(tool, "which"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_rejects_unlisted_exit_code() {
        let err = run("sh", Command::new("sh").arg("-c").arg("echo oops >&2; exit 2"), &[0, 3])
            .unwrap_err();
        match err {
            DeckError::Tool { tool, message } => {
                assert_eq!(tool, "sh");
                assert!(message.contains("exit status 2"));
                assert!(message.contains("oops"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_accepts_listed_exit_code() {
        let output = run("sh", Command::new("sh").arg("-c").arg("exit 3"), &[0, 3]).unwrap();
        assert_eq!(output.status.code(), Some(3));
    }
}
