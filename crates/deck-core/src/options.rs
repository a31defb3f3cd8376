//! Conversion options shared across the pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DeckError, Result};

/// All options controlling the conversion.
/// Loaded from TOML config files and overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckOptions {
    // -- General --
    pub verbose: u8,

    /// Treat qpdf exit status 3 ("succeeded with warnings") as success.
    pub accept_qpdf_warnings: bool,

    // -- Answer key --
    /// x operand of the checkbox `re` operator, matched textually.
    #[serde(deserialize_with = "deserialize_operand")]
    pub checkbox_x: String,
    /// Width (and negated height) operand of the checkbox `re` operator.
    #[serde(deserialize_with = "deserialize_operand")]
    pub checkbox_size: String,

    // -- Images --
    /// Staged file names that are always discarded (blank placeholders).
    pub discard_names: Vec<String>,
    /// Staged file sizes in bytes that are always discarded (page headers).
    pub discard_sizes: Vec<u64>,
    pub image_prefix: String,
    pub image_policy: ImagePolicy,
    /// JPEG quality (1-100) used when transcoding to JPEG.
    pub jpeg_quality: u8,

    // -- External tools --
    pub tools: ToolPaths,

    // -- Paths (CLI only, not from config file) --
    #[serde(skip)]
    pub pictures: Option<PicturesSource>,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            accept_qpdf_warnings: true,
            checkbox_x: "42.52".to_string(),
            checkbox_size: "8.50".to_string(),
            discard_names: vec!["x-089.png".to_string(), "x-105.png".to_string()],
            discard_sizes: vec![78247, 25220],
            image_prefix: "DHV-Fragen-Abbildung".to_string(),
            image_policy: ImagePolicy::Normalize,
            jpeg_quality: 90,
            tools: ToolPaths::default(),
            pictures: None,
        }
    }
}

impl DeckOptions {
    /// Reject values that would make a stage misbehave silently.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(DeckError::Config(format!(
                "jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            )));
        }
        if self.image_prefix.is_empty() || self.image_prefix.contains(['/', '\\']) {
            return Err(DeckError::Config(format!(
                "image_prefix must be a non-empty file name, got {:?}",
                self.image_prefix
            )));
        }
        for (name, value) in [("checkbox_x", &self.checkbox_x), ("checkbox_size", &self.checkbox_size)] {
            if !is_operand(value) {
                return Err(DeckError::Config(format!(
                    "{} must be a decimal number, got {:?}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Where the image appendix comes from and where its images go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PicturesSource {
    pub pdf: PathBuf,
    pub output_dir: PathBuf,
}

/// Executables invoked by the extractors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub qpdf: String,
    pub pdftotext: String,
    pub pdfimages: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            qpdf: "qpdf".to_string(),
            pdftotext: "pdftotext".to_string(),
            pdfimages: "pdfimages".to_string(),
        }
    }
}

/// What to do with the encoding of extracted illustrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImagePolicy {
    /// Re-encode every image as PNG.
    #[default]
    Normalize,
    /// Keep PNG/JPEG/GIF as extracted; transcode anything else to JPEG.
    Preserve,
}

fn is_operand(s: &str) -> bool {
    let mut parts = s.splitn(2, '.');
    let int = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("0");
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && !frac.is_empty()
        && frac.bytes().all(|b| b.is_ascii_digit())
}

/// Accept either `"8.50"` or `8.5`; the string form keeps trailing zeros.
fn deserialize_operand<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Operand {
        Text(String),
        Number(f64),
    }

    match Operand::deserialize(d)? {
        Operand::Text(s) => Ok(s),
        Operand::Number(n) => Ok(format!("{:.2}", n)),
    }
}
