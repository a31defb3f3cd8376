//! Build the image catalog from the picture appendix.
//!
//! The appendix text names its figures in order (`Abbildung 1`, `Abbildung
//! 2`, ...). `pdfimages` dumps the embedded rasters in the same order, mixed
//! with page-header logos and blank placeholders, which are recognised by
//! fixed file names and byte sizes. After filtering, the n-th surviving file
//! is the n-th figure.

use std::fs;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use once_cell::sync::Lazy;
use regex::Regex;

use deck_core::error::{DeckError, Result};
use deck_core::options::{DeckOptions, ImagePolicy};
use deck_core::record::{image_stem, ImageCatalog};
use deck_utils::files::{self, StagedFile};
use deck_utils::mime;

static FIGURE_LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Abbildung (\d+)").unwrap());

/// Figure numbers in the order the appendix text lists them.
pub fn figure_numbers(text: &str) -> Vec<u32> {
    text.lines()
        .filter_map(|line| FIGURE_LABEL_RE.captures(line.trim()))
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Whether a staged file is page furniture rather than a figure.
pub fn is_discarded(file: &StagedFile, options: &DeckOptions) -> bool {
    options.discard_names.iter().any(|n| *n == file.name) || options.discard_sizes.contains(&file.size)
}

/// Match staged images to figure numbers and write them to `output_dir`.
///
/// The survivor count is checked against `figures` before `output_dir` is
/// touched, so a mismatch leaves the previous output in place.
pub fn build_catalog(
    staging_dir: &Path,
    output_dir: &Path,
    figures: &[u32],
    options: &DeckOptions,
) -> Result<ImageCatalog> {
    let staged = files::list_sorted(staging_dir)?;
    let total = staged.len();
    let survivors: Vec<StagedFile> = staged
        .into_iter()
        .filter(|file| {
            let discard = is_discarded(file, options);
            if discard {
                log::debug!("Discarding {} ({} bytes)", file.name, file.size);
            }
            !discard
        })
        .collect();

    log::info!(
        "{} of {} extracted images are figures; appendix lists {} figures",
        survivors.len(),
        total,
        figures.len()
    );

    if survivors.len() != figures.len() {
        return Err(DeckError::ImageCountMismatch {
            identifiers: figures.len(),
            images: survivors.len(),
        });
    }

    let removed = files::clear_files(output_dir)?;
    if removed > 0 {
        log::info!("Removed {} old files from {}", removed, output_dir.display());
    }

    let mut catalog = ImageCatalog::new();
    for (file, &figure) in survivors.iter().zip(figures) {
        let stem = image_stem(&options.image_prefix, figure);
        let suffix = write_figure(file, output_dir, &stem, options)?;
        log::debug!("{} -> {}.{}", file.name, stem, suffix);
        catalog.insert(figure, suffix);
    }
    Ok(catalog)
}

/// Write one figure to `<output_dir>/<stem>.<ext>` and return the extension.
fn write_figure(
    file: &StagedFile,
    output_dir: &Path,
    stem: &str,
    options: &DeckOptions,
) -> Result<String> {
    let ext = mime::extension_of(&file.path);
    let keep = match options.image_policy {
        ImagePolicy::Normalize => ext == "png",
        ImagePolicy::Preserve => mime::is_viewer_friendly(&ext),
    };

    if keep {
        fs::copy(&file.path, output_dir.join(format!("{}.{}", stem, ext)))?;
        return Ok(ext);
    }

    let img = image::open(&file.path)
        .map_err(|e| DeckError::Image(format!("Failed to decode {}: {}", file.name, e)))?;

    match options.image_policy {
        ImagePolicy::Normalize => {
            let dest = output_dir.join(format!("{}.png", stem));
            img.save_with_format(&dest, ImageFormat::Png)
                .map_err(|e| DeckError::Image(format!("Failed to encode {}: {}", dest.display(), e)))?;
            Ok("png".to_string())
        }
        ImagePolicy::Preserve => {
            let dest = output_dir.join(format!("{}.jpg", stem));
            encode_jpeg(&img, &dest, options.jpeg_quality)?;
            log::info!("Transcoded {} to JPEG", file.name);
            Ok("jpg".to_string())
        }
    }
}

fn encode_jpeg(img: &DynamicImage, dest: &Path, quality: u8) -> Result<()> {
    let out = BufWriter::new(fs::File::create(dest)?);
    let encoder = JpegEncoder::new_with_quality(out, quality);
    // JPEG has no alpha channel and no 16-bit samples.
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| DeckError::Image(format!("Failed to encode {}: {}", dest.display(), e)))
}
