//! Image synthesizer: fills a class deficit by deriving augmented images
//! from the ones already present.
//!
//! Each source image yields six derived JPEGs (five transform kinds, with the
//! rotation expanding to three angles), so the remaining deficit decrements
//! by six per processed source. The directory is re-listed at the start of
//! every outer pass, which means derivatives from earlier passes become
//! sources for later passes; that compounding is what guarantees the loop
//! terminates for arbitrarily large deficits.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use image::{GrayImage, Luma};

use crate::error::{BalanceError, BalanceResult};

/// Derived files written per source image: grey + invert + 3 rotations + sobel
pub const VARIANTS_PER_SOURCE: i64 = 6;

const ROTATION_ANGLES: [u32; 3] = [90, 180, 270];

/// Create derived images in `class_dir` until at least `deficit` have been
/// accounted for. Originals are never modified or deleted. Fails on the
/// first unreadable source image, leaving already-written derivatives in
/// place.
pub fn synthesize(class_dir: &Path, deficit: u64) -> BalanceResult<usize> {
    let mut remaining = deficit as i64;
    let mut created = 0;

    info!("Synthesizing {} images in {:?}", deficit, class_dir);

    while remaining > 0 {
        let sources = list_files(class_dir)?;
        if sources.is_empty() {
            return Err(BalanceError::ImageProcessing {
                path: class_dir.to_path_buf(),
                reason: "class directory has no source images to transform".to_string(),
            });
        }

        for source in sources {
            created += transform_source(class_dir, &source)?;
            remaining -= VARIANTS_PER_SOURCE;
            if remaining <= 0 {
                break;
            }
        }
    }

    info!("Synthesis complete: {} derived images written", created);
    Ok(created)
}

/// Apply the fixed transformation recipe to one source image, writing the
/// six derived JPEGs alongside it. Returns the number of files written.
fn transform_source(class_dir: &Path, source: &Path) -> BalanceResult<usize> {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    debug!("Transforming source {:?}", source);

    let original = image::open(source).map_err(|e| BalanceError::ImageProcessing {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;

    let grey = original.to_luma8();

    save_grey(&grey, &derived_path(class_dir, &stem, "grey"))?;

    let mut inverted = original.to_rgb8();
    image::imageops::invert(&mut inverted);
    save_rgb(&inverted, &derived_path(class_dir, &stem, "invert_color"))?;

    for angle in ROTATION_ANGLES {
        let rotated = match angle {
            90 => original.rotate90(),
            180 => original.rotate180(),
            _ => original.rotate270(),
        };
        save_rgb(
            &rotated.to_rgb8(),
            &derived_path(class_dir, &stem, &format!("angle_{}", angle)),
        )?;
    }

    save_grey(&sobel_edges(&grey), &derived_path(class_dir, &stem, "sobel"))?;

    Ok(VARIANTS_PER_SOURCE as usize)
}

/// Sobel edge magnitude over an 8-bit greyscale image. The image crate has
/// no edge detector of its own, so the two 3x3 gradient kernels are applied
/// here directly; border pixels stay black.
fn sobel_edges(grey: &GrayImage) -> GrayImage {
    let (width, height) = grey.dimensions();
    let mut edges = GrayImage::new(width, height);
    if width < 3 || height < 3 {
        return edges;
    }

    let sample = |x: u32, y: u32| grey.get_pixel(x, y)[0] as i32;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let gx = -sample(x - 1, y - 1) - 2 * sample(x - 1, y) - sample(x - 1, y + 1)
                + sample(x + 1, y - 1)
                + 2 * sample(x + 1, y)
                + sample(x + 1, y + 1);
            let gy = -sample(x - 1, y - 1) - 2 * sample(x, y - 1) - sample(x + 1, y - 1)
                + sample(x - 1, y + 1)
                + 2 * sample(x, y + 1)
                + sample(x + 1, y + 1);
            let magnitude = ((gx * gx + gy * gy) as f64).sqrt().min(255.0) as u8;
            edges.put_pixel(x, y, Luma([magnitude]));
        }
    }

    edges
}

/// Derived images always land next to their source as `<stem>_<suffix>.jpg`
fn derived_path(class_dir: &Path, stem: &str, suffix: &str) -> PathBuf {
    class_dir.join(format!("{}_{}.jpg", stem, suffix))
}

fn save_rgb(img: &image::RgbImage, path: &Path) -> BalanceResult<()> {
    img.save(path).map_err(|e| BalanceError::ImageProcessing {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn save_grey(img: &GrayImage, path: &Path) -> BalanceResult<()> {
    img.save(path).map_err(|e| BalanceError::ImageProcessing {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Snapshot of the files in a class directory, sorted for a deterministic
/// processing order within a pass.
fn list_files(dir: &Path) -> BalanceResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| BalanceError::path_error(dir, &e))?;

    for entry in entries {
        let entry = entry.map_err(|e| BalanceError::path_error(dir, &e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
