//! Image quality gate. Rejects blank or near-uniform captures before an
//! expensive multimodal call is spent on them.
//!
//! False positives are tolerated: the vision model is instructed to re-verify
//! the image itself.

use crate::domain::{DomainError, ImageStats, ValidationResult};
use image::GrayImage;

/// Mean intensity above this (strict) reads as an empty capture.
pub const BLANK_MEAN_THRESHOLD: f64 = 240.0;

/// Standard deviation below this (strict) reads as a featureless capture.
pub const LOW_DETAIL_STDDEV_THRESHOLD: f64 = 20.0;

pub const BLANK_REASON: &str = "the image appears to be empty or mostly blank.";
pub const LOW_DETAIL_REASON: &str = "the image lacks sufficient detail or shapes.";

/// Decode raster bytes and judge whether they are worth analyzing.
///
/// A failed decode is an error (surfaced by the caller), not a verdict.
/// A quality rejection is a verdict with a user-facing reason.
pub fn validate(image_bytes: &[u8]) -> Result<ValidationResult, DomainError> {
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| DomainError::Image(format!("failed to decode image: {}", e)))?;
    let luma = decoded.to_luma8();

    let Some(stats) = intensity_stats(&luma) else {
        // Zero-pixel decode: nothing to analyze.
        return Ok(ValidationResult::Invalid {
            reason: BLANK_REASON.to_string(),
        });
    };

    if stats.mean > BLANK_MEAN_THRESHOLD {
        return Ok(ValidationResult::Invalid {
            reason: BLANK_REASON.to_string(),
        });
    }
    if stats.std_dev < LOW_DETAIL_STDDEV_THRESHOLD {
        return Ok(ValidationResult::Invalid {
            reason: LOW_DETAIL_REASON.to_string(),
        });
    }

    Ok(ValidationResult::Valid)
}

/// Mean and population standard deviation over all pixels. `None` when empty.
fn intensity_stats(luma: &GrayImage) -> Option<ImageStats> {
    let count = u64::from(luma.width()) * u64::from(luma.height());
    if count == 0 {
        return None;
    }

    let mut sum = 0u64;
    for pixel in luma.pixels() {
        sum += u64::from(pixel[0]);
    }
    let mean = sum as f64 / count as f64;

    let mut sq_diff = 0.0f64;
    for pixel in luma.pixels() {
        let delta = f64::from(pixel[0]) - mean;
        sq_diff += delta * delta;
    }
    let std_dev = (sq_diff / count as f64).sqrt();

    Some(ImageStats { mean, std_dev })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma};
    use std::io::Cursor;

    fn png_bytes(img: GrayImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn uniform(value: u8) -> Vec<u8> {
        png_bytes(GrayImage::from_pixel(64, 64, Luma([value])))
    }

    #[test]
    fn test_uniform_241_is_blank() {
        let verdict = validate(&uniform(241)).unwrap();
        assert_eq!(
            verdict,
            ValidationResult::Invalid {
                reason: BLANK_REASON.to_string()
            }
        );
    }

    #[test]
    fn test_uniform_255_is_blank() {
        // Brightness check runs first, so a saturated frame reports as blank
        // even though its deviation is also zero.
        let verdict = validate(&uniform(255)).unwrap();
        assert_eq!(
            verdict,
            ValidationResult::Invalid {
                reason: BLANK_REASON.to_string()
            }
        );
    }

    #[test]
    fn test_uniform_240_passes_brightness_check() {
        // Boundary is strict: exactly 240 is not blank. The flat frame still
        // fails on deviation.
        let verdict = validate(&uniform(240)).unwrap();
        assert_eq!(
            verdict,
            ValidationResult::Invalid {
                reason: LOW_DETAIL_REASON.to_string()
            }
        );
    }

    #[test]
    fn test_uniform_midtone_lacks_detail() {
        let verdict = validate(&uniform(100)).unwrap();
        assert_eq!(
            verdict,
            ValidationResult::Invalid {
                reason: LOW_DETAIL_REASON.to_string()
            }
        );
    }

    #[test]
    fn test_contrasting_halves_are_valid() {
        // Left half 78, right half 178: mean 128, population std dev 50.
        let img = GrayImage::from_fn(64, 64, |x, _| {
            if x < 32 { Luma([78]) } else { Luma([178]) }
        });
        let verdict = validate(&png_bytes(img)).unwrap();
        assert_eq!(verdict, ValidationResult::Valid);
    }

    #[test]
    fn test_stats_exact_values() {
        let img = GrayImage::from_fn(10, 10, |x, _| {
            if x < 5 { Luma([78]) } else { Luma([178]) }
        });
        let stats = intensity_stats(&img).unwrap();
        assert!((stats.mean - 128.0).abs() < 1e-9);
        assert!((stats.std_dev - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_undecodable_bytes_are_an_error() {
        let result = validate(b"definitely not an image");
        assert!(matches!(result, Err(DomainError::Image(_))));
    }
}
