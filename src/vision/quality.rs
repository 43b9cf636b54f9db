// ABOUTME: Stage 1 quality gate — blur, brightness, and contrast combined into one composite score
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use visionfit_core::constants::vision as c;

use crate::config::PipelineConfig;

/// Result of Stage 1 (§4.3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// Composite score in [0, 1], penalized outside the luminance band.
    pub score: f64,
    /// Blur component, normalized to 1.0 at the configured threshold.
    pub blur_score: f64,
    /// Brightness component, 1.0 at mid-gray, falling off with distance.
    pub brightness_score: f64,
    /// Contrast component, normalized to 1.0 at the configured constant.
    pub contrast_score: f64,
}

/// Downscale `image` in place if its longest edge exceeds
/// [`visionfit_core::constants::vision::MAX_DIMENSION_PX`], preserving
/// aspect ratio.
#[must_use]
pub fn downscale_if_needed(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let longest = width.max(height);
    if longest <= c::MAX_DIMENSION_PX {
        return image.clone();
    }
    let scale = f64::from(c::MAX_DIMENSION_PX) / f64::from(longest);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (new_w, new_h) = (
        ((f64::from(width) * scale).round() as u32).max(1),
        ((f64::from(height) * scale).round() as u32).max(1),
    );
    image.resize(new_w, new_h, FilterType::Triangle)
}

/// Compute the Stage 1 composite quality score (§4.3).
#[must_use]
pub fn assess_quality(image: &DynamicImage, config: &PipelineConfig) -> QualityReport {
    let scaled = downscale_if_needed(image);
    let gray = scaled.to_luma8();

    let pixels: Vec<f64> = gray.pixels().map(|p| f64::from(p.0[0])).collect();
    let mean_luminance = mean(&pixels);
    let variance_of_luminance = variance(&pixels, mean_luminance);

    let laplacian_variance = laplacian_variance(&gray);
    let blur_score = (laplacian_variance / config.blur_threshold).min(1.0);

    let brightness_distance = (mean_luminance - c::MID_LUMINANCE).abs();
    let brightness_score = (1.0 - brightness_distance / c::MID_LUMINANCE).clamp(0.0, 1.0);

    let contrast_score = (variance_of_luminance.sqrt() / c::CONTRAST_NORMALIZATION).min(1.0);

    let mut score = c::quality_weights::BLUR * blur_score
        + c::quality_weights::BRIGHTNESS * brightness_score
        + c::quality_weights::CONTRAST * contrast_score;

    if mean_luminance < c::LUMINANCE_PENALTY_LOW || mean_luminance > c::LUMINANCE_PENALTY_HIGH {
        score *= c::LUMINANCE_PENALTY_FACTOR;
    }

    QualityReport {
        score,
        blur_score,
        brightness_score,
        contrast_score,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    values.iter().sum::<f64>() / count
}

fn variance(values: &[f64], mean_value: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    values.iter().map(|v| (v - mean_value).powi(2)).sum::<f64>() / count
}

/// Variance of the discrete Laplacian (`[[0,1,0],[1,-4,1],[0,1,0]]`) over a
/// greyscale buffer — the standard blur-detection heuristic: sharp edges
/// produce high-magnitude Laplacian responses, blur suppresses them.
fn laplacian_variance(gray: &image::GrayImage) -> f64 {
    let (width, height) = gray.dimensions();
    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut responses = Vec::with_capacity(((width - 2) * (height - 2)) as usize);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = f64::from(gray.get_pixel(x, y).0[0]);
            let up = f64::from(gray.get_pixel(x, y - 1).0[0]);
            let down = f64::from(gray.get_pixel(x, y + 1).0[0]);
            let left = f64::from(gray.get_pixel(x - 1, y).0[0]);
            let right = f64::from(gray.get_pixel(x + 1, y).0[0]);
            responses.push(up + down + left + right - 4.0 * center);
        }
    }

    let mean_response = mean(&responses);
    variance(&responses, mean_response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checkerboard(size: u32) -> DynamicImage {
        let mut img = RgbImage::new(size, size);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let is_light = (x / 8 + y / 8) % 2 == 0;
            *pixel = if is_light { Rgb([220, 220, 220]) } else { Rgb([30, 30, 30]) };
        }
        DynamicImage::ImageRgb8(img)
    }

    fn flat_gray(size: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(size, size, Rgb([value, value, value])))
    }

    #[test]
    fn flat_image_has_near_zero_blur_score() {
        let image = flat_gray(64, 128);
        let report = assess_quality(&image, &PipelineConfig::default());
        assert!(report.blur_score < 0.05, "blur_score = {}", report.blur_score);
    }

    #[test]
    fn checkerboard_scores_higher_blur_than_flat() {
        let config = PipelineConfig::default();
        let sharp = assess_quality(&checkerboard(64), &config);
        let flat = assess_quality(&flat_gray(64, 128), &config);
        assert!(sharp.blur_score > flat.blur_score);
    }

    #[test]
    fn very_dark_image_is_penalized() {
        let config = PipelineConfig::default();
        let dark = assess_quality(&flat_gray(64, 5), &config);
        let mid = assess_quality(&flat_gray(64, 128), &config);
        assert!(dark.score < mid.score);
    }

    #[test]
    fn downscale_preserves_aspect_ratio_and_caps_longest_edge() {
        let image = flat_gray(2048, 1024);
        let scaled = downscale_if_needed(&image);
        assert_eq!(scaled.width(), 1024);
        assert_eq!(scaled.height(), 512);
    }
}
