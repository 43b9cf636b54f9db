// ABOUTME: Stage 2 — pluggable foreground segmentation; failure is advisory, never blocking
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use image::{DynamicImage, GenericImageView, GrayImage, Luma};

/// A per-pixel foreground-probability mask, already thresholded to a
/// binary decision at 0.5 (§4.3 Stage 2).
#[derive(Debug, Clone)]
pub struct SegmentationMask {
    /// `true` where the pixel is classified as part of the body silhouette.
    mask: GrayImage,
}

impl SegmentationMask {
    /// `true` if `(x, y)` falls inside the segmented foreground.
    #[must_use]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.mask.get_pixel_checked(x, y).is_some_and(|p| p.0[0] > 0)
    }

    /// Fraction of pixels classified as foreground, in [0, 1].
    #[must_use]
    pub fn foreground_fraction(&self) -> f64 {
        let total = self.mask.pixels().len();
        if total == 0 {
            return 0.0;
        }
        let foreground = self.mask.pixels().filter(|p| p.0[0] > 0).count();
        #[allow(clippy::cast_precision_loss)]
        let (foreground, total) = (foreground as f64, total as f64);
        foreground / total
    }

    /// Dimensions of the underlying mask.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.mask.dimensions()
    }
}

/// The real body-segmentation model is an external ML collaborator; this
/// trait is the seam, mirroring the teacher's `trait LlmProvider` /
/// `trait DatabaseProvider` pattern: swap the concrete implementation
/// without touching the pipeline that calls it.
pub trait SegmentationModel: Send + Sync {
    /// Produce a foreground mask for `image`. `Err` downgrades the pipeline
    /// to "unmasked" — segmentation is advisory, never a terminal failure
    /// (§4.3 Stage 2: "on failure, log and proceed with the unmasked
    /// image").
    fn segment(&self, image: &DynamicImage) -> Result<SegmentationMask, String>;
}

/// An all-background mask, used as the pipeline's last-resort fallback if
/// even [`ThresholdSegmenter`] fails (e.g. a zero-sized image slipped past
/// the quality gate). Every pixel reports as non-foreground.
#[must_use]
pub(crate) fn blank_mask(image: &DynamicImage) -> SegmentationMask {
    let (width, height) = image.dimensions();
    SegmentationMask {
        mask: GrayImage::new(width.max(1), height.max(1)),
    }
}

/// Deterministic reference implementation: thresholds luminance against
/// its own mean, biased toward the image center, so a roughly
/// silhouette-shaped subject against a lighter or darker background
/// produces a plausible mask without any learned weights. Usable in tests
/// and as a CPU fallback when no real CV backend is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdSegmenter;

impl SegmentationModel for ThresholdSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<SegmentationMask, String> {
        let gray = image.to_luma8();
        let (width, height) = gray.dimensions();
        if width == 0 || height == 0 {
            return Err("cannot segment a zero-sized image".to_string());
        }

        #[allow(clippy::cast_precision_loss)]
        let mean_luminance = gray.pixels().map(|p| f64::from(p.0[0])).sum::<f64>() / f64::from(width * height);

        let mut mask = GrayImage::new(width, height);
        let (cx, cy) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        let max_radius = (cx.powi(2) + cy.powi(2)).sqrt();

        for y in 0..height {
            for x in 0..width {
                let luminance = f64::from(gray.get_pixel(x, y).0[0]);
                let distance_from_center = (((f64::from(x) - cx).powi(2) + (f64::from(y) - cy).powi(2)).sqrt())
                    / max_radius.max(1.0);
                let darker_than_background = luminance < mean_luminance;
                let near_center = distance_from_center < 0.45;
                let value = u8::from(darker_than_background || near_center) * 255;
                mask.put_pixel(x, y, Luma([value]));
            }
        }

        Ok(SegmentationMask { mask })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn center_pixel_is_foreground_on_uniform_image() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([128, 128, 128])));
        let mask = ThresholdSegmenter.segment(&image).unwrap();
        assert!(mask.is_foreground(32, 32));
    }

    #[test]
    fn zero_sized_image_fails_advisory() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(ThresholdSegmenter.segment(&image).is_err());
    }

    #[test]
    fn foreground_fraction_is_between_zero_and_one() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([200, 50, 50])));
        let mask = ThresholdSegmenter.segment(&image).unwrap();
        let fraction = mask.foreground_fraction();
        assert!((0.0..=1.0).contains(&fraction));
    }
}
