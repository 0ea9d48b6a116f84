//! Off-screen drawing surface.
//!
//! A `Surface` owns its pixel buffer for the duration of one render and is
//! consumed into a [`Bitmap`] at the end. Dropping it on an error path frees
//! the buffer, so no render can leak or share a surface.

use image::{Rgba, RgbaImage};

use super::mask::{CoverageMask, try_buffer};
use crate::bitmap::Bitmap;
use crate::color::Color;
use crate::error::MonogramError;

/// RGBA canvas (straight alpha) with an optional clip mask.
pub struct Surface {
    image: RgbaImage,
    clip: Option<CoverageMask>,
    scale: f32,
}

impl Surface {
    /// Allocate a transparent `width`×`height` surface.
    ///
    /// Fails when the pixel count exceeds `max_pixels` or the buffer cannot be
    /// reserved.
    pub fn new(width: u32, height: u32, scale: f32, max_pixels: u64) -> Result<Self, MonogramError> {
        let pixels = width as u64 * height as u64;
        if pixels > max_pixels {
            return Err(MonogramError::SurfaceTooLarge {
                width,
                height,
                limit: max_pixels,
            });
        }

        let len = pixels
            .checked_mul(4)
            .and_then(|bytes| usize::try_from(bytes).ok())
            .ok_or_else(|| {
                MonogramError::Allocation(format!("{}x{} does not fit in memory", width, height))
            })?;

        let buffer = try_buffer(len, 0u8)?;

        let image = RgbaImage::from_raw(width, height, buffer).ok_or_else(|| {
            MonogramError::Allocation(format!("buffer too small for {}x{}", width, height))
        })?;

        Ok(Self {
            image,
            clip: None,
            scale,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Confine all later drawing to the circle inscribed in the surface.
    pub fn clip_to_circle(&mut self) -> Result<(), MonogramError> {
        self.clip = Some(CoverageMask::circle(self.width(), self.height())?);
        Ok(())
    }

    /// Fill the whole surface (within the clip) with `color`.
    pub fn fill(&mut self, color: Color) {
        let clip = self.clip.as_ref();
        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let coverage = clip.map_or(1.0, |c| c.get(x as i32, y as i32));
            blend_over(px, color, coverage);
        }
    }

    /// Paint `color` through `mask`, shifted by `offset` pixels.
    pub fn paint(&mut self, mask: &CoverageMask, offset: (i32, i32), color: Color) {
        let clip = self.clip.as_ref();
        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let (x, y) = (x as i32, y as i32);
            let coverage = mask.get(x - offset.0, y - offset.1);
            if coverage <= 0.0 {
                continue;
            }
            let clip_coverage = clip.map_or(1.0, |c| c.get(x, y));
            blend_over(px, color, coverage * clip_coverage);
        }
    }

    /// Finish drawing and hand out the pixels.
    pub fn into_bitmap(self) -> Bitmap {
        Bitmap::new(self.image, self.scale)
    }
}

/// Source-over compositing of `src` at `coverage` onto `dst`, straight alpha.
fn blend_over(dst: &mut Rgba<u8>, src: Color, coverage: f32) {
    let sa = src.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }

    let da = dst.0[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    let channel = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };

    *dst = Rgba([
        channel(src.r, dst.0[0]),
        channel(src.g, dst.0[1]),
        channel(src.b, dst.0[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]);
}
