//! Coverage masks: one f32 per pixel, 0.0 = untouched, 1.0 = fully covered.
//!
//! Used for rasterized text, its blurred shadow and the circular clip.

use image::{GrayImage, imageops};

use crate::error::MonogramError;

/// Anti-aliased coverage buffer the size of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    /// Blank mask. Fails when the buffer cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self, MonogramError> {
        Ok(Self {
            width,
            height,
            data: try_buffer(pixel_count(width, height)?, 0.0)?,
        })
    }

    /// Circle inscribed in a `width`×`height` canvas: centered, with a radius
    /// of half the smaller side and a one-pixel anti-aliased rim.
    pub fn circle(width: u32, height: u32) -> Result<Self, MonogramError> {
        let mut mask = Self::new(width, height)?;
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let radius = width.min(height) as f32 / 2.0;

        for y in 0..height {
            for x in 0..width {
                let d = dist(x as f32 + 0.5, y as f32 + 0.5, cx, cy);
                let idx = mask.index(x, y);
                mask.data[idx] = aa_edge(d, radius - 0.5, 1.0);
            }
        }
        Ok(mask)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Coverage at `(x, y)`; 0.0 outside the mask.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0.0;
        }
        self.data[self.index(x as u32, y as u32)]
    }

    /// Add coverage at `(x, y)`, clamped to 1.0. Out-of-bounds writes are dropped.
    #[inline]
    pub fn accumulate(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.data[idx] = (self.data[idx] + coverage).min(1.0);
    }

    /// True when no pixel has any coverage.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&v| v <= 0.0)
    }

    /// Gaussian-blurred copy. `sigma` is in pixels; non-positive values
    /// return an unblurred copy.
    pub fn blurred(&self, sigma: f32) -> Result<CoverageMask, MonogramError> {
        if !(sigma.is_finite() && sigma > 0.0) || self.data.is_empty() {
            let mut data = try_buffer(self.data.len(), 0.0)?;
            data.copy_from_slice(&self.data);
            return Ok(CoverageMask {
                width: self.width,
                height: self.height,
                data,
            });
        }

        let mut bytes = try_buffer(self.data.len(), 0u8)?;
        for (byte, &v) in bytes.iter_mut().zip(&self.data) {
            *byte = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        let gray = GrayImage::from_raw(self.width, self.height, bytes).ok_or_else(|| {
            MonogramError::Allocation(format!("buffer too small for {}x{}", self.width, self.height))
        })?;
        let blurred = imageops::blur(&gray, sigma);

        let mut data = try_buffer(self.data.len(), 0.0)?;
        for (v, p) in data.iter_mut().zip(blurred.as_raw()) {
            *v = *p as f32 / 255.0;
        }
        Ok(CoverageMask {
            width: self.width,
            height: self.height,
            data,
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// `width * height` as a buffer length.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, MonogramError> {
    usize::try_from(width as u64 * height as u64)
        .map_err(|_| MonogramError::Allocation(format!("{}x{} does not fit in memory", width, height)))
}

/// A `len`-element buffer filled with `value`, reserved up front so an
/// out-of-memory condition comes back as an error.
pub(crate) fn try_buffer<T: Clone>(len: usize, value: T) -> Result<Vec<T>, MonogramError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| MonogramError::Allocation(e.to_string()))?;
    buffer.resize(len, value);
    Ok(buffer)
}

#[inline]
fn dist(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    let dx = x - cx;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}

/// 1.0 inside `inner`, linear falloff across `aa_width`, 0.0 beyond.
#[inline]
fn aa_edge(dist: f32, inner: f32, aa_width: f32) -> f32 {
    if dist < inner {
        1.0
    } else if dist < inner + aa_width {
        1.0 - (dist - inner) / aa_width
    } else {
        0.0
    }
}
