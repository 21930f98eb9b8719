//! Images owned by the host and the image copy action

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised while building or editing images.
#[derive(Debug, Error, PartialEq)]
pub enum ImageError {
    #[error("Image '{0}' is not loaded")]
    MissingImage(String),
    #[error("Invalid pixel data: expected {expected} pixels, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
    #[error("Invalid position {x};{y}")]
    InvalidPosition { x: f64, y: f64 },
}

/// An RGBA image in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Image {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgba; width as usize * height as usize],
        }
    }

    /// Build an image from row-major pixels
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<[u8; 4]>) -> Result<Self, ImageError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ImageError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = rgba;
                true
            }
            None => false,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Draw `source` with its top-left corner at (`x`, `y`), blending with
    /// the source alpha. Pixels falling outside this image are clipped.
    pub fn blit(&mut self, source: &Image, x: i64, y: i64) {
        for sy in 0..source.height {
            let ty = y.saturating_add(sy as i64);
            if ty < 0 || ty >= self.height as i64 {
                continue;
            }
            for sx in 0..source.width {
                let tx = x.saturating_add(sx as i64);
                if tx < 0 || tx >= self.width as i64 {
                    continue;
                }
                let src = source.pixels[sy as usize * source.width as usize + sx as usize];
                let i = ty as usize * self.width as usize + tx as usize;
                self.pixels[i] = blend(src, self.pixels[i]);
            }
        }
    }
}

/// Source-over blending of `src` onto `dst`
fn blend(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let a = src[3] as u32;
    let inv = 255 - a;
    let channel = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv) / 255) as u8;
    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (a + dst[3] as u32 * inv / 255) as u8,
    ]
}

/// Images loaded by the host, looked up by name
pub trait ImageStore {
    fn image(&self, name: &str) -> Option<&Image>;

    fn image_mut(&mut self, name: &str) -> Option<&mut Image>;
}

impl ImageStore for HashMap<String, Image> {
    fn image(&self, name: &str) -> Option<&Image> {
        self.get(name)
    }

    fn image_mut(&mut self, name: &str) -> Option<&mut Image> {
        self.get_mut(name)
    }
}

/// Copy the image `source` onto the image `dest` at (`x`, `y`).
///
/// Coordinates come from event expressions and are floored; non-finite
/// coordinates are rejected.
pub fn try_copy_image_on_another<S: ImageStore + ?Sized>(
    store: &mut S,
    dest: &str,
    source: &str,
    x: f64,
    y: f64,
) -> Result<(), ImageError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ImageError::InvalidPosition { x, y });
    }
    // Cloned so an image can be copied onto itself
    let source = store
        .image(source)
        .ok_or_else(|| ImageError::MissingImage(source.to_string()))?
        .clone();
    let dest = store
        .image_mut(dest)
        .ok_or_else(|| ImageError::MissingImage(dest.to_string()))?;
    dest.blit(&source, x.floor() as i64, y.floor() as i64);
    Ok(())
}

/// The `CopyImageOnAnother` action: like [`try_copy_image_on_another`], but
/// a failed copy only logs a warning.
pub fn copy_image_on_another<S: ImageStore + ?Sized>(
    store: &mut S,
    dest: &str,
    source: &str,
    x: f64,
    y: f64,
) {
    if let Err(e) = try_copy_image_on_another(store, dest, source, x, y) {
        tracing::warn!(dest, source, error = %e, "image copy skipped");
    }
}
