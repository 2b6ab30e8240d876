//! Color and depth grids for one render pass.
//!
//! [`FrameBuffer`] is the output: a row-major RGBA8 grid with its origin at
//! the top-left. [`DepthBuffer`] is pipeline-local and holds camera-space Z
//! per pixel. [`RenderTarget`] borrows both so rasterizers can write through
//! a single depth-tested entry point.

use std::path::Path;

use image::{ImageResult, RgbaImage};

use crate::colors::Color;

/// Owned RGBA8 color grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Create a framebuffer filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            pixels: vec![background; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels, top-left first.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Set a pixel without depth testing. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Pixel data as packed RGBA bytes, ready for a streaming texture or an
    /// image encoder.
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let color = self.pixels[(y * self.width + x) as usize];
            image::Rgba(color.to_bytes())
        })
    }

    /// Encode the framebuffer to `path`; the format follows the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_image().save(path)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }
}

/// Per-pixel camera-space depth, initialized to +infinity.
#[derive(Clone, Debug)]
pub struct DepthBuffer {
    depths: Vec<f64>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f64::INFINITY; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<f64> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(self.depths[(y as u32 * self.width + x as u32) as usize])
        } else {
            None
        }
    }
}

/// A view over a color grid and its depth grid for the duration of a pass.
pub struct RenderTarget<'a> {
    frame: &'a mut FrameBuffer,
    depth: &'a mut DepthBuffer,
}

impl<'a> RenderTarget<'a> {
    /// # Panics
    /// Panics in debug builds if the two grids differ in size.
    pub fn new(frame: &'a mut FrameBuffer, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            (frame.width, frame.height),
            (depth.width, depth.height),
            "Depth buffer size doesn't match the framebuffer"
        );
        Self { frame, depth }
    }

    pub fn width(&self) -> u32 {
        self.frame.width
    }

    pub fn height(&self) -> u32 {
        self.frame.height
    }

    /// Whether row `y` exists in the grid.
    #[inline]
    pub fn contains_row(&self, y: i32) -> bool {
        y >= 0 && y < self.frame.height as i32
    }

    /// Depth-tested write at (x, y).
    ///
    /// The pixel is only written if `depth` is strictly less than the stored
    /// value, so on a tie the earlier writer wins. A NaN depth never passes.
    /// `shade` is only evaluated when the test passes. Out-of-bounds
    /// coordinates are ignored.
    ///
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth<F>(&mut self, x: i32, y: i32, depth: f64, shade: F) -> bool
    where
        F: FnOnce() -> Color,
    {
        let Some(idx) = self.frame.index(x, y) else {
            return false;
        };
        if depth < self.depth.depths[idx] {
            self.depth.depths[idx] = depth;
            self.frame.pixels[idx] = shade();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    #[test]
    fn depth_only_tightens() {
        let mut frame = FrameBuffer::new(4, 4, BLACK);
        let mut depth = DepthBuffer::new(4, 4);
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);

        {
            let mut target = RenderTarget::new(&mut frame, &mut depth);
            assert!(target.set_pixel_with_depth(1, 2, 5.0, || red));
            // Farther: rejected
            assert!(!target.set_pixel_with_depth(1, 2, 7.0, || blue));
            // Tie: earlier writer wins
            assert!(!target.set_pixel_with_depth(1, 2, 5.0, || blue));
        }
        assert_eq!(frame.get_pixel(1, 2), Some(red));
        assert_eq!(depth.get(1, 2), Some(5.0));

        {
            let mut target = RenderTarget::new(&mut frame, &mut depth);
            assert!(target.set_pixel_with_depth(1, 2, 2.0, || blue));
        }
        assert_eq!(frame.get_pixel(1, 2), Some(blue));
        assert_eq!(depth.get(1, 2), Some(2.0));
    }

    #[test]
    fn shade_is_skipped_when_depth_fails() {
        let mut frame = FrameBuffer::new(2, 2, BLACK);
        let mut depth = DepthBuffer::new(2, 2);
        let mut target = RenderTarget::new(&mut frame, &mut depth);
        target.set_pixel_with_depth(0, 0, 1.0, || WHITE);
        let mut called = false;
        target.set_pixel_with_depth(0, 0, 3.0, || {
            called = true;
            WHITE
        });
        assert!(!called);
    }

    #[test]
    fn nan_depth_is_never_written() {
        let mut frame = FrameBuffer::new(2, 2, BLACK);
        let mut depth = DepthBuffer::new(2, 2);
        let mut target = RenderTarget::new(&mut frame, &mut depth);
        assert!(!target.set_pixel_with_depth(0, 0, f64::NAN, || WHITE));
        assert_eq!(depth.get(0, 0), Some(f64::INFINITY));
    }

    #[test]
    fn out_of_bounds_writes_are_discarded() {
        let mut frame = FrameBuffer::new(3, 3, BLACK);
        let mut depth = DepthBuffer::new(3, 3);
        let mut target = RenderTarget::new(&mut frame, &mut depth);
        assert!(!target.set_pixel_with_depth(-1, 0, 0.0, || WHITE));
        assert!(!target.set_pixel_with_depth(0, 3, 0.0, || WHITE));
        assert!(!target.set_pixel_with_depth(3, 1, 0.0, || WHITE));
        assert!(frame.pixels().iter().all(|&c| c == BLACK));
    }

    #[test]
    fn bytes_and_image_are_row_major() {
        let mut frame = FrameBuffer::new(2, 2, BLACK);
        frame.set_pixel(1, 0, Color::new(1, 2, 3, 4));
        let bytes = frame.as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);

        let image = frame.to_image();
        assert_eq!(image.get_pixel(1, 0).0, [1, 2, 3, 4]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 0, 255]);
    }
}
