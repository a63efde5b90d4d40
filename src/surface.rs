//! The on-screen surface: a typed view over the provider's mapped buffer
//! plus the drawing operations.
//!
//! A [`Surface`] never owns the framebuffer. The provider (device wrapper,
//! test harness, …) opens the device, maps its memory, and reports geometry;
//! the surface borrows the byte buffer for the duration of a drawing pass.
//! The surface assumes a single writer: callers that draw from multiple
//! threads must add their own locking around it.
//!
//! Every drawing operation checks the pixel word's depth against the
//! surface once per call, then forwards to the depth-specific plane, where
//! out-of-bounds coordinates are silently clipped.

use crate::array::PixelArray;
use crate::error::RasterError;
use crate::geom::{Point, Rect};
use crate::mask::ChannelMask;
use crate::pixel::{Depth, PixelWord};
use crate::plane::Plane;
use crate::view;
use rgb::Rgba;

/// Geometry the surface provider reports for its mapped buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceInfo {
    /// Visible width in pixels.
    pub width: u32,
    /// Visible height in pixels.
    pub height: u32,
    /// Bytes per scanline; may exceed `width * word_size` due to padding.
    pub stride: u32,
    /// Bits per pixel: 8, 16, 24, or 32.
    pub bits_per_pixel: u32,
    /// Byte offset from the buffer start to the visible region.
    pub offset: usize,
    /// Where each channel's bits live within a pixel word.
    pub mask: ChannelMask,
}

/// The external collaborator that owns the device and its mapping.
pub trait SurfaceProvider {
    /// Current geometry of the mapped buffer.
    fn info(&self) -> SurfaceInfo;

    /// The mapped bytes. Length must be at least
    /// `info().offset + info().stride * info().height`.
    fn buffer_mut(&mut self) -> &mut [u8];
}

enum Planes<'a> {
    D8(Plane<'a, 1>),
    D16(Plane<'a, 2>),
    D24(Plane<'a, 3>),
    D32(Plane<'a, 4>),
}

/// Run `$body` with the plane matching the word's depth, or fail with
/// `DepthMismatch`. This is the once-per-call depth check: shape loops
/// below it never re-check.
macro_rules! with_plane {
    ($surface:expr, $word:expr, |$plane:ident, $w:ident| $body:expr) => {{
        let expected = $surface.depth();
        match (&mut $surface.planes, $word) {
            (Planes::D8($plane), PixelWord::D8($w)) => {
                $body;
                Ok(())
            }
            (Planes::D16($plane), PixelWord::D16($w)) => {
                $body;
                Ok(())
            }
            (Planes::D24($plane), PixelWord::D24($w)) => {
                $body;
                Ok(())
            }
            (Planes::D32($plane), PixelWord::D32($w)) => {
                $body;
                Ok(())
            }
            (_, word) => Err(RasterError::DepthMismatch {
                expected,
                found: word.depth(),
            }),
        }
    }};
}

macro_rules! each_plane {
    ($planes:expr, |$p:ident| $body:expr) => {
        match $planes {
            Planes::D8($p) => $body,
            Planes::D16($p) => $body,
            Planes::D24($p) => $body,
            Planes::D32($p) => $body,
        }
    };
}

/// A drawable view of the on-screen framebuffer.
pub struct Surface<'a> {
    mask: ChannelMask,
    planes: Planes<'a>,
}

impl<'a> Surface<'a> {
    /// Build a surface over a mapped byte buffer.
    ///
    /// # Errors
    ///
    /// - [`RasterError::UnsupportedDepth`] if `bits_per_pixel` is not one
    ///   of 8, 16, 24, 32.
    /// - [`RasterError::InvalidMask`] if the channel mask violates the
    ///   non-overlap/width invariant for that depth.
    /// - [`RasterError::OutOfRange`] if `offset` is beyond the buffer.
    pub fn new(buffer: &'a mut [u8], info: &SurfaceInfo) -> Result<Self, RasterError> {
        let depth = Depth::from_bits(info.bits_per_pixel)?;
        info.mask.validate(depth)?;
        let width = info.width as i32;
        let height = info.height as i32;
        let pixel_stride = info.stride as usize / depth.word_size();
        let planes = match depth {
            Depth::D8 => Planes::D8(Plane {
                width,
                height,
                pixel_stride,
                words: view::words_mut::<1>(buffer, info.offset)?,
            }),
            Depth::D16 => Planes::D16(Plane {
                width,
                height,
                pixel_stride,
                words: view::words_mut::<2>(buffer, info.offset)?,
            }),
            Depth::D24 => Planes::D24(Plane {
                width,
                height,
                pixel_stride,
                words: view::words_mut::<3>(buffer, info.offset)?,
            }),
            Depth::D32 => Planes::D32(Plane {
                width,
                height,
                pixel_stride,
                words: view::words_mut::<4>(buffer, info.offset)?,
            }),
        };
        Ok(Self {
            mask: info.mask,
            planes,
        })
    }

    /// Build a surface straight from a provider.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Surface::new`].
    pub fn from_provider<P: SurfaceProvider>(provider: &mut P) -> Result<Surface<'_>, RasterError> {
        let info = provider.info();
        Surface::new(provider.buffer_mut(), &info)
    }

    /// Visible width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        each_plane!(&self.planes, |p| p.width as u32)
    }

    /// Visible height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        each_plane!(&self.planes, |p| p.height as u32)
    }

    /// Scanline stride in whole pixels.
    #[inline]
    pub fn pixel_stride(&self) -> usize {
        each_plane!(&self.planes, |p| p.pixel_stride)
    }

    /// The surface's pixel depth.
    #[inline]
    pub fn depth(&self) -> Depth {
        match &self.planes {
            Planes::D8(_) => Depth::D8,
            Planes::D16(_) => Depth::D16,
            Planes::D24(_) => Depth::D24,
            Planes::D32(_) => Depth::D32,
        }
    }

    /// The surface's channel mask.
    #[inline]
    pub fn mask(&self) -> ChannelMask {
        self.mask
    }

    /// Encode a color for this surface's depth and channel mask.
    pub fn pixel(&self, color: Rgba<u8>) -> PixelWord {
        self.depth().encode(color, &self.mask)
    }

    /// Read back the word at `(x, y)`, or `None` off-surface.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<PixelWord> {
        match &self.planes {
            Planes::D8(p) => p.get(x, y).map(PixelWord::D8),
            Planes::D16(p) => p.get(x, y).map(PixelWord::D16),
            Planes::D24(p) => p.get(x, y).map(PixelWord::D24),
            Planes::D32(p) => p.get(x, y).map(PixelWord::D32),
        }
    }

    /// Write one pixel. Out-of-bounds coordinates are silently ignored.
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] if the word's size differs from the
    /// surface depth.
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: PixelWord) -> Result<(), RasterError> {
        with_plane!(self, pixel, |p, w| p.put(x, y, w))
    }

    /// Zero every addressable word of the mapped view — the provider's
    /// full reported length, not just the visible `width * height`.
    pub fn clear(&mut self) {
        each_plane!(&mut self.planes, |p| p.clear())
    }

    /// Outline a rectangle; both `min` and `max` edges are inclusive.
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] on a word of the wrong size.
    pub fn draw_box(&mut self, rect: Rect, pixel: PixelWord) -> Result<(), RasterError> {
        with_plane!(self, pixel, |p, w| p.draw_box(rect, w))
    }

    /// Fill a rectangle, half-open on the `max` edge (unlike
    /// [`draw_box`](Self::draw_box), which includes it).
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] on a word of the wrong size.
    pub fn fill_box(&mut self, rect: Rect, pixel: PixelWord) -> Result<(), RasterError> {
        with_plane!(self, pixel, |p, w| p.fill_box(rect, w))
    }

    /// Draw a line between two points, endpoints inclusive.
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] on a word of the wrong size.
    pub fn draw_line(&mut self, p0: Point, p1: Point, pixel: PixelWord) -> Result<(), RasterError> {
        with_plane!(self, pixel, |p, w| p.draw_line(p0, p1, w))
    }

    /// Outline a circle of radius `r` around `(cx, cy)`.
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] on a word of the wrong size.
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        pixel: PixelWord,
    ) -> Result<(), RasterError> {
        with_plane!(self, pixel, |p, w| p.draw_circle(cx, cy, r, w))
    }

    /// Fill a circle of radius `r` around `(cx, cy)`.
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] on a word of the wrong size.
    pub fn fill_circle(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        pixel: PixelWord,
    ) -> Result<(), RasterError> {
        with_plane!(self, pixel, |p, w| p.fill_circle(cx, cy, r, w))
    }

    /// Copy a pixel array onto the surface with its top-left cell at
    /// `(x, y)`.
    ///
    /// This is a raw region copy: rows are trimmed to the on-screen
    /// overlap (a fully off-screen placement is a no-op) and the array's
    /// opacity mask is **not** consulted — every overlapping cell is
    /// written. Use [`PixelArray::composite_onto`] for mask-aware
    /// compositing between arrays.
    ///
    /// # Errors
    ///
    /// [`RasterError::DepthMismatch`] if the array's depth differs from
    /// the surface's.
    pub fn put_array(&mut self, array: &PixelArray, x: i32, y: i32) -> Result<(), RasterError> {
        let expected = self.depth();
        let w = array.width() as i32;
        let h = array.height() as i32;
        match (&mut self.planes, array.cells()) {
            (Planes::D8(p), crate::array::Cells::D8(c)) => {
                p.blit(c, w, h, x, y);
                Ok(())
            }
            (Planes::D16(p), crate::array::Cells::D16(c)) => {
                p.blit(c, w, h, x, y);
                Ok(())
            }
            (Planes::D24(p), crate::array::Cells::D24(c)) => {
                p.blit(c, w, h, x, y);
                Ok(())
            }
            (Planes::D32(p), crate::array::Cells::D32(c)) => {
                p.blit(c, w, h, x, y);
                Ok(())
            }
            (_, cells) => Err(RasterError::DepthMismatch {
                expected,
                found: cells.depth(),
            }),
        }
    }
}
