//! Off-screen pixel arrays and mask-aware compositing.
//!
//! A [`PixelArray`] holds an image already encoded at a surface's depth and
//! channel layout, so repeated blits pay the codec cost once. At the masked
//! depths (16, 24, 32 bpp) the array carries a per-cell opacity flag taken
//! from the source alpha; 8 bpp is plain luma and has no notion of
//! transparency.
//!
//! Arrays reach the screen two ways: [`Surface::put_array`] is a raw
//! clipped region copy, and [`PixelArray::composite_onto`] layers one array
//! over another while honoring opacity.

use alloc::vec;
use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::{Rgb, Rgba};

use crate::error::RasterError;
use crate::geom::Rect;
use crate::mask::ChannelMask;
use crate::pixel::{self, Depth, PixelWord};
use crate::surface::Surface;

/// Anything that can be sampled as an RGBA image when building a
/// [`PixelArray`].
pub trait SourceImage {
    /// The image's pixel extent, half-open on the `max` edge.
    fn bounds(&self) -> Rect;

    /// The color at an in-bounds coordinate.
    fn color_at(&self, x: i32, y: i32) -> Rgba<u8>;
}

impl SourceImage for ImgRef<'_, Rgba<u8>> {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    fn color_at(&self, x: i32, y: i32) -> Rgba<u8> {
        self.buf()[x as usize + y as usize * self.stride()]
    }
}

impl SourceImage for ImgRef<'_, Rgb<u8>> {
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    fn color_at(&self, x: i32, y: i32) -> Rgba<u8> {
        let c = self.buf()[x as usize + y as usize * self.stride()];
        Rgba {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

pub(crate) enum Cells {
    D8(Vec<[u8; 1]>),
    D16(Vec<[u8; 2]>),
    D24(Vec<[u8; 3]>),
    D32(Vec<[u8; 4]>),
}

impl Cells {
    pub(crate) fn depth(&self) -> Depth {
        match self {
            Self::D8(_) => Depth::D8,
            Self::D16(_) => Depth::D16,
            Self::D24(_) => Depth::D24,
            Self::D32(_) => Depth::D32,
        }
    }
}

/// An image pre-encoded for one depth and channel layout.
pub struct PixelArray {
    width: usize,
    height: usize,
    cells: Cells,
    /// Per-cell opacity, present at the masked depths only.
    opacity: Option<Vec<bool>>,
}

impl PixelArray {
    /// Encode a source image at the given depth and channel layout.
    ///
    /// At masked depths each cell's opacity flag is set when the source
    /// alpha is nonzero.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidMask`] if the mask does not validate
    /// for the depth.
    pub fn from_image(
        image: &impl SourceImage,
        depth: Depth,
        mask: &ChannelMask,
    ) -> Result<Self, RasterError> {
        mask.validate(depth)?;
        let bounds = image.bounds();
        let width = bounds.width() as usize;
        let height = bounds.height() as usize;

        let mut colors = Vec::with_capacity(width * height);
        for y in bounds.min.y..bounds.max.y {
            for x in bounds.min.x..bounds.max.x {
                colors.push(image.color_at(x, y));
            }
        }

        let opacity = depth
            .masked()
            .then(|| colors.iter().map(|c| c.a > 0).collect());
        let cells = match depth {
            Depth::D8 => Cells::D8(colors.iter().map(|&c| pixel::encode8(c)).collect()),
            Depth::D16 => Cells::D16(colors.iter().map(|&c| pixel::encode16(c, mask)).collect()),
            Depth::D24 => Cells::D24(colors.iter().map(|&c| pixel::encode24(c, mask)).collect()),
            Depth::D32 => Cells::D32(colors.iter().map(|&c| pixel::encode32(c, mask)).collect()),
        };

        Ok(Self {
            width,
            height,
            cells,
            opacity,
        })
    }

    /// A `width` by `height` array with every cell set to `word`, fully
    /// opaque.
    pub fn filled(width: usize, height: usize, word: PixelWord) -> Self {
        let count = width * height;
        let cells = match word {
            PixelWord::D8(w) => Cells::D8(vec![w; count]),
            PixelWord::D16(w) => Cells::D16(vec![w; count]),
            PixelWord::D24(w) => Cells::D24(vec![w; count]),
            PixelWord::D32(w) => Cells::D32(vec![w; count]),
        };
        let opacity = word.depth().masked().then(|| vec![true; count]);
        Self {
            width,
            height,
            cells,
            opacity,
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The depth the cells were encoded at.
    #[inline]
    pub fn depth(&self) -> Depth {
        self.cells.depth()
    }

    /// The word at `(x, y)`, or `None` outside the array.
    pub fn word(&self, x: i32, y: i32) -> Option<PixelWord> {
        let index = self.index(x, y)?;
        Some(match &self.cells {
            Cells::D8(c) => PixelWord::D8(c[index]),
            Cells::D16(c) => PixelWord::D16(c[index]),
            Cells::D24(c) => PixelWord::D24(c[index]),
            Cells::D32(c) => PixelWord::D32(c[index]),
        })
    }

    /// Whether the cell at `(x, y)` is opaque. Out-of-range coordinates
    /// and unmasked depths report `true`.
    pub fn opaque(&self, x: i32, y: i32) -> bool {
        match (&self.opacity, self.index(x, y)) {
            (Some(mask), Some(index)) => mask[index],
            _ => true,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height)
            .then(|| x as usize + y as usize * self.width)
    }

    pub(crate) fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Layer this array over `dest` with its top-left cell at `(x, y)`,
    /// honoring opacity.
    ///
    /// Copying proceeds cell by cell in row order and stops at the first
    /// source cell that is not opaque or whose destination falls outside
    /// `dest`; cells already written stay written. Destination cells that
    /// receive a copy are marked opaque.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::DepthMismatch`] if the two arrays were
    /// encoded at different depths. Nothing is copied in that case.
    pub fn composite_onto(
        &self,
        dest: &mut PixelArray,
        x: i32,
        y: i32,
    ) -> Result<(), RasterError> {
        let expected = dest.depth();
        let found = self.depth();
        let (dw, dh) = (dest.width, dest.height);
        match (&self.cells, &mut dest.cells) {
            (Cells::D8(s), Cells::D8(d)) => composite(
                s,
                self.opacity.as_deref(),
                self.width,
                self.height,
                d,
                dest.opacity.as_deref_mut(),
                dw,
                dh,
                x,
                y,
            ),
            (Cells::D16(s), Cells::D16(d)) => composite(
                s,
                self.opacity.as_deref(),
                self.width,
                self.height,
                d,
                dest.opacity.as_deref_mut(),
                dw,
                dh,
                x,
                y,
            ),
            (Cells::D24(s), Cells::D24(d)) => composite(
                s,
                self.opacity.as_deref(),
                self.width,
                self.height,
                d,
                dest.opacity.as_deref_mut(),
                dw,
                dh,
                x,
                y,
            ),
            (Cells::D32(s), Cells::D32(d)) => composite(
                s,
                self.opacity.as_deref(),
                self.width,
                self.height,
                d,
                dest.opacity.as_deref_mut(),
                dw,
                dh,
                x,
                y,
            ),
            _ => return Err(RasterError::DepthMismatch { expected, found }),
        }
        Ok(())
    }
}

impl Surface<'_> {
    /// Encode an image at this surface's depth and channel layout.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PixelArray::from_image`].
    pub fn store_image(&self, image: &impl SourceImage) -> Result<PixelArray, RasterError> {
        PixelArray::from_image(image, self.depth(), &self.mask())
    }
}

/// Cell-by-cell overlay in row order. Returns (keeping prior writes) at
/// the first source cell that is masked out or lands outside the
/// destination.
#[allow(clippy::too_many_arguments)]
fn composite<const N: usize>(
    src: &[[u8; N]],
    src_opacity: Option<&[bool]>,
    src_w: usize,
    src_h: usize,
    dst: &mut [[u8; N]],
    mut dst_opacity: Option<&mut [bool]>,
    dst_w: usize,
    dst_h: usize,
    at_x: i32,
    at_y: i32,
) {
    for sy in 0..src_h {
        for sx in 0..src_w {
            let si = sx + sy * src_w;
            if src_opacity.is_some_and(|m| !m[si]) {
                return;
            }
            let dx = at_x + sx as i32;
            let dy = at_y + sy as i32;
            if dx < 0 || dy < 0 || dx >= dst_w as i32 || dy >= dst_h as i32 {
                return;
            }
            let di = dx as usize + dy as usize * dst_w;
            dst[di] = src[si];
            if let Some(m) = dst_opacity.as_deref_mut() {
                m[di] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceInfo;
    use imgref::Img;

    fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
        Rgba { r, g, b, a }
    }

    fn checker_2x2() -> Img<Vec<Rgba<u8>>> {
        Img::new(
            vec![
                rgba(255, 0, 0, 255),
                rgba(0, 255, 0, 255),
                rgba(0, 0, 255, 255),
                rgba(255, 255, 255, 255),
            ],
            2,
            2,
        )
    }

    #[test]
    fn from_image_encodes_every_cell() {
        let img = checker_2x2();
        let array =
            PixelArray::from_image(&img.as_ref(), Depth::D32, &ChannelMask::ARGB8888).unwrap();
        assert_eq!(array.width(), 2);
        assert_eq!(array.height(), 2);
        assert_eq!(array.depth(), Depth::D32);
        for y in 0..2 {
            for x in 0..2 {
                let want = Depth::D32.encode(
                    img.as_ref().color_at(x, y),
                    &ChannelMask::ARGB8888,
                );
                assert_eq!(array.word(x, y), Some(want));
                assert!(array.opaque(x, y));
            }
        }
        assert_eq!(array.word(2, 0), None);
        assert_eq!(array.word(0, -1), None);
    }

    #[test]
    fn from_image_rejects_bad_mask() {
        let img = checker_2x2();
        let overlapping = ChannelMask::new(
            crate::mask::Channel::new(0, 8),
            crate::mask::Channel::new(4, 8),
            crate::mask::Channel::new(16, 8),
            crate::mask::Channel::ABSENT,
        );
        assert_eq!(
            PixelArray::from_image(&img.as_ref(), Depth::D32, &overlapping).err(),
            Some(RasterError::InvalidMask)
        );
    }

    #[test]
    fn opacity_follows_source_alpha() {
        let img = Img::new(
            vec![rgba(10, 20, 30, 255), rgba(10, 20, 30, 0)],
            2,
            1,
        );
        let array =
            PixelArray::from_image(&img.as_ref(), Depth::D16, &ChannelMask::RGB565).unwrap();
        assert!(array.opaque(0, 0));
        assert!(!array.opaque(1, 0));
    }

    #[test]
    fn depth8_arrays_carry_no_opacity() {
        let img = Img::new(vec![rgba(10, 20, 30, 0)], 1, 1);
        let array =
            PixelArray::from_image(&img.as_ref(), Depth::D8, &ChannelMask::default()).unwrap();
        // Zero alpha still reads as opaque: luma cells have no mask.
        assert!(array.opaque(0, 0));
    }

    #[test]
    fn rgb_sources_are_fully_opaque() {
        let img = Img::new(vec![Rgb { r: 1, g: 2, b: 3 }; 4], 2, 2);
        let array =
            PixelArray::from_image(&img.as_ref(), Depth::D32, &ChannelMask::ARGB8888).unwrap();
        assert!(array.opaque(0, 0) && array.opaque(1, 1));
        let back = array.word(0, 0).unwrap().decode(&ChannelMask::ARGB8888);
        assert_eq!(back, rgba(1, 2, 3, 255));
    }

    #[test]
    fn filled_repeats_one_word() {
        let word = PixelWord::D16([0xaa, 0xbb]);
        let array = PixelArray::filled(3, 2, word);
        assert_eq!(array.depth(), Depth::D16);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(array.word(x, y), Some(word));
                assert!(array.opaque(x, y));
            }
        }
    }

    #[test]
    fn composite_copies_words_and_marks_opaque() {
        let img = checker_2x2();
        let src =
            PixelArray::from_image(&img.as_ref(), Depth::D32, &ChannelMask::ARGB8888).unwrap();
        let mut dest = PixelArray::filled(2, 2, PixelWord::zero(Depth::D32));
        src.composite_onto(&mut dest, 0, 0).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(dest.word(x, y), src.word(x, y));
                assert!(dest.opaque(x, y));
            }
        }
    }

    #[test]
    fn composite_depth_mismatch_copies_nothing() {
        let src = PixelArray::filled(1, 1, PixelWord::D16([1, 2]));
        let mut dest = PixelArray::filled(2, 2, PixelWord::zero(Depth::D32));
        let err = src.composite_onto(&mut dest, 0, 0).unwrap_err();
        assert_eq!(
            err,
            RasterError::DepthMismatch {
                expected: Depth::D32,
                found: Depth::D16,
            }
        );
        assert_eq!(dest.word(0, 0), Some(PixelWord::zero(Depth::D32)));
    }

    #[test]
    fn put_array_writes_the_on_screen_overlap() {
        let info = SurfaceInfo {
            width: 4,
            height: 4,
            stride: 16,
            bits_per_pixel: 32,
            offset: 0,
            mask: ChannelMask::ARGB8888,
        };
        let mut buf = vec![0u8; 16 * 4];
        let mut surface = Surface::new(&mut buf, &info).unwrap();
        let array = PixelArray::filled(2, 2, PixelWord::D32([1, 2, 3, 4]));
        // Top-left cell lands off-screen; only the bottom-right cell of
        // the array overlaps the surface.
        surface.put_array(&array, -1, -1).unwrap();
        assert_eq!(surface.get_pixel(0, 0), Some(PixelWord::D32([1, 2, 3, 4])));
        assert_eq!(surface.get_pixel(1, 0), Some(PixelWord::zero(Depth::D32)));
        assert_eq!(surface.get_pixel(0, 1), Some(PixelWord::zero(Depth::D32)));
    }

    #[test]
    fn put_array_depth_mismatch() {
        let info = SurfaceInfo {
            width: 2,
            height: 2,
            stride: 8,
            bits_per_pixel: 32,
            offset: 0,
            mask: ChannelMask::ARGB8888,
        };
        let mut buf = vec![0u8; 16];
        let mut surface = Surface::new(&mut buf, &info).unwrap();
        let array = PixelArray::filled(1, 1, PixelWord::D8([9]));
        assert_eq!(
            surface.put_array(&array, 0, 0).unwrap_err(),
            RasterError::DepthMismatch {
                expected: Depth::D32,
                found: Depth::D8,
            }
        );
    }

    #[test]
    fn store_image_matches_surface_encoding() {
        let info = SurfaceInfo {
            width: 2,
            height: 2,
            stride: 4,
            bits_per_pixel: 16,
            offset: 0,
            mask: ChannelMask::RGB565,
        };
        let mut buf = vec![0u8; 8];
        let surface = Surface::new(&mut buf, &info).unwrap();
        let img = checker_2x2();
        let array = surface.store_image(&img.as_ref()).unwrap();
        assert_eq!(array.depth(), Depth::D16);
        assert_eq!(
            array.word(0, 0),
            Some(surface.pixel(rgba(255, 0, 0, 255)))
        );
    }
}
