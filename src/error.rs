//! Error type for surface and buffer operations.

use core::fmt;

use crate::pixel::Depth;

/// Errors from surface construction, pixel-word views, and blits.
///
/// Coordinate-level out-of-bounds conditions in the drawing primitives are
/// deliberately **not** errors — they are silently clipped so shapes stay
/// composable without pre-clipping. Depth checks happen once per call,
/// before any pixel is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RasterError {
    /// Bits-per-pixel is not one of 8, 16, 24, or 32.
    UnsupportedDepth(u32),
    /// A pixel word or pixel array does not match the target's depth.
    DepthMismatch {
        /// Depth of the surface or destination array.
        expected: Depth,
        /// Depth of the word or source array handed in.
        found: Depth,
    },
    /// Buffer-view construction with an offset beyond the buffer length.
    OutOfRange {
        /// Requested byte offset.
        offset: usize,
        /// Actual buffer length in bytes.
        len: usize,
    },
    /// Channel mask with overlapping bit ranges, or a range past the
    /// word's addressable bits.
    InvalidMask,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDepth(bits) => {
                write!(f, "unsupported depth: {bits} bits per pixel")
            }
            Self::DepthMismatch { expected, found } => write!(
                f,
                "pixel depth mismatch: surface is {} bpp, got {} bpp",
                expected.bits(),
                found.bits()
            ),
            Self::OutOfRange { offset, len } => {
                write!(f, "view offset {offset} is beyond buffer length {len}")
            }
            Self::InvalidMask => {
                write!(f, "channel mask has overlapping or out-of-range bit ranges")
            }
        }
    }
}

impl core::error::Error for RasterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = RasterError::UnsupportedDepth(15);
        assert_eq!(
            alloc::format!("{err}"),
            "unsupported depth: 15 bits per pixel"
        );

        let err = RasterError::DepthMismatch {
            expected: Depth::D32,
            found: Depth::D16,
        };
        assert_eq!(
            alloc::format!("{err}"),
            "pixel depth mismatch: surface is 32 bpp, got 16 bpp"
        );

        let err = RasterError::OutOfRange { offset: 9, len: 8 };
        assert_eq!(
            alloc::format!("{err}"),
            "view offset 9 is beyond buffer length 8"
        );
    }
}
