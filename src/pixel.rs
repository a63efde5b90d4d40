//! Pixel depths, packed pixel words, and the mask-driven codec.
//!
//! A [`PixelWord`] is the byte-level representation of one on-screen pixel:
//! 1, 2, 3, or 4 bytes depending on [`Depth`]. [`Depth::encode`] scales an
//! 8-bit-per-channel [`Rgba`] color into the channel widths a
//! [`ChannelMask`] describes and lays the result out in the platform's
//! native byte order — framebuffer words are whatever the display hardware
//! reads, so byte order is intentionally host-dependent.

use rgb::Rgba;

use crate::error::RasterError;
use crate::mask::{Channel, ChannelMask};

/// Bits per pixel. Determines the byte size of a [`PixelWord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Depth {
    /// 8 bpp — greyscale/indexed luma. The channel mask is ignored.
    D8 = 8,
    /// 16 bpp, e.g. RGB 5:6:5.
    D16 = 16,
    /// 24 bpp, e.g. RGB 8:8:8 (possibly a 32-bit layout minus its padding byte).
    D24 = 24,
    /// 32 bpp, e.g. XRGB or ARGB 8:8:8:8.
    D32 = 32,
}

impl Depth {
    /// Bits per pixel.
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Byte size of one pixel word.
    #[inline]
    pub const fn word_size(self) -> usize {
        self as usize / 8
    }

    /// Map a provider-reported bits-per-pixel value to a depth.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::UnsupportedDepth`] for anything outside
    /// {8, 16, 24, 32}.
    pub const fn from_bits(bits: u32) -> Result<Self, RasterError> {
        match bits {
            8 => Ok(Self::D8),
            16 => Ok(Self::D16),
            24 => Ok(Self::D24),
            32 => Ok(Self::D32),
            other => Err(RasterError::UnsupportedDepth(other)),
        }
    }

    /// Whether pixel arrays at this depth carry a per-pixel opacity mask.
    ///
    /// Depth 8 is always luma with no notion of transparency.
    #[inline]
    pub const fn masked(self) -> bool {
        !matches!(self, Self::D8)
    }

    /// Encode a color into a packed pixel word at this depth.
    ///
    /// Each present channel is scaled from 8 bits into its mask width with
    /// `value * ((1 << size) - 1) / 255`, shifted to its offset, and OR-ed
    /// into the word. Depth 8 collapses RGB to luma
    /// (`(R*299 + G*587 + B*114) / 1000`) and ignores the mask. Depth 24
    /// keeps only the bytes of the packed integer that the mask actually
    /// covers, so a 32-bit-aligned layout loses its padding byte rather
    /// than a channel. Never fails.
    pub fn encode(self, color: Rgba<u8>, mask: &ChannelMask) -> PixelWord {
        match self {
            Self::D8 => PixelWord::D8(encode8(color)),
            Self::D16 => PixelWord::D16(encode16(color, mask)),
            Self::D24 => PixelWord::D24(encode24(color, mask)),
            Self::D32 => PixelWord::D32(encode32(color, mask)),
        }
    }
}

/// One packed pixel, sized for its depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelWord {
    D8([u8; 1]),
    D16([u8; 2]),
    D24([u8; 3]),
    D32([u8; 4]),
}

impl PixelWord {
    /// The depth this word belongs to.
    #[inline]
    pub const fn depth(&self) -> Depth {
        match self {
            Self::D8(_) => Depth::D8,
            Self::D16(_) => Depth::D16,
            Self::D24(_) => Depth::D24,
            Self::D32(_) => Depth::D32,
        }
    }

    /// The all-zero word at a given depth.
    #[inline]
    pub const fn zero(depth: Depth) -> Self {
        match depth {
            Depth::D8 => Self::D8([0; 1]),
            Depth::D16 => Self::D16([0; 2]),
            Depth::D24 => Self::D24([0; 3]),
            Depth::D32 => Self::D32([0; 4]),
        }
    }

    /// The word's bytes in buffer order.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::D8(b) => b,
            Self::D16(b) => b,
            Self::D24(b) => b,
            Self::D32(b) => b,
        }
    }

    /// Decode a packed word back to an 8-bit-per-channel color.
    ///
    /// Inverse of [`Depth::encode`]: each present channel's bits are scaled
    /// back up with `bits * 255 / ((1 << size) - 1)`. An absent color
    /// channel decodes to 0; absent alpha decodes to 255 (opaque). Depth 8
    /// expands its luma byte to grey.
    pub fn decode(&self, mask: &ChannelMask) -> Rgba<u8> {
        match self {
            Self::D8([l]) => Rgba {
                r: *l,
                g: *l,
                b: *l,
                a: 255,
            },
            Self::D16(b) => unpack(u32::from(u16::from_ne_bytes(*b)), mask),
            Self::D24(b) => unpack(unpack24(*b, mask), mask),
            Self::D32(b) => unpack(u32::from_ne_bytes(*b), mask),
        }
    }
}

// Packing helpers ------------------------------------------------------------

// Typed per-depth encoders, so bulk callers can fill `[u8; N]` cells
// without round-tripping through the enum.

pub(crate) fn encode8(color: Rgba<u8>) -> [u8; 1] {
    [luma(color)]
}

pub(crate) fn encode16(color: Rgba<u8>, mask: &ChannelMask) -> [u8; 2] {
    (pack(color, mask) as u16).to_ne_bytes()
}

pub(crate) fn encode24(color: Rgba<u8>, mask: &ChannelMask) -> [u8; 3] {
    pack24(pack(color, mask), mask)
}

pub(crate) fn encode32(color: Rgba<u8>, mask: &ChannelMask) -> [u8; 4] {
    pack(color, mask).to_ne_bytes()
}

fn luma(color: Rgba<u8>) -> u8 {
    let sum = u32::from(color.r) * 299 + u32::from(color.g) * 587 + u32::from(color.b) * 114;
    (sum / 1000) as u8
}

/// OR all present channels into one packed integer. Intermediate math is
/// 64-bit so an 8-bit value times a full-width channel max cannot overflow.
fn pack(color: Rgba<u8>, mask: &ChannelMask) -> u32 {
    let mut word = 0u64;
    for (value, ch) in [
        (color.r, mask.red),
        (color.g, mask.green),
        (color.b, mask.blue),
        (color.a, mask.alpha),
    ] {
        if !ch.present() {
            continue;
        }
        let max = (1u64 << ch.size) - 1;
        word |= (u64::from(value) * max / 255) << ch.offset;
    }
    word as u32
}

fn unpack(word: u32, mask: &ChannelMask) -> Rgba<u8> {
    let channel = |ch: Channel, absent: u8| -> u8 {
        if !ch.present() {
            return absent;
        }
        let max = (1u64 << ch.size) - 1;
        (((u64::from(word) >> ch.offset) & max) * 255 / max) as u8
    };
    Rgba {
        r: channel(mask.red, 0),
        g: channel(mask.green, 0),
        b: channel(mask.blue, 0),
        a: channel(mask.alpha, 255),
    }
}

/// Lowest bit of native-order byte `i` within a 32-bit word.
const fn byte_lo_bit(i: usize) -> u32 {
    let i = i as u32;
    if cfg!(target_endian = "big") {
        8 * (3 - i)
    } else {
        8 * i
    }
}

/// Narrow a packed 32-bit integer to 3 bytes, keeping only bytes the mask
/// covers. Layouts that fit in 24 bits keep their low 3 native bytes;
/// 32-bit-aligned layouts drop the uncovered padding byte instead.
fn pack24(word: u32, mask: &ChannelMask) -> [u8; 3] {
    let bytes = word.to_ne_bytes();
    let mut out = [0u8; 3];
    let mut n = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if n == out.len() {
            break;
        }
        if mask.covers(byte_lo_bit(i), 8) {
            out[n] = b;
            n += 1;
        }
    }
    out
}

/// Re-expand a 3-byte word into the packed 32-bit integer it was narrowed
/// from, reinserting the skipped padding byte as zero.
fn unpack24(bytes: [u8; 3], mask: &ChannelMask) -> u32 {
    let mut native = [0u8; 4];
    let mut n = 0;
    for (i, slot) in native.iter_mut().enumerate() {
        if n == bytes.len() {
            break;
        }
        if mask.covers(byte_lo_bit(i), 8) {
            *slot = bytes[n];
            n += 1;
        }
    }
    u32::from_ne_bytes(native)
}
