//! Channel mask descriptors.
//!
//! A [`ChannelMask`] records where each color channel's bits live inside a
//! packed pixel word, the way a display driver reports them: a bit offset
//! from the least-significant end plus a bit width per channel. A width of
//! zero means the channel is absent.

use crate::error::RasterError;
use crate::pixel::Depth;

/// One channel's position within a packed pixel word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Channel {
    /// Bit offset from the least-significant bit.
    pub offset: u32,
    /// Bit width; 0 means the channel is absent.
    pub size: u32,
}

impl Channel {
    /// Create a channel description.
    #[inline]
    pub const fn new(offset: u32, size: u32) -> Self {
        Self { offset, size }
    }

    /// A channel that is not present in the word.
    pub const ABSENT: Self = Self { offset: 0, size: 0 };

    /// Whether the channel occupies any bits.
    #[inline]
    pub const fn present(self) -> bool {
        self.size > 0
    }

    const fn overlaps(self, other: Self) -> bool {
        self.present()
            && other.present()
            && self.offset < other.offset + other.size
            && other.offset < self.offset + self.size
    }
}

/// Bit layout of the red, green, blue, and alpha channels in a pixel word.
///
/// Constants below are named from the packed integer (bit 0 is the least
/// significant), matching the usual framebuffer format names: `XRGB8888`
/// stores red in bits 16..24, `RGB565` stores red in bits 11..16, and so on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMask {
    pub red: Channel,
    pub green: Channel,
    pub blue: Channel,
    pub alpha: Channel,
}

impl ChannelMask {
    /// Create a mask from the four channel descriptions.
    #[inline]
    pub const fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    // Named layouts ----------------------------------------------------------

    /// 16-bit 5:6:5, no alpha.
    pub const RGB565: Self = Self {
        red: Channel::new(11, 5),
        green: Channel::new(5, 6),
        blue: Channel::new(0, 5),
        alpha: Channel::ABSENT,
    };

    /// 32-bit, red in bits 16..24, high byte unused.
    pub const XRGB8888: Self = Self {
        red: Channel::new(16, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(0, 8),
        alpha: Channel::ABSENT,
    };

    /// 32-bit, red in bits 16..24, alpha in the high byte.
    pub const ARGB8888: Self = Self {
        red: Channel::new(16, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(0, 8),
        alpha: Channel::new(24, 8),
    };

    /// 32-bit, red in the low byte, high byte unused.
    pub const XBGR8888: Self = Self {
        red: Channel::new(0, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(16, 8),
        alpha: Channel::ABSENT,
    };

    /// 32-bit, red in the low byte, alpha in the high byte.
    pub const ABGR8888: Self = Self {
        red: Channel::new(0, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(16, 8),
        alpha: Channel::new(24, 8),
    };

    /// 24-bit, red in bits 16..24.
    pub const RGB888: Self = Self {
        red: Channel::new(16, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(0, 8),
        alpha: Channel::ABSENT,
    };

    /// 24-bit, blue in bits 16..24.
    pub const BGR888: Self = Self {
        red: Channel::new(0, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(16, 8),
        alpha: Channel::ABSENT,
    };

    // Methods ----------------------------------------------------------------

    /// The four channels in red, green, blue, alpha order.
    #[inline]
    pub const fn channels(&self) -> [Channel; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Whether the mask carries an alpha channel.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        self.alpha.present()
    }

    /// Check the mask against a pixel depth.
    ///
    /// Channel bit ranges must not overlap, and every present channel must
    /// fit within the word's addressable bits. A 24-bit word may represent
    /// a 32-bit-aligned layout with one padding byte dropped during packing,
    /// so `Depth::D24` masks are bounded at bit 32 rather than 24. Depth 8
    /// is always luma and ignores the mask entirely.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidMask`] on overlap or overflow.
    pub fn validate(&self, depth: Depth) -> Result<(), RasterError> {
        if depth == Depth::D8 {
            return Ok(());
        }
        let bound = match depth {
            Depth::D24 => 32,
            other => other.bits(),
        };
        let channels = self.channels();
        for ch in channels {
            if !ch.present() {
                continue;
            }
            let end = ch
                .offset
                .checked_add(ch.size)
                .ok_or(RasterError::InvalidMask)?;
            if end > bound {
                return Err(RasterError::InvalidMask);
            }
        }
        for i in 0..channels.len() {
            for j in i + 1..channels.len() {
                if channels[i].overlaps(channels[j]) {
                    return Err(RasterError::InvalidMask);
                }
            }
        }
        Ok(())
    }

    /// Whether any present channel stores bits in `[lo, lo + len)`.
    ///
    /// Drives the 24-bit pack: bytes of the packed integer covered by no
    /// channel are skipped when narrowing to the 3-byte word.
    pub(crate) fn covers(&self, lo: u32, len: u32) -> bool {
        self.channels()
            .iter()
            .any(|ch| ch.present() && ch.offset < lo + len && lo < ch.offset + ch.size)
    }
}
