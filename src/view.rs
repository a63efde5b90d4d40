//! Zero-copy typed views over raw framebuffer bytes.
//!
//! The surface provider hands over a mapped byte buffer; these functions
//! reinterpret it as a slice of fixed-size pixel words without copying.
//! Construction bounds the element count up front (`floor((len - offset) /
//! N)`, any trailing partial word is dropped); element access past that
//! count is the caller's responsibility to avoid, exactly as with any
//! slice index.

use crate::error::RasterError;

/// Reinterpret `buffer[offset..]` as a slice of `N`-byte pixel words.
///
/// # Errors
///
/// Returns [`RasterError::OutOfRange`] if `offset > buffer.len()`.
///
/// # Panics
///
/// Panics if `N == 0`.
pub fn words<const N: usize>(buffer: &[u8], offset: usize) -> Result<&[[u8; N]], RasterError> {
    assert!(N > 0, "pixel word size must be nonzero");
    if offset > buffer.len() {
        return Err(RasterError::OutOfRange {
            offset,
            len: buffer.len(),
        });
    }
    let tail = &buffer[offset..];
    let whole = tail.len() - tail.len() % N;
    Ok(bytemuck::cast_slice(&tail[..whole]))
}

/// Mutable variant of [`words`].
///
/// # Errors
///
/// Returns [`RasterError::OutOfRange`] if `offset > buffer.len()`.
///
/// # Panics
///
/// Panics if `N == 0`.
pub fn words_mut<const N: usize>(
    buffer: &mut [u8],
    offset: usize,
) -> Result<&mut [[u8; N]], RasterError> {
    assert!(N > 0, "pixel word size must be nonzero");
    let len = buffer.len();
    if offset > len {
        return Err(RasterError::OutOfRange { offset, len });
    }
    let tail = &mut buffer[offset..];
    let whole = tail.len() - tail.len() % N;
    Ok(bytemuck::cast_slice_mut(&mut tail[..whole]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn length_is_floored() {
        let buf = [0u8; 11];
        assert_eq!(words::<4>(&buf, 0).unwrap().len(), 2);
        assert_eq!(words::<3>(&buf, 0).unwrap().len(), 3);
        assert_eq!(words::<2>(&buf, 1).unwrap().len(), 5);
        assert_eq!(words::<1>(&buf, 0).unwrap().len(), 11);
    }

    #[test]
    fn offset_at_end_is_empty() {
        let buf = [0u8; 8];
        assert!(words::<4>(&buf, 8).unwrap().is_empty());
    }

    #[test]
    fn offset_past_end_fails() {
        let buf = [0u8; 8];
        assert_eq!(
            words::<4>(&buf, 9),
            Err(RasterError::OutOfRange { offset: 9, len: 8 })
        );
        let mut buf = [0u8; 8];
        assert_eq!(
            words_mut::<2>(&mut buf, 100).unwrap_err(),
            RasterError::OutOfRange {
                offset: 100,
                len: 8
            }
        );
    }

    #[test]
    fn writes_land_in_the_backing_buffer() {
        let mut buf = vec![0u8; 12];
        {
            let view = words_mut::<3>(&mut buf, 3).unwrap();
            assert_eq!(view.len(), 3);
            view[0] = [1, 2, 3];
            view[2] = [7, 8, 9];
        }
        assert_eq!(buf, [0, 0, 0, 1, 2, 3, 0, 0, 0, 7, 8, 9]);
    }

    #[test]
    fn view_starts_at_offset() {
        let buf = [9u8, 9, 1, 2, 3, 4];
        let view = words::<2>(&buf, 2).unwrap();
        assert_eq!(view, &[[1, 2], [3, 4]]);
    }
}
