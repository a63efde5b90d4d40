//! Depth-generic raster engine.
//!
//! [`Plane`] is the single code path behind every [`Surface`](crate::Surface)
//! drawing operation: one const-generic instantiation per word size, over
//! the typed view of the mapped buffer. All shape algorithms funnel through
//! [`Plane::put`], which silently drops out-of-bounds writes — callers never
//! pre-clip.

use crate::geom::{Point, Rect};

pub(crate) struct Plane<'a, const N: usize> {
    pub(crate) width: i32,
    pub(crate) height: i32,
    /// Stride in whole pixels (`stride_bytes / N`); may exceed `width`.
    pub(crate) pixel_stride: usize,
    pub(crate) words: &'a mut [[u8; N]],
}

impl<const N: usize> Plane<'_, N> {
    /// Word index for `(x, y)`, or `None` when the coordinate is off the
    /// surface or past the view's mapped length.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        let index = x as usize + y as usize * self.pixel_stride;
        (index < self.words.len()).then_some(index)
    }

    /// Write one word; out-of-bounds coordinates are ignored.
    #[inline]
    pub(crate) fn put(&mut self, x: i32, y: i32, word: [u8; N]) {
        if let Some(index) = self.index(x, y) {
            self.words[index] = word;
        }
    }

    /// Read one word back (test and compositing support).
    #[inline]
    pub(crate) fn get(&self, x: i32, y: i32) -> Option<[u8; N]> {
        self.index(x, y).map(|index| self.words[index])
    }

    /// Zero every addressable word — the entire mapped length, not just
    /// the `width * height` visible area.
    pub(crate) fn clear(&mut self) {
        self.words.fill([0; N]);
    }

    /// Outline a rectangle, min and max edges inclusive.
    pub(crate) fn draw_box(&mut self, rect: Rect, word: [u8; N]) {
        for x in rect.min.x..=rect.max.x {
            self.put(x, rect.min.y, word);
            self.put(x, rect.max.y, word);
        }
        for y in rect.min.y..=rect.max.y {
            self.put(rect.min.x, y, word);
            self.put(rect.max.x, y, word);
        }
    }

    /// Fill a rectangle, half-open on the max edge.
    pub(crate) fn fill_box(&mut self, rect: Rect, word: [u8; N]) {
        for y in rect.min.y..rect.max.y {
            for x in rect.min.x..rect.max.x {
                self.put(x, y, word);
            }
        }
    }

    /// Bresenham line, both endpoints inclusive. Direction is handled by
    /// sign computation rather than reordering the endpoints.
    pub(crate) fn draw_line(&mut self, p0: Point, p1: Point, word: [u8; N]) {
        let mut sx = -1;
        let mut dx = p0.x - p1.x;
        if dx < 0 {
            dx = -dx;
            sx = 1;
        }
        let mut sy = -1;
        let mut dy = p0.y - p1.y;
        if dy < 0 {
            dy = -dy;
            sy = 1;
        }

        let mut x = p0.x;
        let mut y = p0.y;
        let mut err = dx - dy;
        loop {
            self.put(x, y, word);
            if x == p1.x && y == p1.y {
                break;
            }
            let e2 = err * 2;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle outline, plotting the 8-way symmetric points.
    pub(crate) fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, word: [u8; N]) {
        let mut x = r;
        let mut y = 0;
        let mut d = r * -2 + 3;
        while x >= y {
            self.put(cx + x, cy + y, word);
            self.put(cx - x, cy + y, word);
            self.put(cx + x, cy - y, word);
            self.put(cx - x, cy - y, word);
            self.put(cx + y, cy + x, word);
            self.put(cx - y, cy + x, word);
            self.put(cx + y, cy - x, word);
            self.put(cx - y, cy - x, word);
            if d >= 0 {
                x -= 1;
                d -= x * 4;
            }
            y += 1;
            d += y * 4 + 2;
        }
    }

    /// Filled circle: same stepping as [`draw_circle`](Self::draw_circle),
    /// with full inclusive spans across both octant pairs.
    pub(crate) fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, word: [u8; N]) {
        let mut x = r;
        let mut y = 0;
        let mut d = r * -2 + 3;
        while x >= y {
            for dx in cx - x..=cx + x {
                self.put(dx, cy + y, word);
                self.put(dx, cy - y, word);
            }
            for dx in cx - y..=cx + y {
                self.put(dx, cy + x, word);
                self.put(dx, cy - x, word);
            }
            if d >= 0 {
                x -= 1;
                d -= x * 4;
            }
            y += 1;
            d += y * 4 + 2;
        }
    }

    /// Row-by-row copy of a `w`-by-`h` cell grid placed at `(px, py)`,
    /// trimmed to the overlapping sub-rectangle. A fully off-screen
    /// placement copies nothing.
    pub(crate) fn blit(&mut self, cells: &[[u8; N]], w: i32, h: i32, px: i32, py: i32) {
        let x0 = px.max(0);
        let y0 = py.max(0);
        let x1 = (px + w).min(self.width);
        let y1 = (py + h).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let count = (x1 - x0) as usize;
        for dy in y0..y1 {
            let sy = (dy - py) as usize;
            let sx = (x0 - px) as usize;
            let src = sy * w as usize + sx;
            let dst = x0 as usize + dy as usize * self.pixel_stride;
            // The view may be shorter than height * pixel_stride.
            let avail = self.words.len().saturating_sub(dst).min(count);
            self.words[dst..dst + avail].copy_from_slice(&cells[src..src + avail]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    const W: i32 = 8;
    const H: i32 = 6;

    fn backing() -> Vec<[u8; 2]> {
        vec![[0u8; 2]; (W * H) as usize]
    }

    fn plane(words: &mut [[u8; 2]]) -> Plane<'_, 2> {
        Plane {
            width: W,
            height: H,
            pixel_stride: W as usize,
            words,
        }
    }

    fn set_pixels(words: &[[u8; 2]]) -> Vec<(i32, i32)> {
        words
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != [0u8; 2])
            .map(|(i, _)| (i as i32 % W, i as i32 / W))
            .collect()
    }

    const INK: [u8; 2] = [0xaa, 0xbb];

    #[test]
    fn put_clips_all_four_edges() {
        let mut words = backing();
        let mut p = plane(&mut words);
        p.put(-1, 0, INK);
        p.put(0, -1, INK);
        p.put(W, 0, INK);
        p.put(0, H, INK);
        p.put(i32::MIN, i32::MAX, INK);
        assert!(words.iter().all(|w| *w == [0u8; 2]));
    }

    #[test]
    fn put_respects_view_length() {
        // View shorter than width * height: the last row is unmapped.
        let mut words = vec![[0u8; 2]; (W * (H - 1)) as usize];
        let mut p = Plane {
            width: W,
            height: H,
            pixel_stride: W as usize,
            words: &mut words,
        };
        p.put(0, H - 1, INK);
        assert!(words.iter().all(|w| *w == [0u8; 2]));
    }

    #[test]
    fn blit_trims_to_overlap() {
        let mut words = backing();
        let mut p = plane(&mut words);
        let cells = vec![INK; 9]; // 3x3
        p.blit(&cells, 3, 3, -1, -2);
        let set = set_pixels(&words);
        assert_eq!(set, vec![(0, 0), (1, 0)]);
    }

    #[test]
    fn blit_fully_off_screen_is_noop() {
        let mut words = backing();
        let mut p = plane(&mut words);
        let cells = vec![INK; 4];
        p.blit(&cells, 2, 2, W, 0);
        p.blit(&cells, 2, 2, 0, -2);
        p.blit(&cells, 2, 2, -2, -2);
        assert!(words.iter().all(|w| *w == [0u8; 2]));
    }
}
