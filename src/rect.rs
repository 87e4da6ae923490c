use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

/// Integer left-top-width-height rectangle, covers columns `x..x + width` and
/// rows `y..y + height`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero-area rectangle anchored at `(x, y)`.
    #[inline]
    pub const fn point(x: i32, y: i32) -> Self {
        Self::new(x, y, 0, 0)
    }

    /// Rectangle of the given size whose center lies as close as possible to
    /// `center`.
    pub fn centered_at(center: na::Point2<f64>, width: u32, height: u32) -> Self {
        let x = (center.x - (width as f64 - 1.0) / 2.0).round() as i32;
        let y = (center.y - (height as f64 - 1.0) / 2.0).round() as i32;

        Self::new(x, y, width, height)
    }

    #[inline(always)]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    #[inline(always)]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center of the covered pixels.
    #[inline]
    pub fn center(&self) -> na::Point2<f64> {
        na::Point2::new(
            self.x as f64 + (self.width as f64 - 1.0) / 2.0,
            self.y as f64 + (self.height as f64 - 1.0) / 2.0,
        )
    }

    /// Intersection with an image of `(width, height)` pixels. A rectangle that
    /// misses the image keeps its corner clamped into bounds and has zero size.
    pub fn clip(&self, dims: (usize, usize)) -> Rect {
        let (fw, fh) = (dims.0 as i64, dims.1 as i64);

        let x1 = (self.x as i64).clamp(0, fw);
        let y1 = (self.y as i64).clamp(0, fh);
        let x2 = self.right().clamp(0, fw);
        let y2 = self.bottom().clamp(0, fh);

        let (w, h) = if x2 > x1 && y2 > y1 {
            (x2 - x1, y2 - y1)
        } else {
            (0, 0)
        };

        Rect::new(x1 as i32, y1 as i32, w as u32, h as u32)
    }

    /// Grows the rectangle by `pad` pixels on each side.
    pub fn pad(&self, pad: u32) -> Rect {
        Rect::new(
            self.x.saturating_sub(pad as i32),
            self.y.saturating_sub(pad as i32),
            self.width.saturating_add(pad.saturating_mul(2)),
            self.height.saturating_add(pad.saturating_mul(2)),
        )
    }

    /// Margin added around a converged window: `ceil(max(w, h) * ratio / 200)`
    /// with `ratio` in percent.
    pub fn expand(&self, ratio: f64) -> Rect {
        let side = self.width.max(self.height) as f64;
        let pad = (side * ratio / 200.0).ceil().max(0.0) as u32;

        self.pad(pad)
    }

    /// Row and column ranges to slice an image with. Only meaningful for a
    /// rectangle already clipped to that image.
    #[inline]
    pub(crate) fn slice_bounds(&self) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let x = self.x.max(0) as usize;
        let y = self.y.max(0) as usize;

        (y..y + self.height as usize, x..x + self.width as usize)
    }
}

impl From<[i32; 4]> for Rect {
    #[inline]
    fn from(v: [i32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2].max(0) as u32, v[3].max(0) as u32)
    }
}
