use ndarray::prelude::*;

use crate::error::Error;
use crate::pixel::Pixel;
use crate::rect::Rect;

/// Single-channel feature map, rows by columns.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a, T: Pixel> {
    pub dims: (usize, usize), // (width, height)
    data: ArrayView2<'a, T>,
}

impl<'a, T: Pixel> Frame<'a, T> {
    pub fn new(data: ArrayView2<'a, T>) -> Result<Self, Error> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyFrame(cols, rows));
        }

        Ok(Self {
            dims: (cols, rows),
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.1
    }

    #[inline]
    pub fn view(&self) -> ArrayView2<'a, T> {
        self.data
    }

    /// Crop to `rect`, which must already be clipped to this frame.
    #[inline]
    pub fn crop(&self, rect: &Rect) -> ArrayView2<'a, T> {
        let (rows, cols) = rect.slice_bounds();
        self.data.slice_move(s![rows, cols])
    }
}

/// Histogram bin of every pixel, row-major, failing on the first value that is
/// not a valid sample of `T`.
pub(crate) fn try_for_each_bin<T, F>(
    view: ArrayView2<'_, T>,
    num_bins: usize,
    mut f: F,
) -> Result<(), Error>
where
    T: Pixel,
    F: FnMut((usize, usize), usize),
{
    for ((row, col), &px) in view.indexed_iter() {
        let bin = px.bin(num_bins).ok_or(Error::InvalidPixel {
            col,
            row,
            kind: T::KIND,
        })?;

        f((row, col), bin);
    }

    Ok(())
}
