use ndarray::prelude::*;

use crate::error::Error;
use crate::frame::{try_for_each_bin, Frame};
use crate::pixel::Pixel;
use crate::rect::Rect;

pub const DEFAULT_NUM_BINS: usize = 16;

/// Appearance model of the tracked object: a histogram scaled so that its
/// largest bin is 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectHistogram {
    bins: Vec<f32>,
}

impl ObjectHistogram {
    /// Histogram of `region` (already clipped, non-empty) over `num_bins` bins
    /// spanning the full range of `T`.
    pub fn from_region<T: Pixel>(
        frame: &Frame<'_, T>,
        region: &Rect,
        num_bins: usize,
    ) -> Result<Self, Error> {
        if num_bins == 0 {
            return Err(Error::InvalidBinCount);
        }

        if region.is_empty() {
            return Err(Error::InvalidRegion(*region));
        }

        let mut counts = vec![0u64; num_bins];
        try_for_each_bin(frame.crop(region), num_bins, |_, bin| counts[bin] += 1)?;

        let peak = counts.iter().copied().max().unwrap_or(0).max(1) as f64;
        let bins = counts.into_iter().map(|c| (c as f64 / peak) as f32).collect();

        Ok(Self { bins })
    }

    /// Takes a ready-made histogram as is. Every bin must be finite and within
    /// `[0, 1]`; no normalization is applied.
    pub fn from_bins(bins: Vec<f32>) -> Result<Self, Error> {
        if bins.is_empty() {
            return Err(Error::InvalidHistogram("no bins".into()));
        }

        if let Some((idx, v)) = bins
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(Error::InvalidHistogram(format!(
                "bin {} = {} is outside [0, 1]",
                idx, v
            )));
        }

        Ok(Self { bins })
    }

    #[inline]
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.bins
    }

    /// Replaces every pixel of `frame` by the weight of its bin, writing into
    /// `map`. `map` is reshaped only when its size differs from the frame's.
    pub fn back_project<T: Pixel>(
        &self,
        frame: &Frame<'_, T>,
        map: &mut Array2<f32>,
    ) -> Result<(), Error> {
        let shape = frame.view().dim();
        if map.dim() != shape {
            *map = Array2::zeros(shape);
        }

        let bins = &self.bins;
        try_for_each_bin(frame.view(), bins.len(), |idx, bin| map[idx] = bins[bin])
    }
}

impl From<ObjectHistogram> for Vec<f32> {
    #[inline]
    fn from(h: ObjectHistogram) -> Self {
        h.bins
    }
}
