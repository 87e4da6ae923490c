use log::{debug, trace};
use ndarray::prelude::*;
use serde_derive::Serialize;

use crate::config::TrackerConfig;
use crate::ellipse::Ellipse;
use crate::error::Error;
use crate::frame::Frame;
use crate::histogram::{ObjectHistogram, DEFAULT_NUM_BINS};
use crate::mean_shift::mean_shift;
use crate::moments::Moments;
use crate::pixel::Pixel;
use crate::rect::Rect;

/// Outcome of one tracking step.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrackResult {
    pub bbox: Rect,
    /// Radians in `[-pi/2, pi/2]`, counter-clockwise on screen.
    pub orientation: f64,
    /// Mean back-projected weight inside `bbox`, zero for an empty box.
    pub score: f64,
    /// Fitted ellipse, absent when the object was not found.
    pub ellipse: Option<Ellipse>,
    pub iterations: usize,
}

impl TrackResult {
    fn lost(window: Rect, iterations: usize) -> Self {
        Self {
            bbox: Rect::point(window.x, window.y),
            orientation: 0.0,
            score: 0.0,
            ellipse: None,
            iterations,
        }
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        self.bbox.is_empty()
    }
}

/// CAMShift tracker of a single object described by a histogram of one
/// feature channel.
#[derive(Debug, Clone)]
pub struct HistogramTracker {
    config: TrackerConfig,
    histogram: Option<ObjectHistogram>,
    window: Rect,
    map: Array2<f32>,
}

impl Default for HistogramTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramTracker {
    pub fn new() -> Self {
        Self {
            config: TrackerConfig::default(),
            histogram: None,
            window: Rect::default(),
            map: Array2::zeros((0, 0)),
        }
    }

    pub fn with_config(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::new()
        })
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn search_window(&self) -> Rect {
        self.window
    }

    #[inline]
    pub fn object_histogram(&self) -> Option<&ObjectHistogram> {
        self.histogram.as_ref()
    }

    /// Swaps the appearance model without touching the search window.
    pub fn set_object_histogram(&mut self, bins: Vec<f32>) -> Result<(), Error> {
        self.histogram = Some(ObjectHistogram::from_bins(bins)?);
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.histogram.is_some()
    }

    /// Forgets the object; the configuration is kept.
    pub fn reset(&mut self) {
        self.histogram = None;
        self.window = Rect::default();
        self.map = Array2::zeros((0, 0));
    }

    #[inline]
    pub fn initialize_object<T: Pixel>(
        &mut self,
        frame: ArrayView2<'_, T>,
        region: Rect,
    ) -> Result<(), Error> {
        self.initialize_object_with_bins(frame, region, DEFAULT_NUM_BINS)
    }

    /// Learns the object's histogram from `region` of `frame` and starts the
    /// search there.
    pub fn initialize_object_with_bins<T: Pixel>(
        &mut self,
        frame: ArrayView2<'_, T>,
        region: Rect,
        num_bins: usize,
    ) -> Result<(), Error> {
        let frame = Frame::new(frame)?;
        if num_bins == 0 {
            return Err(Error::InvalidBinCount);
        }

        if region.is_empty() {
            return Err(Error::InvalidRegion(region));
        }

        let clipped = region.clip(frame.dims);
        if clipped.is_empty() {
            return Err(Error::InvalidRegion(region));
        }

        let histogram = ObjectHistogram::from_region(&frame, &clipped, num_bins)?;
        debug!(
            "initialized object from {:?} ({} bins, frame {:?})",
            clipped, num_bins, frame.dims
        );

        self.histogram = Some(histogram);
        self.seed_window(clipped)
    }

    /// Restarts the search from `region`. The region is kept as given and
    /// clipped against each frame it is used with.
    pub fn seed_window(&mut self, region: Rect) -> Result<(), Error> {
        if region.is_empty() {
            return Err(Error::InvalidRegion(region));
        }

        debug!("search window set to {:?}", region);
        self.window = region;

        Ok(())
    }

    /// Locates the object in `frame`, starting from the current search window,
    /// and moves the search window onto the result.
    pub fn track<T: Pixel>(&mut self, frame: ArrayView2<'_, T>) -> Result<TrackResult, Error> {
        let histogram = self.histogram.as_ref().ok_or(Error::NotInitialized)?;
        let frame = Frame::new(frame)?;

        let window = self.window.clip(frame.dims);
        if window.is_empty() {
            debug!("search window {:?} is outside the frame", self.window);

            let res = TrackResult::lost(window, 0);
            self.window = res.bbox;
            return Ok(res);
        }

        histogram.back_project(&frame, &mut self.map)?;

        let cfg = &self.config;
        let shift = mean_shift(
            self.map.view(),
            window,
            cfg.max_iterations,
            cfg.max_step_size,
        );

        if shift.window.is_empty() {
            debug!("object lost: no mass around {:?}", window);

            let res = TrackResult::lost(shift.window, shift.iterations);
            self.window = res.bbox;
            return Ok(res);
        }

        let expanded = shift.window.expand(cfg.expansion_ratio).clip(frame.dims);
        let (rows, cols) = expanded.slice_bounds();
        let moments = Moments::compute(self.map.slice(s![rows, cols]));
        let ellipse = Ellipse::fit(&moments, (expanded.x, expanded.y));

        let bbox = ellipse.bounding_box().clip(frame.dims);
        let score = self.score(&bbox);

        trace!(
            "tracked {:?} -> {:?} in {} iterations, orientation {:.3}, score {:.3}",
            window,
            bbox,
            shift.iterations,
            ellipse.orientation,
            score
        );

        self.window = bbox;

        Ok(TrackResult {
            bbox,
            orientation: ellipse.orientation,
            score,
            ellipse: Some(ellipse),
            iterations: shift.iterations,
        })
    }

    /// Mean weight of the current probability map inside `bbox`. Not clamped,
    /// a user supplied histogram decides the upper bound.
    fn score(&self, bbox: &Rect) -> f64 {
        if bbox.is_empty() {
            return 0.0;
        }

        let (rows, cols) = bbox.slice_bounds();
        let mass: f64 = self
            .map
            .slice(s![rows, cols])
            .iter()
            .map(|&p| p as f64)
            .sum();

        mass / bbox.area() as f64
    }
}
