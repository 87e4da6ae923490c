use log::debug;
use ndarray::prelude::*;
use rayon::prelude::*;
use std::collections::HashMap;

use crate::config::TrackerConfig;
use crate::error::Error;
use crate::pixel::Pixel;
use crate::rect::Rect;
use crate::tracker::{HistogramTracker, TrackResult};

/// Independent trackers, one per named object, stepped over the same frames.
#[derive(Debug, Clone, Default)]
pub struct TrackerSet {
    config: TrackerConfig,
    trackers: HashMap<String, HistogramTracker>,
}

impl TrackerSet {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            config,
            trackers: HashMap::new(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&HistogramTracker> {
        self.trackers.get(name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut HistogramTracker> {
        self.trackers.get_mut(name)
    }

    pub fn insert(&mut self, name: &str, tracker: HistogramTracker) -> Option<HistogramTracker> {
        self.trackers.insert(name.to_string(), tracker)
    }

    pub fn remove(&mut self, name: &str) -> Option<HistogramTracker> {
        self.trackers.remove(name)
    }

    /// (Re-)initializes the tracker called `name`. A new tracker gets the set's
    /// config and is only added once its initialization succeeded.
    pub fn initialize_object<T: Pixel>(
        &mut self,
        name: &str,
        frame: ArrayView2<'_, T>,
        region: Rect,
        num_bins: usize,
    ) -> Result<(), Error> {
        if let Some(tracker) = self.trackers.get_mut(name) {
            return tracker.initialize_object_with_bins(frame, region, num_bins);
        }

        let mut tracker = HistogramTracker::with_config(self.config)?;
        tracker.initialize_object_with_bins(frame, region, num_bins)?;

        debug!("new tracker {:?}", name);
        self.trackers.insert(name.to_string(), tracker);

        Ok(())
    }

    /// Steps every tracker over `frame` in parallel. A failing tracker only
    /// reports its own error.
    pub fn track_all<T: Pixel>(
        &mut self,
        frame: ArrayView2<'_, T>,
    ) -> HashMap<String, Result<TrackResult, Error>> {
        self.trackers
            .par_iter_mut()
            .map(|(name, tracker)| (name.clone(), tracker.track(frame)))
            .collect()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HistogramTracker)> {
        self.trackers.iter().map(|(k, v)| (k.as_str(), v))
    }
}
