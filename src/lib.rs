//! Histogram based object tracking (CAMShift).
//!
//! A [`HistogramTracker`] learns the histogram of one feature channel (a hue
//! plane, for instance) inside an initial region, back-projects every new
//! frame through it and runs mean-shift over the resulting weight map. The
//! converged window is refined by fitting an ellipse to its moments, which
//! yields the object's box, orientation and a confidence score.
//!
//! ```no_run
//! use camshift::{HistogramTracker, Rect};
//! use ndarray::Array2;
//!
//! # fn main() -> Result<(), camshift::Error> {
//! let hue = Array2::<u8>::zeros((120, 160));
//! let mut tracker = HistogramTracker::new();
//! tracker.initialize_object(hue.view(), Rect::new(40, 30, 20, 20))?;
//!
//! let res = tracker.track(hue.view())?;
//! if res.score < 0.2 {
//!     tracker.seed_window(Rect::new(40, 30, 20, 20))?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod ellipse;
pub mod error;
pub mod frame;
pub mod histogram;
pub mod mean_shift;
pub mod moments;
pub mod multi;
pub mod pixel;
pub mod rect;
pub mod tracker;

pub use config::TrackerConfig;
pub use ellipse::Ellipse;
pub use error::Error;
pub use histogram::ObjectHistogram;
pub use multi::TrackerSet;
pub use pixel::Pixel;
pub use rect::Rect;
pub use tracker::{HistogramTracker, TrackResult};
