use thiserror::Error;

use crate::rect::Rect;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("frame is empty ({0}x{1})")]
    EmptyFrame(usize, usize),

    #[error("pixel at (col {col}, row {row}) is outside the range of {kind}")]
    InvalidPixel {
        col: usize,
        row: usize,
        kind: &'static str,
    },

    #[error("number of histogram bins must be positive")]
    InvalidBinCount,

    #[error("invalid region {0:?}")]
    InvalidRegion(Rect),

    #[error("object histogram is not initialized")]
    NotInitialized,

    #[error("invalid object histogram: {0}")]
    InvalidHistogram(String),

    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),
}
