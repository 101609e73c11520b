//! Error types for the chart engine.

use std::fmt;

/// Errors returned by chart construction, data updates and queries.
///
/// Every variant is non-fatal: the operation that produced it leaves the
/// chart exactly as it was before the call.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The dataset is longer than the preallocated entity capacity.
    CapacityExceeded {
        /// Length of the rejected dataset.
        requested: usize,
        /// Maximum number of entities the chart was built for.
        capacity: usize,
    },

    /// A canvas dimension is below one device pixel.
    InvalidDimensions {
        /// Requested width in device pixels.
        width: f32,
        /// Requested height in device pixels.
        height: f32,
    },

    /// The buffer binding step was already performed for this chart.
    AlreadyBound,

    /// A host-supplied index is outside the dataset.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Current number of entities.
        len: usize,
    },
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "Cannot update data to {} entities, capacity is {}",
                    requested, capacity
                )
            }
            ChartError::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid canvas dimensions {}x{}, both must be at least 1",
                    width, height
                )
            }
            ChartError::AlreadyBound => {
                write!(f, "Chart buffers were already bound")
            }
            ChartError::IndexOutOfRange { index, len } => {
                write!(f, "Entity index {} out of range for {} entities", index, len)
            }
        }
    }
}

impl std::error::Error for ChartError {}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
