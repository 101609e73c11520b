//! Error types for the host layer.

use std::fmt;

use graph_renderer::ChartError;

use crate::backend::BufferKind;

/// Errors returned by [`ChartSurface`](crate::ChartSurface).
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// The chart engine rejected the call.
    Chart(ChartError),

    /// A chart buffer is larger than the backend allocation.
    BufferOverflow {
        kind: BufferKind,
        /// Floats the chart emitted.
        len: usize,
        /// Floats the backend can hold.
        capacity: usize,
    },

    /// `frame` was called before `attach`.
    NotAttached,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Chart(err) => write!(f, "Chart error: {}", err),
            HostError::BufferOverflow {
                kind,
                len,
                capacity,
            } => {
                write!(
                    f,
                    "{:?} buffer holds {} floats but the backend only has room for {}",
                    kind, len, capacity
                )
            }
            HostError::NotAttached => write!(f, "Surface is not attached to its backend"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Chart(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ChartError> for HostError {
    fn from(err: ChartError) -> Self {
        HostError::Chart(err)
    }
}
