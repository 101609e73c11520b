//! Graph Renderer Host - runs graph-renderer charts inside an application
//!
//! The engine crate knows nothing about canvases, events or GPUs. This crate
//! supplies the glue a host application needs:
//! - CSS to device pixel conversion of pointer input and canvas size
//! - A frame driver that only updates the engine while something changes
//! - Buffer upload and draw calls through the [`DrawBackend`] trait
//! - Hover, selection and label layout notifications via [`ChartListener`]
//!
//! # Example
//!
//! ```
//! use graph_renderer::{BarChart, BarChartOptions, ChartEntity};
//! use graph_renderer_host::{ChartSurface, FrameOutcome, MockBackend};
//!
//! let data = [ChartEntity::new("a", 3.0), ChartEntity::new("b", 5.0)];
//! // 200x100 CSS pixels at a pixel ratio of 2.
//! let chart = BarChart::new(&data, 400.0, 200.0, BarChartOptions::default()).unwrap();
//! let mut surface = ChartSurface::new(chart, MockBackend::new(), 2.0);
//! surface.attach().unwrap();
//!
//! let mut now = 0.0;
//! while surface.frame(now).unwrap().is_animating() {
//!     now += 16.0;
//! }
//! assert_eq!(surface.frame(now).unwrap(), FrameOutcome::Idle);
//! ```

pub mod backend;
pub mod error;
pub mod events;
pub mod logging;
pub mod mock;
pub mod surface;

pub use backend::{BufferKind, DrawBackend, DrawGroup};
pub use error::HostError;
pub use events::{ChartListener, HoverInfo, LabelLayout, RecordingListener, SelectionInfo};
pub use mock::{DrawCall, MockBackend};
pub use surface::{ChartSurface, FrameOutcome};
