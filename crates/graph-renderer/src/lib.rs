//! Graph Renderer - animated, interactive bar and line charts
//!
//! This crate provides the chart engine:
//! - Layout of bars or points and value axis scale lines from a dataset
//! - Elapsed-time driven transitions of values, hover growth and colors
//! - Pointer hit testing with click-to-select
//! - Fixed-capacity vertex buffers ready for GPU upload
//!
//! Everything here works in device pixels. Drawing, text and event loop
//! integration are left to the host (see the `graph-renderer-host` crate).
//!
//! # Example
//!
//! ```
//! use graph_renderer::*;
//!
//! let data = [
//!     ChartEntity::new("mon", 10.0),
//!     ChartEntity::new("tue", 30.0),
//!     ChartEntity::new("wed", 3.0),
//! ];
//! let mut chart = BarChart::new(&data, 500.0, 500.0, BarChartOptions::default()).unwrap();
//!
//! let mut pointer = PointerTracker::new();
//! pointer.pointer_move(250.0, 490.0);
//!
//! let mut now = 0.0;
//! while chart.update(now, pointer.state_mut()) {
//!     now += 16.0;
//! }
//!
//! assert_eq!(chart.hovered_index(), Some(1));
//! let rect = chart.entity_rect_at(1).unwrap();
//! assert!(rect.contains(Vec2::new(250.0, 490.0)));
//! ```

// Foundations
pub mod animation;
mod color;
mod config;
mod error;
mod rect;

// Data and state
mod data;
mod dirty;
mod input;
pub mod interaction;

// Geometry
pub mod axis;
pub mod layout;

// Emission
pub mod buffers;

// Engines
mod bar_chart;
mod engine;
mod line_chart;

pub mod profiling;

// Re-exports
pub use axis::{LineEmphasis, ScaleLine, ValueAxis, ValueAxisLabel};
pub use bar_chart::BarChart;
pub use buffers::{BufferCapacities, VERTICES_PER_QUAD};
pub use color::Color;
pub use config::*;
pub use data::{ChartEntity, DataChange, DataStore};
pub use dirty::LayoutDirty;
pub use engine::ChartEngine;
pub use error::{ChartError, Result};
pub use input::{ClickingState, PointerState, PointerTracker};
pub use layout::{BarLayout, LabelSlot, PlotFrame, PointLayout, compute_bar_layout, compute_point_layout};
pub use line_chart::LineChart;
pub use rect::Rect;

pub use glam::Vec2;
