//! Recording backend for tests and headless runs.
//!
//! [`MockBackend`] records every call instead of touching a GPU. Clones
//! share their recording, so a test can keep one handle after moving the
//! other into a [`ChartSurface`](crate::ChartSurface):
//!
//! ```
//! use graph_renderer_host::{BufferKind, DrawBackend, MockBackend};
//!
//! let mock = MockBackend::new();
//! let mut backend = mock.clone();
//! backend.upload(BufferKind::GeneralPositions, &[0.0, 1.0]);
//!
//! assert_eq!(mock.count_uploads(), 1);
//! assert_eq!(mock.uploaded_floats(BufferKind::GeneralPositions), vec![0.0, 1.0]);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use graph_renderer::BufferCapacities;
use parking_lot::Mutex;

use crate::backend::{BufferKind, DrawBackend, DrawGroup};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Allocate(BufferCapacities),
    Upload { kind: BufferKind, len: usize },
    SetCornerRadius(f32),
    Draw { group: DrawGroup, vertex_count: usize },
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<DrawCall>,
    capacities: Option<BufferCapacities>,
    /// Latest upload per buffer, as raw bytes.
    uploads: HashMap<BufferKind, Vec<u8>>,
    /// Allocation override used to provoke overflows.
    limits: HashMap<BufferKind, usize>,
}

/// A [`DrawBackend`] that records calls.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate at most `floats` for `kind`, whatever the chart requests.
    pub fn with_limit(self, kind: BufferKind, floats: usize) -> Self {
        self.state.lock().limits.insert(kind, floats);
        self
    }

    /// Get a copy of all recorded calls.
    pub fn calls(&self) -> Vec<DrawCall> {
        self.state.lock().calls.clone()
    }

    /// Clear recorded calls. Allocations and last uploads are kept.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Capacities passed to the last `allocate`.
    pub fn allocated(&self) -> Option<BufferCapacities> {
        self.state.lock().capacities
    }

    /// Floats of the last upload to `kind`.
    pub fn uploaded_floats(&self, kind: BufferKind) -> Vec<f32> {
        self.state
            .lock()
            .uploads
            .get(&kind)
            .map(|bytes| bytemuck::pod_collect_to_vec::<u8, f32>(bytes.as_slice()))
            .unwrap_or_default()
    }

    pub fn count_allocations(&self) -> usize {
        self.count(|call| matches!(call, DrawCall::Allocate(_)))
    }

    pub fn count_uploads(&self) -> usize {
        self.count(|call| matches!(call, DrawCall::Upload { .. }))
    }

    pub fn count_draws(&self) -> usize {
        self.count(|call| matches!(call, DrawCall::Draw { .. }))
    }

    /// Vertex count of the last draw of `group`.
    pub fn last_draw(&self, group: DrawGroup) -> Option<usize> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            DrawCall::Draw {
                group: drawn,
                vertex_count,
            } if *drawn == group => Some(*vertex_count),
            _ => None,
        })
    }

    /// Corner radius of the last `set_corner_radius`.
    pub fn last_corner_radius(&self) -> Option<f32> {
        self.state.lock().calls.iter().rev().find_map(|call| match call {
            DrawCall::SetCornerRadius(radius) => Some(*radius),
            _ => None,
        })
    }

    fn count(&self, predicate: impl Fn(&DrawCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }
}

impl DrawBackend for MockBackend {
    fn allocate(&mut self, capacities: &BufferCapacities) {
        let mut state = self.state.lock();
        state.calls.push(DrawCall::Allocate(*capacities));
        state.capacities = Some(*capacities);
    }

    fn capacity(&self, kind: BufferKind) -> usize {
        let state = self.state.lock();
        let allocated = state
            .capacities
            .as_ref()
            .map_or(0, |capacities| kind.capacity_in(capacities));
        match state.limits.get(&kind) {
            Some(limit) => allocated.min(*limit),
            None => allocated,
        }
    }

    fn upload(&mut self, kind: BufferKind, data: &[f32]) {
        let mut state = self.state.lock();
        state.calls.push(DrawCall::Upload {
            kind,
            len: data.len(),
        });
        state
            .uploads
            .insert(kind, bytemuck::cast_slice(data).to_vec());
    }

    fn set_corner_radius(&mut self, radius: f32) {
        self.state.lock().calls.push(DrawCall::SetCornerRadius(radius));
    }

    fn draw(&mut self, group: DrawGroup, vertex_count: usize) {
        self.state.lock().calls.push(DrawCall::Draw {
            group,
            vertex_count,
        });
    }
}
