//! Fixed-capacity vertex buffers.
//!
//! Every buffer is allocated once, at chart construction, for the largest
//! dataset the chart accepts. Emission overwrites a prefix each frame and
//! never reallocates. The host reads the valid prefix as `&[f32]` and must
//! copy or upload it before the next `update` overwrites it.
//!
//! Quads are two triangles in the vertex order
//! `(l,b) (l,t) (r,t) (r,b) (l,b) (r,t)`, positions in clip space
//! (`x / w * 2 - 1`, `-(y / h * 2 - 1)`).

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::color::Color;
use crate::rect::Rect;

/// Vertices emitted per entity quad or line segment.
pub const VERTICES_PER_QUAD: usize = 6;

/// A vertex position in clip space.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ClipPosition {
    pub position: [f32; 2],
}

impl ClipPosition {
    /// Convert a device pixel position on a `canvas` sized surface.
    pub fn from_pixel(point: Vec2, canvas: Vec2) -> Self {
        let w = canvas.x.max(1.0);
        let h = canvas.y.max(1.0);
        Self {
            position: [point.x / w * 2.0 - 1.0, -(point.y / h * 2.0 - 1.0)],
        }
    }
}

/// Position of a vertex inside its primitive, for rounded-corner shading.
///
/// `uv` is `(0, 0)` at the top-left and `(1, 1)` at the bottom-right corner;
/// `size` is the primitive size in device pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RelativePosition {
    pub uv: [f32; 2],
    pub size: [f32; 2],
}

static_assertions::assert_eq_size!(ClipPosition, [f32; 2]);
static_assertions::assert_eq_size!(RelativePosition, [f32; 4]);
static_assertions::assert_eq_size!(Color, [f32; 4]);

/// Float counts of every buffer a chart emits, for one-time preallocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferCapacities {
    pub general_positions: usize,
    pub general_colors: usize,
    pub entity_positions: usize,
    pub entity_colors: usize,
    pub relative_positions: usize,
    pub line_positions: usize,
    pub line_colors: usize,
}

/// A buffer of `T` with a fixed capacity and a valid prefix.
#[derive(Debug, Clone)]
pub struct FixedBuffer<T> {
    data: Vec<T>,
    len: usize,
    dropped: usize,
}

impl<T: Pod> FixedBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![T::zeroed(); capacity],
            len: 0,
            dropped: 0,
        }
    }

    /// Reset the valid prefix to empty.
    pub fn clear(&mut self) {
        self.len = 0;
        self.dropped = 0;
    }

    /// Append all of `items`, or none of them if they do not fit.
    pub fn extend_from_slice(&mut self, items: &[T]) -> bool {
        let end = self.len + items.len();
        if end > self.data.len() {
            self.dropped += items.len();
            return false;
        }
        self.data[self.len..end].copy_from_slice(items);
        self.len = end;
        true
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.len]
    }

    /// The valid prefix as flat floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.as_slice())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Items rejected since the last `clear`.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Capacity in floats.
    pub fn float_capacity(&self) -> usize {
        self.capacity() * std::mem::size_of::<T>() / std::mem::size_of::<f32>()
    }
}

/// Position and color buffers for a set of quads, optionally with relative
/// positions.
#[derive(Debug, Clone)]
pub struct QuadBuffers {
    positions: FixedBuffer<ClipPosition>,
    colors: FixedBuffer<Color>,
    relative: Option<FixedBuffer<RelativePosition>>,
}

impl QuadBuffers {
    /// Buffers for `quads` quads without relative positions.
    pub fn new(quads: usize) -> Self {
        let vertices = quads * VERTICES_PER_QUAD;
        Self {
            positions: FixedBuffer::new(vertices),
            colors: FixedBuffer::new(vertices),
            relative: None,
        }
    }

    /// Buffers for `quads` quads including relative positions.
    pub fn with_relative(quads: usize) -> Self {
        Self {
            relative: Some(FixedBuffer::new(quads * VERTICES_PER_QUAD)),
            ..Self::new(quads)
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        if let Some(relative) = &mut self.relative {
            relative.clear();
        }
    }

    /// Number of quads the buffers hold.
    pub fn quad_capacity(&self) -> usize {
        self.positions.capacity() / VERTICES_PER_QUAD
    }

    pub fn quad_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_QUAD
    }

    /// Append an axis-aligned quad. Returns `false` if the buffers are full.
    pub fn push_rect(&mut self, rect: Rect, color: Color, canvas: Vec2) -> bool {
        let corners = [
            Vec2::new(rect.x, rect.bottom()),
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.right(), rect.y),
            Vec2::new(rect.right(), rect.bottom()),
        ];
        self.push_corners(corners, Vec2::new(rect.width, rect.height), color, canvas)
    }

    /// Append a segment from `a` to `b` as a quad of the given thickness.
    pub fn push_segment(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color, canvas: Vec2) -> bool {
        let direction = (b - a).normalize_or_zero();
        let normal = direction.perp() * (thickness * 0.5);
        let corners = [a - normal, a + normal, b + normal, b - normal];
        self.push_corners(corners, Vec2::new(a.distance(b), thickness), color, canvas)
    }

    fn push_corners(&mut self, corners: [Vec2; 4], size: Vec2, color: Color, canvas: Vec2) -> bool {
        if self.quad_count() >= self.quad_capacity() {
            self.positions.dropped += VERTICES_PER_QUAD;
            return false;
        }

        let [p0, p1, p2, p3] = corners.map(|c| ClipPosition::from_pixel(c, canvas));
        self.positions.extend_from_slice(&[p0, p1, p2, p3, p0, p2]);
        self.colors.extend_from_slice(&[color; VERTICES_PER_QUAD]);

        if let Some(relative) = &mut self.relative {
            let size = [size.x, size.y];
            let at = |u: f32, v: f32| RelativePosition { uv: [u, v], size };
            let (r0, r1, r2, r3) = (at(0.0, 1.0), at(0.0, 0.0), at(1.0, 0.0), at(1.0, 1.0));
            relative.extend_from_slice(&[r0, r1, r2, r3, r0, r2]);
        }
        true
    }

    pub fn positions(&self) -> &[f32] {
        self.positions.as_floats()
    }

    pub fn colors(&self) -> &[f32] {
        self.colors.as_floats()
    }

    /// Relative positions, empty if these buffers carry none.
    pub fn relative(&self) -> &[f32] {
        match &self.relative {
            Some(relative) => relative.as_floats(),
            None => &[],
        }
    }

    /// Quads rejected since the last `clear`.
    pub fn dropped_quads(&self) -> usize {
        self.positions.dropped() / VERTICES_PER_QUAD
    }

    pub fn position_float_capacity(&self) -> usize {
        self.positions.float_capacity()
    }

    pub fn color_float_capacity(&self) -> usize {
        self.colors.float_capacity()
    }

    pub fn relative_float_capacity(&self) -> usize {
        self.relative.as_ref().map_or(0, FixedBuffer::float_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_space_corners() {
        let canvas = Vec2::new(200.0, 100.0);
        assert_eq!(
            ClipPosition::from_pixel(Vec2::ZERO, canvas).position,
            [-1.0, 1.0]
        );
        assert_eq!(
            ClipPosition::from_pixel(canvas, canvas).position,
            [1.0, -1.0]
        );
    }

    #[test]
    fn test_rect_vertex_order() {
        let mut buffers = QuadBuffers::with_relative(1);
        assert!(buffers.push_rect(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Color::WHITE,
            Vec2::new(100.0, 100.0)
        ));
        let p = buffers.positions();
        assert_eq!(p.len(), 12);
        // (l,b) (l,t) (r,t) (r,b) (l,b) (r,t)
        assert_eq!(&p[0..2], &[-1.0, 0.0]);
        assert_eq!(&p[2..4], &[-1.0, 1.0]);
        assert_eq!(&p[4..6], &[1.0, 1.0]);
        assert_eq!(&p[6..8], &[1.0, 0.0]);
        assert_eq!(&p[8..12], &p[0..4]);
        assert_eq!(buffers.colors().len(), 24);
        assert_eq!(buffers.relative().len(), 24);
        assert_eq!(&buffers.relative()[0..4], &[0.0, 1.0, 100.0, 50.0]);
    }

    #[test]
    fn test_full_buffer_rejects_without_realloc() {
        let mut buffers = QuadBuffers::new(1);
        let canvas = Vec2::new(10.0, 10.0);
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(buffers.push_rect(rect, Color::WHITE, canvas));
        let ptr = buffers.positions().as_ptr();
        assert!(!buffers.push_rect(rect, Color::WHITE, canvas));
        assert_eq!(buffers.dropped_quads(), 1);
        assert_eq!(buffers.quad_count(), 1);
        buffers.clear();
        assert!(buffers.push_rect(rect, Color::WHITE, canvas));
        assert_eq!(buffers.positions().as_ptr(), ptr);
    }

    #[test]
    fn test_segment_thickness() {
        let mut buffers = QuadBuffers::new(1);
        let canvas = Vec2::new(100.0, 100.0);
        buffers.push_segment(
            Vec2::new(0.0, 50.0),
            Vec2::new(100.0, 50.0),
            10.0,
            Color::WHITE,
            canvas,
        );
        let p = buffers.positions();
        // Half thickness above and below the horizontal segment.
        assert!((p[1] - 0.1).abs() < 1e-6 || (p[1] + 0.1).abs() < 1e-6);
        assert!((p[1] + p[3]).abs() < 1e-6);
    }

    #[test]
    fn test_float_capacity() {
        let buffers = QuadBuffers::with_relative(10);
        assert_eq!(buffers.position_float_capacity(), 10 * 6 * 2);
        assert_eq!(buffers.color_float_capacity(), 10 * 6 * 4);
        assert_eq!(buffers.relative_float_capacity(), 10 * 6 * 4);
        assert_eq!(QuadBuffers::new(3).relative_float_capacity(), 0);
    }
}
