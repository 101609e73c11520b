//! The drawing backend seam.

use graph_renderer::BufferCapacities;

/// One of the float buffers a chart emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferKind {
    GeneralPositions,
    GeneralColors,
    EntityPositions,
    EntityColors,
    EntityRelative,
    LinePositions,
    LineColors,
}

impl BufferKind {
    pub const ALL: [BufferKind; 7] = [
        BufferKind::GeneralPositions,
        BufferKind::GeneralColors,
        BufferKind::EntityPositions,
        BufferKind::EntityColors,
        BufferKind::EntityRelative,
        BufferKind::LinePositions,
        BufferKind::LineColors,
    ];

    /// Float count of this buffer in `capacities`.
    pub fn capacity_in(&self, capacities: &BufferCapacities) -> usize {
        match self {
            BufferKind::GeneralPositions => capacities.general_positions,
            BufferKind::GeneralColors => capacities.general_colors,
            BufferKind::EntityPositions => capacities.entity_positions,
            BufferKind::EntityColors => capacities.entity_colors,
            BufferKind::EntityRelative => capacities.relative_positions,
            BufferKind::LinePositions => capacities.line_positions,
            BufferKind::LineColors => capacities.line_colors,
        }
    }
}

/// A set of buffers drawn with one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawGroup {
    /// Scale lines and other chart furniture.
    General,
    /// Segments between line chart points.
    Lines,
    /// Bars or points, shaded with the corner radius.
    Entities,
}

/// A GPU-like drawing backend.
///
/// Buffers are allocated once from the chart's capacities; every frame the
/// surface uploads the valid prefix of each buffer and issues one draw per
/// non-empty group.
pub trait DrawBackend {
    /// Allocate every buffer. Called once by `ChartSurface::attach`.
    fn allocate(&mut self, capacities: &BufferCapacities);

    /// Allocated size of a buffer, in floats.
    fn capacity(&self, kind: BufferKind) -> usize;

    /// Copy `data` to the start of a buffer.
    fn upload(&mut self, kind: BufferKind, data: &[f32]);

    fn set_corner_radius(&mut self, radius: f32);

    fn draw(&mut self, group: DrawGroup, vertex_count: usize);
}
