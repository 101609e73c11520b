//! Line chart engine.
//!
//! Points are emitted as quads with relative positions so the fragment stage
//! can round them into discs. Consecutive points are connected by thick
//! segments in a separate line buffer.

use glam::Vec2;

use crate::axis::{MAX_SCALE_LINES, ValueAxis};
use crate::buffers::{BufferCapacities, QuadBuffers};
use crate::config::{LineChartLayout, LineChartOptions, VisualState};
use crate::data::{ChartEntity, DataChange};
use crate::engine::{ChartCore, ChartEngine};
use crate::error::Result;
use crate::input::PointerState;
use crate::interaction::hit_test_points;
use crate::layout::{LabelSlot, PointLayout};
use crate::profiling::{profile_function, profile_scope};
use crate::rect::Rect;

/// An animated, interactive line chart.
#[derive(Debug)]
pub struct LineChart<L> {
    core: ChartCore<L>,
    layout_config: LineChartLayout,
    layout: PointLayout,
    general: QuadBuffers,
    points: QuadBuffers,
    segments: QuadBuffers,
}

impl<L: Clone + PartialEq> LineChart<L> {
    /// Create a chart for a `width` x `height` device pixel canvas.
    pub fn new(
        entities: &[ChartEntity<L>],
        width: f32,
        height: f32,
        options: LineChartOptions,
    ) -> Result<Self> {
        let core = ChartCore::new(
            entities,
            width,
            height,
            options.visual,
            options.animation,
            options.max_entities,
        )?;

        Ok(Self {
            core,
            layout_config: options.layout,
            layout: PointLayout::with_capacity(options.max_entities),
            general: QuadBuffers::new(MAX_SCALE_LINES),
            points: QuadBuffers::with_relative(options.max_entities),
            segments: QuadBuffers::new(options.max_entities.saturating_sub(1)),
        })
    }

    pub fn layout(&self) -> &PointLayout {
        &self.layout
    }

    pub fn layout_config(&self) -> &LineChartLayout {
        &self.layout_config
    }

    pub fn visual(&self) -> &VisualState {
        &self.core.visual
    }

    pub fn capacity(&self) -> usize {
        self.core.data.capacity()
    }

    fn radius(&self) -> f32 {
        self.layout_config.entity.radius.max(0.0)
    }

    fn relayout(&mut self) {
        profile_scope!("line_chart_layout");

        self.layout.recompute(
            self.core.data.entities(),
            self.core.width,
            self.core.height,
            &self.layout_config,
        );
        self.core.layout_done();
    }

    fn displayed_point(&self, index: usize) -> Option<Vec2> {
        let value = self.core.displayed_value(index)?;
        self.layout.point_for_value(index, value)
    }

    fn point_rect(center: Vec2, radius: f32) -> Rect {
        Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    fn hit_test(&self, point: Vec2) -> Option<usize> {
        let radius = self.radius();
        let points = (0..self.layout.points().len()).filter_map(|index| {
            self.displayed_point(index)
                .map(|center| (index, center, radius * self.core.hit_scale(index)))
        });
        hit_test_points(point, points).map(|hit| hit.index)
    }

    fn emit(&mut self) {
        profile_scope!("line_chart_emit");

        let canvas = self.core.canvas();
        let visual = self.core.visual;
        let radius = self.radius();
        let thickness = self.layout_config.entity.line_thickness.max(0.0);

        self.general.clear();
        for line in self.layout.axis().lines() {
            let color = visual
                .background
                .lerp(visual.value_axis_color, line.emphasis.intensity());
            let rect = Rect::new(line.x, line.y, line.width, line.thickness);
            self.general.push_rect(rect, color, canvas);
        }

        self.segments.clear();
        let count = self.layout.points().len();
        for index in 1..count {
            if let Some(a) = self.displayed_point(index - 1)
                && let Some(b) = self.displayed_point(index)
            {
                self.segments
                    .push_segment(a, b, thickness, visual.line_color, canvas);
            }
        }

        self.points.clear();
        for index in 0..count {
            let Some(center) = self.displayed_point(index) else {
                continue;
            };
            let rect = Self::point_rect(center, radius * self.core.displayed_scale(index));
            let color = self.core.color_at(index);
            self.points.push_rect(rect, color, canvas);
        }

        tracing::trace!(
            "Emitted {} points and {} segments",
            self.points.quad_count(),
            self.segments.quad_count()
        );
    }

    fn capacities(&self) -> BufferCapacities {
        BufferCapacities {
            general_positions: self.general.position_float_capacity(),
            general_colors: self.general.color_float_capacity(),
            entity_positions: self.points.position_float_capacity(),
            entity_colors: self.points.color_float_capacity(),
            relative_positions: self.points.relative_float_capacity(),
            line_positions: self.segments.position_float_capacity(),
            line_colors: self.segments.color_float_capacity(),
        }
    }
}

impl<L: Clone + PartialEq> ChartEngine for LineChart<L> {
    type Label = L;

    fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.core.resize(width, height)
    }

    fn update_data(&mut self, entities: &[ChartEntity<L>], timestamp: f64) -> Result<DataChange> {
        self.core.update_data(entities, timestamp)
    }

    fn update(&mut self, timestamp: f64, pointer: &mut PointerState) -> bool {
        profile_function!();

        self.core.advance(timestamp);
        if self.core.dirty.needs_layout() {
            self.relayout();
        }

        let hit = if pointer.is_present() {
            self.hit_test(pointer.position())
        } else {
            None
        };
        self.core.apply_pointer(pointer, hit);

        self.emit();
        self.core.is_animating()
    }

    fn is_animating(&self) -> bool {
        self.core.is_animating()
    }

    fn is_layout_dirty(&self) -> bool {
        self.core.dirty.needs_layout()
    }

    fn layout_revision(&self) -> u64 {
        self.core.layout_revision
    }

    fn size(&self) -> Vec2 {
        self.core.canvas()
    }

    fn entities(&self) -> &[ChartEntity<L>] {
        self.core.data.entities()
    }

    fn hovered_index(&self) -> Option<usize> {
        self.core.interaction.hovered()
    }

    fn selected_index(&self) -> Option<usize> {
        self.core.interaction.selected()
    }

    fn displayed_value_at(&self, index: usize) -> Option<f64> {
        self.core.displayed_value(index)
    }

    /// Bounding square of the point at its base radius.
    fn entity_rect_at(&self, index: usize) -> Option<Rect> {
        self.displayed_point(index)
            .map(|center| Self::point_rect(center, self.radius()))
    }

    fn visible_len(&self) -> usize {
        self.layout.points().len()
    }

    fn value_axis(&self) -> &ValueAxis {
        self.layout.axis()
    }

    fn label_slot_at(&self, index: usize) -> Option<LabelSlot> {
        self.layout.label_slot_at(index)
    }

    fn general_vertex_positions(&self) -> &[f32] {
        self.general.positions()
    }

    fn general_vertex_colors(&self) -> &[f32] {
        self.general.colors()
    }

    fn entity_vertex_positions(&self) -> &[f32] {
        self.points.positions()
    }

    fn entity_vertex_colors(&self) -> &[f32] {
        self.points.colors()
    }

    fn relative_positions(&self) -> &[f32] {
        self.points.relative()
    }

    fn line_vertex_positions(&self) -> &[f32] {
        self.segments.positions()
    }

    fn line_vertex_colors(&self) -> &[f32] {
        self.segments.colors()
    }

    /// Radius of a fully grown point. The fragment stage clamps it to half
    /// the quad side, so every point renders as a disc.
    fn corner_radius(&self) -> f32 {
        self.radius() * self.core.visual.effective_hover_scale()
    }

    fn bind_buffers(&mut self) -> Result<BufferCapacities> {
        let capacities = self.capacities();
        self.core.bind(capacities)
    }
}
