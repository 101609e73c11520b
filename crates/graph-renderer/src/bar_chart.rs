//! Bar chart engine.

use glam::Vec2;

use crate::axis::{MAX_SCALE_LINES, ValueAxis};
use crate::buffers::{BufferCapacities, QuadBuffers};
use crate::config::{BarChartLayout, BarChartOptions, VisualState};
use crate::data::{ChartEntity, DataChange};
use crate::engine::{ChartCore, ChartEngine};
use crate::error::Result;
use crate::input::PointerState;
use crate::interaction::hit_test_rects;
use crate::layout::{BarLayout, LabelSlot};
use crate::profiling::{profile_function, profile_scope};
use crate::rect::Rect;

/// An animated, interactive bar chart.
///
/// ```
/// use graph_renderer::{BarChart, BarChartOptions, ChartEngine, ChartEntity, PointerState};
///
/// let data = [ChartEntity::new("a", 3.0), ChartEntity::new("b", 7.0)];
/// let mut chart = BarChart::new(&data, 400.0, 300.0, BarChartOptions::default()).unwrap();
///
/// let mut pointer = PointerState::absent();
/// let mut now = 0.0;
/// while chart.update(now, &mut pointer) {
///     now += 16.0;
/// }
/// assert_eq!(chart.entity_vertex_positions().len(), 2 * 6 * 2);
/// ```
#[derive(Debug)]
pub struct BarChart<L> {
    core: ChartCore<L>,
    layout_config: BarChartLayout,
    layout: BarLayout,
    general: QuadBuffers,
    bars: QuadBuffers,
    corner_radius: f32,
}

impl<L: Clone + PartialEq> BarChart<L> {
    /// Create a chart for a `width` x `height` device pixel canvas.
    ///
    /// Fails if the canvas is smaller than 1x1 or `entities` exceeds
    /// `options.max_entities`.
    pub fn new(
        entities: &[ChartEntity<L>],
        width: f32,
        height: f32,
        options: BarChartOptions,
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
            layout: BarLayout::with_capacity(options.max_entities),
            general: QuadBuffers::new(MAX_SCALE_LINES),
            bars: QuadBuffers::with_relative(options.max_entities),
            corner_radius: 0.0,
        })
    }

    /// The most recently computed layout.
    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    pub fn layout_config(&self) -> &BarChartLayout {
        &self.layout_config
    }

    pub fn visual(&self) -> &VisualState {
        &self.core.visual
    }

    pub fn capacity(&self) -> usize {
        self.core.data.capacity()
    }

    fn relayout(&mut self) {
        profile_scope!("bar_chart_layout");

        self.layout.recompute(
            self.core.data.entities(),
            self.core.width,
            self.core.height,
            &self.layout_config,
        );
        self.corner_radius = self
            .layout_config
            .entity
            .corner_radius
            .max(0.0)
            .min(self.layout.bar_width() * 0.5);
        self.core.layout_done();
    }

    fn displayed_rect(&self, index: usize) -> Option<Rect> {
        let value = self.core.displayed_value(index)?;
        self.layout.rect_for_value(index, value)
    }

    fn hit_test(&self, point: Vec2) -> Option<usize> {
        let rects = (0..self.layout.visible_len()).filter_map(|index| {
            self.displayed_rect(index)
                .map(|rect| (index, rect.scale_width(self.core.hit_scale(index))))
        });
        hit_test_rects(point, rects).map(|hit| hit.index)
    }

    fn emit(&mut self) {
        profile_scope!("bar_chart_emit");

        let canvas = self.core.canvas();
        let visual = self.core.visual;

        self.general.clear();
        for line in self.layout.axis().lines() {
            let color = visual
                .background
                .lerp(visual.value_axis_color, line.emphasis.intensity());
            let rect = Rect::new(line.x, line.y, line.width, line.thickness);
            self.general.push_rect(rect, color, canvas);
        }

        self.bars.clear();
        for index in 0..self.layout.visible_len() {
            let Some(rect) = self.displayed_rect(index) else {
                continue;
            };
            let rect = rect.scale_width(self.core.displayed_scale(index));
            let color = self.core.color_at(index);
            self.bars.push_rect(rect, color, canvas);
        }

        if self.bars.dropped_quads() > 0 {
            tracing::warn!("Dropped {} bars, buffer full", self.bars.dropped_quads());
        }

        tracing::trace!(
            "Emitted {} bars and {} scale lines",
            self.bars.quad_count(),
            self.general.quad_count()
        );
    }

    fn capacities(&self) -> BufferCapacities {
        BufferCapacities {
            general_positions: self.general.position_float_capacity(),
            general_colors: self.general.color_float_capacity(),
            entity_positions: self.bars.position_float_capacity(),
            entity_colors: self.bars.color_float_capacity(),
            relative_positions: self.bars.relative_float_capacity(),
            line_positions: 0,
            line_colors: 0,
        }
    }
}

impl<L: Clone + PartialEq> ChartEngine for BarChart<L> {
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

    fn entity_rect_at(&self, index: usize) -> Option<Rect> {
        self.displayed_rect(index)
    }

    fn visible_len(&self) -> usize {
        self.layout.visible_len()
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
        self.bars.positions()
    }

    fn entity_vertex_colors(&self) -> &[f32] {
        self.bars.colors()
    }

    fn relative_positions(&self) -> &[f32] {
        self.bars.relative()
    }

    fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    fn bind_buffers(&mut self) -> Result<BufferCapacities> {
        let capacities = self.capacities();
        self.core.bind(capacities)
    }
}
