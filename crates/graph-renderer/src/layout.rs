//! Entity geometry and value axis layout.
//!
//! Layout is a pure function of the entity target values, the canvas size and
//! the layout configuration. The chart engines keep one layout each and
//! recompute it in place, reusing its allocations, only when marked dirty.

use glam::Vec2;

use crate::axis::ValueAxis;
use crate::config::{BarChartLayout, LineChartLayout, Padding, ValueAxisConfig};
use crate::data::ChartEntity;
use crate::rect::Rect;

/// Plot area and value scale shared by all chart types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    /// Area entities are drawn in (canvas minus padding and value axis).
    pub plot: Rect,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Value mapped to the top of the plot.
    pub axis_max: f64,
}

impl PlotFrame {
    fn new(canvas_width: f32, canvas_height: f32, padding: &Padding, axis: &ValueAxisConfig) -> Self {
        let axis_width = axis.width.max(0.0);
        let plot = Rect::new(
            padding.left + axis_width,
            padding.top,
            (canvas_width - axis_width - padding.left - padding.right).max(0.0),
            (canvas_height - padding.top - padding.bottom).max(0.0),
        );
        Self {
            plot,
            canvas_width,
            canvas_height,
            axis_max: 1.0,
        }
    }

    /// Pixel height of `value` on the value scale.
    pub fn value_height(&self, value: f64) -> f32 {
        if self.axis_max <= 0.0 {
            return 0.0;
        }
        ((value.max(0.0) / self.axis_max) * f64::from(self.plot.height)) as f32
    }

    /// Y coordinate of `value` on the value scale.
    pub fn value_y(&self, value: f64) -> f32 {
        self.plot.bottom() - self.value_height(value)
    }

    /// Label slot centered at `center_x` with the given width.
    ///
    /// The slot lies under the plot, never extends left of the value axis and
    /// never past the canvas' right edge.
    fn label_slot(&self, center_x: f32, slot_width: f32, padding: &Padding, axis_width: f32) -> LabelSlot {
        let raw_x = center_x - slot_width * 0.5;
        let x = raw_x.max(axis_width.max(0.0));
        let width = (slot_width - (x - raw_x)).min(self.canvas_width - x).max(0.0);
        LabelSlot {
            x,
            y: self.canvas_height - padding.bottom,
            width,
            height: padding.bottom,
            center: center_x - x,
        }
    }
}

/// Area reserved under the plot for one entity's label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSlot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal offset of the entity center inside the slot.
    pub center: f32,
}

/// Bar chart geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    frame: PlotFrame,
    axis: ValueAxis,
    /// Target rects of the visible bars.
    rects: Vec<Rect>,
    bar_width: f32,
    min_height: f32,
    gap: f32,
    padding: Padding,
    axis_width: f32,
    /// Entities left out because they do not fit.
    clipped: usize,
}

impl BarLayout {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frame: PlotFrame::new(0.0, 0.0, &Padding::default(), &ValueAxisConfig::default()),
            axis: ValueAxis::new(),
            rects: Vec::with_capacity(capacity),
            bar_width: 0.0,
            min_height: 0.0,
            gap: 0.0,
            padding: Padding::default(),
            axis_width: 0.0,
            clipped: 0,
        }
    }

    /// Recompute for the given entities, reusing the existing allocations.
    pub fn recompute<L>(
        &mut self,
        entities: &[ChartEntity<L>],
        canvas_width: f32,
        canvas_height: f32,
        config: &BarChartLayout,
    ) {
        let mut frame = PlotFrame::new(canvas_width, canvas_height, &config.padding, &config.value_axis);
        let max_target = entities
            .iter()
            .map(ChartEntity::display_value)
            .fold(0.0, f64::max);
        self.axis.compute(
            max_target,
            canvas_width,
            canvas_height,
            &config.padding,
            &config.value_axis,
        );
        frame.axis_max = self.axis.max_value();

        let count = entities.len();
        let gap = config.entity.gap.max(0.0);
        let min_width = config.entity.min_width.max(0.0);
        let available = frame.plot.width;

        let visible = visible_bar_count(count, available, gap, min_width);
        if visible < count {
            tracing::warn!(
                "Only {} of {} bars fit into {}px, the rest are not rendered",
                visible,
                count,
                available
            );
        }

        self.bar_width = if visible > 0 {
            ((available - gap * (visible as f32 - 1.0)) / visible as f32).max(min_width)
        } else {
            0.0
        };
        self.min_height = config.entity.min_height.max(0.0);
        self.gap = gap;
        self.padding = config.padding;
        self.axis_width = config.value_axis.width;
        self.clipped = count - visible;
        self.frame = frame;

        self.rects.clear();
        for (index, entity) in entities.iter().take(visible).enumerate() {
            let rect = self.rect_at_value(index, entity.display_value());
            self.rects.push(rect);
        }

        tracing::trace!(
            "Bar layout: {} bars, width {}, plot {:?}",
            self.rects.len(),
            self.bar_width,
            self.frame.plot
        );
    }

    fn rect_at_value(&self, index: usize, value: f64) -> Rect {
        let x = self.frame.plot.x + index as f32 * (self.bar_width + self.gap);
        let ceiling = self.frame.plot.height.max(self.min_height);
        let height = self.frame.value_height(value).max(self.min_height).min(ceiling);
        Rect::new(x, self.frame.plot.bottom() - height, self.bar_width, height)
    }

    /// Rect of bar `index` when displaying `value`. `None` for clipped bars.
    pub fn rect_for_value(&self, index: usize, value: f64) -> Option<Rect> {
        (index < self.rects.len()).then(|| self.rect_at_value(index, value))
    }

    /// Target rects of the visible bars, in index order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Number of bars laid out.
    pub fn visible_len(&self) -> usize {
        self.rects.len()
    }

    /// Number of entities that did not fit.
    pub fn clipped_len(&self) -> usize {
        self.clipped
    }

    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    pub fn frame(&self) -> &PlotFrame {
        &self.frame
    }

    pub fn axis(&self) -> &ValueAxis {
        &self.axis
    }

    pub fn label_slot_at(&self, index: usize) -> Option<LabelSlot> {
        let rect = self.rects.get(index)?;
        Some(self.frame.label_slot(
            rect.x + rect.width * 0.5,
            rect.width + self.gap,
            &self.padding,
            self.axis_width,
        ))
    }
}

/// Number of bars of at least `min_width` that fit, with gaps, into `available`.
fn visible_bar_count(count: usize, available: f32, gap: f32, min_width: f32) -> usize {
    if count == 0 {
        return 0;
    }
    let required = min_width * count as f32 + gap * (count as f32 - 1.0);
    if required <= available || min_width + gap <= 0.0 {
        return count;
    }
    let fitting = ((available + gap) / (min_width + gap)).floor();
    if fitting <= 0.0 {
        0
    } else {
        (fitting as usize).min(count)
    }
}

/// Line chart geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLayout {
    frame: PlotFrame,
    axis: ValueAxis,
    /// Target centers of the points.
    points: Vec<Vec2>,
    /// Horizontal distance between two consecutive points.
    spacing: f32,
    padding: Padding,
    axis_width: f32,
}

impl PointLayout {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frame: PlotFrame::new(0.0, 0.0, &Padding::default(), &ValueAxisConfig::default()),
            axis: ValueAxis::new(),
            points: Vec::with_capacity(capacity),
            spacing: 0.0,
            padding: Padding::default(),
            axis_width: 0.0,
        }
    }

    pub fn recompute<L>(
        &mut self,
        entities: &[ChartEntity<L>],
        canvas_width: f32,
        canvas_height: f32,
        config: &LineChartLayout,
    ) {
        let mut frame = PlotFrame::new(canvas_width, canvas_height, &config.padding, &config.value_axis);
        let max_target = entities
            .iter()
            .map(ChartEntity::display_value)
            .fold(0.0, f64::max);
        self.axis.compute(
            max_target,
            canvas_width,
            canvas_height,
            &config.padding,
            &config.value_axis,
        );
        frame.axis_max = self.axis.max_value();

        let radius = config.entity.radius.max(0.0);
        let count = entities.len();
        let inner = (frame.plot.width - radius * 2.0).max(0.0);
        self.spacing = if count > 1 {
            inner / (count as f32 - 1.0)
        } else {
            frame.plot.width
        };
        self.padding = config.padding;
        self.axis_width = config.value_axis.width;
        self.frame = frame;

        self.points.clear();
        for (index, entity) in entities.iter().enumerate() {
            let point = Vec2::new(self.x_at(index, count, radius), frame.value_y(entity.display_value()));
            self.points.push(point);
        }

        tracing::trace!("Point layout: {} points, spacing {}", count, self.spacing);
    }

    fn x_at(&self, index: usize, count: usize, radius: f32) -> f32 {
        if count <= 1 {
            self.frame.plot.center().x
        } else {
            self.frame.plot.x + radius + index as f32 * self.spacing
        }
    }

    /// Center of point `index` when displaying `value`.
    pub fn point_for_value(&self, index: usize, value: f64) -> Option<Vec2> {
        let target = self.points.get(index)?;
        Some(Vec2::new(target.x, self.frame.value_y(value)))
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn frame(&self) -> &PlotFrame {
        &self.frame
    }

    pub fn axis(&self) -> &ValueAxis {
        &self.axis
    }

    pub fn label_slot_at(&self, index: usize) -> Option<LabelSlot> {
        let point = self.points.get(index)?;
        Some(self.frame.label_slot(point.x, self.spacing, &self.padding, self.axis_width))
    }
}

/// Compute a bar layout from scratch.
pub fn compute_bar_layout<L>(
    entities: &[ChartEntity<L>],
    canvas_width: f32,
    canvas_height: f32,
    config: &BarChartLayout,
) -> BarLayout {
    let mut layout = BarLayout::with_capacity(entities.len());
    layout.recompute(entities, canvas_width, canvas_height, config);
    layout
}

/// Compute a line chart layout from scratch.
pub fn compute_point_layout<L>(
    entities: &[ChartEntity<L>],
    canvas_width: f32,
    canvas_height: f32,
    config: &LineChartLayout,
) -> PointLayout {
    let mut layout = PointLayout::with_capacity(entities.len());
    layout.recompute(entities, canvas_width, canvas_height, config);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BarLayoutConfig, PointLayoutConfig};

    fn entities(values: &[f64]) -> Vec<ChartEntity<usize>> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartEntity::new(i, *v))
            .collect()
    }

    #[test]
    fn test_bar_width_fills_plot() {
        let config = BarChartLayout::default();
        let layout = compute_bar_layout(&entities(&[1.0, 2.0, 3.0, 4.0]), 430.0, 100.0, &config);
        // (430 - 3 * 10) / 4
        assert_eq!(layout.bar_width(), 100.0);
        assert_eq!(layout.rects()[3].right(), 430.0);
    }

    #[test]
    fn test_overflow_clips_trailing_bars() {
        let config = BarChartLayout::default()
            .with_entity(BarLayoutConfig::default().with_gap(10.0).with_min_size(5.0, 1.0));
        let layout = compute_bar_layout(&entities(&[1.0; 20]), 100.0, 100.0, &config);
        // floor((100 + 10) / 15) = 7
        assert_eq!(layout.visible_len(), 7);
        assert_eq!(layout.clipped_len(), 13);
        assert!(layout.rect_for_value(7, 1.0).is_none());
        assert!(layout.rects().last().unwrap().right() <= 100.0 + 1e-3);
    }

    #[test]
    fn test_zero_value_gets_min_height() {
        let config = BarChartLayout::default()
            .with_entity(BarLayoutConfig::default().with_min_size(1.0, 3.0));
        let layout = compute_bar_layout(&entities(&[0.0, 10.0]), 200.0, 100.0, &config);
        assert_eq!(layout.rects()[0].height, 3.0);
        assert_eq!(layout.rects()[1].height, 100.0);
        assert_eq!(layout.rects()[0].bottom(), 100.0);
    }

    #[test]
    fn test_label_slot_clamped_to_axis() {
        let config = BarChartLayout::default()
            .with_padding(Padding::new(0.0, 0.0, 0.0, 30.0))
            .with_value_axis(ValueAxisConfig::default().with_width(40.0));
        let layout = compute_bar_layout(&entities(&[1.0, 2.0]), 250.0, 230.0, &config);
        let first = layout.rects()[0];
        let slot = layout.label_slot_at(0).unwrap();
        assert_eq!(slot.x, 40.0);
        assert_eq!(slot.width, first.width + 5.0);
        assert_eq!(slot.y, 200.0);
        assert_eq!(slot.height, 30.0);
        assert_eq!(slot.x + slot.center, first.center().x);

        let last = layout.label_slot_at(1).unwrap();
        assert!(last.x + last.width <= 250.0);
    }

    #[test]
    fn test_points_inset_by_radius() {
        let config = LineChartLayout::default()
            .with_entity(PointLayoutConfig::default().with_radius(5.0));
        let layout = compute_point_layout(&entities(&[0.0, 5.0, 10.0]), 110.0, 100.0, &config);
        let points = layout.points();
        assert_eq!(points[0].x, 5.0);
        assert_eq!(points[2].x, 105.0);
        assert_eq!(points[0].y, 100.0);
        assert_eq!(points[2].y, 0.0);
        assert_eq!(layout.spacing(), 50.0);
    }

    #[test]
    fn test_single_point_is_centered() {
        let layout = compute_point_layout(&entities(&[3.0]), 200.0, 100.0, &LineChartLayout::default());
        assert_eq!(layout.points()[0].x, 100.0);
    }
}
