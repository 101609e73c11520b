//! Chart configuration.
//!
//! All pixel-valued fields are device pixels: the host multiplies CSS sizes
//! by its device pixel ratio before building a config.

use crate::animation::EasingFunction;
use crate::color::Color;

/// Space reserved around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Padding {
    /// Same padding on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            right: value,
            bottom: value,
        }
    }

    /// Create padding from individual sides.
    pub fn new(top: f32, left: f32, right: f32, bottom: f32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }
}

/// Value axis (scale line) configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxisConfig {
    /// Width reserved left of the plot for value labels.
    pub width: f32,
    /// Smallest value step between two scale lines.
    pub smallest_scale: f64,
    /// Minimum pixel distance between two consecutive scale lines.
    pub min_pixel_distance: f32,
    /// Thickness of a scale line.
    pub thickness: f32,
}

impl Default for ValueAxisConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            smallest_scale: 1.0,
            min_pixel_distance: 20.0,
            thickness: 2.0,
        }
    }
}

impl ValueAxisConfig {
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_smallest_scale(mut self, smallest_scale: f64) -> Self {
        self.smallest_scale = smallest_scale;
        self
    }

    pub fn with_min_pixel_distance(mut self, distance: f32) -> Self {
        self.min_pixel_distance = distance;
        self
    }

    /// Smallest scale guarded against zero, negative and NaN input.
    pub(crate) fn step(&self) -> f64 {
        if self.smallest_scale.is_finite() && self.smallest_scale > 0.0 {
            self.smallest_scale
        } else {
            1.0
        }
    }
}

/// Bar geometry configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayoutConfig {
    /// Horizontal gap between two bars.
    pub gap: f32,
    /// Corner rounding hint passed to the fragment stage.
    pub corner_radius: f32,
    /// Minimum bar width.
    pub min_width: f32,
    /// Minimum bar height (a zero value still draws a bar this tall).
    pub min_height: f32,
}

impl Default for BarLayoutConfig {
    fn default() -> Self {
        Self {
            gap: 10.0,
            corner_radius: 10.0,
            min_width: 1.0,
            min_height: 1.0,
        }
    }
}

impl BarLayoutConfig {
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_min_size(mut self, min_width: f32, min_height: f32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }
}

/// Point geometry configuration for line charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLayoutConfig {
    /// Radius of a data point.
    pub radius: f32,
    /// Thickness of the segments connecting the points.
    pub line_thickness: f32,
}

impl Default for PointLayoutConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            line_thickness: 2.0,
        }
    }
}

impl PointLayoutConfig {
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_line_thickness(mut self, thickness: f32) -> Self {
        self.line_thickness = thickness;
        self
    }
}

/// Layout configuration shared by all chart types.
///
/// `E` carries the per-chart-type entity geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig<E> {
    pub padding: Padding,
    pub entity: E,
    pub value_axis: ValueAxisConfig,
}

impl<E> LayoutConfig<E> {
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_entity(mut self, entity: E) -> Self {
        self.entity = entity;
        self
    }

    pub fn with_value_axis(mut self, value_axis: ValueAxisConfig) -> Self {
        self.value_axis = value_axis;
        self
    }
}

/// Layout of a bar chart.
pub type BarChartLayout = LayoutConfig<BarLayoutConfig>;
/// Layout of a line chart.
pub type LineChartLayout = LayoutConfig<PointLayoutConfig>;

/// Colors and hover growth, fixed for the lifetime of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Base entity color.
    pub color: Color,
    /// Tint composited over the base color while hovered.
    pub hover_color: Color,
    /// Color of the selected entity.
    pub selected_color: Color,
    /// Color faded in while an entity is held down.
    pub press_color: Color,
    /// How far toward `press_color` a held entity fades (0.0 to 1.0).
    pub press_amount: f32,
    /// Scale applied to a hovered or selected entity.
    pub hover_scale: f32,
    /// Canvas background, used as the low end of scale line intensity.
    pub background: Color,
    /// Color of the value axis scale lines at full intensity.
    pub value_axis_color: Color,
    /// Color of the segments connecting line chart points.
    pub line_color: Color,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            hover_color: Color::from_rgba_u8(150, 150, 150, 127),
            selected_color: Color::from_rgb_u8(100, 100, 255),
            press_color: Color::from_rgb_u8(150, 150, 150),
            press_amount: 0.5,
            hover_scale: 1.1,
            background: Color::BLACK,
            value_axis_color: Color::WHITE,
            line_color: Color::WHITE,
        }
    }
}

impl VisualState {
    pub fn with_colors(mut self, color: Color, hover_color: Color, selected_color: Color) -> Self {
        self.color = color;
        self.hover_color = hover_color;
        self.selected_color = selected_color;
        self
    }

    pub fn with_press(mut self, press_color: Color, press_amount: f32) -> Self {
        self.press_color = press_color;
        self.press_amount = press_amount;
        self
    }

    pub fn with_hover_scale(mut self, hover_scale: f32) -> Self {
        self.hover_scale = hover_scale;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_value_axis_color(mut self, color: Color) -> Self {
        self.value_axis_color = color;
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }

    /// Hover scale guarded against non-finite and non-positive input.
    pub(crate) fn effective_hover_scale(&self) -> f32 {
        if self.hover_scale.is_finite() && self.hover_scale > 0.0 {
            self.hover_scale
        } else {
            1.0
        }
    }
}

/// Transition timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    /// Duration of a value (height/position) transition.
    pub value_duration_ms: f64,
    /// Grow-in delay added per entity index.
    pub stagger_ms: f64,
    /// Upper bound on the total grow-in stagger across all entities.
    pub max_total_stagger_ms: f64,
    /// Duration of a hover scale transition.
    pub hover_duration_ms: f64,
    /// Duration of hover tint and selection color fades.
    pub color_duration_ms: f64,
    /// Easing applied to every transition.
    pub easing: EasingFunction,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            value_duration_ms: 500.0,
            stagger_ms: 100.0,
            max_total_stagger_ms: 1000.0,
            hover_duration_ms: 200.0,
            color_duration_ms: 200.0,
            easing: EasingFunction::EaseOutSine,
        }
    }
}

impl AnimationConfig {
    /// Transitions that complete on the first frame.
    pub fn instant() -> Self {
        Self {
            value_duration_ms: 0.0,
            stagger_ms: 0.0,
            max_total_stagger_ms: 0.0,
            hover_duration_ms: 0.0,
            color_duration_ms: 0.0,
            easing: EasingFunction::Linear,
        }
    }

    /// Grow-in delay for the entity at `index` out of `count`.
    pub(crate) fn stagger_for(&self, index: usize, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let per_index = if self.stagger_ms * count as f64 > self.max_total_stagger_ms {
            self.max_total_stagger_ms / count as f64
        } else {
            self.stagger_ms
        };
        (per_index * index as f64).max(0.0)
    }
}

/// Everything needed to construct a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions<E> {
    pub layout: LayoutConfig<E>,
    pub visual: VisualState,
    pub animation: AnimationConfig,
    /// Hard cap on the dataset length; buffers are preallocated for it.
    pub max_entities: usize,
}

impl<E: Default> Default for ChartOptions<E> {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            visual: VisualState::default(),
            animation: AnimationConfig::default(),
            max_entities: 1000,
        }
    }
}

impl<E> ChartOptions<E> {
    pub fn with_layout(mut self, layout: LayoutConfig<E>) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_visual(mut self, visual: VisualState) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }
}

/// Options of a bar chart.
pub type BarChartOptions = ChartOptions<BarLayoutConfig>;
/// Options of a line chart.
pub type LineChartOptions = ChartOptions<PointLayoutConfig>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_is_capped() {
        let config = AnimationConfig::default();
        assert_eq!(config.stagger_for(3, 5), 300.0);
        // 100 entities * 100ms would be 10s, capped to 1s total.
        assert!((config.stagger_for(99, 100) - 990.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_smallest_scale_falls_back() {
        let axis = ValueAxisConfig::default().with_smallest_scale(0.0);
        assert_eq!(axis.step(), 1.0);
        let axis = ValueAxisConfig::default().with_smallest_scale(f64::NAN);
        assert_eq!(axis.step(), 1.0);
    }
}
