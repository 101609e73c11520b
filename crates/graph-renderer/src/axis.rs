//! Value axis scale lines.
//!
//! Lines start at the plot baseline (value 0) and are spaced by a multiple
//! of the smallest scale. The multiple doubles until two consecutive lines
//! are at least `min_pixel_distance` apart. A boundary line carrying the axis
//! maximum always sits at the top of the plot; intermediate lines that would
//! crowd it are dropped.

use crate::config::{Padding, ValueAxisConfig};

/// Upper bound on the number of scale lines, boundaries included.
pub const MAX_SCALE_LINES: usize = 128;

/// Visual weight of a scale line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEmphasis {
    /// Bottom (0) and top (maximum) lines.
    Boundary,
    /// Lines at an even multiple of the step.
    Major,
    /// All other lines.
    Minor,
}

impl LineEmphasis {
    /// Blend factor from the background toward the axis color.
    pub fn intensity(&self) -> f32 {
        match self {
            LineEmphasis::Boundary => 200.0 / 255.0,
            LineEmphasis::Major => 150.0 / 255.0,
            LineEmphasis::Minor => 80.0 / 255.0,
        }
    }
}

/// A horizontal reference line. `y` is the top edge of the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLine {
    pub value: f64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub thickness: f32,
    pub emphasis: LineEmphasis,
}

/// Label slot for one scale line, left of the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxisLabel {
    /// Line value rounded to the smallest scale
    pub value: f64,
    pub y: f32,
    /// Width reserved for value labels
    pub width: f32,
}

/// Round `value` to the nearest multiple of `step`, halves away from zero.
pub fn round_to_multiple(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value.round();
    }
    (value / step).round() * step
}

/// Axis maximum for the largest displayed value: at least one step, and
/// rounded up to a whole multiple of the step.
pub fn axis_max(max_value: f64, step: f64) -> f64 {
    let max_value = if max_value.is_finite() { max_value } else { 0.0 };
    let steps = max_value.max(step) / step;
    let nearest = steps.round();
    if (steps - nearest).abs() < 1e-9 {
        nearest * step
    } else {
        steps.ceil() * step
    }
}

/// Smallest power of two that is `>= ratio` (at least 1).
fn ceil_power_of_two(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 1.0 {
        return 1.0;
    }
    2f64.powi(ratio.log2().ceil().min(1023.0) as i32)
}

/// The computed set of scale lines, ordered bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    lines: Vec<ScaleLine>,
    max_value: f64,
    step: f64,
    smallest_scale: f64,
    label_width: f32,
}

impl Default for ValueAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueAxis {
    pub fn new() -> Self {
        Self {
            lines: Vec::with_capacity(MAX_SCALE_LINES),
            max_value: 1.0,
            step: 1.0,
            smallest_scale: 1.0,
            label_width: 0.0,
        }
    }

    /// Recompute the lines for a canvas and the largest target value.
    pub fn compute(
        &mut self,
        max_target: f64,
        canvas_width: f32,
        canvas_height: f32,
        padding: &Padding,
        config: &ValueAxisConfig,
    ) {
        self.lines.clear();

        let step = config.step();
        let max = axis_max(max_target, step);
        self.max_value = max;
        self.smallest_scale = step;
        self.label_width = config.width.max(0.0);

        // Lines span the plot area horizontally.
        let x = padding.left + config.width.max(0.0);
        let width = (canvas_width - padding.right - x).max(0.0);
        let thickness = config.thickness.max(0.0);
        let height = f64::from((canvas_height - padding.top - padding.bottom).max(0.0));
        let baseline = canvas_height - padding.bottom - thickness;
        let min_distance = f64::from(config.min_pixel_distance.max(0.0));

        let line = |value: f64, y: f32, emphasis: LineEmphasis| ScaleLine {
            value,
            x,
            y,
            width,
            thickness,
            emphasis,
        };

        self.lines.push(line(0.0, baseline, LineEmphasis::Boundary));

        let mut pixel_distance = step / max * height;
        let mut multiplier = 1.0;
        if pixel_distance > 0.0 && pixel_distance < min_distance {
            multiplier = ceil_power_of_two(min_distance / pixel_distance);
            pixel_distance *= multiplier;
        }
        // Widen the step until every line fits in the buffer.
        while pixel_distance > 0.0
            && (height / pixel_distance).floor() as usize + 2 > MAX_SCALE_LINES
        {
            pixel_distance *= 2.0;
            multiplier *= 2.0;
        }
        self.step = step * multiplier;

        if pixel_distance >= 1.0 {
            let count = (height / pixel_distance).floor() as usize;
            for i in 1..=count {
                if self.lines.len() + 1 >= MAX_SCALE_LINES {
                    break;
                }
                let offset = pixel_distance * i as f64;
                let remaining = height - offset;
                if remaining <= 0.0 || remaining < min_distance * (2.0 / 3.0) {
                    break;
                }
                let value = round_to_multiple(offset / height * max, step);
                let emphasis = if i % 2 == 0 {
                    LineEmphasis::Major
                } else {
                    LineEmphasis::Minor
                };
                self.lines
                    .push(line(value, baseline - offset as f32, emphasis));
            }
        }

        self.lines.push(line(max, padding.top, LineEmphasis::Boundary));

        tracing::trace!(
            "Computed {} scale lines (max {}, step {})",
            self.lines.len(),
            max,
            self.step
        );
    }

    pub fn lines(&self) -> &[ScaleLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScaleLine> {
        self.lines.get(index)
    }

    /// Value at the top of the plot.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Value distance between two consecutive intermediate lines.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Label slot of line `index`, its value rounded to the smallest scale.
    pub fn label_at(&self, index: usize) -> Option<ValueAxisLabel> {
        self.lines.get(index).map(|line| ValueAxisLabel {
            value: round_to_multiple(line.value, self.smallest_scale),
            y: line.y,
            width: self.label_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(max: f64, height: f32) -> ValueAxis {
        let mut axis = ValueAxis::new();
        axis.compute(
            max,
            500.0,
            height,
            &Padding::default(),
            &ValueAxisConfig::default(),
        );
        axis
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_multiple(2.5, 1.0), 3.0);
        assert_eq!(round_to_multiple(-2.5, 1.0), -3.0);
        assert_eq!(round_to_multiple(7.0, 5.0), 5.0);
        assert_eq!(round_to_multiple(7.5, 5.0), 10.0);
    }

    #[test]
    fn test_axis_max_rounds_up_to_step() {
        assert_eq!(axis_max(30.0, 1.0), 30.0);
        assert_eq!(axis_max(31.0, 5.0), 35.0);
        assert_eq!(axis_max(0.0, 2.0), 2.0);
        assert_eq!(axis_max(f64::NAN, 1.0), 1.0);
    }

    #[test]
    fn test_lines_respect_min_distance() {
        let axis = compute(30.0, 500.0);
        let lines = axis.lines();
        assert_eq!(lines.first().unwrap().value, 0.0);
        assert_eq!(lines.last().unwrap().value, 30.0);
        assert_eq!(lines.last().unwrap().emphasis, LineEmphasis::Boundary);
        for pair in lines.windows(2) {
            // Ordered bottom to top.
            assert!(pair[0].y > pair[1].y);
            assert!(pair[0].value < pair[1].value);
        }
        // Intermediate lines keep the configured minimum spacing.
        for pair in lines[..lines.len() - 1].windows(2) {
            assert!(pair[0].y - pair[1].y >= 20.0 - 1e-3);
        }
    }

    #[test]
    fn test_step_doubles() {
        // 1/30 of 500px is ~16.7px, below 20px, so the step doubles to 2.
        let axis = compute(30.0, 500.0);
        assert_eq!(axis.step(), 2.0);
        assert_eq!(axis.lines()[1].value, 2.0);
        assert_eq!(axis.lines()[1].emphasis, LineEmphasis::Minor);
        assert_eq!(axis.lines()[2].emphasis, LineEmphasis::Major);
    }

    #[test]
    fn test_tiny_plot_keeps_boundaries() {
        let axis = compute(10.0, 4.0);
        assert_eq!(axis.len(), 2);
        assert_eq!(axis.lines()[0].emphasis, LineEmphasis::Boundary);
    }

    #[test]
    fn test_label_uses_axis_width() {
        let mut axis = ValueAxis::new();
        axis.compute(
            10.0,
            400.0,
            300.0,
            &Padding::default(),
            &ValueAxisConfig::default().with_width(40.0),
        );
        let label = axis.label_at(0).unwrap();
        assert_eq!(label.width, 40.0);
        assert_eq!(label.value, 0.0);
        assert_eq!(axis.lines()[0].x, 40.0);
        assert_eq!(axis.lines()[0].width, 360.0);
        assert!(axis.label_at(99).is_none());
    }

    #[test]
    fn test_tall_canvas_lines_reach_the_top() {
        let axis = compute(10_000.0, 4000.0);
        assert!(axis.len() <= MAX_SCALE_LINES);

        let lines = axis.lines();
        let spacing = lines[0].y - lines[1].y;
        let top = lines[lines.len() - 1].y;
        let last_intermediate = lines[lines.len() - 2].y;
        assert!(
            last_intermediate - top < 2.0 * spacing,
            "uncovered band of {}px at the top",
            last_intermediate - top
        );
        for pair in lines[..lines.len() - 1].windows(2) {
            assert!(((pair[0].y - pair[1].y) - spacing).abs() < 1e-2);
        }
    }

    #[test]
    fn test_lines_span_plot_between_padding() {
        let mut axis = ValueAxis::new();
        axis.compute(
            10.0,
            400.0,
            300.0,
            &Padding::new(0.0, 15.0, 25.0, 0.0),
            &ValueAxisConfig::default().with_width(40.0),
        );
        for line in axis.lines() {
            assert_eq!(line.x, 55.0);
            assert_eq!(line.width, 320.0);
        }
    }
}
