//! Drives a chart engine against a drawing backend.

use graph_renderer::{
    ChartEngine, ChartEntity, DataChange, LabelSlot, PointerTracker, ValueAxisLabel, Vec2,
};

use crate::backend::{BufferKind, DrawBackend, DrawGroup};
use crate::error::HostError;
use crate::events::{ChartListener, HoverInfo, LabelLayout, SelectionInfo};

/// What a call to [`ChartSurface::frame`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Nothing changed since the last frame; the engine was not updated.
    Idle,
    /// The chart was updated and drawn.
    Rendered { animating: bool },
    /// The chart was updated but a buffer did not fit the backend, so
    /// nothing was drawn this frame.
    Skipped { animating: bool, reason: HostError },
}

impl FrameOutcome {
    /// Whether another frame should be requested.
    pub fn is_animating(&self) -> bool {
        match self {
            FrameOutcome::Idle => false,
            FrameOutcome::Rendered { animating } | FrameOutcome::Skipped { animating, .. } => {
                *animating
            }
        }
    }
}

/// A chart bound to a backend, with pointer input in CSS pixels.
///
/// The host forwards pointer events and calls [`frame`](Self::frame) once
/// per animation frame. Engine updates only run while something changed
/// (running animations, a dirty layout or pending input), so an idle chart
/// costs nothing.
pub struct ChartSurface<C: ChartEngine, B: DrawBackend> {
    chart: C,
    backend: B,
    device_pixel_ratio: f32,
    pointer: PointerTracker,
    attached: bool,
    first_frame: bool,
    input_pending: bool,
    listener: Option<Box<dyn ChartListener<C::Label>>>,
    last_hover: Option<usize>,
    last_selection: Option<usize>,
    last_layout_revision: Option<u64>,
}

impl<C, B> ChartSurface<C, B>
where
    C: ChartEngine,
    C::Label: 'static,
    B: DrawBackend,
{
    /// Wrap `chart`, which must already be sized in device pixels.
    ///
    /// Non-finite or non-positive pixel ratios fall back to 1.
    pub fn new(chart: C, backend: B, device_pixel_ratio: f32) -> Self {
        Self {
            chart,
            backend,
            device_pixel_ratio: sanitize_ratio(device_pixel_ratio),
            pointer: PointerTracker::new(),
            attached: false,
            first_frame: true,
            input_pending: false,
            listener: None,
            last_hover: None,
            last_selection: None,
            last_layout_revision: None,
        }
    }

    /// Bind the chart buffers and allocate them on the backend. Once only.
    pub fn attach(&mut self) -> Result<(), HostError> {
        let capacities = self.chart.bind_buffers()?;
        self.backend.allocate(&capacities);
        self.attached = true;
        tracing::info!("Chart surface attached: {:?}", capacities);
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn set_listener(&mut self, listener: impl ChartListener<C::Label> + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Change the pixel ratio, keeping the CSS size of the canvas.
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f32) -> Result<(), HostError> {
        let ratio = sanitize_ratio(device_pixel_ratio);
        if ratio == self.device_pixel_ratio {
            return Ok(());
        }
        let css = self.css_size();
        self.chart.resize(css.x * ratio, css.y * ratio)?;
        self.device_pixel_ratio = ratio;
        Ok(())
    }

    /// Canvas size in CSS pixels.
    pub fn css_size(&self) -> Vec2 {
        self.chart.size() / self.device_pixel_ratio
    }

    /// Resize the canvas to `width` x `height` CSS pixels.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), HostError> {
        let ratio = self.device_pixel_ratio;
        self.chart.resize(width * ratio, height * ratio)?;
        Ok(())
    }

    pub fn update_data(
        &mut self,
        entities: &[ChartEntity<C::Label>],
        timestamp: f64,
    ) -> Result<DataChange, HostError> {
        Ok(self.chart.update_data(entities, timestamp)?)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let (x, y) = self.to_device(x, y);
        self.pointer.pointer_down(x, y);
        self.input_pending = true;
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let (x, y) = self.to_device(x, y);
        self.pointer.pointer_move(x, y);
        self.input_pending = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer.pointer_up();
        self.input_pending = true;
    }

    pub fn pointer_leave(&mut self) {
        self.pointer.pointer_leave();
        self.input_pending = true;
    }

    /// Run one frame at `timestamp` (milliseconds).
    pub fn frame(&mut self, timestamp: f64) -> Result<FrameOutcome, HostError> {
        if !self.attached {
            return Err(HostError::NotAttached);
        }

        let needs_update = self.first_frame
            || self.input_pending
            || self.chart.is_animating()
            || self.chart.is_layout_dirty();
        if !needs_update {
            return Ok(FrameOutcome::Idle);
        }
        self.first_frame = false;
        self.input_pending = false;

        let animating = self.chart.update(timestamp, self.pointer.state_mut());
        self.notify();

        if let Err(reason) = self.check_capacities() {
            tracing::warn!("Skipping draw: {}", reason);
            return Ok(FrameOutcome::Skipped { animating, reason });
        }
        self.draw();

        Ok(FrameOutcome::Rendered { animating })
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    /// Direct engine access. Changes made here are picked up by the next
    /// frame through the engine's dirty and animating state.
    pub fn chart_mut(&mut self) -> &mut C {
        &mut self.chart
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    fn to_device(&self, x: f64, y: f64) -> (f64, f64) {
        let ratio = f64::from(self.device_pixel_ratio);
        (x * ratio, y * ratio)
    }

    fn check_capacities(&self) -> Result<(), HostError> {
        for kind in BufferKind::ALL {
            let len = chart_buffer(&self.chart, kind).len();
            let capacity = self.backend.capacity(kind);
            if len > capacity {
                return Err(HostError::BufferOverflow {
                    kind,
                    len,
                    capacity,
                });
            }
        }
        Ok(())
    }

    fn draw(&mut self) {
        for kind in BufferKind::ALL {
            let data = chart_buffer(&self.chart, kind);
            if !data.is_empty() {
                self.backend.upload(kind, data);
            }
        }

        let general = self.chart.general_vertex_positions().len() / 2;
        if general > 0 {
            self.backend.draw(DrawGroup::General, general);
        }

        let lines = self.chart.line_vertex_positions().len() / 2;
        if lines > 0 {
            self.backend.draw(DrawGroup::Lines, lines);
        }

        let entities = self.chart.entity_vertex_positions().len() / 2;
        if entities > 0 {
            self.backend.set_corner_radius(self.chart.corner_radius());
            self.backend.draw(DrawGroup::Entities, entities);
        }
    }

    fn notify(&mut self) {
        let ratio = self.device_pixel_ratio;
        let chart = &self.chart;

        let hovered = chart.hovered_index();
        let hover_changed = hovered != self.last_hover;
        self.last_hover = hovered;

        let selected = chart.selected_index();
        let selection_changed = selected != self.last_selection;
        self.last_selection = selected;

        let revision = chart.layout_revision();
        let layout_changed = self.last_layout_revision != Some(revision);
        self.last_layout_revision = Some(revision);

        let Some(listener) = self.listener.as_mut() else {
            return;
        };

        if selection_changed {
            let info = selected.and_then(|index| {
                chart.entities().get(index).map(|entity| SelectionInfo {
                    index,
                    label: entity.label.clone(),
                    value: entity.value,
                })
            });
            tracing::debug!("Selection changed to {:?}", selected);
            listener.on_selection_change(info.as_ref());
        }

        if hover_changed {
            let info = hovered.and_then(|index| {
                chart.entities().get(index).map(|entity| HoverInfo {
                    index,
                    label: entity.label.clone(),
                    value: entity.value,
                    rect: chart
                        .entity_rect_at(index)
                        .unwrap_or_default()
                        .scaled_down(ratio),
                })
            });
            listener.on_hover(info.as_ref());
        }

        if layout_changed {
            let labels: Vec<LabelLayout<C::Label>> = chart
                .entities()
                .iter()
                .enumerate()
                .filter_map(|(index, entity)| {
                    chart.label_slot_at(index).map(|slot| LabelLayout {
                        index,
                        label: entity.label.clone(),
                        slot: slot_to_css(slot, ratio),
                    })
                })
                .collect();
            listener.on_labels_layout(&labels);

            let axis: Vec<ValueAxisLabel> = (0..chart.scale_line_count())
                .filter_map(|index| chart.value_axis_label_at(index))
                .map(|label| ValueAxisLabel {
                    value: label.value,
                    y: label.y / ratio,
                    width: label.width / ratio,
                })
                .collect();
            listener.on_value_axis_layout(&axis);
        }
    }
}

fn chart_buffer<C: ChartEngine>(chart: &C, kind: BufferKind) -> &[f32] {
    match kind {
        BufferKind::GeneralPositions => chart.general_vertex_positions(),
        BufferKind::GeneralColors => chart.general_vertex_colors(),
        BufferKind::EntityPositions => chart.entity_vertex_positions(),
        BufferKind::EntityColors => chart.entity_vertex_colors(),
        BufferKind::EntityRelative => chart.relative_positions(),
        BufferKind::LinePositions => chart.line_vertex_positions(),
        BufferKind::LineColors => chart.line_vertex_colors(),
    }
}

fn slot_to_css(slot: LabelSlot, ratio: f32) -> LabelSlot {
    LabelSlot {
        x: slot.x / ratio,
        y: slot.y / ratio,
        width: slot.width / ratio,
        height: slot.height / ratio,
        center: slot.center / ratio,
    }
}

fn sanitize_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        tracing::warn!("Invalid device pixel ratio {}, using 1", ratio);
        1.0
    }
}
