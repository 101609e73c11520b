//! Notifications sent from the surface to the host UI.
//!
//! Geometry in these types is in CSS pixels, ready for positioning DOM-like
//! overlays (labels, tooltips).

use std::sync::Arc;

use graph_renderer::{LabelSlot, Rect, ValueAxisLabel};
use parking_lot::Mutex;

/// The selected entity changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionInfo<L> {
    pub index: usize,
    pub label: L,
    /// Data value (not the displayed, animated one)
    pub value: f64,
}

/// The hovered entity changed.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverInfo<L> {
    pub index: usize,
    pub label: L,
    pub value: f64,
    /// Entity rect at rest, for tooltip placement
    pub rect: Rect,
}

/// Where to draw the label of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout<L> {
    pub index: usize,
    pub label: L,
    pub slot: LabelSlot,
}

/// Receives chart notifications. Every method defaults to doing nothing.
pub trait ChartListener<L> {
    /// `None` when the selection was cleared.
    fn on_selection_change(&mut self, selection: Option<&SelectionInfo<L>>) {
        let _ = selection;
    }

    /// `None` when the pointer left every entity.
    fn on_hover(&mut self, hover: Option<&HoverInfo<L>>) {
        let _ = hover;
    }

    /// Sent after every layout recompute.
    fn on_labels_layout(&mut self, labels: &[LabelLayout<L>]) {
        let _ = labels;
    }

    /// Sent after every layout recompute, bottom line first.
    fn on_value_axis_layout(&mut self, labels: &[ValueAxisLabel]) {
        let _ = labels;
    }
}

/// Collects every notification, for tests and headless runs.
#[derive(Debug, Clone)]
pub struct RecordingListener<L> {
    pub selections: Vec<Option<SelectionInfo<L>>>,
    pub hovers: Vec<Option<HoverInfo<L>>>,
    pub labels: Vec<Vec<LabelLayout<L>>>,
    pub value_axis: Vec<Vec<ValueAxisLabel>>,
}

impl<L> Default for RecordingListener<L> {
    fn default() -> Self {
        Self {
            selections: Vec::new(),
            hovers: Vec::new(),
            labels: Vec::new(),
            value_axis: Vec::new(),
        }
    }
}

impl<L: Clone> ChartListener<L> for RecordingListener<L> {
    fn on_selection_change(&mut self, selection: Option<&SelectionInfo<L>>) {
        self.selections.push(selection.cloned());
    }

    fn on_hover(&mut self, hover: Option<&HoverInfo<L>>) {
        self.hovers.push(hover.cloned());
    }

    fn on_labels_layout(&mut self, labels: &[LabelLayout<L>]) {
        self.labels.push(labels.to_vec());
    }

    fn on_value_axis_layout(&mut self, labels: &[ValueAxisLabel]) {
        self.value_axis.push(labels.to_vec());
    }
}

/// Shares a listener with the code that installed it.
impl<L, T: ChartListener<L>> ChartListener<L> for Arc<Mutex<T>> {
    fn on_selection_change(&mut self, selection: Option<&SelectionInfo<L>>) {
        self.lock().on_selection_change(selection);
    }

    fn on_hover(&mut self, hover: Option<&HoverInfo<L>>) {
        self.lock().on_hover(hover);
    }

    fn on_labels_layout(&mut self, labels: &[LabelLayout<L>]) {
        self.lock().on_labels_layout(labels);
    }

    fn on_value_axis_layout(&mut self, labels: &[ValueAxisLabel]) {
        self.lock().on_value_axis_layout(labels);
    }
}
