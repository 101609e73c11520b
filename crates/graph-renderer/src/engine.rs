//! The chart engine interface and the state shared by all chart types.
//!
//! A host drives a chart once per frame:
//!
//! 1. `resize` / `update_data` when inputs change (marks the layout dirty),
//! 2. `update(timestamp, &mut pointer)` to advance animations, recompute a
//!    dirty layout, hit test and re-emit every buffer,
//! 3. the buffer getters to upload vertex data,
//! 4. the query methods to place labels and tooltips.
//!
//! Buffers returned by the getters are overwritten by the next `update`.

use glam::Vec2;

use crate::animation::{EntityAnimation, FrameClock};
use crate::axis::{ValueAxis, ValueAxisLabel};
use crate::buffers::BufferCapacities;
use crate::color::Color;
use crate::config::{AnimationConfig, VisualState};
use crate::data::{ChartEntity, DataChange, DataStore};
use crate::dirty::LayoutDirty;
use crate::error::{ChartError, Result};
use crate::input::{ClickingState, PointerState};
use crate::interaction::{InteractionChange, InteractionState};
use crate::layout::LabelSlot;
use crate::rect::Rect;

/// Operations every chart type supports.
pub trait ChartEngine {
    /// Opaque label type, compared only for change detection.
    type Label: Clone + PartialEq;

    /// Set the canvas size in device pixels. Both sides must be at least 1.
    fn resize(&mut self, width: f32, height: f32) -> Result<()>;

    /// Replace the dataset. Rejected without any state change when longer
    /// than the chart capacity.
    fn update_data(
        &mut self,
        entities: &[ChartEntity<Self::Label>],
        timestamp: f64,
    ) -> Result<DataChange>;

    /// Advance one frame. Returns whether animations are still running.
    ///
    /// A `JustReleased` pointer is consumed and reverted to `None`.
    fn update(&mut self, timestamp: f64, pointer: &mut PointerState) -> bool;

    /// Whether any displayed value, scale or color fade is still moving.
    fn is_animating(&self) -> bool;

    /// Whether the next `update` recomputes the layout.
    fn is_layout_dirty(&self) -> bool;

    /// Incremented by every layout recompute.
    fn layout_revision(&self) -> u64;

    /// Canvas size in device pixels.
    fn size(&self) -> Vec2;

    fn entities(&self) -> &[ChartEntity<Self::Label>];

    fn hovered_index(&self) -> Option<usize>;

    fn selected_index(&self) -> Option<usize>;

    /// Currently displayed (animated) value of entity `index`.
    fn displayed_value_at(&self, index: usize) -> Option<f64>;

    /// Screen rect of entity `index` as currently displayed, without hover
    /// growth. `None` for entities that are not laid out.
    fn entity_rect_at(&self, index: usize) -> Option<Rect>;

    /// Number of entities laid out (and hit-testable).
    fn visible_len(&self) -> usize;

    /// The computed value axis.
    fn value_axis(&self) -> &ValueAxis;

    /// Label slot under the plot for entity `index`.
    fn label_slot_at(&self, index: usize) -> Option<LabelSlot>;

    fn general_vertex_positions(&self) -> &[f32];
    fn general_vertex_colors(&self) -> &[f32];
    fn entity_vertex_positions(&self) -> &[f32];
    fn entity_vertex_colors(&self) -> &[f32];
    fn relative_positions(&self) -> &[f32];

    /// Segment positions connecting entities; empty for chart types without.
    fn line_vertex_positions(&self) -> &[f32] {
        &[]
    }

    fn line_vertex_colors(&self) -> &[f32] {
        &[]
    }

    /// Corner rounding radius for the fragment stage, in device pixels.
    fn corner_radius(&self) -> f32;

    /// One-time buffer binding step. A second call is an error and changes
    /// nothing.
    fn bind_buffers(&mut self) -> Result<BufferCapacities>;

    /// Like [`ChartEngine::entity_rect_at`] with an error for bad indices.
    fn entity_rect(&self, index: usize) -> Result<Rect> {
        self.entity_rect_at(index)
            .ok_or(ChartError::IndexOutOfRange {
                index,
                len: self.visible_len(),
            })
    }

    fn scale_line_count(&self) -> usize {
        self.value_axis().len()
    }

    fn scale_line_value_at(&self, index: usize) -> Option<f64> {
        self.value_axis().get(index).map(|line| line.value)
    }

    fn scale_line_x_at(&self, index: usize) -> Option<f32> {
        self.value_axis().get(index).map(|line| line.x)
    }

    fn scale_line_y_at(&self, index: usize) -> Option<f32> {
        self.value_axis().get(index).map(|line| line.y)
    }

    fn value_axis_label_at(&self, index: usize) -> Option<ValueAxisLabel> {
        self.value_axis().label_at(index)
    }
}

/// Rejects canvas sizes below one device pixel (NaN included).
pub(crate) fn validate_dimensions(width: f32, height: f32) -> Result<()> {
    if width >= 1.0 && height >= 1.0 && width.is_finite() && height.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidDimensions { width, height })
    }
}

/// Data, animation and interaction state shared by every chart type.
#[derive(Debug)]
pub(crate) struct ChartCore<L> {
    pub data: DataStore<L>,
    pub animations: Vec<EntityAnimation>,
    pub interaction: InteractionState,
    pub clock: FrameClock,
    pub dirty: LayoutDirty,
    pub width: f32,
    pub height: f32,
    pub visual: VisualState,
    pub animation: AnimationConfig,
    pub layout_revision: u64,
    bound: bool,
}

impl<L: Clone + PartialEq> ChartCore<L> {
    pub fn new(
        entities: &[ChartEntity<L>],
        width: f32,
        height: f32,
        visual: VisualState,
        animation: AnimationConfig,
        max_entities: usize,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        let data = DataStore::new(entities, max_entities)?;

        let mut animations = Vec::with_capacity(max_entities);
        let count = data.len();
        for (index, entity) in data.entities().iter().enumerate() {
            animations.push(EntityAnimation::grow_in(
                entity.display_value(),
                animation.value_duration_ms,
                animation.stagger_for(index, count),
                animation.easing,
            ));
        }

        tracing::debug!(
            "Created chart with {} entities (capacity {}) at {}x{}",
            count,
            max_entities,
            width,
            height
        );

        Ok(Self {
            data,
            animations,
            interaction: InteractionState::new(),
            clock: FrameClock::new(),
            dirty: LayoutDirty::INITIAL,
            width,
            height,
            visual,
            animation,
            layout_revision: 0,
            bound: false,
        })
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        validate_dimensions(width, height)?;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.dirty |= LayoutDirty::SIZE;
        }
        Ok(())
    }

    pub fn update_data(&mut self, entities: &[ChartEntity<L>], timestamp: f64) -> Result<DataChange> {
        let change = match self.data.replace(entities) {
            Ok(change) => change,
            Err(err) => {
                tracing::warn!("{}", err);
                return Err(err);
            }
        };

        // Transitions start at `timestamp`, not at the previous frame.
        let start = self.clock.elapsed_until(timestamp);
        let config = self.animation;

        match change {
            DataChange::Unchanged => {
                tracing::trace!("Data unchanged, skipping update");
                return Ok(change);
            }
            DataChange::Updated => {}
            DataChange::Resized { previous_len } => {
                let len = self.data.len();
                self.animations.truncate(len);
                for index in previous_len..len {
                    let target = self.data.entities()[index].display_value();
                    self.animations.push(EntityAnimation::grow_in(
                        target,
                        config.value_duration_ms,
                        start,
                        config.easing,
                    ));
                }
                let cleared = self.interaction.retain_below(len);
                if cleared.selection_changed || cleared.hover_changed {
                    tracing::debug!(
                        "Dataset shrank to {}, dropped hover/selection past the end",
                        len
                    );
                }
            }
        }

        for (anim, entity) in self.animations.iter_mut().zip(self.data.entities()) {
            anim.value.retarget(
                entity.display_value(),
                config.value_duration_ms,
                start,
                config.easing,
            );
        }

        self.dirty |= LayoutDirty::DATA;
        tracing::debug!("Data replaced: {:?}, {} entities", change, self.data.len());
        Ok(change)
    }

    /// Tick the clock and advance every transition.
    pub fn advance(&mut self, timestamp: f64) -> f64 {
        let delta = self.clock.tick(timestamp);
        for anim in &mut self.animations {
            anim.advance(delta);
        }
        delta
    }

    /// Mark the layout as recomputed.
    pub fn layout_done(&mut self) {
        self.dirty = LayoutDirty::empty();
        self.layout_revision += 1;
    }

    /// Apply this frame's pointer input and retarget hover and selection
    /// transitions. Reverts a consumed `JustReleased`.
    pub fn apply_pointer(&mut self, pointer: &mut PointerState, hit: Option<usize>) -> InteractionChange {
        let change = self.interaction.apply(pointer, hit);
        if pointer.clicking == ClickingState::JustReleased {
            pointer.clicking = ClickingState::None;
        }

        let hovered = self.interaction.hovered();
        let selected = self.interaction.selected();
        // Held down on an entity and still over it.
        let held = self.interaction.pressed().filter(|index| hovered == Some(*index));
        let hover_scale = f64::from(self.visual.effective_hover_scale());
        let config = self.animation;

        for (index, anim) in self.animations.iter_mut().enumerate() {
            let is_hovered = hovered == Some(index);
            let is_selected = selected == Some(index);
            let scale = if is_hovered || is_selected { hover_scale } else { 1.0 };

            anim.scale
                .retarget(scale, config.hover_duration_ms, 0.0, config.easing);
            anim.hover.retarget(
                if is_hovered { 1.0 } else { 0.0 },
                config.color_duration_ms,
                0.0,
                config.easing,
            );
            anim.selection.retarget(
                if is_selected { 1.0 } else { 0.0 },
                config.color_duration_ms,
                0.0,
                config.easing,
            );
            anim.press.retarget(
                if held == Some(index) { 1.0 } else { 0.0 },
                config.color_duration_ms,
                0.0,
                config.easing,
            );
        }

        change
    }

    pub fn displayed_value(&self, index: usize) -> Option<f64> {
        self.animations.get(index).map(|anim| anim.value.value().max(0.0))
    }

    /// Displayed hover growth of entity `index`.
    pub fn displayed_scale(&self, index: usize) -> f32 {
        self.animations
            .get(index)
            .map_or(1.0, |anim| anim.scale.value() as f32)
    }

    /// Growth used for hit testing: an entity moving toward its hover scale
    /// is tested at full size.
    pub fn hit_scale(&self, index: usize) -> f32 {
        self.animations.get(index).map_or(1.0, |anim| {
            anim.scale.value().max(anim.scale.target()) as f32
        })
    }

    /// Color with hover tint composited over the base, press feedback faded
    /// in over that and the selection color on top.
    pub fn color_at(&self, index: usize) -> Color {
        let visual = &self.visual;
        match self.animations.get(index) {
            Some(anim) => visual
                .color
                .blend_over(visual.hover_color, anim.hover.value() as f32)
                .lerp(
                    visual.press_color,
                    anim.press.value() as f32 * visual.press_amount.clamp(0.0, 1.0),
                )
                .lerp(visual.selected_color, anim.selection.value() as f32),
            None => visual.color,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animations.iter().any(|anim| !anim.is_settled())
    }

    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn bind(&mut self, capacities: BufferCapacities) -> Result<BufferCapacities> {
        if self.bound {
            tracing::error!("Chart buffers bound twice, ignoring the second call");
            return Err(ChartError::AlreadyBound);
        }
        self.bound = true;
        tracing::debug!("Bound chart buffers: {:?}", capacities);
        Ok(capacities)
    }
}
