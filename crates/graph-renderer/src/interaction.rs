//! Hit testing and hover/selection state.

use glam::Vec2;

use crate::input::{ClickingState, PointerState};
use crate::rect::Rect;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    /// Index of the entity under the pointer
    pub index: usize,
    /// Distance from the pointer to the entity center, in pixels
    pub distance: f32,
}

/// Find the entity whose rect contains `point`.
///
/// When several (enlarged) rects overlap the point, the one with the closest
/// center wins.
pub fn hit_test_rects<I>(point: Vec2, rects: I) -> Option<HitTestResult>
where
    I: IntoIterator<Item = (usize, Rect)>,
{
    let mut best: Option<HitTestResult> = None;

    for (index, rect) in rects {
        if !rect.contains(point) {
            continue;
        }
        let distance = point.distance(rect.center());
        if best.as_ref().is_none_or(|b| distance < b.distance) {
            best = Some(HitTestResult { index, distance });
        }
    }

    best
}

/// Find the point nearest to `point` within its radius.
///
/// Items are `(index, center, radius)`.
pub fn hit_test_points<I>(point: Vec2, points: I) -> Option<HitTestResult>
where
    I: IntoIterator<Item = (usize, Vec2, f32)>,
{
    let mut best: Option<HitTestResult> = None;

    for (index, center, radius) in points {
        let distance = point.distance(center);
        if distance <= radius && best.as_ref().is_none_or(|b| distance < b.distance) {
            best = Some(HitTestResult { index, distance });
        }
    }

    best
}

/// What changed during one [`InteractionState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionChange {
    pub hover_changed: bool,
    pub selection_changed: bool,
}

/// Hovered and selected entity indices plus the pending press.
///
/// Click policy: a release commits only if it lands on the same entity (or
/// the same empty space) the press started on. There is no drag distance
/// threshold. Committing on the selected entity deselects it; committing on
/// empty space clears the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    hovered: Option<usize>,
    selected: Option<usize>,
    /// Hit recorded on the first `Holding` frame of the current press.
    press: Option<Option<usize>>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether a press is in progress.
    pub fn is_pressing(&self) -> bool {
        self.press.is_some()
    }

    /// Entity the current press started on, if any.
    pub fn pressed(&self) -> Option<usize> {
        self.press.flatten()
    }

    /// Feed one frame of pointer input together with its hit test result.
    pub fn apply(&mut self, pointer: &PointerState, hit: Option<usize>) -> InteractionChange {
        let previous_hover = self.hovered;
        let previous_selection = self.selected;

        if !pointer.is_present() {
            self.hovered = None;
            self.press = None;
        } else {
            self.hovered = hit;
            match pointer.clicking {
                ClickingState::Holding => {
                    if self.press.is_none() {
                        self.press = Some(hit);
                    }
                }
                ClickingState::JustReleased => {
                    // Press and release inside one frame: the release position is the press position.
                    let pressed_on = self.press.take().unwrap_or(hit);
                    if pressed_on == hit {
                        self.commit(hit);
                    }
                }
                ClickingState::None => {
                    self.press = None;
                }
            }
        }

        InteractionChange {
            hover_changed: previous_hover != self.hovered,
            selection_changed: previous_selection != self.selected,
        }
    }

    /// Drop indices that no longer exist after the dataset shrank.
    pub fn retain_below(&mut self, len: usize) -> InteractionChange {
        let previous_hover = self.hovered;
        let previous_selection = self.selected;

        if self.hovered.is_some_and(|i| i >= len) {
            self.hovered = None;
        }
        if self.selected.is_some_and(|i| i >= len) {
            self.selected = None;
        }
        if self.press.is_some_and(|p| p.is_some_and(|i| i >= len)) {
            self.press = None;
        }

        InteractionChange {
            hover_changed: previous_hover != self.hovered,
            selection_changed: previous_selection != self.selected,
        }
    }

    fn commit(&mut self, hit: Option<usize>) {
        self.selected = match hit {
            Some(index) if self.selected == Some(index) => None,
            other => other,
        };
        tracing::debug!("Selection committed: {:?}", self.selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(clicking: ClickingState) -> PointerState {
        PointerState::new(1.0, 1.0, clicking)
    }

    #[test]
    fn test_hit_test_rects_prefers_closest_center() {
        let rects = [
            (0, Rect::new(0.0, 0.0, 12.0, 10.0)),
            (1, Rect::new(8.0, 0.0, 12.0, 10.0)),
        ];
        let hit = hit_test_rects(Vec2::new(11.0, 5.0), rects).unwrap();
        assert_eq!(hit.index, 1);
        assert!(hit_test_rects(Vec2::new(50.0, 5.0), rects).is_none());
    }

    #[test]
    fn test_hit_test_points_within_radius() {
        let points = [(0, Vec2::new(0.0, 0.0), 5.0), (1, Vec2::new(20.0, 0.0), 5.0)];
        assert_eq!(hit_test_points(Vec2::new(3.0, 3.0), points).unwrap().index, 0);
        assert!(hit_test_points(Vec2::new(10.0, 0.0), points).is_none());
    }

    #[test]
    fn test_click_commits_and_toggles() {
        let mut state = InteractionState::new();
        state.apply(&at(ClickingState::Holding), Some(2));
        let change = state.apply(&at(ClickingState::JustReleased), Some(2));
        assert!(change.selection_changed);
        assert_eq!(state.selected(), Some(2));

        state.apply(&at(ClickingState::Holding), Some(2));
        state.apply(&at(ClickingState::JustReleased), Some(2));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_release_on_other_entity_does_not_commit() {
        let mut state = InteractionState::new();
        state.apply(&at(ClickingState::Holding), Some(1));
        state.apply(&at(ClickingState::JustReleased), Some(3));
        assert_eq!(state.selected(), None);
        assert_eq!(state.hovered(), Some(3));
    }

    #[test]
    fn test_leave_cancels_press_and_keeps_selection() {
        let mut state = InteractionState::new();
        state.apply(&at(ClickingState::JustReleased), Some(0));
        assert_eq!(state.selected(), Some(0));

        state.apply(&at(ClickingState::Holding), Some(4));
        let change = state.apply(&PointerState::absent(), None);
        assert!(change.hover_changed);
        assert!(!state.is_pressing());
        assert_eq!(state.selected(), Some(0));
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let mut state = InteractionState::new();
        state.apply(&at(ClickingState::JustReleased), Some(1));
        state.apply(&at(ClickingState::Holding), None);
        state.apply(&at(ClickingState::JustReleased), None);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_retain_below_drops_stale_indices() {
        let mut state = InteractionState::new();
        state.apply(&at(ClickingState::JustReleased), Some(4));
        let change = state.retain_below(3);
        assert!(change.selection_changed);
        assert_eq!(state.selected(), None);
    }
}
