//! Pointer state handed to the engine every frame.

/// Click phase of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickingState {
    /// No button held.
    #[default]
    None,
    /// Button held down.
    Holding,
    /// Button released since the last frame. Consumed by the engine, which
    /// reverts it to `None`.
    JustReleased,
}

/// Pointer position in device pixels plus its click phase.
///
/// `x = -1, y = -1` with `ClickingState::None` means the pointer is not over
/// the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub clicking: ClickingState,
}

impl PointerState {
    pub fn new(x: f64, y: f64, clicking: ClickingState) -> Self {
        Self { x, y, clicking }
    }

    /// A pointer that is not over the canvas.
    pub fn absent() -> Self {
        Self {
            x: -1.0,
            y: -1.0,
            clicking: ClickingState::None,
        }
    }

    /// Returns true if the pointer is over the canvas.
    pub fn is_present(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x.is_finite() && self.y.is_finite()
    }

    pub fn position(&self) -> glam::Vec2 {
        glam::Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::absent()
    }
}

/// Turns discrete pointer events into a [`PointerState`].
///
/// ```
/// use graph_renderer::{ClickingState, PointerTracker};
///
/// let mut tracker = PointerTracker::new();
/// tracker.pointer_down(10.0, 20.0);
/// assert_eq!(tracker.state().clicking, ClickingState::Holding);
/// tracker.pointer_up();
/// assert_eq!(tracker.state().clicking, ClickingState::JustReleased);
/// tracker.pointer_leave();
/// assert!(!tracker.state().is_present());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    state: PointerState,
    pressed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.pressed = true;
        self.state = PointerState::new(x, y, ClickingState::Holding);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.state.x = x;
        self.state.y = y;
        self.state.clicking = match (self.pressed, self.state.clicking) {
            (true, _) => ClickingState::Holding,
            // A release not yet seen by the engine survives the move.
            (false, ClickingState::JustReleased) => ClickingState::JustReleased,
            (false, _) => ClickingState::None,
        };
    }

    pub fn pointer_up(&mut self) {
        self.pressed = false;
        if self.state.is_present() {
            self.state.clicking = ClickingState::JustReleased;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.pressed = false;
        self.state = PointerState::absent();
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Mutable access for passing the state to an engine `update`, which
    /// reverts a consumed release.
    pub fn state_mut(&mut self) -> &mut PointerState {
        &mut self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_without_press_is_hover() {
        let mut tracker = PointerTracker::new();
        tracker.pointer_move(5.0, 5.0);
        assert_eq!(
            tracker.state(),
            PointerState::new(5.0, 5.0, ClickingState::None)
        );
    }

    #[test]
    fn test_move_while_pressed_keeps_holding() {
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(5.0, 5.0);
        tracker.pointer_move(6.0, 7.0);
        assert_eq!(tracker.state().clicking, ClickingState::Holding);
        assert_eq!(tracker.state().x, 6.0);
    }

    #[test]
    fn test_pending_release_survives_move() {
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(5.0, 5.0);
        tracker.pointer_up();
        tracker.pointer_move(6.0, 6.0);
        assert_eq!(tracker.state().clicking, ClickingState::JustReleased);
    }

    #[test]
    fn test_up_after_leave_is_ignored() {
        let mut tracker = PointerTracker::new();
        tracker.pointer_down(5.0, 5.0);
        tracker.pointer_leave();
        tracker.pointer_up();
        assert_eq!(tracker.state(), PointerState::absent());
    }
}
