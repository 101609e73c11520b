//! Elapsed-time driven transitions.
//!
//! Every animated quantity of a chart entity is a [`Tween`]: a transition from
//! the value displayed when it was (re)targeted toward its target value.
//! Tweens advance by the wall-clock delta measured by a [`FrameClock`], so the
//! animation speed does not depend on the frame rate.
//!
//! # Example
//!
//! ```
//! use graph_renderer::animation::{EasingFunction, FrameClock, Tween};
//!
//! let mut clock = FrameClock::new();
//! let mut height = Tween::settled(0.0);
//! height.retarget(10.0, 500.0, 0.0, EasingFunction::EaseOutSine);
//!
//! // First frame establishes the baseline.
//! assert_eq!(clock.tick(1000.0), 0.0);
//! height.advance(clock.tick(1250.0));
//! assert!(height.value() > 0.0 && height.value() < 10.0);
//!
//! height.advance(clock.tick(1500.0));
//! assert_eq!(height.value(), 10.0);
//! assert!(height.is_settled());
//! ```

/// Distance below which a transition counts as settled.
pub const SETTLE_EPSILON: f64 = 1e-6;

/// Easing functions for transitions.
///
/// All variants are monotonic on `0.0..=1.0` and never leave that range,
/// so a transition never overshoots its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingFunction {
    /// Linear interpolation
    Linear,
    /// Sine ease out (fast start, slow end)
    #[default]
    EaseOutSine,
    /// Quadratic ease out
    QuadOut,
    /// Cubic ease out
    CubicOut,
    /// Quadratic ease in-out
    QuadInOut,
}

impl EasingFunction {
    /// Apply the easing function to a normalized time value (0.0 to 1.0).
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseOutSine => (t * std::f64::consts::FRAC_PI_2).sin(),
            EasingFunction::QuadOut => t * (2.0 - t),
            EasingFunction::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingFunction::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A single animated scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Value displayed when the transition started
    from: f64,
    /// Target value
    to: f64,
    /// Time since the transition was started, in milliseconds
    elapsed: f64,
    /// Duration in milliseconds
    duration: f64,
    /// Delay before the value starts moving, in milliseconds
    delay: f64,
    easing: EasingFunction,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: 0.0,
            duration: 0.0,
            delay: 0.0,
            easing: EasingFunction::Linear,
        }
    }

    /// The currently displayed value.
    pub fn value(&self) -> f64 {
        if self.elapsed < self.delay {
            return self.from;
        }
        if self.duration <= 0.0 {
            return self.to;
        }

        let t = ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// The target value.
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Whether the time budget of the transition is used up.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.delay + self.duration.max(0.0)
    }

    /// Whether the displayed value equals the target.
    pub fn is_settled(&self) -> bool {
        self.is_complete() || (self.to - self.from).abs() <= SETTLE_EPSILON
    }

    /// Start a transition from the displayed value toward `to`.
    ///
    /// Retargeting to the current target keeps the running transition.
    pub fn retarget(&mut self, to: f64, duration: f64, delay: f64, easing: EasingFunction) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.delay = delay.max(0.0);
        self.easing = easing;
    }

    /// Restart from an explicit value, discarding the displayed one.
    pub fn restart_from(
        &mut self,
        from: f64,
        to: f64,
        duration: f64,
        delay: f64,
        easing: EasingFunction,
    ) {
        self.from = from;
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.delay = delay.max(0.0);
        self.easing = easing;
    }

    /// Advance by `delta_ms`. Returns `true` while the transition is running.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        if delta_ms.is_finite() && delta_ms > 0.0 && !self.is_complete() {
            self.elapsed += delta_ms;
        }
        !self.is_settled()
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::settled(0.0)
    }
}

/// Converts host timestamps into frame deltas.
///
/// The first tick establishes the baseline and yields a zero delta.
/// Timestamps that go backwards also yield zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Record `timestamp` (milliseconds) and return the delta since the previous tick.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        let delta = self.elapsed_until(timestamp);
        if timestamp.is_finite() {
            self.last = Some(self.last.map_or(timestamp, |last| last.max(timestamp)));
        }
        delta
    }

    /// Delta between the last tick and `timestamp`, without recording it.
    pub fn elapsed_until(&self, timestamp: f64) -> f64 {
        match self.last {
            Some(last) if timestamp.is_finite() => (timestamp - last).max(0.0),
            _ => 0.0,
        }
    }

    /// Timestamp of the last tick.
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

/// Animated state of one chart entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityAnimation {
    /// Displayed data value
    pub value: Tween,
    /// Hover growth factor
    pub scale: Tween,
    /// Hover tint amount (0.0 to 1.0)
    pub hover: Tween,
    /// Selection color amount (0.0 to 1.0)
    pub selection: Tween,
    /// Press feedback amount while held down (0.0 to 1.0)
    pub press: Tween,
}

impl EntityAnimation {
    /// An entity that grows in from zero toward `target`.
    pub fn grow_in(target: f64, duration: f64, delay: f64, easing: EasingFunction) -> Self {
        let mut value = Tween::settled(0.0);
        value.restart_from(0.0, target, duration, delay, easing);
        Self {
            value,
            ..Self::resting(0.0)
        }
    }

    /// An entity displayed at `value` with no pending transition.
    pub fn resting(value: f64) -> Self {
        Self {
            value: Tween::settled(value),
            scale: Tween::settled(1.0),
            hover: Tween::settled(0.0),
            selection: Tween::settled(0.0),
            press: Tween::settled(0.0),
        }
    }

    /// Advance every tween. Returns `true` while any of them is running.
    pub fn advance(&mut self, delta_ms: f64) -> bool {
        let mut running = self.value.advance(delta_ms);
        running |= self.scale.advance(delta_ms);
        running |= self.hover.advance(delta_ms);
        running |= self.selection.advance(delta_ms);
        running |= self.press.advance(delta_ms);
        running
    }

    /// Whether every tween has reached its target.
    pub fn is_settled(&self) -> bool {
        self.value.is_settled()
            && self.scale.is_settled()
            && self.hover.is_settled()
            && self.selection.is_settled()
            && self.press.is_settled()
    }
}
