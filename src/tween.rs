// ============================================================================
// REVEAL TWEENS
// ============================================================================
//
// Reveal tweens that drive the charts from 0 to 1 exactly once.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOutCubic,
    EaseInOutQuad,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    Idle,
    Running { started: Instant },
    Done,
}

/// Animate-once progress scalar.
///
/// Idle until [`trigger`](ProgressTween::trigger) is first called, then eased
/// from 0 to 1 over `duration`. Later triggers are ignored, and the value
/// never moves backwards even if the clock does.
#[derive(Debug, Clone)]
pub struct ProgressTween {
    duration: Duration,
    easing: Easing,
    state: TweenState,
    value: f64,
}

impl ProgressTween {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            state: TweenState::Idle,
            value: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn state(&self) -> TweenState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, TweenState::Running { .. })
    }

    /// Starts the tween on first call; returns whether it started.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if self.state != TweenState::Idle {
            return false;
        }
        if self.duration.is_zero() {
            self.value = 1.0;
            self.state = TweenState::Done;
        } else {
            self.state = TweenState::Running { started: now };
        }
        true
    }

    /// Advances the value; returns whether it changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let TweenState::Running { started } = self.state else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        let next = self.easing.apply(t).max(self.value).clamp(0.0, 1.0);
        let changed = next != self.value;
        self.value = next;
        if t >= 1.0 {
            self.value = 1.0;
            self.state = TweenState::Done;
            return true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easings_pin_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutQuad] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn idle_tween_does_not_move() {
        let mut tween = ProgressTween::new(Duration::from_secs(1), Easing::Linear);
        assert!(!tween.advance(Instant::now() + Duration::from_secs(5)));
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut tween = ProgressTween::new(Duration::ZERO, Easing::Linear);
        assert!(tween.trigger(Instant::now()));
        assert_eq!(tween.value(), 1.0);
        assert_eq!(tween.state(), TweenState::Done);
    }
}
