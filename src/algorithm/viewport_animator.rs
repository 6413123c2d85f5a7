//! Time-based zoom animation converging the current zoom toward a target.
//!
//! The animator is a two-state machine:
//!   * `Idle` while `current == target`; no tick is ever needed.
//!   * `Animating` after a `set_target` that moves away from `current`.
//!
//! A retarget while animating re-anchors on the value last shown, so a gesture
//! that interrupts an animation never produces a visible jump. Ticks are pure
//! computations on a caller-supplied `Instant`; scheduling is the caller's job.

use std::time::{Duration, Instant};

use crate::algorithm::easing::ZoomEasing;
use crate::models::zoom::{MAX_ZOOM_FACTOR, MIN_ZOOM};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorState {
    Idle,
    Animating {
        start_zoom: f64,
        start_time: Instant,
        /// Fixed when the transition starts; later config changes do not apply.
        duration: Duration,
        easing: ZoomEasing,
    },
}

#[derive(Debug, Clone)]
pub struct ViewportAnimator {
    current: f64,
    target: f64,
    state: AnimatorState,
}

impl Default for ViewportAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportAnimator {
    pub fn new() -> Self {
        Self {
            current: MIN_ZOOM,
            target: MIN_ZOOM,
            state: AnimatorState::Idle,
        }
    }

    pub fn current_zoom(&self) -> f64 {
        self.current
    }

    pub fn target_zoom(&self) -> f64 {
        self.target
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating { .. })
    }

    /// Points the animation at `zoom`. Returns `true` when a tick is now required.
    pub fn set_target(
        &mut self,
        zoom: f64,
        now: Instant,
        duration: Duration,
        easing: ZoomEasing,
    ) -> bool {
        let zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM_FACTOR)
        } else {
            MIN_ZOOM
        };
        self.target = zoom;

        if self.current == zoom {
            self.state = AnimatorState::Idle;
            return false;
        }

        self.state = AnimatorState::Animating {
            start_zoom: self.current,
            start_time: now,
            duration,
            easing,
        };
        true
    }

    /// Advances the animation to `now` and returns the new current zoom.
    ///
    /// Reaching full progress settles on the target exactly and returns to `Idle`.
    pub fn tick(&mut self, now: Instant) -> f64 {
        let AnimatorState::Animating {
            start_zoom,
            start_time,
            duration,
            easing,
        } = self.state
        else {
            return self.current;
        };

        let progress = if duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(start_time);
            (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        };

        if progress >= 1.0 {
            self.current = self.target;
            self.state = AnimatorState::Idle;
            return self.current;
        }

        let eased = easing.apply(progress);
        self.current =
            (start_zoom + (self.target - start_zoom) * eased).clamp(MIN_ZOOM, MAX_ZOOM_FACTOR);
        self.current
    }

    /// Drops any animation and pins the zoom, used when the engine is torn down.
    pub fn settle_at(&mut self, zoom: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM_FACTOR);
        self.current = zoom;
        self.target = zoom;
        self.state = AnimatorState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(300);

    fn ms(base: Instant, offset: u64) -> Instant {
        base + Duration::from_millis(offset)
    }

    #[test]
    fn retarget_to_current_value_stays_idle() {
        let mut animator = ViewportAnimator::new();
        let now = Instant::now();
        assert!(!animator.set_target(1.0, now, DURATION, ZoomEasing::EaseOut));
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn converges_exactly_after_duration() {
        let base = Instant::now();
        for target in [1.5, 2.0, 2.37, 3.0] {
            let mut animator = ViewportAnimator::new();
            assert!(animator.set_target(target, base, DURATION, ZoomEasing::EaseOut));
            let mut t: u64 = 0;
            while t < 300 {
                t += 16;
                animator.tick(ms(base, t.min(300)));
            }
            assert_eq!(animator.current_zoom(), target);
            assert!(!animator.is_animating());
        }
    }

    #[test]
    fn follows_ease_out_cubic_midway() {
        let base = Instant::now();
        let mut animator = ViewportAnimator::new();
        animator.set_target(2.0, base, DURATION, ZoomEasing::EaseOut);
        let zoom = animator.tick(ms(base, 150));
        assert!((zoom - 1.875).abs() < 1e-9, "got {zoom}");
        assert!(animator.is_animating());
    }

    #[test]
    fn interruption_re_anchors_without_jump() {
        let base = Instant::now();
        for interrupt_at in [1, 40, 150, 299] {
            let mut animator = ViewportAnimator::new();
            animator.set_target(3.0, base, DURATION, ZoomEasing::EaseOut);
            let shown = animator.tick(ms(base, interrupt_at));

            animator.set_target(1.0, ms(base, interrupt_at), DURATION, ZoomEasing::EaseOut);
            let next = animator.tick(ms(base, interrupt_at));
            assert!((next - shown).abs() < 1e-9);

            let after_one_frame = animator.tick(ms(base, interrupt_at + 16));
            assert!(after_one_frame <= shown);
            assert!(shown - after_one_frame < 0.5);
        }
    }

    #[test]
    fn zero_duration_settles_on_first_tick() {
        let base = Instant::now();
        let mut animator = ViewportAnimator::new();
        animator.set_target(2.0, base, Duration::ZERO, ZoomEasing::EaseOut);
        assert_eq!(animator.tick(base), 2.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn target_is_clamped_into_zoom_range() {
        let base = Instant::now();
        let mut animator = ViewportAnimator::new();
        animator.set_target(9.0, base, DURATION, ZoomEasing::EaseOut);
        assert_eq!(animator.target_zoom(), MAX_ZOOM_FACTOR);
        animator.tick(ms(base, 500));
        assert_eq!(animator.current_zoom(), MAX_ZOOM_FACTOR);

        animator.set_target(0.2, ms(base, 500), DURATION, ZoomEasing::EaseOut);
        assert_eq!(animator.target_zoom(), MIN_ZOOM);
    }

    #[test]
    fn idle_tick_is_a_no_op() {
        let mut animator = ViewportAnimator::new();
        assert_eq!(animator.tick(Instant::now()), 1.0);
        assert_eq!(animator.state(), AnimatorState::Idle);
    }
}
