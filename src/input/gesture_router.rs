//! Classifies overlay pointer events into zoom intents.
//!
//! The router runs on the input thread only and keeps just enough state to
//! tell a tap from a drag and to pair two taps into a double tap:
//!   1. `down` opens a press; if it lands inside the double-tap window of the
//!      previous tap it emits `DoubleTap` straight away.
//!   2. `move` beyond the touch slop turns the press into a drag; every further
//!      move emits `Pan` with the finger delta since the previous position.
//!   3. `up` of an undragged press emits `Tap`; the up that closes a double tap
//!      emits nothing.

use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::models::gesture::{GestureIntent, PointerEvent};

/// Movement in pixels before a press is considered a drag.
pub const TOUCH_SLOP_PX: f64 = 8.0;
/// Max gap between the first up and the second down of a double tap.
pub const DOUBLE_TAP_TIMEOUT_MS: u64 = 300;
/// Max distance between the two downs of a double tap.
pub const DOUBLE_TAP_SLOP_PX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureConfig {
    pub touch_slop_px: f64,
    pub double_tap_timeout_ms: u64,
    pub double_tap_slop_px: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop_px: TOUCH_SLOP_PX,
            double_tap_timeout_ms: DOUBLE_TAP_TIMEOUT_MS,
            double_tap_slop_px: DOUBLE_TAP_SLOP_PX,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    down: Point,
    last: Point,
    dragging: bool,
    /// Second down of a double tap; its up and moves are swallowed.
    double_tap: bool,
}

#[derive(Debug, Clone, Copy)]
struct CompletedTap {
    down: Point,
    up_time_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    config: GestureConfig,
    press: Option<Press>,
    last_tap: Option<CompletedTap>,
}

impl GestureRouter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            last_tap: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Forgets any in-progress press and pending first tap.
    pub fn reset(&mut self) {
        self.press = None;
        self.last_tap = None;
    }

    pub fn route(&mut self, event: PointerEvent) -> Option<GestureIntent> {
        match event {
            PointerEvent::Down { time_ms, x, y } => self.on_down(time_ms, Point::new(x, y)),
            PointerEvent::Move { x, y, .. } => self.on_move(Point::new(x, y)),
            PointerEvent::Up { time_ms, x, y } => self.on_up(time_ms, Point::new(x, y)),
            PointerEvent::Cancel { .. } => {
                self.reset();
                None
            }
            PointerEvent::SingleTap { x, y } => Some(GestureIntent::Tap { x, y }),
            PointerEvent::DoubleTap { .. } => Some(GestureIntent::DoubleTap),
            PointerEvent::Scroll { dx, dy } => Some(GestureIntent::Pan { dx, dy }),
        }
    }

    fn on_down(&mut self, time_ms: u64, pos: Point) -> Option<GestureIntent> {
        let double_tap = self.last_tap.take().is_some_and(|tap| {
            time_ms.saturating_sub(tap.up_time_ms) <= self.config.double_tap_timeout_ms
                && tap.down.distance(pos) <= self.config.double_tap_slop_px
        });

        self.press = Some(Press {
            down: pos,
            last: pos,
            dragging: false,
            double_tap,
        });

        double_tap.then_some(GestureIntent::DoubleTap)
    }

    fn on_move(&mut self, pos: Point) -> Option<GestureIntent> {
        let press = self.press.as_mut()?;
        if press.double_tap {
            return None;
        }

        if !press.dragging {
            if press.down.distance(pos) <= self.config.touch_slop_px {
                return None;
            }
            press.dragging = true;
        }

        let delta = pos - press.last;
        press.last = pos;
        if delta.x == 0.0 && delta.y == 0.0 {
            return None;
        }
        Some(GestureIntent::Pan {
            dx: delta.x,
            dy: delta.y,
        })
    }

    fn on_up(&mut self, time_ms: u64, pos: Point) -> Option<GestureIntent> {
        let press = self.press.take()?;
        if press.double_tap || press.dragging {
            return None;
        }

        self.last_tap = Some(CompletedTap {
            down: press.down,
            up_time_ms: time_ms,
        });
        Some(GestureIntent::Tap { x: pos.x, y: pos.y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(time_ms: u64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { time_ms, x, y }
    }

    fn mv(time_ms: u64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { time_ms, x, y }
    }

    fn up(time_ms: u64, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up { time_ms, x, y }
    }

    fn route_all(router: &mut GestureRouter, events: &[PointerEvent]) -> Vec<GestureIntent> {
        events
            .iter()
            .filter_map(|event| router.route(*event))
            .collect()
    }

    #[test]
    fn still_press_is_a_tap() {
        let mut router = GestureRouter::default();
        let intents = route_all(
            &mut router,
            &[down(0, 540.0, 960.0), mv(10, 543.0, 961.0), up(60, 543.0, 961.0)],
        );
        assert_eq!(intents, vec![GestureIntent::Tap { x: 543.0, y: 961.0 }]);
        assert!(!router.is_pressed());
    }

    #[test]
    fn drag_emits_incremental_pans_and_no_tap() {
        let mut router = GestureRouter::default();
        let intents = route_all(
            &mut router,
            &[
                down(0, 100.0, 100.0),
                mv(16, 120.0, 100.0),
                mv(32, 150.0, 90.0),
                mv(48, 150.0, 90.0),
                up(64, 150.0, 90.0),
            ],
        );
        assert_eq!(
            intents,
            vec![
                GestureIntent::Pan { dx: 20.0, dy: 0.0 },
                GestureIntent::Pan {
                    dx: 30.0,
                    dy: -10.0
                },
            ]
        );
    }

    #[test]
    fn two_quick_taps_make_a_double_tap() {
        let mut router = GestureRouter::default();
        let intents = route_all(
            &mut router,
            &[
                down(0, 300.0, 300.0),
                up(50, 300.0, 300.0),
                down(200, 320.0, 310.0),
                up(250, 320.0, 310.0),
            ],
        );
        assert_eq!(
            intents,
            vec![
                GestureIntent::Tap { x: 300.0, y: 300.0 },
                GestureIntent::DoubleTap,
            ]
        );
    }

    #[test]
    fn slow_or_distant_second_tap_is_a_plain_tap() {
        let mut router = GestureRouter::default();
        let slow = route_all(
            &mut router,
            &[
                down(0, 300.0, 300.0),
                up(50, 300.0, 300.0),
                down(400, 300.0, 300.0),
                up(450, 300.0, 300.0),
            ],
        );
        assert!(slow.iter().all(|i| matches!(i, GestureIntent::Tap { .. })));
        assert_eq!(slow.len(), 2);

        let mut router = GestureRouter::default();
        let distant = route_all(
            &mut router,
            &[
                down(0, 100.0, 100.0),
                up(50, 100.0, 100.0),
                down(100, 600.0, 900.0),
                up(150, 600.0, 900.0),
            ],
        );
        assert_eq!(distant.len(), 2);
        assert!(!distant.contains(&GestureIntent::DoubleTap));
    }

    #[test]
    fn cancel_drops_the_press() {
        let mut router = GestureRouter::default();
        let intents = route_all(
            &mut router,
            &[
                down(0, 10.0, 10.0),
                PointerEvent::Cancel { time_ms: 5 },
                up(10, 10.0, 10.0),
            ],
        );
        assert!(intents.is_empty());
    }

    #[test]
    fn platform_classified_events_pass_through() {
        let mut router = GestureRouter::default();
        assert_eq!(
            router.route(PointerEvent::SingleTap { x: 1.0, y: 2.0 }),
            Some(GestureIntent::Tap { x: 1.0, y: 2.0 })
        );
        assert_eq!(
            router.route(PointerEvent::DoubleTap { x: 1.0, y: 2.0 }),
            Some(GestureIntent::DoubleTap)
        );
        assert_eq!(
            router.route(PointerEvent::Scroll { dx: -4.0, dy: 3.0 }),
            Some(GestureIntent::Pan { dx: -4.0, dy: 3.0 })
        );
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut router = GestureRouter::default();
        assert_eq!(router.route(mv(0, 50.0, 50.0)), None);
    }
}
