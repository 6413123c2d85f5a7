//! Pointer events fed to the overlay and the gesture intents derived from them.

use serde::{Deserialize, Serialize};

/// One pointer primitive delivered by the overlay view.
///
/// Raw `down`/`move`/`up`/`cancel` events are classified by the router itself.
/// `singleTap`, `doubleTap` and `scroll` carry the verdict of a platform gesture
/// detector when the host already runs one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// Finger touched the overlay.
    Down {
        /// Milliseconds on the input clock.
        #[serde(rename = "timeMs", alias = "time_ms")]
        time_ms: u64,
        x: f64,
        y: f64,
    },
    Move {
        #[serde(rename = "timeMs", alias = "time_ms")]
        time_ms: u64,
        x: f64,
        y: f64,
    },
    Up {
        #[serde(rename = "timeMs", alias = "time_ms")]
        time_ms: u64,
        x: f64,
        y: f64,
    },
    /// Gesture aborted by the system (e.g. the window lost focus).
    Cancel {
        #[serde(rename = "timeMs", alias = "time_ms")]
        time_ms: u64,
    },
    SingleTap {
        x: f64,
        y: f64,
    },
    DoubleTap {
        x: f64,
        y: f64,
    },
    /// Finger movement since the previous scroll callback.
    Scroll {
        dx: f64,
        dy: f64,
    },
}

/// What the user asked for, independent of how it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureIntent {
    /// Toggle zoom at the given screen point.
    Tap { x: f64, y: f64 },
    /// Reset to unmagnified.
    DoubleTap,
    /// Finger delta in screen pixels (current minus previous position).
    Pan { dx: f64, dy: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_raw_touch_trace() {
        let trace = r#"[
            {"type":"down","timeMs":0,"x":10.0,"y":20.0},
            {"type":"move","timeMs":16,"x":11.0,"y":21.0},
            {"type":"up","time_ms":40,"x":11.0,"y":21.0},
            {"type":"cancel","timeMs":41}
        ]"#;

        let events: Vec<PointerEvent> = serde_json::from_str(trace).expect("deserialize trace");
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[2],
            PointerEvent::Up {
                time_ms: 40,
                x: 11.0,
                y: 21.0
            }
        );
        assert_eq!(events[3], PointerEvent::Cancel { time_ms: 41 });
    }

    #[test]
    fn serializes_time_with_camel_case_key() {
        let event = PointerEvent::Down {
            time_ms: 5,
            x: 1.0,
            y: 2.0,
        };
        let json = serde_json::to_string(&event).expect("serialize down");
        assert!(json.contains("\"timeMs\""));
        assert!(json.contains("\"type\":\"down\""));
    }
}
