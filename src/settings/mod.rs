//! Read-only capabilities the engine consults, plus the stock implementations.

pub mod entitlement;
pub mod store;

use crate::algorithm::easing::ZoomEasing;
use crate::models::zoom::{DEFAULT_ANIMATION_DURATION_MS, DEFAULT_TICK_INTERVAL_MS};

/// Whether the pro feature set (tap-to-zoom included) is unlocked.
pub trait Entitlement: Send + Sync {
    fn is_pro_unlocked(&self) -> bool;
}

/// User-facing tap-to-zoom preferences, read at every enable and gesture start.
pub trait Settings: Send + Sync {
    fn is_tap_to_zoom_enabled(&self) -> bool;

    /// Raw configured factor; the engine clamps it into `[1.5, 3.0]`.
    fn zoom_factor(&self) -> f64;

    fn animation_duration_ms(&self) -> u64 {
        DEFAULT_ANIMATION_DURATION_MS
    }

    fn easing(&self) -> ZoomEasing {
        ZoomEasing::default()
    }

    fn tick_interval_ms(&self) -> u64 {
        DEFAULT_TICK_INTERVAL_MS
    }
}
