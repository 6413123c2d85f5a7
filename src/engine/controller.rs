//! Tap-to-zoom façade driven by the overlay compositor.
//!
//! Threading:
//!   * `ZoomEngineController` lives on the UI thread. Touch events, animation
//!     ticks and surface pushes all run there, one at a time.
//!   * `ZoomEngineHandle` is the cross-thread entry point used by capture-session
//!     callbacks. It only publishes requests through atomics and a surface slot,
//!     then posts a zero-delay tick so the UI thread picks them up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::algorithm::pan_clamp::clamp_focal;
use crate::algorithm::viewport_animator::ViewportAnimator;
use crate::capture::surface::{SurfaceHandle, SurfaceTransformSink};
use crate::engine::scheduler::{Clock, TickScheduler};
use crate::input::gesture_router::{GestureConfig, GestureRouter};
use crate::models::gesture::{GestureIntent, PointerEvent};
use crate::models::zoom::{
    sanitize_tick_interval_ms, sanitize_zoom_factor, EngineConfig, ScreenGeometry, ZoomState,
    MIN_ZOOM,
};
use crate::settings::{Entitlement, Settings};

/// State shared between the UI-thread controller and its handles.
#[derive(Debug, Default)]
struct EngineShared {
    /// Effective enabled state, already gated by entitlement and settings.
    enabled: AtomicBool,
    /// Set when the engine left the enabled state and must animate back to 1x.
    reset_requested: AtomicBool,
    disposed: AtomicBool,
    /// Surface attached from another thread, not yet taken by the UI thread.
    pending_surface: Mutex<Option<SurfaceHandle>>,
}

/// Thread-safe handle for `set_enabled` / `attach_surface` from capture callbacks.
#[derive(Clone)]
pub struct ZoomEngineHandle {
    shared: Arc<EngineShared>,
    entitlement: Arc<dyn Entitlement>,
    settings: Arc<dyn Settings>,
    scheduler: Arc<dyn TickScheduler>,
}

impl ZoomEngineHandle {
    /// Requests the enabled state; returns the state actually granted.
    pub fn set_enabled(&self, requested: bool) -> bool {
        let (granted, needs_reset) = self.publish_enabled(requested);
        if needs_reset {
            self.scheduler.schedule(Duration::ZERO);
        }
        granted
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.enabled.load(Ordering::Acquire)
    }

    /// Queues `surface` for the UI thread, replacing any queued one.
    pub fn attach_surface(&self, surface: SurfaceHandle) {
        if self.shared.disposed.load(Ordering::Acquire) {
            return;
        }
        *self
            .shared
            .pending_surface
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(surface);
        self.scheduler.schedule(Duration::ZERO);
    }

    fn feature_available(&self) -> bool {
        self.entitlement.is_pro_unlocked() && self.settings.is_tap_to_zoom_enabled()
    }

    /// Stores the gated state. The second value is true when a reset was requested.
    fn publish_enabled(&self, requested: bool) -> (bool, bool) {
        if self.shared.disposed.load(Ordering::Acquire) {
            return (false, false);
        }

        let granted = requested && self.feature_available();
        if requested && !granted {
            log::info!(
                "tap-to-zoom unavailable (pro={}, setting={}), staying disabled",
                self.entitlement.is_pro_unlocked(),
                self.settings.is_tap_to_zoom_enabled()
            );
        }

        let was_enabled = self.shared.enabled.swap(granted, Ordering::AcqRel);
        if was_enabled != granted {
            log::info!("tap-to-zoom {}", if granted { "enabled" } else { "disabled" });
        }

        let needs_reset = was_enabled && !granted;
        if needs_reset {
            self.shared.reset_requested.store(true, Ordering::Release);
        }
        (granted, needs_reset)
    }

    fn config_snapshot(&self) -> EngineConfig {
        EngineConfig {
            zoom_factor: sanitize_zoom_factor(self.settings.zoom_factor()),
            animation_duration_ms: self.settings.animation_duration_ms(),
            tick_interval_ms: sanitize_tick_interval_ms(self.settings.tick_interval_ms()),
        }
    }
}

impl std::fmt::Debug for ZoomEngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoomEngineHandle")
            .field("shared", &self.shared)
            .finish_non_exhaustive()
    }
}

pub struct ZoomEngineController {
    screen: ScreenGeometry,
    router: GestureRouter,
    animator: ViewportAnimator,
    sink: SurfaceTransformSink,
    /// Desired focal point; the applied one is re-clamped for the current zoom.
    focal: (f64, f64),
    tick_interval: Duration,
    clock: Arc<dyn Clock>,
    handle: ZoomEngineHandle,
}

impl ZoomEngineController {
    pub fn new(
        screen: ScreenGeometry,
        entitlement: Arc<dyn Entitlement>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn TickScheduler>,
    ) -> Self {
        Self::with_gesture_config(
            screen,
            GestureConfig::default(),
            entitlement,
            settings,
            clock,
            scheduler,
        )
    }

    pub fn with_gesture_config(
        screen: ScreenGeometry,
        gesture_config: GestureConfig,
        entitlement: Arc<dyn Entitlement>,
        settings: Arc<dyn Settings>,
        clock: Arc<dyn Clock>,
        scheduler: Arc<dyn TickScheduler>,
    ) -> Self {
        log::debug!("zoom engine created for {}x{}", screen.width, screen.height);
        let tick_interval =
            Duration::from_millis(sanitize_tick_interval_ms(settings.tick_interval_ms()));
        Self {
            screen,
            router: GestureRouter::new(gesture_config),
            animator: ViewportAnimator::new(),
            sink: SurfaceTransformSink::new(),
            focal: screen.center(),
            tick_interval,
            clock,
            handle: ZoomEngineHandle {
                shared: Arc::new(EngineShared::default()),
                entitlement,
                settings,
                scheduler,
            },
        }
    }

    pub fn handle(&self) -> ZoomEngineHandle {
        self.handle.clone()
    }

    pub fn screen(&self) -> ScreenGeometry {
        self.screen
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.shared.disposed.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        self.handle.is_enabled()
    }

    pub fn current_zoom(&self) -> f64 {
        self.animator.current_zoom()
    }

    pub fn is_zoomed(&self) -> bool {
        self.current_zoom() > MIN_ZOOM
    }

    pub fn state(&self) -> ZoomState {
        let (focal_x, focal_y) = self.applied_focal();
        ZoomState {
            current_zoom: self.animator.current_zoom(),
            target_zoom: self.animator.target_zoom(),
            focal_x,
            focal_y,
            animating: self.animator.is_animating(),
        }
    }

    /// Enables the engine when entitlement and settings allow it.
    ///
    /// Returns the granted state. Leaving the enabled state animates back to 1x.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let (granted, _) = self.handle.publish_enabled(enabled);
        self.drain_requests();
        granted
    }

    pub fn attach_surface(&mut self, surface: SurfaceHandle) {
        if self.is_disposed() {
            return;
        }
        let zoom = self.animator.current_zoom();
        let focal = self.applied_focal();
        self.sink.attach(surface, zoom, focal);
    }

    /// Feeds one pointer event; returns whether the overlay consumed it.
    ///
    /// Events are consumed even while disabled so touches never leak to the
    /// layers below the overlay.
    pub fn on_touch_event(&mut self, event: PointerEvent) -> bool {
        if self.is_disposed() {
            return false;
        }
        self.drain_requests();

        let Some(intent) = self.router.route(event) else {
            return true;
        };

        if !self.accepts_intents() {
            log::debug!("zoom engine disabled, ignoring {intent:?}");
            return true;
        }

        match intent {
            GestureIntent::Tap { x, y } => self.on_tap(x, y),
            GestureIntent::DoubleTap => self.reset_zoom(),
            GestureIntent::Pan { dx, dy } => self.on_pan(dx, dy),
        }
        true
    }

    /// Runs one scheduled animation tick.
    pub fn tick(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.drain_requests();
        if !self.animator.is_animating() {
            return;
        }

        self.animator.tick(self.clock.now());
        self.push_transform();

        if self.animator.is_animating() {
            self.handle.scheduler.schedule(self.tick_interval);
        } else {
            log::debug!("zoom settled at {:.3}", self.animator.current_zoom());
        }
    }

    /// Animates back to 1x.
    pub fn reset_zoom(&mut self) {
        self.start_transition(MIN_ZOOM);
    }

    /// Cancels pending ticks and drops the surface; the engine is inert afterwards.
    pub fn dispose(&mut self) {
        let shared = &self.handle.shared;
        if shared.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        shared.enabled.store(false, Ordering::Release);
        shared.reset_requested.store(false, Ordering::Release);
        shared
            .pending_surface
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        self.handle.scheduler.cancel();
        self.sink.detach();
        self.router.reset();
        let zoom = self.animator.current_zoom();
        self.animator.settle_at(zoom);
        log::info!("zoom engine disposed");
    }

    fn accepts_intents(&mut self) -> bool {
        if !self.handle.is_enabled() {
            return false;
        }
        if self.handle.feature_available() {
            return true;
        }
        log::info!("tap-to-zoom no longer available, downgrading");
        self.handle.publish_enabled(false);
        self.drain_requests();
        false
    }

    fn on_tap(&mut self, x: f64, y: f64) {
        if self.animator.current_zoom() > MIN_ZOOM {
            self.reset_zoom();
            return;
        }
        self.focal = (x, y);
        let zoom_factor = self.handle.config_snapshot().zoom_factor;
        self.start_transition(zoom_factor);
    }

    fn on_pan(&mut self, dx: f64, dy: f64) {
        // Divides by the animating zoom, so a pan during a zoom-in moves at a changing scale.
        let zoom = self.animator.current_zoom();
        if zoom <= MIN_ZOOM {
            return;
        }
        let (focal_x, focal_y) = self.applied_focal();
        self.focal = clamp_focal(self.screen, zoom, focal_x - dx / zoom, focal_y - dy / zoom);
        self.push_transform();
    }

    fn start_transition(&mut self, zoom: f64) {
        let config = self.handle.config_snapshot();
        self.tick_interval = Duration::from_millis(config.tick_interval_ms);

        let animating = self.animator.set_target(
            zoom,
            self.clock.now(),
            Duration::from_millis(config.animation_duration_ms),
            self.handle.settings.easing(),
        );
        // A tick left pending while idle returns early, and it may carry a
        // surface or reset posted by the capture thread.
        if animating {
            self.handle.scheduler.schedule(Duration::ZERO);
        }
    }

    fn drain_requests(&mut self) {
        let shared = Arc::clone(&self.handle.shared);
        if shared.reset_requested.swap(false, Ordering::AcqRel) {
            self.reset_zoom();
        }
        let pending = shared
            .pending_surface
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(surface) = pending {
            self.attach_surface(surface);
        }
    }

    fn applied_focal(&self) -> (f64, f64) {
        clamp_focal(
            self.screen,
            self.animator.current_zoom(),
            self.focal.0,
            self.focal.1,
        )
    }

    fn push_transform(&mut self) {
        let zoom = self.animator.current_zoom();
        let (focal_x, focal_y) = self.applied_focal();
        self.sink.apply(zoom, focal_x, focal_y);
    }
}

impl Drop for ZoomEngineController {
    fn drop(&mut self) {
        self.dispose();
    }
}
