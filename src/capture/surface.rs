//! Applies the zoom transform to the surface the recorder consumes.
//!
//! The surface belongs to the capture pipeline. The engine only keeps a weak
//! reference to it and treats a released or invalid surface as "nothing to do"
//! until the pipeline attaches a new one.

use std::sync::{Arc, Weak};

use kurbo::Affine;

use crate::models::zoom::MIN_ZOOM;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("recording surface has been released")]
    Released,
    #[error("recording surface rejected the transform: {0}")]
    Rejected(String),
}

/// Live drawing surface owned by the capture pipeline.
pub trait RecordingSurface: Send + Sync {
    fn is_valid(&self) -> bool;
    fn set_transform(&self, transform: Affine) -> Result<(), SurfaceError>;
}

/// Non-owning reference to a [`RecordingSurface`]; empty when nothing is attached.
#[derive(Clone, Default)]
pub struct SurfaceHandle(Option<Weak<dyn RecordingSurface>>);

impl SurfaceHandle {
    pub fn new<S: RecordingSurface + 'static>(surface: &Arc<S>) -> Self {
        let weak: Weak<dyn RecordingSurface> = Arc::downgrade(surface) as Weak<S>;
        Self(Some(weak))
    }

    pub fn from_dyn(surface: &Arc<dyn RecordingSurface>) -> Self {
        Self(Some(Arc::downgrade(surface)))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the surface while its owner still holds it and reports it valid.
    pub fn upgrade(&self) -> Option<Arc<dyn RecordingSurface>> {
        self.0
            .as_ref()
            .and_then(Weak::upgrade)
            .filter(|surface| surface.is_valid())
    }
}

impl std::fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.0 {
            None => "empty",
            Some(weak) if weak.strong_count() == 0 => "released",
            Some(_) => "attached",
        };
        f.debug_tuple("SurfaceHandle").field(&state).finish()
    }
}

/// "Scale by `zoom` about `(focal_x, focal_y)`".
pub fn zoom_transform(zoom: f64, focal_x: f64, focal_y: f64) -> Affine {
    Affine::translate((focal_x, focal_y))
        * Affine::scale(zoom)
        * Affine::translate((-focal_x, -focal_y))
}

#[derive(Debug, Default)]
pub struct SurfaceTransformSink {
    handle: SurfaceHandle,
}

impl SurfaceTransformSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> &SurfaceHandle {
        &self.handle
    }

    /// Swaps in a new surface and, if already magnified, pushes the current transform to it.
    pub fn attach(&mut self, handle: SurfaceHandle, zoom: f64, focal: (f64, f64)) {
        self.handle = handle;
        if zoom > MIN_ZOOM {
            self.apply(zoom, focal.0, focal.1);
        }
    }

    /// Drops the surface reference.
    pub fn detach(&mut self) {
        self.handle = SurfaceHandle::empty();
    }

    /// Pushes the transform; returns `false` when no usable surface took it.
    pub fn apply(&mut self, zoom: f64, focal_x: f64, focal_y: f64) -> bool {
        let Some(surface) = self.handle.upgrade() else {
            log::debug!("surface sink: no valid surface, skipping zoom={zoom:.3}");
            return false;
        };

        let transform = zoom_transform(zoom, focal_x, focal_y);
        match surface.set_transform(transform) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("surface sink: transform dropped: {err}");
                false
            }
        }
    }
}
