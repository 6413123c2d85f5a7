pub mod algorithm;
pub mod capture;
pub mod engine;
pub mod input;
pub mod models;
pub mod settings;

pub use capture::surface::{RecordingSurface, SurfaceError, SurfaceHandle};
pub use engine::controller::{ZoomEngineController, ZoomEngineHandle};
pub use engine::scheduler::{Clock, ManualClock, SystemClock, TickQueue, TickScheduler};
pub use models::gesture::{GestureIntent, PointerEvent};
pub use models::zoom::{EngineConfig, ScreenGeometry, ZoomState};
pub use settings::{Entitlement, Settings};

/// Installs the `env_logger` backend (`RUST_LOG`, default `info`).
///
/// Hosts embedding the engine may install their own logger first; a second
/// initialization is ignored.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialized");
    }
}
