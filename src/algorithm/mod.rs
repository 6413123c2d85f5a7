pub mod easing;
pub mod pan_clamp;
pub mod viewport_animator;
