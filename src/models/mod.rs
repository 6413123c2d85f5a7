pub mod gesture;
pub mod zoom;
