//! API handlers.

pub mod effects;
pub mod health;
pub mod presets;
