//! Valentine Days - six small mini-games, unlocked one day at a time
//!
//! Core modules:
//! - `sim`: Deterministic per-screen simulations (phases, timers, entities)
//! - `route`: Hash routes and day ordering
//! - `ui`: View model projected from the mounted screen
//! - `background`: Drifting heart backdrop model
//! - `platform`: Pointer mapping and browser frame-loop plumbing
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `tuning`: Data-driven game balance

pub mod background;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod route;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use route::{Day, Route};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 120;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest display frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert milliseconds to simulation ticks (rounded to nearest)
#[inline]
pub fn ms_to_ticks(ms: u32) -> u32 {
    ((ms as u64 * consts::SIM_HZ as u64 + 500) / 1000) as u32
}

/// Convert simulation ticks to whole milliseconds (floored)
#[inline]
pub fn ticks_to_ms(ticks: u32) -> u32 {
    (ticks as u64 * 1000 / consts::SIM_HZ as u64) as u32
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(deg: f32) -> f32 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Shortest unsigned distance between two angles in degrees, in [0, 180]
#[inline]
pub fn angular_distance_deg(a: f32, b: f32) -> f32 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

/// Convert polar (r, theta in degrees) to cartesian (x, y), screen y axis down
#[inline]
pub fn polar_to_cartesian(r: f32, theta_deg: f32) -> Vec2 {
    let theta = theta_deg.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta in degrees)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x).to_degrees())
}
