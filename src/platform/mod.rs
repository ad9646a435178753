//! Platform layer
//!
//! - `pointer`: pure client-coordinate mapping, shared with tests
//! - `web`: requestAnimationFrame loops and DOM helpers (wasm only)

pub mod pointer;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use pointer::{Bounds, angle_from_center, local_offset, percent_x};
