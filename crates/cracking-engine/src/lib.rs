//! Cracking engine crate.
//!
//! Indexed triangle geometry with per-object recoloring, plus the window,
//! GPU and shader plumbing needed to draw it.

pub mod core;
pub mod device;
pub mod window;

pub mod logging;
pub mod mesh;
pub mod render;
