//! Contract between the runtime loop and the application.
//!
//! The runtime owns the window and GPU; the application only sees the
//! callbacks in [`App`] and the per-frame [`FrameCtx`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
