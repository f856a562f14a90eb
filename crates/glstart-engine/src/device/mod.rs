//! GL context + surface management.
//!
//! This module is responsible for:
//! - picking the platform display API and a framebuffer config
//! - creating the window surface and an OpenGL context, making it current
//! - loading GL function pointers
//! - keeping the viewport in sync with the framebuffer and presenting frames

mod context;
mod error;
mod init;
mod surface;

pub use context::GlDevice;
pub use error::SwapErrorAction;
pub use init::GlInit;
