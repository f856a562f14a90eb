use anyhow::Result;
use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Program contract driven by `window::Runtime`.
///
/// Call order: `on_init` once the context is current, then `on_frame` once per
/// redraw until the window should close, then `on_exit` with the context
/// still current.
pub trait App {
    /// Creates GL objects (buffers, vertex arrays, shaders, textures).
    ///
    /// An error aborts startup and `Runtime::run` returns it.
    fn on_init(&mut self, gl: &glow::Context) -> Result<()>;

    /// Called for window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Deletes GL objects before the context goes away.
    fn on_exit(&mut self, gl: &glow::Context) {
        let _ = gl;
    }
}
