use glow::HasContext;
use winit::window::Window;

use crate::coords::Viewport;
use crate::device::{GlDevice, SwapErrorAction};
use crate::input::{InputFrame, InputState};
use crate::paint::Color;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Window handle and metadata.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub device: &'a GlDevice,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a> FrameCtx<'a> {
    pub fn gl(&self) -> &glow::Context {
        self.device.gl()
    }

    pub fn viewport(&self) -> Viewport {
        self.device.viewport()
    }

    /// Clears the color buffer with `clear`, runs `draw`, then swaps buffers.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&glow::Context),
    {
        let gl = self.device.gl();
        unsafe {
            gl.clear_color(clear.r, clear.g, clear.b, clear.a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }

        draw(gl);

        self.window.window.pre_present_notify();
        match self.device.swap_buffers() {
            Ok(()) => AppControl::Continue,
            Err(err) => match self.device.handle_swap_error(&err) {
                SwapErrorAction::Fatal => AppControl::Exit,
                SwapErrorAction::SkipFrame => AppControl::Continue,
            },
        }
    }
}
