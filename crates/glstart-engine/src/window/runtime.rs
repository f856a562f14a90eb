use std::time::Duration;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{GlDevice, GlInit};
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,

    /// Close the window while Escape is held.
    pub close_on_escape: bool,

    /// Log the average frame rate at debug level every interval.
    pub fps_log_interval: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glstart".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            close_on_escape: true,
            fps_log_interval: Some(Duration::from_secs(5)),
        }
    }
}

/// Runtime context passed to the application.
///
/// Holds the window's should-close flag; the loop checks it once per
/// iteration.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    close_requested: bool,
}

impl RuntimeCtx {
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, creates the context, runs `app` until the window
    /// should close, then tears everything down.
    ///
    /// Returns an error if the window, the context or `App::on_init` fails.
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    // Declared before `window`: the surface must go before the native window.
    device: GlDevice,
    window: Window,

    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gl_init: GlInit,
    app: A,

    entry: Option<WindowEntry>,
    runtime: RuntimeCtx,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gl_init: GlInit, app: A) -> Self {
        Self {
            config,
            gl_init,
            app,
            entry: None,
            runtime: RuntimeCtx::default(),
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        log::info!("window created: {:?}", window.inner_size());

        let device = GlDevice::new(&window, self.gl_init.clone())
            .context("failed to initialize OpenGL")?;

        self.app
            .on_init(device.gl())
            .context("failed to set up GL resources")?;

        window.request_redraw();
        self.entry = Some(WindowEntry {
            device,
            window,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
        });
        Ok(())
    }

    /// Releases app resources while the context is current, then drops the
    /// context and the window.
    fn release(&mut self) {
        if let Some(entry) = self.entry.take() {
            self.app.on_exit(entry.device.gl());
            drop(entry);
            log::info!("GL context and window released");
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.release();
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if wants_close(self.config.close_on_escape, &entry.input_state) {
            self.runtime.request_close();
            return;
        }

        let time = entry.clock.tick();
        let control = {
            let mut ctx = FrameCtx {
                window: WindowCtx { window: &entry.window },
                device: &entry.device,
                input: &entry.input_state,
                input_frame: &entry.input_frame,
                time,
                runtime: &mut self.runtime,
            };
            self.app.on_frame(&mut ctx)
        };

        entry.input_frame.clear();

        if let Some(interval) = self.config.fps_log_interval {
            if let Some(report) = entry.clock.fps_report(interval) {
                log::debug!("{} frames, {:.1} fps", report.frames, report.fps());
            }
        }

        if control == AppControl::Exit {
            self.runtime.request_close();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.failure.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("{e:#}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.runtime.should_close() {
            self.shutdown(event_loop);
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: one frame per loop iteration.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_input_event(&event) {
            entry.input_state.apply_event(&mut entry.input_frame, ev);
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.runtime.request_close();
        }

        match &event {
            WindowEvent::CloseRequested => self.runtime.request_close(),

            WindowEvent::Resized(new_size) => {
                entry.device.resize(*new_size);
                entry.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.window.inner_size();
                entry.device.resize(new_size);
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.runtime.should_close() {
            self.shutdown(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.release();
    }
}

/// Per-frame input policy: Escape held closes the window.
fn wants_close(close_on_escape: bool, input: &InputState) -> bool {
    close_on_escape && input.key_down(Key::Escape)
}

fn translate_input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,
            KeyCode::Tab => Key::Tab,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_tutorial_window() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, LogicalSize::new(800.0, 600.0));
        assert!(cfg.close_on_escape);
    }

    #[test]
    fn should_close_latches() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.should_close());
        ctx.request_close();
        ctx.request_close();
        assert!(ctx.should_close());
    }

    #[test]
    fn escape_held_closes_only_when_enabled() {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        assert!(!wants_close(true, &input));

        input.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, repeat: false },
        );
        assert!(wants_close(true, &input));
        assert!(!wants_close(false, &input));
    }

    #[test]
    fn maps_polled_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), Key::W);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::F5)), Key::Unknown(_)));
    }
}
