use std::ffi::{c_void, CStr};

use anyhow::{Context as _, Result};
use glow::HasContext;
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Viewport;

use super::{GlInit, SwapErrorAction};
use super::surface;

/// Owns the GL context, its window surface and the loaded function pointers.
///
/// The window must outlive the device; the runtime stores the device next to
/// the window and drops it first.
pub struct GlDevice {
    /// Loaded GL entry points.
    gl: glow::Context,

    /// Window surface (default framebuffer).
    surface: Surface<WindowSurface>,

    /// Context, current on the runtime thread.
    context: PossiblyCurrentContext,

    /// Current framebuffer size in physical pixels.
    size: PhysicalSize<u32>,
}

impl GlDevice {
    /// Creates a context for `window`, makes it current and loads GL.
    pub fn new(window: &Window, init: GlInit) -> Result<Self> {
        let size = window.inner_size();
        let (width, height) =
            surface::non_zero_size(size).context("window has zero size")?;

        let raw_window_handle = window
            .window_handle()
            .context("window handle unavailable")?
            .as_raw();
        let display = create_display(window, raw_window_handle)?;

        let config = choose_config(&display, raw_window_handle, &init)?;
        log::debug!(
            "GL config: {} samples, srgb {}",
            config.num_samples(),
            config.srgb_capable()
        );

        let surface_attributes =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);
        let surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
            .context("failed to create window surface")?;

        let (major, minor) = init.version;
        let profile = if init.core_profile { GlProfile::Core } else { GlProfile::Compatibility };
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(profile)
            .with_debug(init.debug)
            .build(Some(raw_window_handle));

        let context = unsafe { display.create_context(&config, &context_attributes) }
            .with_context(|| format!("failed to create OpenGL {major}.{minor} context"))?
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        if let Err(e) = surface.set_swap_interval(&context, surface::swap_interval(init.vsync)) {
            log::warn!("failed to set swap interval (vsync {}): {e}", init.vsync);
        }

        check_required_procs(|name| display.get_proc_address(name))?;
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name: &CStr| display.get_proc_address(name))
        };
        log_driver_info(&gl);

        let device = Self {
            gl,
            surface,
            context,
            size,
        };
        device.apply_viewport();

        Ok(device)
    }

    /// Loaded GL entry points.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Returns the current framebuffer size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn viewport(&self) -> Viewport {
        self.size.into()
    }

    /// Resizes the surface and resets the viewport to the whole framebuffer.
    ///
    /// Zero-sized framebuffers (minimized windows) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some((width, height)) = surface::non_zero_size(new_size) else {
            log::debug!("ignoring resize to {}x{}", new_size.width, new_size.height);
            return;
        };

        self.size = new_size;
        self.surface.resize(&self.context, width, height);
        self.apply_viewport();
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> glutin::error::Result<()> {
        self.surface.swap_buffers(&self.context)
    }

    /// Converts a swap error into a higher-level action.
    pub fn handle_swap_error(&self, err: &glutin::error::Error) -> SwapErrorAction {
        let action = surface::map_swap_error(err.error_kind());
        match action {
            SwapErrorAction::Fatal => log::error!("buffer swap failed: {err}"),
            SwapErrorAction::SkipFrame => log::warn!("buffer swap failed, skipping frame: {err}"),
        }
        action
    }

    fn apply_viewport(&self) {
        let (x, y, w, h) = self.viewport().gl_args();
        unsafe { self.gl.viewport(x, y, w, h) };
    }
}

/// Entry points glow calls while loading; a null pointer here panics inside glow.
const REQUIRED_PROCS: [&CStr; 2] = [c"glGetString", c"glViewport"];

/// Fails if any of `REQUIRED_PROCS` does not resolve through `load`.
fn check_required_procs<F>(mut load: F) -> Result<()>
where
    F: FnMut(&CStr) -> *const c_void,
{
    for name in REQUIRED_PROCS {
        if load(name).is_null() {
            anyhow::bail!(
                "failed to load OpenGL function pointers ({} unresolved)",
                name.to_string_lossy()
            );
        }
    }
    Ok(())
}

fn create_display(window: &Window, raw_window_handle: RawWindowHandle) -> Result<Display> {
    let raw_display_handle = window
        .display_handle()
        .context("display handle unavailable")?
        .as_raw();

    #[cfg(target_os = "windows")]
    let preference = {
        log::debug!("using WGL for the OpenGL context");
        DisplayApiPreference::Wgl(Some(raw_window_handle))
    };

    #[cfg(target_os = "macos")]
    let preference = {
        let _ = raw_window_handle;
        log::debug!("using CGL for the OpenGL context");
        DisplayApiPreference::Cgl
    };

    #[cfg(all(unix, not(target_os = "macos")))]
    let preference = {
        let _ = raw_window_handle;
        log::debug!("using EGL for the OpenGL context");
        DisplayApiPreference::Egl
    };

    unsafe { Display::new(raw_display_handle, preference) }.context("failed to open GL display")
}

fn choose_config(
    display: &Display,
    raw_window_handle: RawWindowHandle,
    init: &GlInit,
) -> Result<Config> {
    let mut template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .compatible_with_native_window(raw_window_handle);
    if let Some(samples) = init.multisample {
        template = template.with_multisampling(samples);
    }

    // Prefer the config with the most samples up to the requested count.
    let wanted = init.multisample.unwrap_or(0);
    unsafe { display.find_configs(template.build()) }
        .context("failed to query GL configs")?
        .reduce(|best, config| {
            let better = config.num_samples() <= wanted && config.num_samples() > best.num_samples();
            if better { config } else { best }
        })
        .context("no suitable GL config")
}

fn log_driver_info(gl: &glow::Context) {
    fn norm(value: String) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            "<unknown>".to_string()
        } else {
            trimmed.to_string()
        }
    }

    let (vendor, renderer, version, glsl) = unsafe {
        (
            norm(gl.get_parameter_string(glow::VENDOR)),
            norm(gl.get_parameter_string(glow::RENDERER)),
            norm(gl.get_parameter_string(glow::VERSION)),
            norm(gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION)),
        )
    };
    log::info!("OpenGL driver: {renderer} [{vendor}], {version}, GLSL {glsl}");
}
