//! The glstart tutorial programs.
//!
//! Each binary under `src/bin` opens an 800x600 window and renders one scene:
//! - `triangle`: three vertices, `glDrawArrays`
//! - `quad`: four vertices + element buffer, wireframe
//! - `texture`: textured, vertex-colored quad
//! - `textures`: quad mixing two textures on units 0 and 1

use std::process::ExitCode;

use glstart_engine::assets::AssetRoot;
use glstart_engine::core::App;
use glstart_engine::device::GlInit;
use glstart_engine::logging::{init_logging, LoggingConfig};
use glstart_engine::paint::Color;
use glstart_engine::window::{Runtime, RuntimeConfig};

pub mod geometry;
pub mod scenes;
pub mod shaders;

/// Background every program clears to.
pub const CLEAR_COLOR: Color = Color::rgb(0.2, 0.3, 0.3);

/// Environment variable overriding where `shaders/` and `assets/` live.
pub const ASSET_DIR_ENV: &str = "GLSTART_ASSETS";

/// Window config for a program with the given title.
pub fn window_config(title: &str) -> RuntimeConfig {
    RuntimeConfig {
        title: title.to_string(),
        ..RuntimeConfig::default()
    }
}

/// Asset lookup: `$GLSTART_ASSETS`, then the working directory, then this
/// crate's directory.
pub fn asset_root() -> AssetRoot {
    AssetRoot::new()
        .with_env(ASSET_DIR_ENV)
        .with_working_dir()
        .with_dir(env!("CARGO_MANIFEST_DIR"))
}

/// Initializes logging, runs `app` and maps startup failures to a nonzero
/// exit status.
pub fn run<A>(config: RuntimeConfig, app: A) -> ExitCode
where
    A: App + 'static,
{
    init_logging(LoggingConfig::default());
    log::info!("starting `{}`", config.title);

    match Runtime::run(config, GlInit::default(), app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_color_is_opaque_teal() {
        assert_eq!(CLEAR_COLOR.to_array(), [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn window_config_keeps_tutorial_size() {
        let cfg = window_config("LearnOpenGL");
        assert_eq!(cfg.title, "LearnOpenGL");
        assert_eq!(cfg.initial_size, winit::dpi::LogicalSize::new(800.0, 600.0));
    }

    #[test]
    fn asset_root_finds_bundled_shaders() {
        let path = asset_root().resolve("shaders/texture.vert");
        assert!(path.is_some_and(|p| p.is_file()));
    }
}
