/// Initialization parameters for the GL layer.
///
/// Defaults request what every program here targets: an OpenGL 3.3 core
/// profile context with vsync.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Requested context version as `(major, minor)`.
    pub version: (u8, u8),

    /// Request a core profile. Compatibility profile otherwise.
    ///
    /// macOS only provides 3.2+ through a forward-compatible core profile;
    /// glutin sets the forward-compatible bit there.
    pub core_profile: bool,

    /// Block buffer swaps on vertical sync.
    pub vsync: bool,

    /// Request a debug context.
    pub debug: bool,

    /// Minimum MSAA sample count for the framebuffer config.
    pub multisample: Option<u8>,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            version: (3, 3),
            core_profile: true,
            vsync: true,
            debug: false,
            multisample: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_gl33_core_with_vsync() {
        let init = GlInit::default();
        assert_eq!(init.version, (3, 3));
        assert!(init.core_profile);
        assert!(init.vsync);
        assert!(!init.debug);
    }
}
