//! Embedded GLSL for the untextured programs.
//!
//! The textured programs read theirs from `shaders/` at startup.

pub const POSITION_VERT: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;

void main()
{
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

pub const ORANGE_FRAG: &str = r#"#version 330 core
out vec4 FragColor;

void main()
{
    FragColor = vec4(1.0f, 0.5f, 0.2f, 1.0f);
}
"#;

/// Shader files for the textured quads, relative to the asset root.
pub const TEXTURE_VERT_PATH: &str = "shaders/texture.vert";
pub const TEXTURE_FRAG_PATH: &str = "shaders/texture.frag";
pub const TEXTURES_MIX_FRAG_PATH: &str = "shaders/textures_mix.frag";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sources_target_glsl_330_core() {
        for src in [POSITION_VERT, ORANGE_FRAG] {
            assert!(src.starts_with("#version 330 core\n"));
        }
    }

    #[test]
    fn vertex_shader_reads_location_zero() {
        assert!(POSITION_VERT.contains("layout (location = 0) in vec3 aPos;"));
    }
}
