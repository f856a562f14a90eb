use anyhow::Result;
use glstart_engine::core::{App, AppControl, FrameCtx};
use glstart_engine::render::{Mesh, PolygonMode, ShaderProgram};

use crate::geometry::{position_layout, QUAD_INDICES, QUAD_VERTICES};
use crate::shaders::{ORANGE_FRAG, POSITION_VERT};
use crate::CLEAR_COLOR;

/// Quad from four vertices and an element buffer.
pub struct QuadScene {
    polygon_mode: PolygonMode,
    mesh: Option<Mesh>,
    program: Option<ShaderProgram>,
}

impl QuadScene {
    /// Wireframe quad.
    pub fn new() -> Self {
        Self::with_polygon_mode(PolygonMode::Line)
    }

    pub fn with_polygon_mode(polygon_mode: PolygonMode) -> Self {
        Self {
            polygon_mode,
            mesh: None,
            program: None,
        }
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }
}

impl Default for QuadScene {
    fn default() -> Self {
        Self::new()
    }
}

impl App for QuadScene {
    fn on_init(&mut self, gl: &glow::Context) -> Result<()> {
        self.mesh = Some(Mesh::new(gl, &QUAD_VERTICES, &position_layout(), Some(&QUAD_INDICES))?);
        self.program = Some(ShaderProgram::from_sources(gl, POSITION_VERT, ORANGE_FRAG)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let (mesh, program, mode) = (&self.mesh, &self.program, self.polygon_mode);
        ctx.render(CLEAR_COLOR, |gl| {
            if let (Some(mesh), Some(program)) = (mesh, program) {
                program.use_program(gl);
                mode.apply(gl);
                mesh.draw(gl);
            }
        })
    }

    fn on_exit(&mut self, gl: &glow::Context) {
        if let Some(mesh) = self.mesh.take() {
            mesh.delete(gl);
        }
        if let Some(program) = self.program.take() {
            program.delete(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quad_is_wireframe() {
        assert_eq!(QuadScene::default().polygon_mode(), PolygonMode::Line);
    }
}
