use anyhow::Result;
use glstart_engine::core::{App, AppControl, FrameCtx};
use glstart_engine::render::{Mesh, ShaderProgram};

use crate::geometry::{position_layout, TRIANGLE_VERTICES};
use crate::shaders::{ORANGE_FRAG, POSITION_VERT};
use crate::CLEAR_COLOR;

/// Orange triangle drawn with `glDrawArrays`.
#[derive(Default)]
pub struct TriangleScene {
    mesh: Option<Mesh>,
    program: Option<ShaderProgram>,
}

impl TriangleScene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for TriangleScene {
    fn on_init(&mut self, gl: &glow::Context) -> Result<()> {
        self.mesh = Some(Mesh::new(gl, &TRIANGLE_VERTICES, &position_layout(), None)?);
        self.program = Some(ShaderProgram::from_sources(gl, POSITION_VERT, ORANGE_FRAG)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let (mesh, program) = (&self.mesh, &self.program);
        ctx.render(CLEAR_COLOR, |gl| {
            if let (Some(mesh), Some(program)) = (mesh, program) {
                program.use_program(gl);
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
