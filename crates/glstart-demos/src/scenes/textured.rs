use anyhow::{Context, Result};
use glstart_engine::assets::AssetRoot;
use glstart_engine::core::{App, AppControl, FrameCtx};
use glstart_engine::render::{Mesh, ShaderProgram, Texture2d, TextureParams, MIN_TEXTURE_UNITS};

use crate::geometry::{textured_layout, QUAD_INDICES, TEXTURED_QUAD_VERTICES};
use crate::shaders::{TEXTURES_MIX_FRAG_PATH, TEXTURE_FRAG_PATH, TEXTURE_VERT_PATH};
use crate::CLEAR_COLOR;

pub const CONTAINER_TEXTURE: &str = "assets/textures/container.png";
pub const FACE_TEXTURE: &str = "assets/textures/awesomeface.png";

/// One texture bound to a sampler. Slot `i` uses texture unit `i`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureSlot {
    pub path: &'static str,
    pub sampler: &'static str,
    pub flip_vertically: bool,
}

/// Quad sampling one or more textures.
pub struct TexturedQuadScene {
    assets: AssetRoot,
    fragment_path: &'static str,
    slots: Vec<TextureSlot>,

    mesh: Option<Mesh>,
    program: Option<ShaderProgram>,
    textures: Vec<Texture2d>,
}

impl TexturedQuadScene {
    pub fn new(assets: AssetRoot, fragment_path: &'static str, slots: Vec<TextureSlot>) -> Self {
        Self {
            assets,
            fragment_path,
            slots,
            mesh: None,
            program: None,
            textures: Vec::new(),
        }
    }

    /// Container texture tinted by the vertex colors.
    pub fn single(assets: AssetRoot) -> Self {
        Self::new(
            assets,
            TEXTURE_FRAG_PATH,
            vec![TextureSlot {
                path: CONTAINER_TEXTURE,
                sampler: "texture1",
                flip_vertically: false,
            }],
        )
    }

    /// Container mixed with the face. The face PNG is stored top row first
    /// and is flipped on load.
    pub fn mixed(assets: AssetRoot) -> Self {
        Self::new(
            assets,
            TEXTURES_MIX_FRAG_PATH,
            vec![
                TextureSlot {
                    path: CONTAINER_TEXTURE,
                    sampler: "texture1",
                    flip_vertically: false,
                },
                TextureSlot {
                    path: FACE_TEXTURE,
                    sampler: "texture2",
                    flip_vertically: true,
                },
            ],
        )
    }

    pub fn slots(&self) -> &[TextureSlot] {
        &self.slots
    }
}

impl App for TexturedQuadScene {
    fn on_init(&mut self, gl: &glow::Context) -> Result<()> {
        anyhow::ensure!(
            self.slots.len() <= MIN_TEXTURE_UNITS as usize,
            "{} textures exceed the {MIN_TEXTURE_UNITS} guaranteed texture units",
            self.slots.len()
        );

        let program = ShaderProgram::from_files(
            gl,
            self.assets.path(TEXTURE_VERT_PATH),
            self.assets.path(self.fragment_path),
        )
        .context("failed to load textured quad shaders")?;

        self.mesh = Some(Mesh::new(
            gl,
            &TEXTURED_QUAD_VERTICES,
            &textured_layout(),
            Some(&QUAD_INDICES),
        )?);

        for slot in &self.slots {
            let texture = Texture2d::from_file(
                gl,
                self.assets.path(slot.path),
                TextureParams::default(),
                slot.flip_vertically,
            )?;
            self.textures.push(texture);
        }

        // Sampler-to-unit assignment only has to happen once, with the
        // program in use.
        program.use_program(gl);
        for (unit, slot) in self.slots.iter().enumerate() {
            program.set_int(gl, slot.sampler, unit as i32);
        }

        self.program = Some(program);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let (mesh, program, textures) = (&self.mesh, &self.program, &self.textures);
        ctx.render(CLEAR_COLOR, |gl| {
            for (unit, texture) in textures.iter().enumerate() {
                texture.bind_to_unit(gl, unit as u32);
            }
            if let (Some(mesh), Some(program)) = (mesh, program) {
                program.use_program(gl);
                mesh.draw(gl);
            }
        })
    }

    fn on_exit(&mut self, gl: &glow::Context) {
        for texture in self.textures.drain(..) {
            texture.delete(gl);
        }
        if let Some(mesh) = self.mesh.take() {
            mesh.delete(gl);
        }
        if let Some(program) = self.program.take() {
            program.delete(gl);
        }
    }
}
