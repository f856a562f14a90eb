use anyhow::{Context, Result};
use glow::HasContext;

use super::buffer::{Buffer, BufferTarget, BufferUsage, VertexArray};
use super::layout::VertexLayout;

/// Rasterization mode for polygons (`glPolygonMode`, front and back).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PolygonMode {
    #[default]
    Fill,
    /// Wireframe.
    Line,
    Point,
}

impl PolygonMode {
    pub fn gl_enum(self) -> u32 {
        match self {
            PolygonMode::Fill => glow::FILL,
            PolygonMode::Line => glow::LINE,
            PolygonMode::Point => glow::POINT,
        }
    }

    pub fn apply(self, gl: &glow::Context) {
        unsafe { gl.polygon_mode(glow::FRONT_AND_BACK, self.gl_enum()) };
    }
}

/// Static triangle geometry: a VAO with its vertex buffer and optional
/// element buffer.
#[derive(Debug)]
pub struct Mesh {
    vao: VertexArray,
    vbo: Buffer,
    ebo: Option<Buffer>,
    vertex_count: usize,
    index_count: usize,
    draw_count: i32,
}

impl Mesh {
    /// Uploads `vertices` (interleaved per `layout`) and optional `indices`.
    ///
    /// The element buffer stays bound inside the VAO; the array buffer and the
    /// VAO are unbound on return.
    pub fn new(
        gl: &glow::Context,
        vertices: &[f32],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        let vertex_count = layout.vertex_count(vertices.len()).with_context(|| {
            format!(
                "{} floats is not a whole number of {}-float vertices",
                vertices.len(),
                layout.floats_per_vertex()
            )
        })?;
        if let Some(indices) = indices {
            check_indices(indices, vertex_count)?;
        }
        let index_count = indices.map_or(0, <[u32]>::len);
        let draw_count = draw_count(vertex_count, indices.map(<[u32]>::len))?;

        let vao = VertexArray::new(gl)?;
        vao.bind(gl);

        let vbo = Buffer::with_data(gl, BufferTarget::Array, vertices, BufferUsage::Static)
            .context("failed to upload vertex data")?;
        let ebo = indices
            .map(|i| Buffer::with_data(gl, BufferTarget::ElementArray, i, BufferUsage::Static))
            .transpose()
            .context("failed to upload index data")?;

        layout.apply(gl);

        // The attribute pointers captured the VBO; it may be unbound now.
        // The EBO binding belongs to the VAO and must stay.
        unsafe { gl.bind_buffer(glow::ARRAY_BUFFER, None) };
        VertexArray::unbind(gl);

        log::debug!(
            "mesh uploaded: {vertex_count} vertices, {index_count} indices, stride {} bytes",
            layout.stride()
        );

        Ok(Self {
            vao,
            vbo,
            ebo,
            vertex_count,
            index_count,
            draw_count,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    /// Issues one triangle draw call.
    pub fn draw(&self, gl: &glow::Context) {
        self.vao.bind(gl);
        unsafe {
            if self.is_indexed() {
                gl.draw_elements(glow::TRIANGLES, self.draw_count, glow::UNSIGNED_INT, 0);
            } else {
                gl.draw_arrays(glow::TRIANGLES, 0, self.draw_count);
            }
        }
    }

    pub fn delete(self, gl: &glow::Context) {
        self.vao.delete(gl);
        self.vbo.delete(gl);
        if let Some(ebo) = self.ebo {
            ebo.delete(gl);
        }
    }
}

/// Element count for one draw call: the indices when present, else the vertices.
fn draw_count(vertex_count: usize, index_count: Option<usize>) -> Result<i32> {
    let count = index_count.unwrap_or(vertex_count);
    i32::try_from(count).with_context(|| format!("{count} elements do not fit one draw call"))
}

fn check_indices(indices: &[u32], vertex_count: usize) -> Result<()> {
    anyhow::ensure!(indices.len() % 3 == 0, "{} indices do not form whole triangles", indices.len());
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        anyhow::bail!("index {bad} out of range for {vertex_count} vertices");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_are_valid() {
        assert!(check_indices(&[0, 1, 3, 1, 2, 3], 4).is_ok());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = check_indices(&[0, 1, 4], 4).unwrap_err();
        assert!(err.to_string().contains("index 4"));
    }

    #[test]
    fn partial_triangle_is_rejected() {
        assert!(check_indices(&[0, 1], 4).is_err());
    }

    #[test]
    fn draw_count_prefers_indices() {
        assert_eq!(draw_count(4, Some(6)).unwrap(), 6);
        assert_eq!(draw_count(3, None).unwrap(), 3);
    }

    #[test]
    fn oversized_draw_count_is_rejected() {
        let too_many = i32::MAX as usize + 1;
        assert!(draw_count(too_many, None).is_err());
        assert!(draw_count(4, Some(too_many)).is_err());
    }

    #[test]
    fn polygon_modes_map_to_gl() {
        assert_eq!(PolygonMode::default(), PolygonMode::Fill);
        assert_eq!(PolygonMode::Line.gl_enum(), glow::LINE);
        assert_eq!(PolygonMode::Point.gl_enum(), glow::POINT);
    }
}
