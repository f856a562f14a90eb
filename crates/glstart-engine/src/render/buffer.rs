use anyhow::{Context, Result};
use bytemuck::Pod;
use glow::HasContext;

/// Expected access pattern of a buffer's data store.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferUsage {
    /// Set once, used by the GPU at most a few times.
    Stream,
    /// Set once, used many times.
    Static,
    /// Changed a lot, used many times.
    Dynamic,
}

impl BufferUsage {
    pub fn gl_enum(self) -> u32 {
        match self {
            BufferUsage::Stream => glow::STREAM_DRAW,
            BufferUsage::Static => glow::STATIC_DRAW,
            BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        }
    }
}

/// Binding point of a buffer object.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    /// Vertex attributes (VBO).
    Array,
    /// Indices (EBO). The binding is recorded in the bound vertex array.
    ElementArray,
}

impl BufferTarget {
    pub fn gl_enum(self) -> u32 {
        match self {
            BufferTarget::Array => glow::ARRAY_BUFFER,
            BufferTarget::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A buffer object with an initialized data store.
#[derive(Debug)]
pub struct Buffer {
    raw: glow::Buffer,
    target: BufferTarget,
    size_bytes: usize,
}

impl Buffer {
    /// Creates a buffer, binds it to `target` and uploads `data`.
    ///
    /// The buffer stays bound on return.
    pub fn with_data<T: Pod>(
        gl: &glow::Context,
        target: BufferTarget,
        data: &[T],
        usage: BufferUsage,
    ) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let raw = unsafe { gl.create_buffer() }
            .map_err(anyhow::Error::msg)
            .context("failed to create buffer object")?;

        unsafe {
            gl.bind_buffer(target.gl_enum(), Some(raw));
            gl.buffer_data_u8_slice(target.gl_enum(), bytes, usage.gl_enum());
        }

        Ok(Self {
            raw,
            target,
            size_bytes: bytes.len(),
        })
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.bind_buffer(self.target.gl_enum(), Some(self.raw)) };
    }

    pub fn raw(&self) -> glow::Buffer {
        self.raw
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_buffer(self.raw) };
    }
}

/// A vertex array object (VAO): attribute layout plus the element buffer binding.
#[derive(Debug)]
pub struct VertexArray {
    raw: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let raw = unsafe { gl.create_vertex_array() }
            .map_err(anyhow::Error::msg)
            .context("failed to create vertex array object")?;
        Ok(Self { raw })
    }

    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.bind_vertex_array(Some(self.raw)) };
    }

    pub fn unbind(gl: &glow::Context) {
        unsafe { gl.bind_vertex_array(None) };
    }

    pub fn raw(&self) -> glow::VertexArray {
        self.raw
    }

    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_vertex_array(self.raw) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_hints_map_to_gl() {
        assert_eq!(BufferUsage::Stream.gl_enum(), glow::STREAM_DRAW);
        assert_eq!(BufferUsage::Static.gl_enum(), glow::STATIC_DRAW);
        assert_eq!(BufferUsage::Dynamic.gl_enum(), glow::DYNAMIC_DRAW);
    }

    #[test]
    fn targets_map_to_gl() {
        assert_eq!(BufferTarget::Array.gl_enum(), glow::ARRAY_BUFFER);
        assert_eq!(BufferTarget::ElementArray.gl_enum(), glow::ELEMENT_ARRAY_BUFFER);
    }
}
