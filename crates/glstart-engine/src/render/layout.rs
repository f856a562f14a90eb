use glow::HasContext;

const FLOAT_SIZE: i32 = std::mem::size_of::<f32>() as i32;

/// One float vector attribute, read from `layout (location = N)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    /// Number of floats (1..=4), e.g. 3 for a `vec3`.
    pub components: i32,
}

/// Interleaved layout of float attributes in one vertex buffer.
///
/// Attributes are packed in declaration order with no padding, so the stride
/// is the sum of all component counts.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attribute.
    pub fn with(mut self, location: u32, components: i32) -> Self {
        debug_assert!((1..=4).contains(&components), "attribute must have 1..=4 components");
        self.attributes.push(VertexAttribute { location, components });
        self
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn floats_per_vertex(&self) -> usize {
        self.attributes.iter().map(|a| a.components as usize).sum()
    }

    /// Bytes between consecutive vertices.
    pub fn stride(&self) -> i32 {
        self.floats_per_vertex() as i32 * FLOAT_SIZE
    }

    /// Byte offset of each attribute within a vertex.
    pub fn offsets(&self) -> Vec<i32> {
        self.attributes
            .iter()
            .scan(0, |offset, a| {
                let current = *offset;
                *offset += a.components * FLOAT_SIZE;
                Some(current)
            })
            .collect()
    }

    /// Number of whole vertices in `float_count` floats.
    ///
    /// `None` for empty layouts or when the data does not divide evenly.
    pub fn vertex_count(&self, float_count: usize) -> Option<usize> {
        let per_vertex = self.floats_per_vertex();
        if per_vertex == 0 || float_count % per_vertex != 0 {
            return None;
        }
        Some(float_count / per_vertex)
    }

    /// Configures and enables every attribute for the bound vertex array,
    /// sourcing from the buffer bound to `ARRAY_BUFFER`.
    pub fn apply(&self, gl: &glow::Context) {
        let stride = self.stride();
        for (attr, offset) in self.attributes.iter().zip(self.offsets()) {
            unsafe {
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    stride,
                    offset,
                );
                gl.enable_vertex_attrib_array(attr.location);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured() -> VertexLayout {
        // position, color, texture coords
        VertexLayout::new().with(0, 3).with(1, 3).with(2, 2)
    }

    #[test]
    fn position_only_layout() {
        let layout = VertexLayout::new().with(0, 3);
        assert_eq!(layout.stride(), 12);
        assert_eq!(layout.offsets(), vec![0]);
    }

    #[test]
    fn interleaved_offsets_accumulate() {
        let layout = textured();
        assert_eq!(layout.floats_per_vertex(), 8);
        assert_eq!(layout.stride(), 32);
        assert_eq!(layout.offsets(), vec![0, 12, 24]);
    }

    #[test]
    fn vertex_count_requires_whole_vertices() {
        let layout = textured();
        assert_eq!(layout.vertex_count(32), Some(4));
        assert_eq!(layout.vertex_count(0), Some(0));
        assert_eq!(layout.vertex_count(31), None);
    }

    #[test]
    fn empty_layout_has_no_vertices() {
        assert_eq!(VertexLayout::new().vertex_count(9), None);
        assert_eq!(VertexLayout::new().stride(), 0);
    }
}
