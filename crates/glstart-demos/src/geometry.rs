//! Hardcoded vertex data, in normalized device coordinates.

use glstart_engine::render::VertexLayout;

/// One triangle, `vec3` positions.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0,
     0.5, -0.5, 0.0,
     0.0,  0.5, 0.0,
];

/// Quad corners, `vec3` positions.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 12] = [
     0.5,  0.5, 0.0, // top right
     0.5, -0.5, 0.0, // bottom right
    -0.5, -0.5, 0.0, // bottom left
    -0.5,  0.5, 0.0, // top left
];

/// Two triangles sharing the quad's diagonal.
#[rustfmt::skip]
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

/// Quad corners with color and texture coordinates.
#[rustfmt::skip]
pub const TEXTURED_QUAD_VERTICES: [f32; 32] = [
    // positions       // colors        // texture coords
     0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0, // top right
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0, // bottom right
    -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0, // bottom left
    -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0, // top left
];

/// `layout (location = 0) in vec3 aPos`
pub fn position_layout() -> VertexLayout {
    VertexLayout::new().with(0, 3)
}

/// Position (0), color (1), texture coordinates (2).
pub fn textured_layout() -> VertexLayout {
    VertexLayout::new().with(0, 3).with(1, 3).with(2, 2)
}
