//! One scene per program.

mod quad;
mod textured;
mod triangle;

pub use quad::QuadScene;
pub use textured::{TextureSlot, TexturedQuadScene};
pub use triangle::TriangleScene;
