//! Thin helpers over GL objects.
//!
//! Each type owns exactly one GL object (or a VAO with its buffers) and
//! exposes the calls the programs make on it. Nothing here is shared or
//! reference counted: objects are created after the context is current and
//! deleted explicitly before it goes away.

mod buffer;
mod layout;
mod mesh;
pub mod shader;
mod texture;

pub use buffer::{Buffer, BufferTarget, BufferUsage, VertexArray};
pub use layout::{VertexAttribute, VertexLayout};
pub use mesh::{Mesh, PolygonMode};
pub use shader::{ShaderError, ShaderProgram, ShaderStage};
pub use texture::{
    FilterMode, PixelFormat, Texture2d, TextureImage, TextureParams, WrapMode, MIN_TEXTURE_UNITS,
};
