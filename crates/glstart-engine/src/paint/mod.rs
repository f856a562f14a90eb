//! Color values handed to GL.

pub mod color;

pub use color::Color;
