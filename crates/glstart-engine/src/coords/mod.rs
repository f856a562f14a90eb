//! Coordinate types shared by the runtime and the programs.
//!
//! GL convention:
//! - normalized device coordinates span `[-1, 1]` on both axes
//! - window coordinates are physical pixels, origin bottom-left

mod viewport;

pub use viewport::Viewport;
