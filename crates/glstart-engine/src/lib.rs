//! glstart engine crate.
//!
//! This crate owns the platform + GL runtime pieces used by the tutorial
//! programs: window and event loop, context creation, function-pointer loading,
//! input polling, and thin helpers over GL objects.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod assets;
pub mod coords;
pub mod paint;
pub mod render;
