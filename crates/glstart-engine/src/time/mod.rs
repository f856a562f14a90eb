//! Time subsystem.
//!
//! Frame timing utilities, decoupled from the runtime:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FpsReport, FrameClock, FrameTime};
