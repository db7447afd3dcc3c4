//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per frame and hand
//! `FrameTime::dt` to anything that moves.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
