//! Frame loop module
//!
//! All per-frame behavior lives here. This module must stay pure and
//! single-threaded:
//! - One `tick` per tracking-service frame event
//! - Fixed per-frame steps, no wall-clock time
//! - Cursor update strictly before animation
//! - No rendering or platform dependencies

pub mod animation;
pub mod cursor;
pub mod tick;

pub use animation::{AnimationState, Direction, animate, spin};
pub use cursor::{CursorUpdate, update_cursor};
pub use tick::{FrameState, TickInput, tick};
