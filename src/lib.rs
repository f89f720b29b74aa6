//! Anchor Spin - an animated scene pinned to tracked real-world surfaces
//!
//! Core modules:
//! - `tracking`: Rays, detected planes and the surface tracking service seam
//! - `scene`: The fixed cursor → box/sphere object graph
//! - `sim`: Per-frame cursor placement and animation (pure, single-threaded)
//! - `bridge`: Lock toggle and slider signals from the UI thread
//! - `settings`: Demo configuration loaded from JSON

pub mod bridge;
pub mod error;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tracking;

pub use bridge::UiBridge;
pub use error::StartupError;
pub use scene::Scene;
pub use settings::Settings;
pub use sim::{FrameState, TickInput, tick};
pub use tracking::{SurfaceTracker, Transform};

/// Scene and animation constants (meters, radians)
pub mod consts {
    /// Sphere travel per frame along its local z axis
    pub const SPHERE_STEP: f32 = 0.002;
    /// Turnaround threshold for the sphere oscillation (either side of zero)
    pub const SPHERE_BOUND: f32 = 0.1;
    /// Box yaw added every frame
    pub const BOX_SPIN_PER_FRAME: f32 = 0.04;
    /// Sphere scale = 1 + SCALE_GAIN * slider
    pub const SCALE_GAIN: f32 = 2.0;

    /// Box edge length
    pub const BOX_SIZE: f32 = 0.1;
    /// Sphere radius
    pub const SPHERE_RADIUS: f32 = 0.05;
    /// Height of the sphere's center above the cursor
    pub const SPHERE_HEIGHT: f32 = 0.2;
}

/// Uniform sphere scale for a slider value.
///
/// Not clamped: out-of-range sliders give out-of-range scales.
#[inline]
pub fn slider_to_scale(slider: f32) -> f32 {
    1.0 + consts::SCALE_GAIN * slider
}
