//! Seeded stand-in for the platform tracking service
//!
//! The viewer stands at eye height, pitched toward the floor, and slowly turns
//! in place. Floor patches and walls are scattered around it and become
//! visible one by one as they are "discovered", so raycasts come and go the
//! way they do on a real device.

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{AlignmentFilter, DetectedPlane, Ray, SurfaceHit, SurfaceTracker, Transform, nearest_hit};
use crate::error::StartupError;

/// Camera height above the floor (meters)
pub const EYE_HEIGHT: f32 = 1.4;
/// Downward camera pitch (radians)
pub const VIEW_PITCH: f32 = -0.6;
/// Viewer yaw change per frame (radians)
pub const YAW_PER_FRAME: f32 = 0.01;
/// Frames between successive plane discoveries
pub const DISCOVERY_INTERVAL: u32 = 45;

/// Simulated tracking session
#[derive(Debug, Clone)]
pub struct SimulatedTracker {
    viewer: Transform,
    planes: Vec<DetectedPlane>,
    /// Frame at which each plane (same index) becomes visible
    discovered_at: Vec<u32>,
    frame: u32,
}

impl SimulatedTracker {
    /// Start a session with `plane_count` planes laid out from `seed`
    pub fn start(seed: u64, plane_count: u32) -> Result<Self, StartupError> {
        if plane_count == 0 {
            return Err(StartupError::TrackingUnavailable(
                "no surfaces to track (plane_count = 0)".into(),
            ));
        }

        let mut rng = Pcg32::seed_from_u64(seed);
        let floor_distance = EYE_HEIGHT / (-VIEW_PITCH).tan();

        let mut planes = Vec::with_capacity(plane_count as usize);
        let mut discovered_at = Vec::with_capacity(plane_count as usize);
        for i in 0..plane_count {
            let yaw: f32 = rng.random_range(0.0..TAU);
            let facing = Quat::from_rotation_y(yaw) * Vec3::NEG_Z;

            let plane = if i % 2 == 0 {
                // Floor patch centered where the view ray meets the floor
                let half = Vec2::new(rng.random_range(0.3..0.8), rng.random_range(0.3..0.8));
                DetectedPlane::horizontal(i + 1, facing * floor_distance, yaw, half)
            } else {
                // Wall facing the viewer, close enough for the pitched ray to reach
                let distance: f32 = rng.random_range(1.0..1.8);
                let half = Vec2::new(rng.random_range(0.4..1.0), 1.0);
                let center = facing * distance + Vec3::Y;
                DetectedPlane::vertical(i + 1, center, yaw, half)
            };

            planes.push(plane);
            discovered_at.push(i * DISCOVERY_INTERVAL + rng.random_range(0..DISCOVERY_INTERVAL));
        }

        log::info!(
            "Simulated tracking started: {} planes, seed {}",
            planes.len(),
            seed
        );

        let mut tracker = Self {
            viewer: Transform::IDENTITY,
            planes,
            discovered_at,
            frame: 0,
        };
        tracker.advance(0);
        Ok(tracker)
    }

    /// Move the session to `frame`: turn the viewer and reveal planes
    pub fn advance(&mut self, frame: u32) {
        let newly_found = self
            .discovered_at
            .iter()
            .filter(|&&at| at > self.frame && at <= frame)
            .count();
        if newly_found > 0 {
            log::debug!("Frame {}: {} new plane(s) detected", frame, newly_found);
        }

        self.frame = frame;
        let yaw = frame as f32 * YAW_PER_FRAME;
        self.viewer = Transform::from_translation_rotation(
            Vec3::new(0.0, EYE_HEIGHT, 0.0),
            Quat::from_rotation_y(yaw) * Quat::from_rotation_x(VIEW_PITCH),
        );
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Planes visible at the current frame
    pub fn detected_planes(&self) -> impl Iterator<Item = &DetectedPlane> {
        self.planes
            .iter()
            .zip(&self.discovered_at)
            .filter(move |&(_, &at)| at <= self.frame)
            .map(|(plane, _)| plane)
    }
}

impl SurfaceTracker for SimulatedTracker {
    fn viewer_pose(&self) -> Transform {
        self.viewer
    }

    fn raycast(&self, ray: &Ray, filter: AlignmentFilter) -> Option<SurfaceHit> {
        nearest_hit(self.detected_planes(), ray, filter)
    }
}
