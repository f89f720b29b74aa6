//! Surface tracking geometry and the tracking service seam
//!
//! The platform tracking service is external; the core only needs the
//! viewer pose and a nearest-hit raycast against detected planes. Planes are
//! bounded rectangles whose normal is their local +Y axis.

pub mod simulated;

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub use simulated::SimulatedTracker;

/// Rays closer than this to parallel with a plane never hit it
const PARALLEL_EPSILON: f32 = 1e-6;

/// Position, orientation and scale of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Column-major model matrix (scale, then rotate, then translate)
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Compose `self` (parent) with a child transform expressed in the parent's space.
    ///
    /// Exact when the parent's scale is uniform, which holds for every node in the scene.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * (self.scale * child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }

    /// Inverse transform (exact for uniform scale)
    pub fn inverse(&self) -> Transform {
        let rotation = self.rotation.inverse();
        let scale = self.scale.recip();
        Transform {
            translation: scale * (rotation * -self.translation),
            rotation,
            scale,
        }
    }

    /// Express this world transform in the space of `anchor`
    pub fn relative_to(&self, anchor: &Transform) -> Transform {
        anchor.inverse().mul_transform(self)
    }

    /// Map a point from local to parent space
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Camera-forward direction (local -Z)
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Local +Y in parent space
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

/// A half-line used for hit testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// The fixed "screen center" ray: from the viewer along its forward axis
    pub fn forward_from(viewer: &Transform) -> Self {
        Self::new(viewer.translation, viewer.forward())
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Orientation class of a detected plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneAlignment {
    /// Floors, tables (normal along world up)
    Horizontal,
    /// Walls (normal perpendicular to world up)
    Vertical,
}

/// Which plane alignments a raycast considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentFilter {
    Horizontal,
    Vertical,
    #[default]
    Any,
}

impl AlignmentFilter {
    pub fn accepts(&self, alignment: PlaneAlignment) -> bool {
        match self {
            AlignmentFilter::Any => true,
            AlignmentFilter::Horizontal => alignment == PlaneAlignment::Horizontal,
            AlignmentFilter::Vertical => alignment == PlaneAlignment::Vertical,
        }
    }
}

/// A bounded planar surface reported by the tracking service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedPlane {
    pub id: u32,
    /// Plane center and orientation; the normal is the local +Y axis
    pub center: Transform,
    /// Half size along the plane's local X and Z axes
    pub half_extents: Vec2,
    pub alignment: PlaneAlignment,
}

impl DetectedPlane {
    /// A floor-like plane at `center`, rotated `yaw` about world up
    pub fn horizontal(id: u32, center: Vec3, yaw: f32, half_extents: Vec2) -> Self {
        Self {
            id,
            center: Transform::from_translation_rotation(center, Quat::from_rotation_y(yaw)),
            half_extents,
            alignment: PlaneAlignment::Horizontal,
        }
    }

    /// A wall-like plane at `center` whose normal points along yaw-rotated +Z
    pub fn vertical(id: u32, center: Vec3, yaw: f32, half_extents: Vec2) -> Self {
        let rotation = Quat::from_rotation_y(yaw) * Quat::from_rotation_x(FRAC_PI_2);
        Self {
            id,
            center: Transform::from_translation_rotation(center, rotation),
            half_extents,
            alignment: PlaneAlignment::Vertical,
        }
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.center.up()
    }

    /// Distance along `ray` to the point where it crosses this plane's rectangle.
    ///
    /// Planes are two-sided. Crossings behind the ray origin and rays
    /// parallel to the plane miss.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let normal = self.normal();
        let denom = normal.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = normal.dot(self.center.translation - ray.origin) / denom;
        if t < 0.0 {
            return None;
        }

        let local = self.center.rotation.inverse() * (ray.at(t) - self.center.translation);
        let inside = local.x.abs() <= self.half_extents.x && local.z.abs() <= self.half_extents.y;
        inside.then_some(t)
    }

    /// Hit record for `ray`, oriented like the plane
    pub fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.intersect(ray).map(|distance| SurfaceHit {
            transform: Transform::from_translation_rotation(ray.at(distance), self.center.rotation),
            distance,
            alignment: self.alignment,
            plane_id: self.id,
        })
    }
}

/// Nearest intersection of a ray with a detected surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// World transform at the hit point, oriented like the surface
    pub transform: Transform,
    /// Distance from the ray origin
    pub distance: f32,
    pub alignment: PlaneAlignment,
    pub plane_id: u32,
}

/// The platform tracking service, as seen from the frame loop
pub trait SurfaceTracker {
    /// Current camera pose in world space
    fn viewer_pose(&self) -> Transform;

    /// Nearest surface hit along `ray` among planes accepted by `filter`
    fn raycast(&self, ray: &Ray, filter: AlignmentFilter) -> Option<SurfaceHit>;
}

/// Nearest accepted hit among `planes`; ties keep the earliest plane
pub fn nearest_hit<'a, I>(planes: I, ray: &Ray, filter: AlignmentFilter) -> Option<SurfaceHit>
where
    I: IntoIterator<Item = &'a DetectedPlane>,
{
    planes
        .into_iter()
        .filter(|plane| filter.accepts(plane.alignment))
        .filter_map(|plane| plane.hit(ray))
        .min_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// A fixed viewer and a fixed set of planes
#[derive(Debug, Clone, Default)]
pub struct PlaneSet {
    pub viewer: Transform,
    pub planes: Vec<DetectedPlane>,
}

impl PlaneSet {
    pub fn new(viewer: Transform) -> Self {
        Self {
            viewer,
            planes: Vec::new(),
        }
    }

    pub fn with_plane(mut self, plane: DetectedPlane) -> Self {
        self.planes.push(plane);
        self
    }
}

impl SurfaceTracker for PlaneSet {
    fn viewer_pose(&self) -> Transform {
        self.viewer
    }

    fn raycast(&self, ray: &Ray, filter: AlignmentFilter) -> Option<SurfaceHit> {
        nearest_hit(&self.planes, ray, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    /// Viewer at eye height looking straight down
    fn looking_down() -> Transform {
        Transform::from_translation_rotation(
            Vec3::new(0.0, 1.5, 0.0),
            Quat::from_rotation_x(-FRAC_PI_2),
        )
    }

    #[test]
    fn test_forward_ray_direction() {
        let ray = Ray::forward_from(&Transform::IDENTITY);
        assert!(approx(ray.direction, Vec3::NEG_Z));

        let ray = Ray::forward_from(&looking_down());
        assert!(approx(ray.direction, Vec3::NEG_Y));
        assert!(approx(ray.origin, Vec3::new(0.0, 1.5, 0.0)));
    }

    #[test]
    fn test_horizontal_plane_hit() {
        let floor = DetectedPlane::horizontal(1, Vec3::ZERO, 0.0, Vec2::splat(1.0));
        let ray = Ray::forward_from(&looking_down());

        let t = floor.intersect(&ray).expect("floor should be hit");
        assert!((t - 1.5).abs() < 1e-5);

        let hit = floor.hit(&ray).unwrap();
        assert!(approx(hit.transform.translation, Vec3::ZERO));
        assert_eq!(hit.alignment, PlaneAlignment::Horizontal);
        assert_eq!(hit.plane_id, 1);
    }

    #[test]
    fn test_plane_extent_is_bounded() {
        // Floor patch off to the side of the ray
        let floor = DetectedPlane::horizontal(1, Vec3::new(3.0, 0.0, 0.0), 0.0, Vec2::splat(0.5));
        assert!(floor.intersect(&Ray::forward_from(&looking_down())).is_none());
    }

    #[test]
    fn test_behind_and_parallel_miss() {
        let floor = DetectedPlane::horizontal(1, Vec3::ZERO, 0.0, Vec2::splat(10.0));

        // Looking up from above the floor: crossing is behind the origin
        let up = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert!(floor.intersect(&up).is_none());

        // Looking along the floor
        let flat = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(floor.intersect(&flat).is_none());
    }

    #[test]
    fn test_vertical_plane_hit() {
        // Wall two meters ahead, facing the viewer
        let wall = DetectedPlane::vertical(7, Vec3::new(0.0, 1.0, -2.0), 0.0, Vec2::splat(1.0));
        assert!(approx(wall.normal(), Vec3::Z));

        let viewer = Transform::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let hit = wall.hit(&Ray::forward_from(&viewer)).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!(approx(hit.transform.translation, Vec3::new(0.0, 1.0, -2.0)));
        assert!(approx(hit.transform.up(), Vec3::Z));
    }

    #[test]
    fn test_nearest_hit_and_filter() {
        let viewer = Transform::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let tracker = PlaneSet::new(viewer)
            .with_plane(DetectedPlane::vertical(1, Vec3::new(0.0, 1.0, -4.0), 0.0, Vec2::splat(2.0)))
            .with_plane(DetectedPlane::vertical(2, Vec3::new(0.0, 1.0, -1.0), 0.0, Vec2::splat(2.0)));

        let ray = Ray::forward_from(&tracker.viewer_pose());
        let hit = tracker.raycast(&ray, AlignmentFilter::Any).unwrap();
        assert_eq!(hit.plane_id, 2);

        assert!(tracker.raycast(&ray, AlignmentFilter::Horizontal).is_none());
        assert!(tracker.raycast(&ray, AlignmentFilter::Vertical).is_some());
    }

    #[test]
    fn test_relative_to_anchor() {
        let world = Transform::from_translation_rotation(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.7),
        );

        // Identity anchor leaves the transform unchanged
        let rel = world.relative_to(&Transform::IDENTITY);
        assert!(approx(rel.translation, world.translation));
        assert!(rel.rotation.abs_diff_eq(world.rotation, 1e-6));

        // Re-parenting onto the anchor gives back the world transform
        let anchor = Transform::from_translation_rotation(
            Vec3::new(-1.0, 0.0, 0.5),
            Quat::from_rotation_z(0.3),
        );
        let round_trip = anchor.mul_transform(&world.relative_to(&anchor));
        assert!(approx(round_trip.translation, world.translation));
        assert!(round_trip.rotation.abs_diff_eq(world.rotation, 1e-5));
    }

    #[test]
    fn test_mul_transform_matches_matrices() {
        let parent = Transform {
            translation: Vec3::new(0.5, 0.0, -1.0),
            rotation: Quat::from_rotation_y(1.1),
            scale: Vec3::splat(2.0),
        };
        let child = Transform::from_translation_rotation(
            Vec3::new(0.0, 0.2, 0.1),
            Quat::from_rotation_x(0.4),
        );

        let composed = parent.mul_transform(&child).to_mat4();
        let expected = parent.to_mat4() * child.to_mat4();
        assert!(composed.abs_diff_eq(expected, 1e-5));
    }
}
