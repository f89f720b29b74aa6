//! Per-frame animation of the box and sphere
//!
//! Everything advances by a fixed amount per frame, not per second: the box
//! spin is composed onto its stored orientation, and the sphere walks its
//! local z axis with a two-state direction flag.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::scene::SceneObject;
use crate::slider_to_scale;

/// Travel direction of the sphere along its local z axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }

    /// Direction for the next frame given the position just reached.
    ///
    /// Single threshold per side, checked after the move, so the sphere
    /// overshoots by at most one step before turning around.
    pub fn after_reaching(self, z: f32) -> Direction {
        if z > SPHERE_BOUND {
            Direction::Down
        } else if z < -SPHERE_BOUND {
            Direction::Up
        } else {
            self
        }
    }
}

/// State carried between frames besides the transforms themselves
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationState {
    pub direction: Direction,
}

/// Compose one frame of box spin onto `rotation`
#[inline]
pub fn spin(rotation: Quat) -> Quat {
    (rotation * Quat::from_rotation_y(BOX_SPIN_PER_FRAME)).normalize()
}

/// Advance the box and sphere by one frame
pub fn animate(
    state: &mut AnimationState,
    box_object: &mut SceneObject,
    sphere: &mut SceneObject,
    slider: f32,
) {
    sphere.transform.scale = Vec3::splat(slider_to_scale(slider));

    let z = sphere.transform.translation.z + state.direction.sign() * SPHERE_STEP;
    sphere.transform.translation.z = z;

    let next = state.direction.after_reaching(z);
    if next != state.direction {
        log::debug!("Sphere turned {:?} at z={:.4}", next, z);
        state.direction = next;
    }

    box_object.transform.rotation = spin(box_object.transform.rotation);
}
