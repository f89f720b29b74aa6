//! The fixed scene graph: one cursor owning a box and a sphere
//!
//! Built once at startup and never reshaped. The cursor's transform is
//! relative to a world anchor at the origin; children are relative to the
//! cursor and inherit its visibility.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tracking::Transform;

/// Geometry of a visual object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Mesh {
    /// Axis-aligned cube with edge length `size`
    Box { size: f32 },
    Sphere { radius: f32 },
}

/// Flat-colored surface material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Linear RGBA
    pub color: [f32; 4],
    pub metallic: bool,
    pub roughness: f32,
}

impl Material {
    pub fn simple(color: [f32; 4], metallic: bool) -> Self {
        Self {
            color,
            metallic,
            roughness: if metallic { 0.2 } else { 0.5 },
        }
    }
}

/// Which of the three scene nodes an item refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Cursor,
    Box,
    Sphere,
}

/// A visual child of the cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub kind: NodeKind,
    pub mesh: Mesh,
    pub material: Material,
    /// Transform relative to the cursor
    pub transform: Transform,
}

/// Fixed frame of reference for all placement (world origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldAnchor {
    pub transform: Transform,
}

impl WorldAnchor {
    pub fn origin() -> Self {
        Self {
            transform: Transform::IDENTITY,
        }
    }

    /// Convert a world transform into anchor space
    pub fn localize(&self, world: &Transform) -> Transform {
        world.relative_to(&self.transform)
    }

    /// Convert an anchor-space transform into world space
    pub fn to_world(&self, local: &Transform) -> Transform {
        self.transform.mul_transform(local)
    }
}

/// Index of the box among the cursor's children
const BOX_INDEX: usize = 0;
/// Index of the sphere among the cursor's children
const SPHERE_INDEX: usize = 1;

/// The placement cursor and the objects riding on it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursor {
    transform: Transform,
    enabled: bool,
    children: [SceneObject; 2],
}

impl Cursor {
    /// Transform relative to the world anchor (last known, even when disabled)
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Snap to a surface and become visible
    pub fn place(&mut self, transform: Transform) {
        self.transform = transform;
        self.enabled = true;
    }

    /// Hide without forgetting the last placement
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn children(&self) -> &[SceneObject; 2] {
        &self.children
    }
}

/// One node's render data for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub kind: NodeKind,
    pub world: Mat4,
    /// `None` for the cursor, which has no geometry of its own
    pub mesh: Option<Mesh>,
    pub material: Option<Material>,
    pub visible: bool,
}

/// Scene root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub anchor: WorldAnchor,
    cursor: Cursor,
}

impl Default for Scene {
    fn default() -> Self {
        Self::compose()
    }
}

impl Scene {
    /// Build the cursor → {box, sphere} graph with its materials.
    ///
    /// The cursor starts hidden at the anchor until the first surface hit.
    pub fn compose() -> Self {
        let box_object = SceneObject {
            kind: NodeKind::Box,
            mesh: Mesh::Box { size: BOX_SIZE },
            material: Material::simple([0.2, 0.4, 1.0, 1.0], false),
            // Resting on the surface
            transform: Transform::from_translation(Vec3::new(0.0, BOX_SIZE / 2.0, 0.0)),
        };
        let sphere = SceneObject {
            kind: NodeKind::Sphere,
            mesh: Mesh::Sphere {
                radius: SPHERE_RADIUS,
            },
            material: Material::simple([1.0, 0.2, 0.2, 1.0], true),
            transform: Transform::from_translation(Vec3::new(0.0, SPHERE_HEIGHT, 0.0)),
        };

        log::info!("Scene composed: cursor with box and sphere");

        Self {
            anchor: WorldAnchor::origin(),
            cursor: Cursor {
                transform: Transform::IDENTITY,
                enabled: false,
                children: [box_object, sphere],
            },
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursor
    }

    pub fn box_object(&self) -> &SceneObject {
        &self.cursor.children[BOX_INDEX]
    }

    pub fn sphere(&self) -> &SceneObject {
        &self.cursor.children[SPHERE_INDEX]
    }

    /// Mutable access to both animated children at once
    pub fn animated_mut(&mut self) -> (&mut SceneObject, &mut SceneObject) {
        let [box_object, sphere] = &mut self.cursor.children;
        (box_object, sphere)
    }

    /// World transform of the cursor
    pub fn cursor_world(&self) -> Transform {
        self.anchor.to_world(&self.cursor.transform)
    }

    /// Where new content may be placed; `None` while the cursor is disabled
    pub fn placement_reference(&self) -> Option<Transform> {
        self.cursor.enabled.then(|| self.cursor_world())
    }

    /// World matrices and visibility for the cursor, box and sphere (in that order)
    pub fn render_list(&self) -> [RenderItem; 3] {
        let cursor_world = self.cursor_world();
        let visible = self.cursor.enabled;
        let child = |object: &SceneObject| RenderItem {
            kind: object.kind,
            world: cursor_world.mul_transform(&object.transform).to_mat4(),
            mesh: Some(object.mesh),
            material: Some(object.material),
            visible,
        };

        [
            RenderItem {
                kind: NodeKind::Cursor,
                world: cursor_world.to_mat4(),
                mesh: None,
                material: None,
                visible,
            },
            child(self.box_object()),
            child(self.sphere()),
        ]
    }
}
