use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::label::LabelComponent;
use crate::components::mesh::MeshComponent;
use crate::components::path::OrbitPathComponent;

/// Fat Entity — a single struct with optional components.
/// Designed for simplicity over ECS purity; a solar system has a few dozen.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are neither rendered nor picked.
    pub active: bool,
    /// Whether ray picking may report this entity.
    pub pickable: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Euler rotation in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Solid geometry (sphere or ring).
    pub mesh: Option<MeshComponent>,
    /// Camera-facing text billboard.
    pub label: Option<LabelComponent>,
    /// Circular guide line.
    pub path: Option<OrbitPathComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pickable: false,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
            label: None,
            path: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_label(mut self, label: LabelComponent) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_path(mut self, path: OrbitPathComponent) -> Self {
        self.path = Some(path);
        self
    }

    pub fn pickable(mut self, pickable: bool) -> Self {
        self.pickable = pickable;
        self
    }

    // -- Derived transforms --

    /// Orientation as a quaternion.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Overwrite the Euler rotation from a quaternion.
    pub fn set_orientation(&mut self, q: Quat) {
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Local-to-world matrix.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation(), self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entity_is_active_but_not_pickable() {
        let e = Entity::new(EntityId(7));
        assert!(e.active);
        assert!(!e.pickable);
        assert_eq!(e.scale, Vec3::ONE);
    }

    #[test]
    fn orientation_round_trips_through_euler() {
        let mut e = Entity::new(EntityId(1)).with_rotation(Vec3::new(0.3, -0.7, 0.2));
        let q = e.orientation();
        e.set_orientation(q);
        assert!(e.orientation().angle_between(q) < 1e-4);
    }

    #[test]
    fn model_matrix_translates() {
        let e = Entity::new(EntityId(1)).with_pos(Vec3::new(1.0, 2.0, 3.0));
        let p = e.model_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }
}
