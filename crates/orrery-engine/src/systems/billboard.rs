use glam::{Mat3, Quat, Vec3};
use crate::components::entity::Entity;
use crate::core::scene::Scene;

/// Orientation that turns local +Z toward `target`, keeping +Y as close to
/// world up as possible.
pub fn look_at_rotation(from: Vec3, target: Vec3) -> Quat {
    let forward = (target - from).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = Vec3::Y.cross(forward);
    if right.length_squared() < 1e-10 {
        // Looking straight up or down.
        right = Vec3::X;
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, forward))
}

/// Turn a single entity toward the eye.
pub fn face_camera(entity: &mut Entity, eye: Vec3) {
    entity.set_orientation(look_at_rotation(entity.pos, eye));
}

/// Turn every active label in the scene toward the eye.
pub fn orient_labels(scene: &mut Scene, eye: Vec3) {
    for entity in scene.iter_mut() {
        if entity.active && entity.label.is_some() {
            face_camera(entity, eye);
        }
    }
}
