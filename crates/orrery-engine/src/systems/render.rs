use crate::assets::registry::{TextureId, TextureRegistry};
use crate::components::entity::Entity;
use crate::components::mesh::{MeshComponent, MeshShape};
use crate::core::scene::Scene;
use crate::renderer::instance::{
    mesh_flags, LabelInstance, LineVertex, MeshInstance, RenderBuffer, NO_TEXTURE,
};

fn texture_slot(textures: &TextureRegistry, id: Option<TextureId>) -> f32 {
    textures.ready(id).map_or(NO_TEXTURE, |id| id.0 as f32)
}

fn mesh_instance(entity: &Entity, mesh: &MeshComponent, textures: &TextureRegistry) -> MeshInstance {
    let material = &mesh.material;
    let mut flags = 0;
    if material.unlit {
        flags |= mesh_flags::UNLIT;
    }
    if material.double_sided {
        flags |= mesh_flags::DOUBLE_SIDED;
    }
    if material.transparent {
        flags |= mesh_flags::TRANSPARENT;
    }
    let (size_a, size_b) = match mesh.shape {
        MeshShape::Sphere { radius } => (radius, 0.0),
        MeshShape::Ring { inner_radius, outer_radius } => {
            flags |= mesh_flags::RING;
            (inner_radius, outer_radius)
        }
    };

    MeshInstance {
        model: entity.model_matrix().to_cols_array(),
        color: [material.color.r, material.color.g, material.color.b, material.opacity],
        texture: texture_slot(textures, material.texture),
        flags: flags as f32,
        size_a,
        size_b,
    }
}

fn push_path(entity: &Entity, buffer: &mut RenderBuffer) {
    let Some(path) = &entity.path else {
        return;
    };
    let points = path.points(entity.pos);
    let vertex = |p: glam::Vec3| LineVertex {
        x: p.x,
        y: p.y,
        z: p.z,
        r: path.color.r,
        g: path.color.g,
        b: path.color.b,
        a: path.opacity,
        _pad: 0.0,
    };
    for pair in points.windows(2) {
        buffer.lines.push(vertex(pair[0]));
        buffer.lines.push(vertex(pair[1]));
    }
}

/// Build the render buffer from the scene.
/// Opaque meshes come first, then transparent ones; `transparent_start`
/// is set at the boundary. Inactive entities are skipped entirely.
pub fn build_render_buffer(scene: &Scene, textures: &TextureRegistry, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut transparent: Vec<MeshInstance> = Vec::new();

    for entity in scene.iter() {
        if !entity.active {
            continue;
        }

        if let Some(mesh) = &entity.mesh {
            let instance = mesh_instance(entity, mesh, textures);
            if mesh.material.transparent {
                transparent.push(instance);
            } else {
                buffer.meshes.push(instance);
            }
        }

        push_path(entity, buffer);

        if let Some(label) = &entity.label {
            buffer.labels.push(LabelInstance {
                position: entity.pos.to_array(),
                rotation: entity.orientation().to_array(),
                width: label.size.x,
                height: label.size.y,
                texture: texture_slot(textures, label.texture),
                opacity: label.opacity,
                _pad: 0.0,
            });
        }
    }

    buffer.transparent_start = buffer.meshes.len() as u32;
    buffer.meshes.extend(transparent);
}
