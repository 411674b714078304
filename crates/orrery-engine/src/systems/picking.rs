use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::MeshShape;
use crate::core::scene::Scene;
use crate::extensions::transform::TransformGraph;
use crate::renderer::ray::Ray;

/// Nearest intersection found by [`pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index into the candidate list the hit belongs to.
    pub candidate: usize,
    /// Entity whose mesh was hit (the candidate or one of its descendants).
    pub entity: EntityId,
    /// Distance along the ray.
    pub distance: f32,
}

/// Ray/mesh test for a single entity. Inactive or non-pickable entities
/// never hit.
pub fn intersect_entity(entity: &Entity, ray: &Ray, slack: f32) -> Option<f32> {
    if !entity.active || !entity.pickable {
        return None;
    }
    let mesh = entity.mesh.as_ref()?;
    let scale = entity.scale.max_element();
    match mesh.shape {
        MeshShape::Sphere { radius } => ray.intersect_sphere(entity.pos, radius * scale + slack),
        MeshShape::Ring { inner_radius, outer_radius } => {
            let normal = entity.orientation() * glam::Vec3::Z;
            ray.intersect_annulus(
                entity.pos,
                normal,
                (inner_radius * scale - slack).max(0.0),
                outer_radius * scale + slack,
            )
        }
    }
}

/// Cast `ray` against `candidates`, optionally descending into each
/// candidate's children in `graph`. Returns the nearest hit.
pub fn pick(
    scene: &Scene,
    graph: &TransformGraph,
    ray: &Ray,
    candidates: &[EntityId],
    recursive: bool,
    slack: f32,
) -> Option<Hit> {
    let mut best: Option<Hit> = None;

    let mut consider = |candidate: usize, id: EntityId| {
        let Some(entity) = scene.get(id) else {
            return;
        };
        if let Some(distance) = intersect_entity(entity, ray, slack) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Hit { candidate, entity: id, distance });
            }
        }
    };

    for (index, &id) in candidates.iter().enumerate() {
        consider(index, id);
        if recursive {
            for child in graph.descendants(id) {
                consider(index, child);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::{Material, MeshComponent};
    use glam::Vec3;

    fn body(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, Material::default()))
            .pickable(true)
    }

    #[test]
    fn nearest_hit_wins() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::new(0.0, 0.0, -10.0), 1.0));
        scene.spawn(body(2, Vec3::new(0.0, 0.0, -5.0), 1.0));
        let graph = TransformGraph::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = pick(&scene, &graph, &ray, &[EntityId(1), EntityId(2)], false, 0.0).unwrap();
        assert_eq!(hit.entity, EntityId(2));
        assert_eq!(hit.candidate, 1);
        assert!((hit.distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn recursive_pick_reports_descendant_under_candidate() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::new(5.0, 0.0, -10.0), 1.0));
        scene.spawn(body(2, Vec3::new(0.0, 0.0, -10.0), 0.5));
        let mut graph = TransformGraph::new();
        graph.register(EntityId(1));
        graph.attach(EntityId(2), EntityId(1), Vec3::new(-5.0, 0.0, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(pick(&scene, &graph, &ray, &[EntityId(1)], false, 0.0).is_none());
        let hit = pick(&scene, &graph, &ray, &[EntityId(1)], true, 0.0).unwrap();
        assert_eq!(hit.entity, EntityId(2));
        assert_eq!(hit.candidate, 0);
    }

    #[test]
    fn non_pickable_entities_are_transparent_to_rays() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::new(0.0, 0.0, -5.0), 1.0).pickable(false));
        scene.spawn(body(2, Vec3::new(0.0, 0.0, -10.0), 1.0));
        let graph = TransformGraph::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = pick(&scene, &graph, &ray, &[EntityId(1), EntityId(2)], false, 0.0).unwrap();
        assert_eq!(hit.entity, EntityId(2));
    }

    #[test]
    fn miss_returns_none() {
        let mut scene = Scene::new();
        scene.spawn(body(1, Vec3::new(0.0, 0.0, -10.0), 1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(pick(&scene, &TransformGraph::new(), &ray, &[EntityId(1)], true, 0.0).is_none());
    }
}
