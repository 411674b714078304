// extensions/transform.rs
//
// Translation hierarchy — tracks parent-child relationships by EntityId.
// Children follow their parent's world position plus a local offset; they do
// NOT inherit the parent's spin, so a moon orbiting a rotating planet stays a
// pure function of (parent position, local offset).
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.attach(moon_id, planet_id, offset);
//   graph.propagate(&mut scene);  // world pos = parent world pos + offset

use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    /// Offset from the parent's world position.
    offset: Vec3,
}

/// Parent-child graph kept next to the Scene.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent, in registration order.
    roots: Vec<EntityId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root entity; its world position is whatever the scene holds.
    pub fn register(&mut self, id: EntityId) {
        self.nodes.entry(id).or_default();
        if !self.roots.contains(&id) && self.get_parent(id).is_none() {
            self.roots.push(id);
        }
    }

    /// Parent `child` under `parent` at `offset`. Re-attaching moves the child.
    /// Attaching an entity beneath its own descendant is refused.
    pub fn attach(&mut self, child: EntityId, parent: EntityId, offset: Vec3) -> bool {
        if child == parent || self.is_ancestor(child, parent) {
            log::warn!("transform: refusing to attach {:?} under {:?} (cycle)", child, parent);
            return false;
        }
        if !self.nodes.contains_key(&parent) {
            self.register(parent);
        }

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old) = self.nodes.get_mut(&old_parent) {
                old.children.retain(|&c| c != child);
            }
        }
        self.roots.retain(|&r| r != child);

        let node = self.nodes.entry(child).or_default();
        node.parent = Some(parent);
        node.offset = offset;

        if let Some(p) = self.nodes.get_mut(&parent) {
            if !p.children.contains(&child) {
                p.children.push(child);
            }
        }
        true
    }

    /// Whether `ancestor` is above `id` in the hierarchy.
    pub fn is_ancestor(&self, ancestor: EntityId, id: EntityId) -> bool {
        let mut cursor = self.get_parent(id);
        while let Some(p) = cursor {
            if p == ancestor {
                return true;
            }
            cursor = self.get_parent(p);
        }
        false
    }

    pub fn set_offset(&mut self, id: EntityId, offset: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.offset = offset;
        }
    }

    pub fn offset(&self, id: EntityId) -> Option<Vec3> {
        self.nodes.get(&id).map(|n| n.offset)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> &[EntityId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// All descendants of `id`, depth first, excluding `id` itself.
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut stack: Vec<EntityId> = self.get_children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.get_children(next).iter().rev().copied());
        }
        out
    }

    /// Recompute world positions of every non-root entity from its parent.
    pub fn propagate(&self, scene: &mut Scene) {
        for &root in &self.roots {
            let Some(origin) = scene.position(root) else { continue };
            self.propagate_from(root, origin, scene);
        }
    }

    fn propagate_from(&self, id: EntityId, world: Vec3, scene: &mut Scene) {
        for &child in self.get_children(id) {
            let Some(node) = self.nodes.get(&child) else { continue };
            let child_world = world + node.offset;
            if let Some(entity) = scene.get_mut(child) {
                entity.pos = child_world;
            }
            self.propagate_from(child, child_world, scene);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    fn scene_with(ids: &[u32]) -> Scene {
        let mut scene = Scene::new();
        for &id in ids {
            scene.spawn(Entity::new(EntityId(id)));
        }
        scene
    }

    #[test]
    fn attach_links_both_directions() {
        let mut graph = TransformGraph::new();
        graph.register(EntityId(1));
        assert!(graph.attach(EntityId(2), EntityId(1), Vec3::X));

        assert_eq!(graph.get_parent(EntityId(2)), Some(EntityId(1)));
        assert_eq!(graph.get_children(EntityId(1)), &[EntityId(2)]);
        assert!(!graph.roots.contains(&EntityId(2)));
    }

    #[test]
    fn propagate_adds_offsets_down_the_chain() {
        let mut scene = scene_with(&[1, 2, 3]);
        scene.get_mut(EntityId(1)).unwrap().pos = Vec3::new(20.0, 0.0, 0.0);

        let mut graph = TransformGraph::new();
        graph.register(EntityId(1));
        graph.attach(EntityId(2), EntityId(1), Vec3::new(2.0, 0.0, 0.0));
        graph.attach(EntityId(3), EntityId(2), Vec3::new(0.0, 0.4, 0.0));
        graph.propagate(&mut scene);

        assert_eq!(scene.position(EntityId(2)), Some(Vec3::new(22.0, 0.0, 0.0)));
        assert_eq!(scene.position(EntityId(3)), Some(Vec3::new(22.0, 0.4, 0.0)));
    }

    #[test]
    fn parent_rotation_is_not_inherited() {
        let mut scene = scene_with(&[1, 2]);
        scene.get_mut(EntityId(1)).unwrap().rotation.y = 1.2;

        let mut graph = TransformGraph::new();
        graph.register(EntityId(1));
        graph.attach(EntityId(2), EntityId(1), Vec3::new(3.0, 0.0, 0.0));
        graph.propagate(&mut scene);

        assert_eq!(scene.position(EntityId(2)), Some(Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn cycles_are_refused() {
        let mut graph = TransformGraph::new();
        graph.register(EntityId(1));
        graph.attach(EntityId(2), EntityId(1), Vec3::ZERO);
        assert!(!graph.attach(EntityId(1), EntityId(2), Vec3::ZERO));
        assert!(!graph.attach(EntityId(1), EntityId(1), Vec3::ZERO));
    }

    #[test]
    fn descendants_are_depth_first() {
        let mut graph = TransformGraph::new();
        graph.register(EntityId(1));
        graph.attach(EntityId(2), EntityId(1), Vec3::ZERO);
        graph.attach(EntityId(3), EntityId(2), Vec3::ZERO);
        graph.attach(EntityId(4), EntityId(1), Vec3::ZERO);
        assert_eq!(graph.descendants(EntityId(1)), vec![EntityId(2), EntityId(3), EntityId(4)]);
    }
}
