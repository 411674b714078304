use std::collections::HashMap;
use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a flat Vec plus an id → slot index.
/// Entities are spawned once and live for the whole session.
pub struct Scene {
    entities: Vec<Entity>,
    slots: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity. Spawning an id twice replaces the earlier entity.
    pub fn spawn(&mut self, entity: Entity) {
        match self.slots.get(&entity.id) {
            Some(&slot) => {
                log::warn!("scene: entity {:?} spawned twice, replacing", entity.id);
                self.entities[slot] = entity;
            }
            None => {
                self.slots.insert(entity.id, self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.slots.get(&id) {
            Some(&slot) => Some(&mut self.entities[slot]),
            None => None,
        }
    }

    /// World position of an entity.
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.get(id).map(|e| e.pos)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Show or hide a set of entities. Unknown ids are skipped.
    pub fn set_active(&mut self, ids: impl IntoIterator<Item = EntityId>, active: bool) {
        for id in ids {
            if let Some(entity) = self.get_mut(id) {
                entity.active = active;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
