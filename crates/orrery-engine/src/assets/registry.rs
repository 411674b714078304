use std::collections::HashMap;
use crate::assets::manifest::{TextureDescriptor, TextureManifest, TextureSource};
use crate::error::{OrreryError, Result};

/// Handle to a texture slot. Stable for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

/// Load state of a texture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStatus {
    /// Requested, host has not answered yet.
    Pending,
    Ready,
    /// Host reported a load error; materials render untextured.
    Failed,
}

#[derive(Debug, Clone)]
struct TextureSlot {
    source: TextureSource,
    status: TextureStatus,
    /// Already handed to the host in a manifest.
    requested: bool,
}

/// Texture slots allocated by the game and filled in asynchronously by the host.
///
/// Materials hold a `TextureId` from the start; the renderer only samples it
/// once the slot is `Ready`, so a slow or failed load never blocks the scene.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    slots: Vec<TextureSlot>,
    by_path: HashMap<String, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image file. The same path always maps to the same id.
    pub fn register_image(&mut self, path: &str) -> Result<TextureId> {
        let path = path.trim();
        if path.is_empty() {
            return Err(OrreryError::TextureLoad { path: path.to_string() });
        }
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }
        let id = self.push(TextureSource::Image { path: path.to_string() });
        self.by_path.insert(path.to_string(), id);
        Ok(id)
    }

    /// Register a text texture (one per call; labels are not shared).
    pub fn register_text(&mut self, text: &str) -> TextureId {
        self.push(TextureSource::Text { text: text.to_string() })
    }

    fn push(&mut self, source: TextureSource) -> TextureId {
        let id = TextureId(self.slots.len() as u32);
        self.slots.push(TextureSlot {
            source,
            status: TextureStatus::Pending,
            requested: false,
        });
        id
    }

    /// Host callback: the texture finished loading (or failed).
    pub fn complete(&mut self, id: TextureId, ok: bool) -> Result<()> {
        let slot = self
            .slots
            .get_mut(id.0 as usize)
            .ok_or(OrreryError::UnknownTexture(id.0))?;
        slot.status = if ok { TextureStatus::Ready } else { TextureStatus::Failed };
        if !ok {
            log::warn!("texture {} failed to load: {:?}", id.0, slot.source);
        }
        Ok(())
    }

    pub fn status(&self, id: TextureId) -> Option<TextureStatus> {
        self.slots.get(id.0 as usize).map(|s| s.status)
    }

    /// The id if the texture can be sampled right now.
    pub fn ready(&self, id: Option<TextureId>) -> Option<TextureId> {
        id.filter(|&id| self.status(id) == Some(TextureStatus::Ready))
    }

    pub fn source(&self, id: TextureId) -> Option<&TextureSource> {
        self.slots.get(id.0 as usize).map(|s| &s.source)
    }

    /// Collect textures not yet handed to the host and mark them requested.
    pub fn take_requests(&mut self) -> TextureManifest {
        let textures = self
            .slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| !slot.requested)
            .map(|(i, slot)| {
                slot.requested = true;
                TextureDescriptor { id: i as u32, source: slot.source.clone() }
            })
            .collect();
        TextureManifest { textures }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_same_id() {
        let mut reg = TextureRegistry::new();
        let a = reg.register_image("textures/moon-map.jpg").unwrap();
        let b = reg.register_image("textures/moon-map.jpg").unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn empty_path_is_an_error() {
        let mut reg = TextureRegistry::new();
        assert!(matches!(reg.register_image("  "), Err(OrreryError::TextureLoad { .. })));
    }

    #[test]
    fn only_ready_textures_are_sampled() {
        let mut reg = TextureRegistry::new();
        let ok = reg.register_image("textures/earth-map.jpg").unwrap();
        let bad = reg.register_image("textures/missing.jpg").unwrap();
        assert_eq!(reg.ready(Some(ok)), None);

        reg.complete(ok, true).unwrap();
        reg.complete(bad, false).unwrap();
        assert_eq!(reg.ready(Some(ok)), Some(ok));
        assert_eq!(reg.ready(Some(bad)), None);
        assert_eq!(reg.status(bad), Some(TextureStatus::Failed));
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut reg = TextureRegistry::new();
        assert!(matches!(reg.complete(TextureId(4), true), Err(OrreryError::UnknownTexture(4))));
    }

    #[test]
    fn requests_are_handed_out_once() {
        let mut reg = TextureRegistry::new();
        reg.register_image("textures/sun-map.jpg").unwrap();
        reg.register_text("Mercury");
        assert_eq!(reg.take_requests().len(), 2);
        assert!(reg.take_requests().is_empty());

        reg.register_text("Venus");
        let later = reg.take_requests();
        assert_eq!(later.textures[0].id, 2);
    }
}
