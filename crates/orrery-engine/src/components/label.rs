use glam::Vec2;
use crate::assets::registry::TextureId;

/// Flat text billboard.
///
/// The host rasterizes the label text into a canvas texture (the texture
/// registry records it as a text source); the billboard system turns the
/// quad toward the camera each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelComponent {
    pub text: String,
    /// Texture the host renders the text into.
    pub texture: Option<TextureId>,
    /// Quad size in world units.
    pub size: Vec2,
    pub opacity: f32,
}

impl LabelComponent {
    pub const DEFAULT_SIZE: Vec2 = Vec2::new(2.0, 0.5);

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            texture: None,
            size: Self::DEFAULT_SIZE,
            opacity: 1.0,
        }
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }
}
