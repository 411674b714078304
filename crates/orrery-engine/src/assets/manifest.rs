use serde::{Deserialize, Serialize};

/// Where a texture's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TextureSource {
    /// Image file fetched by the host (e.g. "textures/earth-map.jpg").
    Image { path: String },
    /// Text the host rasterizes into a canvas texture (labels).
    Text { text: String },
}

/// One texture the host should load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Id to report back through `game_texture_loaded`.
    pub id: u32,
    #[serde(flatten)]
    pub source: TextureSource,
}

/// Batch of texture requests handed to the host as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureManifest {
    pub textures: Vec<TextureDescriptor>,
}

impl TextureManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
