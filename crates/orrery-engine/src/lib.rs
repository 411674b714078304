pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::panel::InfoPanel;
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::label::LabelComponent;
pub use components::mesh::{Material, MeshComponent, MeshShape, Rgb};
pub use components::path::OrbitPathComponent;
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use renderer::instance::{LabelInstance, LineVertex, MeshInstance, RenderBuffer};
pub use renderer::camera::{CameraUniform, OrbitControls, PerspectiveCamera};
pub use renderer::ray::Ray;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{TextureDescriptor, TextureManifest, TextureSource};
pub use assets::registry::{TextureId, TextureRegistry, TextureStatus};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{LightState, PointLight};
pub use systems::picking::{pick, Hit};
pub use error::{OrreryError, Result};

pub use extensions::TransformGraph;
