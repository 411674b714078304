pub mod camera;
pub mod instance;
pub mod ray;

pub use camera::{OrbitControls, PerspectiveCamera};
pub use instance::{LabelInstance, LineVertex, MeshInstance, RenderBuffer};
pub use ray::Ray;
