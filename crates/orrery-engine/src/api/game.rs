use glam::{Vec2, Vec3};
use crate::api::panel::InfoPanel;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::error::{OrreryError, Result};
use crate::input::queue::InputQueue;
use crate::renderer::camera::{OrbitControls, PerspectiveCamera};
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of mesh instances (default: 64).
    pub max_mesh_instances: usize,
    /// Maximum number of line vertices (default: 4096).
    pub max_line_vertices: usize,
    /// Maximum number of label billboards (default: 32).
    pub max_labels: usize,
    /// Maximum number of point lights (default: 4).
    pub max_lights: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Where the camera starts, looking at the origin.
    pub initial_camera_position: Vec3,
    /// Viewport size until the host reports the real one.
    pub viewport: Vec2,
    /// Pointer travel (in NDC) beyond which a press counts as a drag.
    pub drag_threshold_ndc: f32,
    /// Extra radius added to bodies when ray picking.
    pub pick_slack: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_mesh_instances: 64,
            max_line_vertices: 4096,
            max_labels: 32,
            max_lights: 4,
            max_events: 32,
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            initial_camera_position: Vec3::new(30.0, 30.0, 40.0),
            viewport: Vec2::new(800.0, 600.0),
            drag_threshold_ndc: 0.03,
            pick_slack: 0.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, register textures.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One simulated frame. `input` holds the events that arrived since the
    /// previous frame.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Receive a JSON document the host fetched on the game's behalf.
    fn load_data(&mut self, _ctx: &mut EngineContext, key: &str, _json: &str) -> Result<()> {
        Err(OrreryError::UnknownDataKey(key.to_string()))
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub textures: TextureRegistry,
    pub lights: LightState,
    pub panel: InfoPanel,
    pub events: Vec<GameEvent>,
    /// Canvas size in CSS pixels.
    pub viewport: Vec2,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let mut camera = PerspectiveCamera::new(
            config.fov_y_deg,
            config.viewport.x / config.viewport.y.max(1.0),
            config.near,
            config.far,
        );
        camera.position = config.initial_camera_position;
        camera.target = Vec3::ZERO;

        Self {
            scene: Scene::with_capacity(config.max_mesh_instances),
            camera,
            controls: OrbitControls::new(Vec3::ZERO),
            textures: TextureRegistry::new(),
            lights: LightState::with_capacity(config.max_lights),
            panel: InfoPanel::new(),
            events: Vec::with_capacity(config.max_events),
            viewport: config.viewport,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Track the canvas size; zero-sized viewports are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
            self.camera.resize(width, height);
        }
    }

    /// CSS pixel position to normalized device coordinates (y up).
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x / self.viewport.x * 2.0 - 1.0,
            -(y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// Apply pending orbit-control input to the camera.
    /// Called by the runner after `Game::update`.
    pub fn update_controls(&mut self) {
        self.controls.update(&mut self.camera);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_maps_corners_and_center() {
        let ctx = EngineContext::new();
        assert_eq!(ctx.to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(ctx.to_ndc(800.0, 600.0), Vec2::new(1.0, -1.0));
        assert_eq!(ctx.to_ndc(400.0, 300.0), Vec2::ZERO);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut ctx = EngineContext::new();
        ctx.resize(1000.0, 500.0);
        assert_eq!(ctx.camera.aspect, 2.0);
        ctx.resize(0.0, 500.0);
        assert_eq!(ctx.viewport, Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn camera_starts_at_configured_position() {
        let ctx = EngineContext::from_config(&GameConfig::default());
        assert_eq!(ctx.camera.position, Vec3::new(30.0, 30.0, 40.0));
        assert_eq!(ctx.camera.target, Vec3::ZERO);
    }
}
