/// Solar System — sun, eight planets, their major moons and rings on
/// circular orbits, with a camera that can lock onto a clicked planet.

use orrery_engine::*;
use glam::Vec3;

use crate::bodies::PLANETS;
use crate::builder::{self, BodyKind, Pick, SystemGraph, SystemOptions};
use crate::info::{InfoCatalog, PanelContent};
use crate::kinematics;
use crate::selection::{self, ClickOutcome, Follow, SelectionController};

// ── Custom event kinds from the page ────────────────────────────────

const CUSTOM_TOGGLE_ORBIT_PATHS: u32 = 1;
const CUSTOM_TOGGLE_LABELS: u32 = 2;
const CUSTOM_RESET_VIEW: u32 = 3;
/// a = UTC hours; same effect as the wall clock sent at startup.
const CUSTOM_CLOCK_SYNC: u32 = 4;

// ── Game event kinds to the page ────────────────────────────────────

/// a = followed planet index (-1 for none), b = orbit paths shown, c = labels shown.
const EVENT_SELECTION: f32 = 1.0;

// ── Data keys accepted by `load_data` ───────────────────────────────

pub const DATA_PLANET_INFO: &str = "planets";
pub const DATA_OPTIONS: &str = "options";

pub struct SolarSystem {
    config: GameConfig,
    options: SystemOptions,
    graph: SystemGraph,
    selection: SelectionController,
    info: InfoCatalog,
    paths_visible: bool,
    labels_visible: bool,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self::with_options(SystemOptions::default())
    }

    pub fn with_options(options: SystemOptions) -> Self {
        let config = GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_mesh_instances: 32,
            max_line_vertices: 4096,
            max_labels: 32,
            ..GameConfig::default()
        };
        Self {
            selection: SelectionController::new(config.drag_threshold_ndc),
            config,
            options,
            graph: SystemGraph::default(),
            info: InfoCatalog::new(),
            paths_visible: options.orbit_paths,
            labels_visible: options.labels,
        }
    }

    pub fn graph(&self) -> &SystemGraph {
        &self.graph
    }

    pub fn follow(&self) -> Follow {
        self.selection.follow
    }

    /// Panel text for the picked body. Moons are looked up under their parent.
    fn describe(&self, pick: Pick) -> Option<PanelContent> {
        let body = self.graph.body(pick)?;
        match body.kind {
            BodyKind::Moon { parent } => {
                self.info.describe_moon(self.graph.planet(parent)?.name, body.name)
            }
            BodyKind::Planet | BodyKind::Star => self.info.describe_planet(body.name),
        }
    }

    fn click(&mut self, ctx: &mut EngineContext, x: f32, y: f32) {
        let ndc = ctx.to_ndc(x, y);
        let outcome = self.selection.click(ndc, &self.graph, ctx, self.config.pick_slack);
        if let ClickOutcome::Selected { pick, .. } = outcome {
            match self.describe(pick) {
                Some(content) => {
                    ctx.panel.show(content.title, content.basic_info, content.interesting_fact)
                }
                None => log::debug!("no info for {:?}", pick),
            }
        }
    }

    fn set_paths_visible(&mut self, ctx: &mut EngineContext, visible: bool) {
        let paths = self.graph.orbit_path_entities();
        if visible && paths.is_empty() {
            log::debug!("orbit paths were not built; nothing to show");
        }
        self.paths_visible = visible && !paths.is_empty();
        ctx.scene.set_active(paths, visible);
    }

    fn set_labels_visible(&mut self, ctx: &mut EngineContext, visible: bool) {
        let labels = self.graph.label_entities();
        if visible && labels.is_empty() {
            log::debug!("labels were not built; nothing to show");
        }
        self.labels_visible = visible && !labels.is_empty();
        ctx.scene.set_active(labels, visible);
    }

    fn reset_view(&mut self, ctx: &mut EngineContext) {
        self.selection.reset();
        ctx.controls.target = Vec3::ZERO;
        ctx.camera.position = self.config.initial_camera_position;
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.graph = builder::build_system(ctx, &PLANETS, &self.options);
        kinematics::orient_labels(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // ── Handle input ─────────────────────────────────────────────
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    let ndc = ctx.to_ndc(x, y);
                    self.selection.drag.pointer_down(ndc);
                }
                InputEvent::PointerMove { x, y } => {
                    let ndc = ctx.to_ndc(x, y);
                    if let Some(delta) = self.selection.drag.pointer_move(ndc) {
                        ctx.controls.rotate_by_ndc(delta);
                    }
                }
                InputEvent::PointerUp { .. } => self.selection.drag.pointer_up(),
                InputEvent::Click { x, y } => self.click(ctx, x, y),
                InputEvent::Wheel { delta } => ctx.controls.zoom(delta),
                InputEvent::WallClock { utc_hours } => {
                    kinematics::sync_earth_to_clock(&self.graph, ctx, utc_hours);
                }
                InputEvent::Custom { kind, a, .. } => match kind {
                    CUSTOM_TOGGLE_ORBIT_PATHS => self.set_paths_visible(ctx, !self.paths_visible),
                    CUSTOM_TOGGLE_LABELS => self.set_labels_visible(ctx, !self.labels_visible),
                    CUSTOM_RESET_VIEW => self.reset_view(ctx),
                    CUSTOM_CLOCK_SYNC => kinematics::sync_earth_to_clock(&self.graph, ctx, a),
                    _ => log::debug!("unhandled custom event {}", kind),
                },
            }
        }

        // ── Orbits, then camera, then labels ─────────────────────────
        kinematics::advance(&mut self.graph, ctx);
        selection::track(self.selection.follow, &self.graph, ctx);
        // Labels must face the camera this frame is drawn with.
        ctx.update_controls();
        kinematics::orient_labels(ctx);

        // ── Emit game events ─────────────────────────────────────────
        let followed = match self.selection.follow {
            Follow::Following(i) => i as f32,
            Follow::Unselected => -1.0,
        };
        ctx.emit_event(GameEvent::new(
            EVENT_SELECTION,
            followed,
            if self.paths_visible { 1.0 } else { 0.0 },
            if self.labels_visible { 1.0 } else { 0.0 },
        ));
    }

    fn load_data(&mut self, ctx: &mut EngineContext, key: &str, json: &str) -> Result<()> {
        match key {
            DATA_PLANET_INFO => self.info.load(json),
            DATA_OPTIONS => {
                let options = SystemOptions::from_json(json)?;
                self.set_paths_visible(ctx, options.orbit_paths);
                self.set_labels_visible(ctx, options.labels);
                Ok(())
            }
            _ => Err(OrreryError::UnknownDataKey(key.to_string())),
        }
    }
}
