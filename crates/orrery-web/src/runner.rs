use orrery_engine::{
    EngineContext, FrameClock, Game, GameConfig, InputEvent, InputQueue, ProtocolLayout,
    RenderBuffer, TextureId,
};
use orrery_engine::bridge::protocol::{
    HEADER_FLOATS, HEADER_FRAME_COUNTER, HEADER_EVENT_COUNT, HEADER_LABEL_COUNT,
    HEADER_LIGHT_COUNT, HEADER_LINE_VERTEX_COUNT, HEADER_MESH_COUNT, HEADER_PANEL_REVISION,
    HEADER_TRANSPARENT_START, HEADER_VIEWPORT_HEIGHT, HEADER_VIEWPORT_WIDTH,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    initialized: bool,
    /// Set once the capacity warning has been logged.
    overflow_warned: bool,
    /// Camera view and projection matrices, column-major, 32 floats.
    camera_matrices: [f32; 32],
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(
                config.max_mesh_instances,
                config.max_line_vertices,
                config.max_labels,
            ),
            clock: FrameClock::new(config.fixed_dt),
            header: layout.header(),
            layout,
            config,
            game,
            initialized: false,
            overflow_warned: false,
            camera_matrices: [0.0; 32],
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.update_controls();
        self.refresh_frame();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance wall time by `dt` seconds and rebuild the frame buffers.
    ///
    /// Pending input is handed to the first simulated frame only, so a click
    /// is never evaluated twice when the clock catches up several frames.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.clock.advance(dt);
        if steps > 0 {
            let mut input = self.input.take();
            for _ in 0..steps {
                self.game.update(&mut self.ctx, &input);
                self.ctx.update_controls();
                input = InputQueue::new();
            }
        }

        self.refresh_frame();
    }

    fn refresh_frame(&mut self) {
        build_render_buffer(&self.ctx.scene, &self.ctx.textures, &mut self.render_buffer);
        self.clamp_to_capacity();

        let view = self.ctx.camera.view_matrix().to_cols_array();
        let projection = self.ctx.camera.projection_matrix().to_cols_array();
        self.camera_matrices[..16].copy_from_slice(&view);
        self.camera_matrices[16..].copy_from_slice(&projection);

        self.header[HEADER_FRAME_COUNTER] = self.clock.frames() as f32;
        self.header[HEADER_MESH_COUNT] = self.render_buffer.mesh_count() as f32;
        self.header[HEADER_TRANSPARENT_START] = self.render_buffer.transparent_start as f32;
        self.header[HEADER_LINE_VERTEX_COUNT] = self.render_buffer.line_vertex_count() as f32;
        self.header[HEADER_LABEL_COUNT] = self.render_buffer.label_count() as f32;
        self.header[HEADER_LIGHT_COUNT] = self.ctx.lights.count() as f32;
        self.header[HEADER_EVENT_COUNT] = self.ctx.events.len() as f32;
        self.header[HEADER_VIEWPORT_WIDTH] = self.ctx.viewport.x;
        self.header[HEADER_VIEWPORT_HEIGHT] = self.ctx.viewport.y;
        self.header[HEADER_PANEL_REVISION] = self.ctx.panel.revision as f32;
    }

    /// The host sizes its views from the header capacities, so nothing
    /// past them may be published.
    fn clamp_to_capacity(&mut self) {
        let layout = &self.layout;
        let mut overflow = self.render_buffer.truncate(
            layout.max_mesh_instances,
            layout.max_line_vertices,
            layout.max_labels,
        );
        overflow |= self.ctx.lights.truncate(layout.max_lights);
        if self.ctx.events.len() > layout.max_events {
            self.ctx.events.truncate(layout.max_events);
            overflow = true;
        }
        if overflow && !self.overflow_warned {
            log::warn!("frame exceeded buffer capacities; extra items dropped");
            self.overflow_warned = true;
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.resize(width, height);
    }

    /// Hand a fetched JSON document to the game. Failures are logged and
    /// the game keeps running without the data.
    pub fn load_data(&mut self, key: &str, json: &str) {
        if let Err(e) = self.game.load_data(&mut self.ctx, key, json) {
            log::warn!("load_data('{}') failed: {}", key, e);
        }
    }

    /// The host finished (or gave up on) loading a texture.
    pub fn texture_loaded(&mut self, id: u32, ok: bool) {
        if let Err(e) = self.ctx.textures.complete(TextureId(id), ok) {
            log::warn!("texture_loaded: {}", e);
        }
    }

    /// Texture slots the host has not been asked to load yet, as JSON.
    pub fn take_texture_requests(&mut self) -> String {
        let manifest = self.ctx.textures.take_requests();
        match manifest.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("texture requests could not be serialized: {}", e);
                String::from("{\"textures\":[]}")
            }
        }
    }

    pub fn panel_json(&self) -> String {
        self.ctx.panel.to_json()
    }

    pub fn panel_revision(&self) -> u32 {
        self.ctx.panel.revision
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn meshes_ptr(&self) -> *const f32 {
        self.render_buffer.meshes_ptr()
    }

    pub fn mesh_count(&self) -> u32 {
        self.render_buffer.mesh_count()
    }

    pub fn transparent_start(&self) -> u32 {
        self.render_buffer.transparent_start
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.render_buffer.lines_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.render_buffer.line_vertex_count()
    }

    pub fn labels_ptr(&self) -> *const f32 {
        self.render_buffer.labels_ptr()
    }

    pub fn label_count(&self) -> u32 {
        self.render_buffer.label_count()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.camera_matrices.as_ptr()
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 4] {
        let [r, g, b] = self.ctx.lights.ambient();
        [r, g, b, self.ctx.lights.ambient_intensity()]
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_mesh_instances(&self) -> u32 {
        self.layout.max_mesh_instances as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn max_labels(&self) -> u32 {
        self.layout.max_labels as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }
}
