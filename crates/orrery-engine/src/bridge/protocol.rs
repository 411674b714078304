/// Frame protocol shared with the host.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// The host reads a 16-float header plus one array per section, each
/// through its own pointer export (all values f32):
/// ```text
/// meshes:  mesh_count × 24 floats  (opaque, then transparent from transparent_start)
/// lines:   line_vertex_count × 8 floats
/// labels:  label_count × 12 floats
/// lights:  light_count × 8 floats
/// events:  event_count × 4 floats
/// ```
///
/// Capacities are written once into the header at init; the runner clamps
/// every section to its capacity before the counts are published.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_MESHES: usize = 2;
pub const HEADER_MESH_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_START: usize = 4;
pub const HEADER_MAX_LINE_VERTICES: usize = 5;
pub const HEADER_LINE_VERTEX_COUNT: usize = 6;
pub const HEADER_MAX_LABELS: usize = 7;
pub const HEADER_LABEL_COUNT: usize = 8;
pub const HEADER_MAX_LIGHTS: usize = 9;
pub const HEADER_LIGHT_COUNT: usize = 10;
pub const HEADER_MAX_EVENTS: usize = 11;
pub const HEADER_EVENT_COUNT: usize = 12;
pub const HEADER_VIEWPORT_WIDTH: usize = 13;
pub const HEADER_VIEWPORT_HEIGHT: usize = 14;
pub const HEADER_PANEL_REVISION: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Section capacities shared with the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_mesh_instances: usize,
    pub max_line_vertices: usize,
    pub max_labels: usize,
    pub max_lights: usize,
    pub max_events: usize,
}

impl ProtocolLayout {
    pub fn new(
        max_mesh_instances: usize,
        max_line_vertices: usize,
        max_labels: usize,
        max_lights: usize,
        max_events: usize,
    ) -> Self {
        Self {
            max_mesh_instances,
            max_line_vertices,
            max_labels,
            max_lights,
            max_events,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_mesh_instances,
            config.max_line_vertices,
            config.max_labels,
            config.max_lights,
            config.max_events,
        )
    }

    /// Header with capacities filled in and all counts zero.
    pub fn header(&self) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_MESHES] = self.max_mesh_instances as f32;
        header[HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        header[HEADER_MAX_LABELS] = self.max_labels as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fits_a_solar_system() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        // Sun, 8 planets, 7 moons, 2 rings.
        assert!(layout.max_mesh_instances >= 18);
        // 8 planet guides + 7 moon guides, 64 segments each, 2 vertices per segment.
        assert!(layout.max_line_vertices >= 15 * 64 * 2);
        assert!(layout.max_labels >= 15);
    }

    #[test]
    fn header_carries_capacities() {
        let layout = ProtocolLayout::new(10, 20, 5, 2, 8);
        let header = layout.header();
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_MAX_LINE_VERTICES], 20.0);
        assert_eq!(header[HEADER_MESH_COUNT], 0.0);
    }
}
