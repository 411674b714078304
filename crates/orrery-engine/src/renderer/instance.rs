use bytemuck::{Pod, Zeroable};

/// Texture slot value meaning "no texture ready, use the base color".
pub const NO_TEXTURE: f32 = -1.0;

/// Bit flags packed into `MeshInstance::flags`.
pub mod mesh_flags {
    pub const UNLIT: u32 = 1;
    pub const DOUBLE_SIDED: u32 = 1 << 1;
    pub const TRANSPARENT: u32 = 1 << 2;
    /// Shape is a ring; otherwise a sphere.
    pub const RING: u32 = 1 << 3;
}

/// Per-mesh render data read by the TypeScript renderer.
/// Wire format: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major local-to-world matrix.
    pub model: [f32; 16],
    /// Base color RGB + opacity.
    pub color: [f32; 4],
    /// Texture id, or `NO_TEXTURE`.
    pub texture: f32,
    /// `mesh_flags` bits.
    pub flags: f32,
    /// Sphere radius, or ring inner radius.
    pub size_a: f32,
    /// Ring outer radius (0 for spheres).
    pub size_b: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One end of an orbit-guide line segment.
/// Wire format: 8 floats = 32 bytes stride; consumed as a LINES list.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub _pad: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 8;
}

/// Camera-facing text quad.
/// Wire format: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LabelInstance {
    pub position: [f32; 3],
    /// Orientation quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    pub width: f32,
    pub height: f32,
    /// Texture id holding the rasterized text, or `NO_TEXTURE`.
    pub texture: f32,
    pub opacity: f32,
    pub _pad: f32,
}

impl LabelInstance {
    pub const FLOATS: usize = 12;
}

/// Everything the host draws for one frame.
///
/// Meshes are ordered opaque first; `transparent_start` marks where the
/// blended meshes (rings) begin so the host can draw them last.
#[derive(Debug, Default)]
pub struct RenderBuffer {
    pub meshes: Vec<MeshInstance>,
    pub transparent_start: u32,
    pub lines: Vec<LineVertex>,
    pub labels: Vec<LabelInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 4096, 32)
    }

    pub fn with_capacity(meshes: usize, line_vertices: usize, labels: usize) -> Self {
        Self {
            meshes: Vec::with_capacity(meshes),
            transparent_start: 0,
            lines: Vec::with_capacity(line_vertices),
            labels: Vec::with_capacity(labels),
        }
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
        self.transparent_start = 0;
        self.lines.clear();
        self.labels.clear();
    }

    /// Drop whatever does not fit the given capacities. Line vertices are
    /// cut to whole segments. Returns `true` if anything was dropped.
    pub fn truncate(&mut self, max_meshes: usize, max_line_vertices: usize, max_labels: usize) -> bool {
        let overflow = self.meshes.len() > max_meshes
            || self.lines.len() > max_line_vertices
            || self.labels.len() > max_labels;
        self.meshes.truncate(max_meshes);
        self.transparent_start = self.transparent_start.min(self.meshes.len() as u32);
        self.lines.truncate(max_line_vertices & !1);
        self.labels.truncate(max_labels);
        overflow
    }

    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn label_count(&self) -> u32 {
        self.labels.len() as u32
    }

    /// Raw pointers for zero-copy reads from JS.
    pub fn meshes_ptr(&self) -> *const f32 {
        self.meshes.as_ptr() as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }

    pub fn labels_ptr(&self) -> *const f32 {
        self.labels.as_ptr() as *const f32
    }
}
