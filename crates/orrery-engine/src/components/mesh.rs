use crate::assets::registry::TextureId;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB literal.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry primitive, in the entity's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane, facing +Z.
    Ring { inner_radius: f32, outer_radius: f32 },
}

/// Surface description handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color, used as-is when no texture is ready.
    pub color: Rgb,
    pub texture: Option<TextureId>,
    pub opacity: f32,
    pub transparent: bool,
    pub double_sided: bool,
    /// Fragments with texture alpha below this are discarded (0 disables).
    pub alpha_test: f32,
    /// Ignore scene lights (the sun is self-lit).
    pub unlit: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            texture: None,
            opacity: 1.0,
            transparent: false,
            double_sided: false,
            alpha_test: 0.0,
            unlit: false,
        }
    }
}

impl Material {
    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Mark as blended with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn with_alpha_test(mut self, alpha_test: f32) -> Self {
        self.alpha_test = alpha_test;
        self
    }

    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }
}

/// Renderable solid geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(shape: MeshShape, material: Material) -> Self {
        Self { shape, material }
    }

    pub fn sphere(radius: f32, material: Material) -> Self {
        Self::new(MeshShape::Sphere { radius }, material)
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, material: Material) -> Self {
        Self::new(MeshShape::Ring { inner_radius, outer_radius }, material)
    }

    /// Bounding radius in local units.
    pub fn bounding_radius(&self) -> f32 {
        match self.shape {
            MeshShape::Sphere { radius } => radius,
            MeshShape::Ring { outer_radius, .. } => outer_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_decodes() {
        let c = Rgb::from_hex(0xffff99);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 1.0);
        assert!((c.b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn opacity_below_one_is_transparent() {
        assert!(Material::default().with_opacity(0.3).transparent);
        assert!(!Material::default().with_opacity(1.0).transparent);
    }

    #[test]
    fn ring_bounds_by_outer_radius() {
        let ring = MeshComponent::ring(1.5, 2.5, Material::default());
        assert_eq!(ring.bounding_radius(), 2.5);
    }
}
