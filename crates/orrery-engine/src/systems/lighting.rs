/// Point lights plus a flat ambient term.
///
/// Lights are persistent: they stay until explicitly removed. The host
/// reads them once per frame for its lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, distance]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Cutoff distance; 0 means infinite.
    pub distance: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    /// - `pos`: World-space position
    /// - `color`: RGB color in [0..1]
    /// - `intensity`: Light strength multiplier
    /// - `distance`: Range in world units
    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, distance: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            distance,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }
}

/// Active lights and the ambient color for the scene.
///
/// Ambient defaults to white at full intensity, which renders lit materials
/// unshaded when no lights are present.
#[derive(Debug, Clone)]
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
    ambient_intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: [1.0, 1.0, 1.0],
            ambient_intensity: 1.0,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    /// Keep the first `max` lights. Returns `true` if any were dropped.
    pub fn truncate(&mut self, max: usize) -> bool {
        let overflow = self.lights.len() > max;
        self.lights.truncate(max);
        overflow
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set the ambient light color and its intensity.
    pub fn set_ambient(&mut self, color: [f32; 3], intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }

    /// Pointer to the lights data for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_new() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), [1.0, 1.0, 0.6], 1.5, 1000.0);
        assert_eq!(light.z, 3.0);
        assert_eq!(light.b, 0.6);
        assert_eq!(light.intensity, 1.5);
        assert_eq!(light.distance, 1000.0);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), PointLight::FLOATS * 4);
    }

    #[test]
    fn light_state_add_and_clear() {
        let mut state = LightState::new();
        state.add(PointLight::new(Vec3::ZERO, [1.0; 3], 1.0, 0.0));
        assert_eq!(state.count(), 1);
        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn truncate_keeps_the_first_lights() {
        let mut state = LightState::new();
        for i in 0..3 {
            state.add(PointLight::new(Vec3::new(i as f32, 0.0, 0.0), [1.0; 3], 1.0, 0.0));
        }
        assert!(state.truncate(2));
        assert_eq!(state.count(), 2);
        assert_eq!(state.iter().last().map(|l| l.x), Some(1.0));
        assert!(!state.truncate(2));
    }

    #[test]
    fn ambient_defaults_to_white() {
        let mut state = LightState::new();
        assert_eq!(state.ambient(), [1.0, 1.0, 1.0]);
        state.set_ambient([0.25, 0.25, 0.25], 0.5);
        assert_eq!(state.ambient_intensity(), 0.5);
    }
}
