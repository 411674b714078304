use glam::Vec3;
use crate::components::mesh::Rgb;

/// Closed circular guide in the local XZ plane, centered on the entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPathComponent {
    pub radius: f32,
    pub segments: u32,
    pub color: Rgb,
    pub opacity: f32,
}

impl OrbitPathComponent {
    pub const DEFAULT_SEGMENTS: u32 = 64;

    pub fn new(radius: f32, color: Rgb) -> Self {
        Self {
            radius,
            segments: Self::DEFAULT_SEGMENTS,
            color,
            opacity: 0.3,
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(3);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sample the circle: `segments + 1` points, the last one closing the loop.
    pub fn points(&self, center: Vec3) -> Vec<Vec3> {
        (0..=self.segments)
            .map(|i| {
                let theta = i as f32 / self.segments as f32 * std::f32::consts::TAU;
                center + Vec3::new(theta.cos() * self.radius, 0.0, theta.sin() * self.radius)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_close_the_loop() {
        let path = OrbitPathComponent::new(10.0, Rgb::from_hex(0x888888));
        let pts = path.points(Vec3::ZERO);
        assert_eq!(pts.len(), 65);
        assert!((pts[0] - pts[64]).length() < 1e-4);
    }

    #[test]
    fn points_lie_on_radius_around_center() {
        let center = Vec3::new(20.0, 0.0, 5.0);
        let path = OrbitPathComponent::new(2.0, Rgb::WHITE).with_segments(16);
        for p in path.points(center) {
            assert!(((p - center).length() - 2.0).abs() < 1e-4);
            assert_eq!(p.y, 0.0);
        }
    }
}
