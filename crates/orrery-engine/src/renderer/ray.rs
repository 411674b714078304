use glam::Vec3;

/// Half-line used for pointer picking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; the direction is normalized (zero stays zero).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first sphere surface hit in front of the origin.
    /// From inside the sphere this is the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        (far >= 0.0).then_some(far)
    }

    /// Distance to a flat annulus (both faces) around `center` with plane normal `normal`.
    pub fn intersect_annulus(
        &self,
        center: Vec3,
        normal: Vec3,
        inner_radius: f32,
        outer_radius: f32,
    ) -> Option<f32> {
        let denom = normal.dot(self.direction);
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (center - self.origin).dot(normal) / denom;
        if t < 0.0 {
            return None;
        }
        let dist = (self.at(t) - center).length();
        (dist >= inner_radius && dist <= outer_radius).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_from_outside() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn sphere_off_axis_is_missed() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn annulus_hit_only_between_radii() {
        let down = Vec3::NEG_Y;
        let through_ring = Ray::new(Vec3::new(2.0, 5.0, 0.0), down);
        let through_hole = Ray::new(Vec3::new(1.0, 5.0, 0.0), down);
        assert!(through_ring.intersect_annulus(Vec3::ZERO, Vec3::Y, 1.5, 2.5).is_some());
        assert!(through_hole.intersect_annulus(Vec3::ZERO, Vec3::Y, 1.5, 2.5).is_none());
    }
}
