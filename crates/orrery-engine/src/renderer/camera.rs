use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::renderer::ray::Ray;

/// Perspective camera looking from `position` toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Point the camera looks at (kept in sync by `OrbitControls`).
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_deg: 75.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            ..Default::default()
        }
    }

    /// Update aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        let dir = self.target - self.position;
        if dir.length_squared() < 1e-12 {
            Vec3::NEG_Z
        } else {
            dir.normalize()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // look_at degenerates when looking straight along `up`.
        let up = if forward.cross(self.up).length_squared() < 1e-10 {
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_to_rh(self.position, forward, up)
    }

    /// WebGL-style projection (clip z in [-1, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }

    /// Project a world point to NDC; `None` if it is behind the camera.
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }
}

/// Drag-to-orbit / wheel-to-zoom controls circling a target point.
///
/// Input only accumulates deltas; `update` applies them to the camera once
/// per frame, after any follow logic has moved the target.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Multiplier on drag rotation (1.0 = half a turn per viewport width).
    pub rotate_speed: f32,
    /// Per-wheel-tick dolly factor (< 1.0).
    pub zoom_step: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 0.5,
            max_distance: 500.0,
            rotate_speed: 1.0,
            zoom_step: 0.95,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }
}

impl OrbitControls {
    const MIN_POLAR: f32 = 1e-3;

    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Orbit by a pointer delta in NDC (x right, y up).
    pub fn rotate_by_ndc(&mut self, delta: Vec2) {
        let k = std::f32::consts::PI * self.rotate_speed;
        self.pending_theta -= delta.x * k;
        self.pending_phi += delta.y * k;
    }

    /// Dolly in (negative delta) or out (positive delta).
    pub fn zoom(&mut self, delta: f32) {
        if delta > 0.0 {
            self.pending_scale /= self.zoom_step;
        } else if delta < 0.0 {
            self.pending_scale *= self.zoom_step;
        }
    }

    fn is_idle(&self) -> bool {
        self.pending_theta == 0.0 && self.pending_phi == 0.0 && self.pending_scale == 1.0
    }

    /// Apply pending input and aim the camera at the target.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let radius = offset.length();
        let in_range = radius >= self.min_distance && radius <= self.max_distance;

        if self.is_idle() && in_range {
            camera.target = self.target;
            return;
        }

        let offset = if radius < 1e-6 { Vec3::Z * self.min_distance } else { offset };
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.pending_theta;
        phi = (phi + self.pending_phi).clamp(Self::MIN_POLAR, std::f32::consts::PI - Self::MIN_POLAR);
        let radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;

        let sin_phi = phi.sin();
        camera.position = self.target
            + Vec3::new(radius * sin_phi * theta.sin(), radius * phi.cos(), radius * sin_phi * theta.cos());
        camera.target = self.target;
    }
}
