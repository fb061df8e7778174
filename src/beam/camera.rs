use glam::DMat4;

use super::geometry::Vec3;

/// Perspective camera projecting scene points onto surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_degrees: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    position: Vec3,
    view: DMat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            view: DMat4::IDENTITY,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Viewing direction in scene space.
    #[cfg(test)]
    pub fn forward(&self) -> Vec3 {
        self.view.inverse().transform_vector3(-Vec3::Z)
    }

    pub fn set_aspect(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Moves the camera without turning it.
    pub fn set_position(&mut self, position: Vec3) {
        let forward = self.view.inverse().transform_vector3(-Vec3::Z);
        self.position = position;
        self.view = DMat4::look_to_rh(position, forward, up_for(forward));
    }

    /// Orients the camera towards `target`, keeping scene +Y as "up".
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        self.view = DMat4::look_at_rh(self.position, target, up_for(forward));
    }

    pub fn projection(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Pixel position of `point` on a `width` × `height` surface, or `None`
    /// when it falls outside the near/far range.
    pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<(f64, f64)> {
        let eye = self.view.transform_point3(point);
        let depth = -eye.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let ndc = self.projection().project_point3(eye);
        Some(((ndc.x + 1.0) / 2.0 * width, (1.0 - ndc.y) / 2.0 * height))
    }
}

/// Scene +Y, unless the camera looks straight along it.
fn up_for(forward: Vec3) -> Vec3 {
    if forward.cross(Vec3::Y).length_squared() > 1e-12 {
        Vec3::Y
    } else {
        Vec3::Z
    }
}
