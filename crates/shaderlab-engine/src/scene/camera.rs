use glam::{Mat4, Vec3};

/// Perspective camera parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +Z.
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 1.0,
        }
    }
}

/// Camera on the view axis looking at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    config: CameraConfig,
    aspect: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        let aspect = sanitize_aspect(aspect);
        Self {
            config,
            aspect,
            projection: projection(&config, aspect),
        }
    }

    #[inline]
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the aspect ratio and recomputes the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
        self.projection = projection(&self.config, self.aspect);
    }

    #[inline]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.config.distance)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}

fn projection(config: &CameraConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        config.fov_y_degrees.to_radians(),
        aspect,
        config.near,
        config.far,
    )
}

// glam asserts on a zero or negative aspect.
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_camera() {
        let c = CameraConfig::default();
        assert_eq!(c.fov_y_degrees, 75.0);
        assert_eq!(c.near, 0.1);
        assert_eq!(c.far, 1000.0);
        assert_eq!(c.distance, 1.0);
    }

    #[test]
    fn set_aspect_recomputes_projection() {
        let mut cam = PerspectiveCamera::new(CameraConfig::default(), 1.0);
        let before = cam.projection();
        cam.set_aspect(1920.0 / 1080.0);
        assert_eq!(cam.aspect(), 1920.0 / 1080.0);
        assert_ne!(cam.projection(), before);
        assert_eq!(
            cam.projection(),
            PerspectiveCamera::new(CameraConfig::default(), 1920.0 / 1080.0).projection()
        );
    }

    #[test]
    fn x_scale_follows_aspect() {
        let cam = PerspectiveCamera::new(CameraConfig::default(), 2.0);
        let p = cam.projection();
        // x_axis.x = f / aspect, y_axis.y = f.
        assert!((p.y_axis.y / p.x_axis.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = PerspectiveCamera::new(CameraConfig::default(), 0.0);
        assert_eq!(cam.aspect(), 1.0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect(), 1.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(CameraConfig::default(), 16.0 / 9.0);
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
