/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera with +Z up that always looks at `target`
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, -500.0, 650.0),
            target: Point3::origin(),
            up: Vector3::z(),
            fov: std::f32::consts::PI / 4.0, // 45 degrees
            aspect: aspect_ratio(width, height),
            near: 1.0,
            far: 1000.0,
        }
    }

    /// Move the camera and re-aim it at the origin
    pub fn look_at_origin(&mut self, position: Point3<f32>) {
        self.position = position;
        self.target = Point3::origin();
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with `depth` in NDC. Points behind the camera or
    /// outside the near/far range yield `None`; points off the sides of the
    /// screen are returned so callers can clip lines and triangles themselves.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = self.view_projection() * point.to_homogeneous();

        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(400, 350)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.up, Vector3::z());
        assert_eq!(camera.target, Point3::origin());
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_centre() {
        let mut camera = Camera::new(400, 300);
        camera.look_at_origin(Point3::new(120.0, -300.0, 400.0));
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), 400, 300)
            .unwrap();
        assert!((x - 200.0).abs() < 1e-2);
        assert!((y - 150.0).abs() < 1e-2);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_rejected() {
        let mut camera = Camera::new(400, 300);
        camera.look_at_origin(Point3::new(0.0, -100.0, 0.0));
        assert!(camera
            .project_to_screen(&Point3::new(0.0, -200.0, 0.0), 400, 300)
            .is_none());
    }

    #[test]
    fn test_zero_height_viewport() {
        let mut camera = Camera::default();
        camera.set_viewport(640, 0);
        assert!(camera.aspect.is_finite());
    }

    #[test]
    fn test_zero_width_viewport_still_projects() {
        let mut camera = Camera::default();
        camera.set_viewport(0, 600);
        assert!(camera.aspect > 0.0);
        assert!(camera.view_projection().iter().all(|v| v.is_finite()));
    }
}
