//! Projection of flat plot coordinates into screen space for pseudo-3D layouts.

use glam::{DMat4, DVec3};

/// Maps a point in the 3-D plot box to screen coordinates.
///
/// The returned `z` is the depth used for painter's ordering: larger values are
/// farther from the viewer.
pub trait Projector {
    fn project(&self, point: DVec3) -> DVec3;
}

impl<F> Projector for F
where
    F: Fn(DVec3) -> DVec3,
{
    fn project(&self, point: DVec3) -> DVec3 {
        self(point)
    }
}

/// Projector that leaves plot coordinates untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjector;

impl Projector for IdentityProjector {
    fn project(&self, point: DVec3) -> DVec3 {
        point
    }
}

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// A camera looking at the plot box, projecting onto a viewport.
#[derive(Debug, Clone)]
pub struct CameraProjector {
    /// Camera position in plot space.
    pub position: DVec3,
    /// Point the camera is looking at.
    pub target: DVec3,
    /// Up vector.
    pub up: DVec3,
    /// Vertical field of view in radians.
    pub fov: f64,
    /// Near clipping plane.
    pub near: f64,
    /// Far clipping plane.
    pub far: f64,
    /// Half-height of the orthographic view volume.
    pub ortho_scale: f64,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Viewport width in plot units.
    pub width: f64,
    /// Viewport height in plot units.
    pub height: f64,
}

impl CameraProjector {
    /// Creates a perspective camera framing a `width` × `height` × `depth` plot box.
    ///
    /// The camera sits in front of the box, looking at its center.
    pub fn framing(width: f64, height: f64, depth: f64) -> Self {
        let target = DVec3::new(width * 0.5, height * 0.5, depth * 0.5);
        let size = DVec3::new(width, height, depth).length();
        Self {
            position: target - DVec3::new(0.0, 0.0, size * 1.5),
            target,
            up: DVec3::NEG_Y,
            fov: std::f64::consts::FRAC_PI_4,
            near: size * 0.001,
            far: size * 100.0,
            ortho_scale: height.max(width) * 0.6,
            projection_mode: ProjectionMode::Perspective,
            width,
            height,
        }
    }

    /// Orbits the camera around the target.
    pub fn orbit(&mut self, delta_x: f64, delta_y: f64) {
        let offset = self.position - self.target;
        let radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).acos();

        theta -= delta_x;
        phi = (phi - delta_y).clamp(0.01, std::f64::consts::PI - 0.01);

        self.position = self.target
            + DVec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }

    /// Sets the projection mode.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        let aspect_ratio = if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        };
        match self.projection_mode {
            ProjectionMode::Perspective => {
                DMat4::perspective_rh(self.fov, aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * aspect_ratio;
                DMat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }
}

impl Projector for CameraProjector {
    fn project(&self, point: DVec3) -> DVec3 {
        let view = self.view_matrix().transform_point3(point);
        let ndc = self.projection_matrix().project_point3(view);
        DVec3::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
            // distance along the view direction
            -view.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(IdentityProjector.project(p), p);
    }

    #[test]
    fn test_closure_projector() {
        let proj = |p: DVec3| DVec3::new(p.x * 2.0, p.y, p.z);
        assert_eq!(proj.project(DVec3::ONE), DVec3::new(2.0, 1.0, 1.0));
    }

    #[test]
    fn test_camera_centers_target() {
        let camera = CameraProjector::framing(200.0, 100.0, 50.0);
        let center = camera.project(camera.target);
        assert!((center.x - 100.0).abs() < 1e-6);
        assert!((center.y - 50.0).abs() < 1e-6);
        assert!(center.z > 0.0);
    }

    #[test]
    fn test_camera_depth_grows_away_from_viewer() {
        let camera = CameraProjector::framing(100.0, 100.0, 100.0);
        let near = camera.project(DVec3::new(50.0, 50.0, 0.0));
        let far = camera.project(DVec3::new(50.0, 50.0, 100.0));
        assert!(far.z > near.z);
    }

    #[test]
    fn test_orbit_keeps_radius() {
        let mut camera = CameraProjector::framing(100.0, 100.0, 100.0);
        let radius = (camera.position - camera.target).length();
        camera.orbit(0.3, 0.2);
        assert!(((camera.position - camera.target).length() - radius).abs() < 1e-9);
    }
}
