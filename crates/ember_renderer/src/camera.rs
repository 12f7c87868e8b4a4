//! Camera for primary ray generation.

use ember_core::CameraConfig;
use ember_math::{Quat, QuatExt, Vec2, Vec3};

/// Pinhole camera: a position and an orientation quaternion.
///
/// The view looks down local -Z with +Y up. Any change to the pose makes
/// previously accumulated samples stale; whoever moves the camera must
/// clear the engine's samples (the engine also checks this itself).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    rotation: Quat,

    /// Vertical field of view in radians
    fov_y: f32,
    /// Image-plane height at z = -1, `2 * tan(fov_y / 2)`
    screen_scale: f32,

    /// World units per second for [`translate`](Self::translate)
    pub move_speed: f32,
    /// Radians per second for [`rotate`](Self::rotate)
    pub rotation_speed: f32,
}

impl Camera {
    /// Field of view that puts a one-unit-tall image plane at z = -1.
    pub const DEFAULT_FOV_Y: f32 = 0.927_295_2; // 2 * atan(0.5)

    /// Create a new camera at `position` with orientation `rotation`.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            fov_y: Self::DEFAULT_FOV_Y,
            screen_scale: screen_scale(Self::DEFAULT_FOV_Y),
            move_speed: 8.0,
            rotation_speed: 1.0,
        }
    }

    /// Build a camera from config, facing down -Z.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(Vec3::from_array(config.position), Quat::IDENTITY)
            .with_fov(config.fov_degrees)
            .with_speeds(config.move_speed, config.rotation_speed)
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.set_fov_degrees(degrees);
        self
    }

    /// Set movement and rotation speeds.
    pub fn with_speeds(mut self, move_speed: f32, rotation_speed: f32) -> Self {
        self.move_speed = move_speed;
        self.rotation_speed = rotation_speed;
        self
    }

    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov_y = degrees.to_radians();
        self.screen_scale = screen_scale(self.fov_y);
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Replace the orientation. The quaternion is renormalized.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    /// Position and orientation, for detecting movement between frames.
    pub fn pose(&self) -> (Vec3, Quat) {
        (self.position, self.rotation)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    pub fn right(&self) -> Vec3 {
        self.rotation.right()
    }

    pub fn up(&self) -> Vec3 {
        self.rotation.up()
    }

    /// Move along `axis` by `move_speed * dt`.
    pub fn translate(&mut self, axis: Vec3, dt: f32) {
        self.position += axis * self.move_speed * dt;
    }

    /// Rotate about the world-space `axis` by `rotation_speed * dt` radians.
    ///
    /// Passing one of the camera's own axes gives pitch, yaw or roll.
    pub fn rotate(&mut self, axis: Vec3, dt: f32) {
        debug_assert!(axis.length_squared() > 0.0, "rotation axis must be non-zero");
        let delta = Quat::from_axis_angle(axis.normalize(), self.rotation_speed * dt);
        self.rotation = (delta * self.rotation).normalize();
    }

    /// Normalized screen coordinates of pixel `(x, y)` offset by `(dx, dy)`.
    ///
    /// The vertical axis spans [-0.5, 0.5] (up is positive); the horizontal
    /// axis is scaled by the aspect ratio.
    pub fn screen_point(&self, x: u32, y: u32, dx: f32, dy: f32, width: u32, height: u32) -> Vec2 {
        let w = width as f32;
        let h = height as f32;
        let aspect = w / h;

        Vec2::new(
            (x as f32 + dx - w * 0.5) / w * aspect,
            (h * 0.5 - y as f32 + dy) / h,
        )
    }

    /// World-space unit direction through a screen point.
    pub fn direction_through(&self, screen: Vec2) -> Vec3 {
        let view = Vec3::new(
            screen.x * self.screen_scale,
            screen.y * self.screen_scale,
            -1.0,
        );
        self.rotation.sandwich(view).normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

/// Height of the image plane at z = -1 for a vertical field of view.
#[inline]
fn screen_scale(fov_y: f32) -> f32 {
    2.0 * (fov_y / 2.0).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_default_camera_matches_config() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 1.0, -1.0));
        assert_eq!(camera.rotation(), Quat::IDENTITY);
        assert!((camera.fov_y() - Camera::DEFAULT_FOV_Y).abs() < 1e-4);
        assert!((camera.screen_scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::default();
        let screen = camera.screen_point(50, 50, 0.0, 0.0, 100, 100);
        assert_eq!(screen, Vec2::ZERO);
        assert!((camera.direction_through(screen) - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_screen_point_orientation() {
        let camera = Camera::default();

        // Top-left pixel is left (-x) and up (+y)
        let top_left = camera.screen_point(0, 0, 0.0, 0.0, 200, 100);
        assert!((top_left.x - -1.0).abs() < 1e-6);
        assert!((top_left.y - 0.5).abs() < 1e-6);

        let direction = camera.direction_through(top_left);
        assert!(direction.x < 0.0 && direction.y > 0.0 && direction.z < 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_default_fov_frames_unit_plane() {
        // Top edge of the screen sits at y = 0.5 on the z = -1 plane
        let camera = Camera::default();
        let d = camera.direction_through(Vec2::new(0.0, 0.5));
        assert!((d.y / -d.z - 0.5).abs() < 1e-4);

        let wide = Camera::default().with_fov(90.0);
        let d = wide.direction_through(Vec2::new(0.0, 0.5));
        assert!((d.y / -d.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_turns_rays() {
        let mut camera = Camera::default();
        camera.set_rotation(Quat::from_rotation_y(PI));
        let d = camera.direction_through(Vec2::ZERO);
        assert!((d - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_translate_and_rotate_use_speeds() {
        let mut camera = Camera::default().with_speeds(2.0, FRAC_PI_2);

        camera.translate(camera.forward(), 0.5);
        assert!((camera.position - Vec3::new(0.0, 1.0, -2.0)).length() < 1e-6);

        // One second of yaw at 90 deg/s turns forward from -Z to -X
        camera.rotate(camera.up(), 1.0);
        assert!((camera.forward() - Vec3::NEG_X).length() < 1e-5);
        assert!((camera.rotation().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "rotation axis must be non-zero")]
    fn test_rotate_rejects_zero_axis() {
        let mut camera = Camera::default();
        camera.rotate(Vec3::ZERO, 0.1);
    }

    #[test]
    fn test_pose_changes_on_move() {
        let mut camera = Camera::default();
        let before = camera.pose();
        camera.rotate(Vec3::X, 0.1);
        assert_ne!(before, camera.pose());
    }
}
