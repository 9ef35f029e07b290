use crate::camera::{Camera, Projection};
use crate::input::{CursorTracker, MovementKeys};
use crate::scene::PointLight;
use glam::Vec3;
use winit::event::VirtualKeyCode;

pub const DEFAULT_FOV_STEP: f32 = 5.0;

/// What the movement keys currently drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTarget {
    Camera,
    Light,
}

impl ControlTarget {
    pub fn toggle(self) -> Self {
        match self {
            ControlTarget::Camera => ControlTarget::Light,
            ControlTarget::Light => ControlTarget::Camera,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controller {
    pub target: ControlTarget,
    pub speed: f32,
    pub sensitivity: f32,
    /// Degrees added or removed per zoom key press.
    pub fov_step: f32,
}

impl Controller {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            target: ControlTarget::Camera,
            speed,
            sensitivity,
            fov_step: DEFAULT_FOV_STEP,
        }
    }

    pub fn with_fov_step(mut self, fov_step: f32) -> Self {
        self.fov_step = fov_step;
        self
    }

    /// Switches the target. Without a light there is nothing to switch to.
    pub fn toggle_target(&mut self, light: Option<&PointLight>) -> ControlTarget {
        if light.is_some() {
            self.target = self.target.toggle();
        }
        self.target
    }

    /// Handles the non-movement keys on press. Returns whether the key was used.
    pub fn key_pressed(
        &mut self,
        key: VirtualKeyCode,
        projection: &mut Projection,
        light: Option<&PointLight>,
    ) -> bool {
        match key {
            VirtualKeyCode::L => {
                let target = self.toggle_target(light);
                log::debug!("movement now drives {:?}", target);
            }
            VirtualKeyCode::Equals | VirtualKeyCode::Plus | VirtualKeyCode::NumpadAdd => {
                projection.zoom(self.fov_step);
                log::debug!("fov {}", projection.fov());
            }
            VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => {
                projection.zoom(-self.fov_step);
                log::debug!("fov {}", projection.fov());
            }
            _ => return false,
        }
        true
    }

    pub fn update(
        &self,
        camera: &mut Camera,
        light: Option<&mut PointLight>,
        keys: &MovementKeys,
        dt: f32,
    ) {
        if !keys.any() {
            return;
        }
        match (self.target, light) {
            (ControlTarget::Light, Some(light)) => {
                light.position += light_direction(keys) * (self.speed * dt);
            }
            _ => camera.apply_movement(keys, self.speed, dt),
        }
    }

    /// The tracker is always fed so the reference position never goes stale
    /// while the light is being moved.
    pub fn mouse_moved(&self, camera: &mut Camera, tracker: &mut CursorTracker, x: f64, y: f64) {
        if let Some((dx, dy)) = tracker.sample(x, y) {
            if self.target == ControlTarget::Camera {
                camera.apply_mouse_delta(dx as f32, dy as f32, self.sensitivity);
            }
        }
    }
}

// World-axis movement: W/S along -Z/+Z, A/D along -X/+X, Space/C along +Y/-Y.
fn light_direction(keys: &MovementKeys) -> Vec3 {
    let axis = |positive: bool, negative: bool| {
        (positive as i32 - negative as i32) as f32
    };
    Vec3::new(
        axis(keys.right, keys.left),
        axis(keys.up, keys.down),
        axis(keys.back, keys.forward),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 8.0), 0.0, 0.0)
    }

    #[test]
    fn toggle_needs_a_light() {
        let mut controller = Controller::new(5.0, 0.001);
        assert_eq!(controller.toggle_target(None), ControlTarget::Camera);
        let light = PointLight::default();
        assert_eq!(controller.toggle_target(Some(&light)), ControlTarget::Light);
        assert_eq!(controller.toggle_target(Some(&light)), ControlTarget::Camera);
    }

    #[test]
    fn zoom_keys_step_fov() {
        let mut controller = Controller::new(5.0, 0.001);
        let mut projection = Projection::new(1024, 768, 60.0, 0.1, 100.0);
        assert!(controller.key_pressed(VirtualKeyCode::Equals, &mut projection, None));
        assert_eq!(projection.fov(), 65.0);
        assert!(controller.key_pressed(VirtualKeyCode::NumpadAdd, &mut projection, None));
        assert_eq!(projection.fov(), 70.0);
        assert!(controller.key_pressed(VirtualKeyCode::Minus, &mut projection, None));
        assert!(controller.key_pressed(VirtualKeyCode::NumpadSubtract, &mut projection, None));
        assert!(controller.key_pressed(VirtualKeyCode::Minus, &mut projection, None));
        assert_eq!(projection.fov(), 55.0);

        let mut wide = controller.with_fov_step(10.0);
        wide.key_pressed(VirtualKeyCode::Equals, &mut projection, None);
        assert_eq!(projection.fov(), 65.0);
    }

    #[test]
    fn zoom_keys_respect_fov_limits() {
        let mut controller = Controller::new(5.0, 0.001);
        let mut projection = Projection::new(1024, 768, 115.0, 0.1, 100.0);
        controller.key_pressed(VirtualKeyCode::Equals, &mut projection, None);
        controller.key_pressed(VirtualKeyCode::Equals, &mut projection, None);
        assert_eq!(projection.fov(), 120.0);
    }

    #[test]
    fn light_key_toggles_only_with_a_light() {
        let mut controller = Controller::new(5.0, 0.001);
        let mut projection = Projection::new(1024, 768, 60.0, 0.1, 100.0);

        let prisms = Scene::prism_field(&mut StdRng::seed_from_u64(1));
        assert!(controller.key_pressed(VirtualKeyCode::L, &mut projection, prisms.light.as_ref()));
        assert_eq!(controller.target, ControlTarget::Camera);

        let lit = Scene::lit_showcase();
        controller.key_pressed(VirtualKeyCode::L, &mut projection, lit.light.as_ref());
        assert_eq!(controller.target, ControlTarget::Light);
        controller.key_pressed(VirtualKeyCode::L, &mut projection, lit.light.as_ref());
        assert_eq!(controller.target, ControlTarget::Camera);
        assert_eq!(projection.fov(), 60.0);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut controller = Controller::new(5.0, 0.001);
        let mut projection = Projection::new(1024, 768, 60.0, 0.1, 100.0);
        let light = PointLight::default();
        assert!(!controller.key_pressed(VirtualKeyCode::Q, &mut projection, Some(&light)));
        assert_eq!(controller, Controller::new(5.0, 0.001));
        assert_eq!(projection.fov(), 60.0);
    }

    #[test]
    fn light_moves_along_world_axes() {
        let mut controller = Controller::new(5.0, 0.001);
        controller.target = ControlTarget::Light;
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 8.0), 1.0, 0.5);
        let mut light = PointLight::default();

        let keys = MovementKeys {
            forward: true,
            right: true,
            up: true,
            ..MovementKeys::default()
        };
        controller.update(&mut camera, Some(&mut light), &keys, 0.5);
        let [x, y, z]: [f32; 3] = light.position.into();
        assert_abs_diff_eq!(x, 4.5);
        assert_abs_diff_eq!(y, 4.5);
        assert_abs_diff_eq!(z, -0.5);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 8.0));

        let keys = MovementKeys {
            back: true,
            left: true,
            down: true,
            ..MovementKeys::default()
        };
        controller.update(&mut camera, Some(&mut light), &keys, 0.5);
        assert_eq!(light.position, PointLight::default().position);
    }

    #[test]
    fn camera_mode_ignores_vertical_keys() {
        let controller = Controller::new(5.0, 0.001);
        let mut camera = camera();
        let mut light = PointLight::default();
        let keys = MovementKeys {
            up: true,
            down: false,
            ..MovementKeys::default()
        };
        controller.update(&mut camera, Some(&mut light), &keys, 1.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 8.0));
        assert_eq!(light, PointLight::default());
    }

    #[test]
    fn camera_mode_walks_camera() {
        let controller = Controller::new(5.0, 0.001);
        let mut camera = camera();
        let keys = MovementKeys {
            forward: true,
            ..MovementKeys::default()
        };
        controller.update(&mut camera, None, &keys, 1.0);
        let [x, y, z]: [f32; 3] = camera.position.into();
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(y, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(z, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn first_mouse_sample_does_not_rotate() {
        let controller = Controller::new(5.0, 0.001);
        let mut camera = camera();
        let mut tracker = CursorTracker::new();
        controller.mouse_moved(&mut camera, &mut tracker, 5000.0, -3000.0);
        assert_eq!(camera, self::camera());
        controller.mouse_moved(&mut camera, &mut tracker, 5100.0, -3050.0);
        assert_abs_diff_eq!(camera.yaw, -0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(camera.pitch(), 0.05, epsilon = 1e-6);
    }

    #[test]
    fn mouse_look_is_suspended_in_light_mode() {
        let mut controller = Controller::new(5.0, 0.001);
        let mut camera = camera();
        let mut tracker = CursorTracker::new();
        controller.mouse_moved(&mut camera, &mut tracker, 0.0, 0.0);

        controller.target = ControlTarget::Light;
        controller.mouse_moved(&mut camera, &mut tracker, 400.0, 400.0);
        assert_eq!(camera, self::camera());

        // Switching back must not replay the motion made while moving the light.
        controller.target = ControlTarget::Camera;
        controller.mouse_moved(&mut camera, &mut tracker, 410.0, 400.0);
        assert_abs_diff_eq!(camera.yaw, -0.01, epsilon = 1e-6);
        assert_eq!(camera.pitch(), 0.0);
    }
}
