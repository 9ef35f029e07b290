use glam::{Mat4, Vec3};
use std::f32::consts::PI;
use crate::input::MovementKeys;

/// Pitch never leaves [-PITCH_LIMIT, PITCH_LIMIT] so the view cannot flip over.
pub const PITCH_LIMIT: f32 = 89.0 * PI / 180.0;

pub const MIN_FOV: f32 = 10.0;
pub const MAX_FOV: f32 = 120.0;

/// First-person camera in a right-handed, Y-up world.
///
/// With `yaw == 0` and `pitch == 0` the camera looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pitch: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Right axis on the horizontal plane. Pitch does not tilt it.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Camera-to-world transform: pitch first, then yaw, then translation.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.yaw)
            * Mat4::from_rotation_x(self.pitch)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw -= dx * sensitivity;
        self.pitch = clamp_pitch(self.pitch + dy * sensitivity);
    }

    /// Forward/back follow the pitched forward vector, so looking up while
    /// walking forward climbs. Strafing stays on the horizontal plane.
    pub fn apply_movement(&mut self, keys: &MovementKeys, speed: f32, dt: f32) {
        let step = speed * dt;
        let forward = self.forward();
        let right = self.right();
        if keys.forward {
            self.position += forward * step;
        }
        if keys.back {
            self.position -= forward * step;
        }
        if keys.left {
            self.position -= right * step;
        }
        if keys.right {
            self.position += right * step;
        }
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.max(-PITCH_LIMIT).min(PITCH_LIMIT)
}

/// Perspective projection with a field of view kept in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub aspect_ratio: f32,
    fov: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, fov: f32, z_near: f32, z_far: f32) -> Self {
        let mut projection = Self {
            aspect_ratio: 1.0,
            fov: fov.max(MIN_FOV).min(MAX_FOV),
            z_near,
            z_far,
        };
        projection.resize(width, height);
        projection
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if height != 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn zoom(&mut self, step: f32) {
        self.fov = (self.fov + step).max(MIN_FOV).min(MAX_FOV);
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.z_near, self.z_far)
    }
}
