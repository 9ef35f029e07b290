use clap::Parser;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    /// Randomly scattered vertex-coloured prisms.
    Prism,
    /// One object per lighting model plus a movable point light.
    Lit,
}

impl SceneKind {
    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Prism => "First-person camera",
            SceneKind::Lit => "Lighting and texturing",
        }
    }
}

/// First-person viewer over a small fixed scene.
#[derive(Parser, Debug)]
#[command(name = "fps-viewer", version)]
pub struct CliArgs {
    /// Scene to load.
    #[arg(value_enum, default_value = "prism")]
    pub scene: SceneKind,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 60.0, value_parser = positive_f32)]
    pub fov: f32,

    /// Movement speed in world units per second.
    #[arg(long, default_value_t = 5.0, value_parser = positive_f32)]
    pub speed: f32,

    /// Mouse look in radians per pixel.
    #[arg(long, default_value_t = 0.001, value_parser = positive_f32)]
    pub sensitivity: f32,

    /// Initial window width.
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Initial window height.
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

fn positive_f32(value: &str) -> Result<f32, String> {
    let parsed: f32 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if parsed.is_finite() && parsed > 0.0 {
        Ok(parsed)
    } else {
        Err(format!("`{}` must be a positive, finite number", value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov_step: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub camera_position: Vec3,
    pub camera_yaw: f32,
    pub camera_pitch: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scene: SceneKind::Prism,
            width: 1024,
            height: 768,
            fov: 60.0,
            move_speed: 5.0,
            mouse_sensitivity: 0.001,
            fov_step: 5.0,
            z_near: 0.1,
            z_far: 100.0,
            camera_position: Vec3::new(0.0, 0.0, 8.0),
            camera_yaw: 0.0,
            camera_pitch: 0.0,
        }
    }
}

impl From<CliArgs> for Settings {
    fn from(args: CliArgs) -> Self {
        Self {
            scene: args.scene,
            width: args.width,
            height: args.height,
            fov: args.fov,
            move_speed: args.speed,
            mouse_sensitivity: args.sensitivity,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(args: &[&str]) -> Result<Settings, clap::Error> {
        let argv = std::iter::once("fps-viewer").chain(args.iter().copied());
        CliArgs::try_parse_from(argv).map(Settings::from)
    }

    #[test]
    fn no_arguments_gives_defaults() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scene, SceneKind::Prism);
        assert_eq!(settings.camera_position, Vec3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn scene_and_overrides() {
        let settings = settings(&[
            "lit",
            "--fov",
            "75",
            "--speed",
            "2.5",
            "--sensitivity",
            "0.002",
        ])
        .unwrap();
        assert_eq!(settings.scene, SceneKind::Lit);
        assert_eq!(settings.fov, 75.0);
        assert_eq!(settings.move_speed, 2.5);
        assert_eq!(settings.mouse_sensitivity, 0.002);
        assert_eq!(settings.fov_step, 5.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(settings(&["maze"]).is_err());
        assert!(settings(&["--fov"]).is_err());
        assert!(settings(&["--speed", "fast"]).is_err());
        assert!(settings(&["--speed", "-1"]).is_err());
        assert!(settings(&["--fov", "0"]).is_err());
        assert!(settings(&["--sensitivity", "NaN"]).is_err());
        assert!(settings(&["--sensitivity", "inf"]).is_err());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
