use glam::{Mat4, Vec3};
use image::{Rgba, RgbaImage};
use rand::Rng;

pub const PRISM_COUNT: usize = 15;
pub const TEXTURE_SIZE: u32 = 256;
const CHECKER_CELL: u32 = 32;

/// Procedurally generated texture contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    BlackWhite,
    RedBlue,
    GreenYellow,
    SolidYellow,
}

impl Pattern {
    pub fn texel(self, x: u32, y: u32) -> [u8; 3] {
        let on = ((x / CHECKER_CELL) + (y / CHECKER_CELL)) % 2 == 1;
        let (c, inv) = if on { (1u8, 0u8) } else { (0u8, 1u8) };
        match self {
            Pattern::BlackWhite => [c * 255, c * 255, c * 255],
            Pattern::RedBlue => [c * 255, 0, inv * 255],
            Pattern::GreenYellow => [c * 255, 255, inv * 128],
            Pattern::SolidYellow => [255, 255, 0],
        }
    }

    pub fn generate(self, width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let [r, g, b] = self.texel(x, y);
            Rgba([r, g, b, 255])
        })
    }
}

/// How an object is shaded. Each variant maps to exactly one render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Per-vertex colour, no lighting.
    Flat,
    Diffuse,
    Specular,
    BlinnPhong,
    Textured { pattern: Pattern },
    /// Textured plane waving over time.
    Flag { pattern: Pattern },
    /// Always drawn on top of the scene.
    LightMarker { pattern: Pattern },
}

impl Material {
    pub fn pattern(&self) -> Option<Pattern> {
        match *self {
            Material::Textured { pattern }
            | Material::Flag { pattern }
            | Material::LightMarker { pattern } => Some(pattern),
            Material::Flat | Material::Diffuse | Material::Specular | Material::BlinnPhong => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Prism,
    Cube,
    Plane,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 2.0, 2.0),
            color: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub position: Vec3,
    pub scale: f32,
    pub color: Vec3,
    pub mesh: MeshKind,
    pub material: Material,
}

impl SceneObject {
    pub fn new(position: Vec3, color: Vec3, mesh: MeshKind, material: Material) -> Self {
        Self {
            position,
            scale: 1.0,
            color,
            mesh,
            material,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_scale(Vec3::new(self.scale, self.scale, self.scale))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    /// Present only in scenes that are lit.
    pub light: Option<PointLight>,
}

impl Scene {
    pub fn prism_field<R: Rng>(rng: &mut R) -> Self {
        let objects = (0..PRISM_COUNT)
            .map(|_| {
                let position = Vec3::new(
                    rng.gen_range(-10.0..=10.0),
                    rng.gen_range(-5.0..=5.0),
                    rng.gen_range(-10.0..=10.0),
                );
                let white = Vec3::new(1.0, 1.0, 1.0);
                SceneObject::new(position, white, MeshKind::Prism, Material::Flat)
            })
            .collect();
        Self {
            objects,
            light: None,
        }
    }

    pub fn lit_showcase() -> Self {
        let at = |x: f32| Vec3::new(x, 0.0, 0.0);
        let objects = vec![
            SceneObject::new(at(-4.0), Vec3::new(0.0, 0.0, 1.0), MeshKind::Cube, Material::Diffuse),
            SceneObject::new(
                at(-2.0),
                Vec3::new(1.0, 0.0, 0.0),
                MeshKind::Cube,
                Material::Specular,
            ),
            SceneObject::new(
                at(0.0),
                Vec3::new(0.0, 1.0, 0.0),
                MeshKind::Cube,
                Material::BlinnPhong,
            ),
            SceneObject::new(
                at(2.0),
                Vec3::new(1.0, 1.0, 0.0),
                MeshKind::Cube,
                Material::Textured { pattern: Pattern::RedBlue },
            ),
            SceneObject::new(
                at(4.0),
                Vec3::new(1.0, 0.0, 1.0),
                MeshKind::Plane,
                Material::Flag { pattern: Pattern::GreenYellow },
            ),
        ];
        Self {
            objects,
            light: Some(PointLight::default()),
        }
    }

    /// The marker drawn at the light's position, if the scene has a light.
    pub fn light_marker(&self) -> Option<SceneObject> {
        self.light.map(|light| SceneObject {
            position: light.position,
            scale: 0.2,
            color: light.color,
            mesh: MeshKind::Cube,
            material: Material::LightMarker { pattern: Pattern::SolidYellow },
        })
    }

    /// Scene objects followed by the light marker.
    pub fn drawables(&self) -> impl Iterator<Item = SceneObject> + '_ {
        self.objects.iter().copied().chain(self.light_marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn prism_field_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let scene = Scene::prism_field(&mut rng);
        assert_eq!(scene.objects.len(), PRISM_COUNT);
        assert!(scene.light.is_none());
        assert!(scene.light_marker().is_none());
        for object in &scene.objects {
            let [x, y, z]: [f32; 3] = object.position.into();
            assert!((-10.0..=10.0).contains(&x));
            assert!((-5.0..=5.0).contains(&y));
            assert!((-10.0..=10.0).contains(&z));
            assert_eq!(object.material, Material::Flat);
            assert_eq!(object.mesh, MeshKind::Prism);
        }
    }

    #[test]
    fn prism_field_is_reproducible_with_seed() {
        let a = Scene::prism_field(&mut StdRng::seed_from_u64(7));
        let b = Scene::prism_field(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn showcase_has_one_object_per_material() {
        let scene = Scene::lit_showcase();
        let materials: Vec<_> = scene.objects.iter().map(|o| o.material).collect();
        assert_eq!(
            materials,
            vec![
                Material::Diffuse,
                Material::Specular,
                Material::BlinnPhong,
                Material::Textured { pattern: Pattern::RedBlue },
                Material::Flag { pattern: Pattern::GreenYellow },
            ]
        );
        assert_eq!(scene.objects[4].mesh, MeshKind::Plane);
        let xs: Vec<f32> = scene
            .objects
            .iter()
            .map(|o| <[f32; 3]>::from(o.position)[0])
            .collect();
        assert_eq!(xs, vec![-4.0, -2.0, 0.0, 2.0, 4.0]);
    }

    #[test]
    fn light_marker_tracks_light() {
        let mut scene = Scene::lit_showcase();
        scene.light.as_mut().unwrap().position = Vec3::new(-1.0, 3.0, 0.5);
        let marker = scene.light_marker().unwrap();
        assert_eq!(marker.position, Vec3::new(-1.0, 3.0, 0.5));
        assert_eq!(marker.scale, 0.2);
        assert_eq!(marker.material.pattern(), Some(Pattern::SolidYellow));
        assert_eq!(scene.drawables().count(), 6);
    }

    #[test]
    fn model_matrix_scales_then_translates() {
        let mut object = SceneObject::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(1.0, 1.0, 1.0),
            MeshKind::Cube,
            Material::Diffuse,
        );
        object.scale = 0.5;
        let corner: [f32; 3] = object
            .model_matrix()
            .transform_point3(Vec3::new(1.0, 1.0, 1.0))
            .into();
        assert_abs_diff_eq!(corner[0], 1.5);
        assert_abs_diff_eq!(corner[1], 2.5);
        assert_abs_diff_eq!(corner[2], 3.5);
    }

    #[test]
    fn checker_cells_are_32_pixels() {
        let image = Pattern::RedBlue.generate(TEXTURE_SIZE, TEXTURE_SIZE);
        assert_eq!(image.dimensions(), (TEXTURE_SIZE, TEXTURE_SIZE));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(image.get_pixel(31, 31), &Rgba([0, 0, 255, 255]));
        assert_eq!(image.get_pixel(32, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(image.get_pixel(32, 32), &Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn pattern_palettes() {
        assert_eq!(Pattern::BlackWhite.texel(40, 0), [255, 255, 255]);
        assert_eq!(Pattern::GreenYellow.texel(0, 0), [0, 255, 128]);
        assert_eq!(Pattern::GreenYellow.texel(0, 32), [255, 255, 0]);
        assert_eq!(Pattern::SolidYellow.texel(99, 7), [255, 255, 0]);
    }

    #[test]
    fn generated_textures_are_opaque() {
        let patterns = [
            Pattern::BlackWhite,
            Pattern::RedBlue,
            Pattern::GreenYellow,
            Pattern::SolidYellow,
        ];
        for pattern in &patterns {
            let image = pattern.generate(64, 64);
            assert!(image.pixels().all(|p| p.0[3] == 255), "{:?}", pattern);
        }
    }

    #[test]
    fn only_textured_materials_have_patterns() {
        assert_eq!(Material::Flat.pattern(), None);
        assert_eq!(Material::BlinnPhong.pattern(), None);
        assert_eq!(
            Material::Flag { pattern: Pattern::RedBlue }.pattern(),
            Some(Pattern::RedBlue)
        );
    }
}
