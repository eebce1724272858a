//! Built-in demo scenes.

use clap::ValueEnum;
use lux_math::Axis;
use lux_renderer::sampling::{gen_f32, gen_range_f32};
use lux_renderer::{
    make_box, random_color, BvhNode, CameraConfig, CheckerTexture, Color, ConstantMedium,
    Dielectric, DiffuseLight, Hittable, ImageTexture, Lambertian, Metal, NoiseTexture, Quad,
    Scene, Sphere, Texture, Vec3,
};
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;

/// Scenes the `lux` binary can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    Materials,
    RandomSpheres,
    TwoSpheres,
    Earth,
    PerlinSpheres,
    Quads,
    SimpleLight,
    CornellBox,
    CornellSmoke,
    Final,
}

/// Everything needed to render one demo.
pub struct DemoScene {
    pub world: Scene,
    /// Objects importance sampled as lights. Empty for sky-lit scenes.
    pub lights: Scene,
    pub camera: CameraConfig,
}

const SKY: Color = Color::new(0.70, 0.80, 1.00);

impl Demo {
    pub fn build(self, texture: &Path, rng: &mut dyn RngCore) -> DemoScene {
        match self {
            Demo::Materials => materials(),
            Demo::RandomSpheres => random_spheres(rng),
            Demo::TwoSpheres => two_spheres(),
            Demo::Earth => earth(texture),
            Demo::PerlinSpheres => perlin_spheres(rng),
            Demo::Quads => quads(),
            Demo::SimpleLight => simple_light(rng),
            Demo::CornellBox => cornell_box(),
            Demo::CornellSmoke => cornell_smoke(),
            Demo::Final => final_scene(texture, rng),
        }
    }
}

/// Camera used by the wide 16:9 sphere scenes.
fn wide_camera(look_from: Vec3, look_at: Vec3) -> CameraConfig {
    CameraConfig {
        aspect_ratio: 16.0 / 9.0,
        image_width: 400,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        look_from,
        look_at,
        vup: Vec3::Y,
        defocus_angle: 0.0,
        background: SKY,
        ..CameraConfig::default()
    }
}

fn cornell_camera(samples_per_pixel: u32) -> CameraConfig {
    CameraConfig {
        aspect_ratio: 1.0,
        image_width: 400,
        samples_per_pixel,
        max_depth: 50,
        background: Color::ZERO,
        vfov: 40.0,
        look_from: Vec3::new(278.0, 278.0, -800.0),
        look_at: Vec3::new(278.0, 278.0, 0.0),
        vup: Vec3::Y,
        defocus_angle: 0.0,
        ..CameraConfig::default()
    }
}

fn materials() -> DemoScene {
    let ground = Lambertian::new(Color::new(0.8, 0.8, 0.0));
    let center = Lambertian::new(Color::new(0.1, 0.2, 0.5));
    let glass = Arc::new(Dielectric::new(1.5));
    let gold = Metal::new(Color::new(0.8, 0.6, 0.2), 0.3);

    let mut world = Scene::new();
    world.push(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.push(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center));
    world.push(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Arc::clone(&glass)));
    // Hollow glass: the inner surface has a negative radius.
    world.push(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), -0.4, glass));
    world.push(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold));

    DemoScene {
        world,
        lights: Scene::new(),
        camera: CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 800,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 20.0,
            look_from: Vec3::new(-2.0, 2.0, 1.0),
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 10.0,
            focus_dist: 3.4,
            background: SKY,
        },
    }
}

fn random_spheres(rng: &mut dyn RngCore) -> DemoScene {
    let mut world = Scene::new();
    world.push(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::splat(0.5)),
    ));

    let glass = Arc::new(Dielectric::new(1.5));
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // diffuse, bouncing over the shutter interval
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let center2 = center + Vec3::new(0.0, gen_range_f32(rng, 0.0, 0.5), 0.0);
                world.push(Sphere::moving(center, center2, 0.2, Lambertian::new(albedo)));
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = gen_range_f32(rng, 0.0, 0.5);
                world.push(Sphere::new(center, 0.2, Metal::new(albedo, fuzz)));
            } else {
                world.push(Sphere::new(center, 0.2, Arc::clone(&glass)));
            }
        }
    }

    world.push(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.push(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1)),
    ));
    world.push(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Metal::new(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    DemoScene {
        world,
        lights: Scene::new(),
        camera: CameraConfig {
            samples_per_pixel: 40,
            max_depth: 40,
            defocus_angle: 0.6,
            focus_dist: 10.0,
            ..wide_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO)
        },
    }
}

fn two_spheres() -> DemoScene {
    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(
        0.8,
        Color::new(0.2, 0.3, 0.1),
        Color::splat(0.9),
    ));
    let surface = Arc::new(Lambertian::from_texture(checker));

    let mut world = Scene::new();
    world.push(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, Arc::clone(&surface)));
    world.push(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, surface));

    DemoScene {
        world,
        lights: Scene::new(),
        camera: wide_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO),
    }
}

fn earth(texture: &Path) -> DemoScene {
    let surface = Lambertian::from_texture(Arc::new(ImageTexture::open(texture)));
    let mut world = Scene::new();
    world.push(Sphere::new(Vec3::ZERO, 2.0, surface));

    DemoScene {
        world,
        lights: Scene::new(),
        camera: wide_camera(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO),
    }
}

/// Ground and a ball sharing one marble texture.
fn marble_spheres(world: &mut Scene, rng: &mut dyn RngCore) {
    let pertext: Arc<dyn Texture> = Arc::new(NoiseTexture::new(4.0, rng));
    let marble = Arc::new(Lambertian::from_texture(pertext));
    world.push(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::clone(&marble),
    ));
    world.push(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, marble));
}

fn perlin_spheres(rng: &mut dyn RngCore) -> DemoScene {
    let mut world = Scene::new();
    marble_spheres(&mut world, rng);

    DemoScene {
        world,
        lights: Scene::new(),
        camera: wide_camera(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO),
    }
}

fn quads() -> DemoScene {
    let left_red = Lambertian::new(Color::new(1.0, 0.2, 0.2));
    let back_green = Lambertian::new(Color::new(0.2, 1.0, 0.2));
    let right_blue = Lambertian::new(Color::new(0.2, 0.2, 1.0));
    let upper_orange = Lambertian::new(Color::new(1.0, 0.5, 0.0));
    let lower_teal = Lambertian::new(Color::new(0.2, 0.8, 0.8));

    let mut world = Scene::new();
    world.push(Quad::new(
        Vec3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        left_red,
    ));
    world.push(Quad::new(
        Vec3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    ));
    world.push(Quad::new(
        Vec3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        right_blue,
    ));
    world.push(Quad::new(
        Vec3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    ));
    world.push(Quad::new(
        Vec3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_teal,
    ));

    DemoScene {
        world,
        lights: Scene::new(),
        camera: CameraConfig {
            aspect_ratio: 1.0,
            vfov: 80.0,
            ..wide_camera(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO)
        },
    }
}

fn simple_light(rng: &mut dyn RngCore) -> DemoScene {
    let mut world = Scene::new();
    marble_spheres(&mut world, rng);

    let light = Arc::new(DiffuseLight::new(Color::splat(4.0)));
    let bulb: Arc<dyn Hittable> =
        Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, Arc::clone(&light)));
    let panel: Arc<dyn Hittable> = Arc::new(Quad::new(
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        light,
    ));

    let mut lights = Scene::new();
    for emitter in [bulb, panel] {
        world.add(Arc::clone(&emitter));
        lights.add(emitter);
    }

    DemoScene {
        world,
        lights,
        camera: CameraConfig {
            background: Color::ZERO,
            ..wide_camera(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0))
        },
    }
}

/// The two blocks standing in the Cornell box, already placed.
fn cornell_blocks(white: &Arc<Lambertian>) -> (Scene, Scene) {
    let mut tall = make_box(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), Arc::clone(white));
    tall.rotate(15.0, Axis::Y);
    tall.translate(Vec3::new(265.0, 0.0, 295.0));

    let mut short = make_box(Vec3::ZERO, Vec3::splat(165.0), Arc::clone(white));
    short.rotate(-18.0, Axis::Y);
    short.translate(Vec3::new(130.0, 0.0, 65.0));

    (tall, short)
}

/// Red, green and three white walls of the Cornell box.
fn cornell_walls(world: &mut Scene, white: &Arc<Lambertian>) {
    let red = Lambertian::new(Color::new(0.65, 0.05, 0.05));
    let green = Lambertian::new(Color::new(0.12, 0.45, 0.15));

    world.push(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    ));
    world.push(Quad::new(
        Vec3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    ));
    world.push(Quad::new(
        Vec3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        Arc::clone(white),
    ));
    world.push(Quad::new(
        Vec3::splat(555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        Arc::clone(white),
    ));
    world.push(Quad::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Arc::clone(white),
    ));
}

fn cornell_box() -> DemoScene {
    let white = Arc::new(Lambertian::new(Color::splat(0.73)));
    let light = Arc::new(DiffuseLight::new(Color::splat(30.0)));

    let mut world = Scene::new();
    cornell_walls(&mut world, &white);
    world.push(Quad::new(
        Vec3::new(213.0, 554.0, 227.0),
        Vec3::new(130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 105.0),
        Arc::clone(&light),
    ));

    let (tall, short) = cornell_blocks(&white);
    world.push(tall);
    world.push(short);

    // Same opening as the ceiling lamp, traversed from the opposite corner.
    let mut lights = Scene::new();
    lights.push(Quad::new(
        Vec3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    ));

    DemoScene {
        world,
        lights,
        camera: cornell_camera(200),
    }
}

fn cornell_smoke() -> DemoScene {
    let white = Arc::new(Lambertian::new(Color::splat(0.73)));
    let lamp: Arc<dyn Hittable> = Arc::new(Quad::new(
        Vec3::new(113.0, 554.0, 127.0),
        Vec3::new(330.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 305.0),
        DiffuseLight::new(Color::splat(7.0)),
    ));

    let mut world = Scene::new();
    world.add(Arc::clone(&lamp));
    cornell_walls(&mut world, &white);

    let (tall, short) = cornell_blocks(&white);
    world.push(ConstantMedium::new(Arc::new(tall), 0.01, Color::ZERO));
    world.push(ConstantMedium::new(Arc::new(short), 0.01, Color::ONE));

    let mut lights = Scene::new();
    lights.add(lamp);

    DemoScene {
        world,
        lights,
        camera: cornell_camera(100),
    }
}

fn final_scene(texture: &Path, rng: &mut dyn RngCore) -> DemoScene {
    let ground = Arc::new(Lambertian::new(Color::new(0.48, 0.83, 0.53)));
    let mut boxes1 = Scene::new();
    let boxes_per_side = 20;
    for i in 0..boxes_per_side {
        for j in 0..boxes_per_side {
            let w = 100.0;
            let x0 = -1000.0 + i as f32 * w;
            let z0 = -1000.0 + j as f32 * w;
            let y1 = gen_range_f32(rng, 1.0, 101.0);
            boxes1.push(make_box(
                Vec3::new(x0, 0.0, z0),
                Vec3::new(x0 + w, y1, z0 + w),
                Arc::clone(&ground),
            ));
        }
    }

    let mut world = Scene::new();
    let lamp: Arc<dyn Hittable> = Arc::new(Quad::new(
        Vec3::new(123.0, 554.0, 147.0),
        Vec3::new(300.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 265.0),
        DiffuseLight::new(Color::splat(7.0)),
    ));
    world.add(Arc::clone(&lamp));
    world.push(BvhNode::from_scene(&boxes1, rng));

    let center1 = Vec3::new(400.0, 400.0, 200.0);
    world.push(Sphere::moving(
        center1,
        center1 + Vec3::new(30.0, 0.0, 0.0),
        50.0,
        Lambertian::new(Color::new(0.7, 0.3, 0.1)),
    ));
    world.push(Sphere::new(Vec3::new(260.0, 150.0, 45.0), 50.0, Dielectric::new(1.5)));
    world.push(Sphere::new(
        Vec3::new(0.0, 150.0, 145.0),
        50.0,
        Metal::new(Color::new(0.8, 0.8, 0.9), 1.0),
    ));

    // Glass ball filled with blue haze, and thin mist over everything.
    let boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(360.0, 150.0, 145.0),
        70.0,
        Dielectric::new(1.5),
    ));
    world.add(Arc::clone(&boundary));
    world.push(ConstantMedium::new(boundary, 0.2, Color::new(0.2, 0.4, 0.9)));
    let mist: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 5000.0, Dielectric::new(1.5)));
    world.push(ConstantMedium::new(mist, 0.0001, Color::ONE));

    let globe = Lambertian::from_texture(Arc::new(ImageTexture::open(texture)));
    world.push(Sphere::new(Vec3::new(400.0, 200.0, 400.0), 100.0, globe));
    let pertext: Arc<dyn Texture> = Arc::new(NoiseTexture::new(0.1, rng));
    world.push(Sphere::new(
        Vec3::new(220.0, 280.0, 300.0),
        80.0,
        Lambertian::from_texture(pertext),
    ));

    let white = Arc::new(Lambertian::new(Color::splat(0.73)));
    let mut boxes2 = Scene::new();
    for _ in 0..1000 {
        let center = Vec3::new(
            gen_range_f32(rng, 0.0, 165.0),
            gen_range_f32(rng, 0.0, 165.0),
            gen_range_f32(rng, 0.0, 165.0),
        );
        boxes2.push(Sphere::new(center, 10.0, Arc::clone(&white)));
    }
    boxes2.rotate(15.0, Axis::Y);
    boxes2.translate(Vec3::new(-100.0, 270.0, 395.0));
    world.push(BvhNode::from_scene(&boxes2, rng));

    let mut lights = Scene::new();
    lights.add(lamp);

    DemoScene {
        world,
        lights,
        camera: CameraConfig {
            aspect_ratio: 1.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 4,
            background: Color::ZERO,
            vfov: 40.0,
            look_from: Vec3::new(478.0, 278.0, -600.0),
            look_at: Vec3::new(278.0, 278.0, 0.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            ..CameraConfig::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_every_demo_builds() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(0);
        for demo in Demo::value_variants() {
            let scene = demo.build(Path::new("does-not-exist.jpg"), &mut rng);
            assert!(!scene.world.is_empty(), "{demo:?}");
            assert!(scene.camera.image_width > 0);
        }
    }

    #[test]
    fn test_lit_demos_have_lights() {
        let mut rng = StdRng::seed_from_u64(0);
        for demo in [Demo::SimpleLight, Demo::CornellBox, Demo::CornellSmoke, Demo::Final] {
            let scene = demo.build(Path::new("does-not-exist.jpg"), &mut rng);
            assert!(!scene.lights.is_empty(), "{demo:?}");
            assert_eq!(scene.camera.background, Color::ZERO);
        }
    }

    #[test]
    fn test_cornell_blocks_are_placed() {
        let white = Arc::new(Lambertian::new(Color::splat(0.73)));
        let (tall, short) = cornell_blocks(&white);
        let tall_box = tall.bounding_box();
        assert!(tall_box.y.max > 329.0);
        assert!(tall_box.x.min > 260.0);
        assert!(short.bounding_box().z.min > 60.0 - 1e-3);
    }
}
