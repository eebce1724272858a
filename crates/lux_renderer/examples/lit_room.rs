//! Minimal use of the library: a small lit room written to `lit_room.ppm`.
//!
//! Run with `RUST_LOG=debug` to see BVH statistics and bucket progress.

use lux_renderer::{
    make_box, render, write_ppm, Axis, BvhNode, Camera, Color, ConstantMedium, Dielectric,
    DiffuseLight, Hittable, Lambertian, Metal, Quad, RenderConfig, RenderResult, Scene, Sphere,
    Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

fn main() -> RenderResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(2024);
    let (world, lights) = build_scene();
    let world = BvhNode::from_scene(&world, &mut rng);

    let mut camera = Camera::new()
        .with_resolution(320, 16.0 / 9.0)
        .with_quality(64, 12)
        .with_position(Vec3::new(0.0, 1.5, 6.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_lens(45.0, 0.0, 6.0)
        .with_background(Color::ZERO);
    camera.initialize();

    let image = render(&camera, &world, &lights, &RenderConfig::default());

    let file = File::create("lit_room.ppm")?;
    write_ppm(&image, BufWriter::new(file))?;
    log::info!("Saved lit_room.ppm");
    Ok(())
}

fn build_scene() -> (Scene, Scene) {
    let floor = Lambertian::new(Color::splat(0.6));
    let glass = Dielectric::new(1.5);
    let steel = Metal::new(Color::new(0.8, 0.8, 0.85), 0.05);

    let mut world = Scene::new();
    world.push(Quad::new(
        Vec3::new(-10.0, 0.0, -10.0),
        Vec3::new(0.0, 0.0, 20.0),
        Vec3::new(20.0, 0.0, 0.0),
        floor,
    ));
    world.push(Sphere::new(Vec3::new(-1.2, 1.0, 0.0), 1.0, glass));

    let mut block = make_box(Vec3::ZERO, Vec3::new(1.2, 1.8, 1.2), steel);
    block.rotate(30.0, Axis::Y);
    block.translate(Vec3::new(0.8, 0.0, -0.5));
    world.push(block);

    // A puff of smoke in front of the block.
    let puff: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(1.5, 0.5, 1.2),
        0.5,
        Lambertian::new(Color::ONE),
    ));
    world.push(ConstantMedium::new(puff, 2.0, Color::new(0.9, 0.9, 0.9)));

    let lamp: Arc<dyn Hittable> = Arc::new(Quad::new(
        Vec3::new(-1.0, 4.0, -1.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
        DiffuseLight::new(Color::splat(12.0)),
    ));
    world.add(Arc::clone(&lamp));

    let mut lights = Scene::new();
    lights.add(lamp);

    (world, lights)
}
