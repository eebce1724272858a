//! `lux`: render one of the demo scenes to a PPM (or PNG) image.

mod scenes;

use anyhow::{Context, Result};
use clap::Parser;
use lux_renderer::{load_config, render, write_ppm, BvhNode, Camera, ImageBuffer, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scenes::Demo;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Command line options.
#[derive(Parser, Debug)]
#[command(author, version, about = "CPU Monte Carlo path tracer", long_about = None)]
struct Options {
    /// Demo scene to render.
    #[arg(value_enum, default_value_t = Demo::CornellBox)]
    scene: Demo,

    /// Image width in pixels; height follows the scene's aspect ratio.
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,

    /// Samples per pixel.
    #[arg(long, value_name = "NUM")]
    spp: Option<u32>,

    /// Maximum number of bounces per path.
    #[arg(long, value_name = "NUM")]
    depth: Option<u32>,

    /// Seed for scene generation and sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Edge length in pixels of square render buckets.
    #[arg(long, value_name = "PIXELS")]
    bucket_size: Option<u32>,

    /// Render on the calling thread only.
    #[arg(long)]
    sequential: bool,

    /// JSON file with camera and render overrides.
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output image; `.png` is written as PNG, anything else as PPM.
    /// Writes PPM to stdout when absent.
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Image used by the earth textures.
    #[arg(long, value_name = "FILE", default_value = "earthmap.jpg")]
    texture: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();
    log::info!("Building scene {:?}", options.scene);

    // Settings precedence: scene defaults, then config file, then flags.
    let file_config = match &options.config {
        Some(path) => Some(
            load_config(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
        ),
        None => None,
    };
    let mut render_config = file_config
        .as_ref()
        .and_then(|c| c.render.clone())
        .unwrap_or_default();
    if let Some(seed) = options.seed {
        render_config.seed = seed;
    }
    if let Some(bucket_size) = options.bucket_size {
        render_config.bucket_size = bucket_size;
    }
    if options.sequential {
        render_config.parallel = false;
    }

    let mut rng = StdRng::seed_from_u64(render_config.seed);
    let demo = options.scene.build(&options.texture, &mut rng);

    let mut camera_config = demo.camera;
    if let Some(file_config) = &file_config {
        file_config.camera.apply(&mut camera_config);
    }
    if let Some(width) = options.width {
        camera_config.image_width = width;
    }
    if let Some(spp) = options.spp {
        camera_config.samples_per_pixel = spp;
    }
    if let Some(depth) = options.depth {
        camera_config.max_depth = depth;
    }
    let camera = Camera::from_config(camera_config);

    log::info!(
        "Scene has {} objects and {} lights",
        demo.world.len(),
        demo.lights.len()
    );
    let world = BvhNode::from_scene(&demo.world, &mut rng);

    let image = render(&camera, &world, &demo.lights, &render_config);
    save(&image, options.output.as_deref())
}

fn save(image: &ImageBuffer, output: Option<&Path>) -> Result<()> {
    let Some(path) = output else {
        let stdout = io::stdout();
        return write_ppm(image, BufWriter::new(stdout.lock())).context("Failed to write image");
    };

    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if is_png {
        image
            .to_rgb_image()
            .context("Image buffer has inconsistent dimensions")?
            .save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    } else {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_ppm(image, BufWriter::new(file))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    log::info!("Wrote {}", path.display());
    Ok(())
}
