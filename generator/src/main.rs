use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use cloudfield::{
    clouds::{CoverageMask, GridCell},
    CloudField, CloudFieldGenerator, GenerationConfig, MemoryScene, PlacedCloud,
};
use colorgrad::Gradient;
use image::{Rgb, RgbImage};

/// Sky colour under a cell with no cloud, before noise shading.
const SKY: [f64; 3] = [0.35, 0.55, 0.85];

struct FieldVisualizer {
    gradient: Gradient,
}

impl FieldVisualizer {
    fn new() -> Result<Self> {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.55, 0.58, 0.65, 1.0), // Low, shaded underside
                colorgrad::Color::new(0.85, 0.87, 0.9, 1.0),  // Mid
                colorgrad::Color::new(1.0, 1.0, 1.0, 1.0),    // High, sunlit
            ])
            .domain(&[0.0, 0.5, 1.0])
            .build()
            .context("failed to build cloud gradient")?;

        Ok(Self { gradient })
    }

    /// Top-down view of the grid: one `scale x scale` block per cell, clouds
    /// tinted by their height draw, open sky shaded by the coverage noise.
    fn create_image(
        &self,
        generator: &CloudFieldGenerator,
        config: &GenerationConfig,
        mask: &CoverageMask,
        clouds: &[PlacedCloud],
        scale: u32,
    ) -> Result<RgbImage> {
        let Some(width) = u32::try_from(mask.side())
            .ok()
            .and_then(|side| side.checked_mul(scale))
        else {
            bail!(
                "preview of a {}x{} grid at {} px per cell does not fit in an image",
                mask.side(),
                mask.side(),
                scale
            );
        };
        let heights: HashMap<GridCell, f32> = clouds
            .iter()
            .map(|cloud| (cloud.cell, cloud.jitter.height))
            .collect();

        let mut img = RgbImage::new(width, width);
        for (cell, accepted) in mask.iter() {
            let color = match heights.get(&cell) {
                Some(&height) if accepted => {
                    // height draws span [-0.5, 0.5]
                    let c = self.gradient.at((height + 0.5) as f64);
                    Rgb([(c.r * 255.0) as u8, (c.g * 255.0) as u8, (c.b * 255.0) as u8])
                }
                _ => {
                    let shade = 0.7 + 0.3 * generator.sample(config, cell);
                    Rgb([
                        (SKY[0] * shade * 255.0) as u8,
                        (SKY[1] * shade * 255.0) as u8,
                        (SKY[2] * shade * 255.0) as u8,
                    ])
                }
            };
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(cell.x as u32 * scale + dx, cell.y as u32 * scale + dy, color);
                }
            }
        }
        Ok(img)
    }

    fn save_preview(&self, img: &RgbImage, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        img.save(output_path)
            .with_context(|| format!("failed to save preview to {}", output_path.display()))
    }
}

#[derive(Parser)]
#[command(author, version, about = "Scatter a cloud field and render a top-down preview", long_about = None)]
struct Args {
    /// TOML file with generation parameters; missing keys use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the jitter stream
    #[arg(short, long)]
    seed: Option<u64>,

    /// Distribution range of all clouds
    #[arg(short, long)]
    range: Option<i32>,

    /// Cloud chunks per unit of range
    #[arg(short, long)]
    density: Option<i32>,

    /// Proportion of the sky covered, in [0, 1]
    #[arg(long)]
    coverage: Option<f64>,

    /// Grid to noise-space factor
    #[arg(long)]
    shape_scale: Option<f64>,

    /// Size of one chunk of cloud
    #[arg(long)]
    cloud_scale: Option<f32>,

    #[arg(long)]
    height: Option<f32>,

    #[arg(long)]
    thickness: Option<f32>,

    /// The output PNG file path
    #[arg(short, long, default_value = "target/clouds.png")]
    output: PathBuf,

    /// Pixels per grid cell when rendering the image
    #[arg(long, default_value_t = 4)]
    scale: u32,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => GenerationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(range) = self.range {
            config.range = range;
        }
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(coverage) = self.coverage {
            config.coverage_rate = coverage;
        }
        if let Some(shape_scale) = self.shape_scale {
            config.shape_scale = shape_scale;
        }
        if let Some(cloud_scale) = self.cloud_scale {
            config.cloud_scale = cloud_scale;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(thickness) = self.thickness {
            config.thickness = thickness;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.resolve_config()?;

    if args.print_config {
        print!("{}", toml::to_string(&config).context("failed to serialize config")?);
        return Ok(());
    }

    let generator = CloudFieldGenerator::new();
    let visualizer = FieldVisualizer::new()?;

    log::info!(
        "Generating cloud field: range {}, density {}, coverage {}, seed {}",
        config.range, config.density, config.coverage_rate, config.seed
    );

    let mut scene = MemoryScene::new();
    let root = scene.create_root("CloudGroup");
    let field = CloudField::new(root, "cloud".to_owned(), config)
        .with_generator(generator.clone());

    let clouds = field.generate();
    let spawned = field.spawn(&mut scene, &clouds)?;
    let mask = CoverageMask::from_clouds(field.config().side(), &clouds);
    let stats = mask.stats();
    log::info!("{}", stats);
    log::info!("Spawned {} clouds under {}", spawned, root);

    if stats.side == 0 {
        log::warn!("Nothing to render, skipping preview");
        return Ok(());
    }

    let img = visualizer.create_image(&generator, field.config(), &mask, &clouds, args.scale.max(1))?;

    log::info!("Saving cloud preview to {}...", args.output.display());
    visualizer.save_preview(&img, &args.output)?;
    log::info!("Done!");
    Ok(())
}
