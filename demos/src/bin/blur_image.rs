//! # Blur Image Demo
//!
//! Demonstrates:
//! - Loading an image into a CPU surface
//! - Running the dual Kawase pyramid with custom parameters
//! - Honoring the flip flag of the result
//!
//! ```bash
//! blur_image --input photo.png --output blurred.png --offset 3 --iterations 4
//! ```

use std::path::PathBuf;

use clap::Parser;
use polyblur_graphics::{BlurConfig, CpuBackend, CpuSurface, SurfaceProvider, dual_blur};

/// Blur an image with a dual Kawase pyramid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Image to blur
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the result
    #[arg(short, long)]
    output: PathBuf,

    /// Blur radius, in half pixels
    #[arg(long, default_value_t = BlurConfig::default().offset)]
    offset: f32,

    /// Pyramid depth
    #[arg(
        long,
        default_value_t = BlurConfig::default().iterations,
        value_parser = clap::value_parser!(u32).range(..=i64::from(BlurConfig::MAX_ITERATIONS)),
    )]
    iterations: u32,

    /// Per-level downsample factor in (0, 1]
    #[arg(long, default_value_t = BlurConfig::default().scale)]
    scale: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    polyblur_demos::init_logging();
    polyblur_graphics::init();

    let args = Args::parse();
    let config = BlurConfig::new(args.offset, args.iterations, args.scale);
    config.validate()?;

    let image = image::open(&args.input)?.into_rgba8();
    log::info!(
        "Loaded {} ({}x{})",
        args.input.display(),
        image.width(),
        image.height()
    );

    let mut backend = CpuBackend::new();
    let source = CpuSurface::from_rgba8(&image);
    let output = dual_blur(&mut backend, &source, &config)?;

    let mut blurred = output.surface.to_rgba8();
    if output.flip_y {
        image::imageops::flip_vertical_in_place(&mut blurred);
    }
    for (i, level) in output.levels.iter().enumerate() {
        log::debug!("level {}: {}", i + 1, level);
    }
    backend.release_surface(output.surface);

    blurred.save(&args.output)?;
    log::info!(
        "Wrote {} after {} passes",
        args.output.display(),
        backend.passes_rendered()
    );
    Ok(())
}
