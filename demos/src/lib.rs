//! # polyblur demos
//!
//! Headless command line demos.
//!
//! ## Available Demos
//!
//! - `blur_image` - Dual Kawase blur of an image file on the CPU backend
//! - `polygon_mesh` - Triangulate a polygon and print its vertex and index buffers

use glam::Vec2;

/// Demos library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install `env_logger` with `info` as the default filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Parse an `x,y` pair.
pub fn parse_point(value: &str) -> Result<Vec2, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{value}`"))?;
    let coord = |s: &str| {
        s.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate `{s}`: {e}"))
    };
    Ok(Vec2::new(coord(x)?, coord(y)?))
}
