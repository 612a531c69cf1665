//! # Polygon Mesh Demo
//!
//! Demonstrates:
//! - Triangulating an outline given on the command line
//! - Mapping an atlas region onto it, optionally rotated
//! - The outline fallback for self-intersecting input
//!
//! ```bash
//! polygon_mesh 0,0 100,0 100,100 0,100 --region 100,100
//! polygon_mesh -- -50,-50 50,-50 0,50 --region 64,32 --rotated
//! ```

use clap::Parser;
use glam::Vec2;
use polyblur_core::{MeshTopology, TextureRegion, UvBounds, build_mesh};
use polyblur_demos::parse_point;

/// Triangulate a polygon and print its mesh.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Outline vertices as `x,y` pairs, in order
    #[arg(value_parser = parse_point, allow_hyphen_values = true)]
    vertices: Vec<Vec2>,

    /// Untrimmed region size `w,h`, mapped to the full texture
    #[arg(long, value_parser = parse_point)]
    region: Option<Vec2>,

    /// Treat the region as stored rotated in the atlas
    #[arg(long, requires = "region")]
    rotated: bool,

    /// Position offset `x,y` applied when computing UVs
    #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
    offset: Vec2,
}

fn main() {
    polyblur_demos::init_logging();
    polyblur_core::init();

    let args = Args::parse();
    let region = args
        .region
        .map(|size| TextureRegion::with_uv_bounds(size, UvBounds::FULL, args.rotated));
    let mesh = build_mesh(&args.vertices, region.as_ref(), args.offset);

    println!("{:>4} {:>10} {:>10} {:>8} {:>8}", "#", "x", "y", "u", "v");
    for (i, vertex) in mesh.vertices().iter().enumerate() {
        println!(
            "{:>4} {:>10.2} {:>10.2} {:>8.4} {:>8.4}",
            i, vertex.position[0], vertex.position[1], vertex.uv[0], vertex.uv[1]
        );
    }

    match mesh.topology() {
        _ if !mesh.is_indexed() => println!("no indices: fewer than 3 vertices"),
        MeshTopology::TriangleList => {
            println!("{} triangles:", mesh.triangle_count());
            for [a, b, c] in mesh.triangles() {
                println!("  {a} {b} {c}");
            }
        }
        MeshTopology::Polygon => {
            println!("triangulation failed, outline indices: {:?}", mesh.indices());
        }
    }
}
