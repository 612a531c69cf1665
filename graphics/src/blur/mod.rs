//! Dual Kawase blur.
//!
//! - [`BlurConfig`] - Offset, pyramid depth and per-level scale
//! - [`dual_blur`] - One blur run over any [`SurfaceProvider`](crate::SurfaceProvider)
//! - [`DualBlur`] - Keeps a blurred surface in sync with its parameters

mod config;
mod effect;
mod pyramid;

pub use config::BlurConfig;
pub use effect::DualBlur;
pub use pyramid::{BlurOutput, dual_blur};
