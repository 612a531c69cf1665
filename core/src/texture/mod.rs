//! Texture atlas regions.
//!
//! Provides [`TextureRegion`] describing where a sprite lives inside an
//! atlas texture, together with the sprite-space [`UvBounds`] derived from
//! it and the [`UvRemap`] factors used to map atlas UVs back into frame
//! local space.

mod region;

pub use region::{TextureRegion, UvBounds, UvRemap};
