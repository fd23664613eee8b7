//! Isometric software rasterizer
//!
//! Features:
//! - Unit-cube to pixel projection for isometric tiles
//! - Forward nearest-neighbor affine texture mapping (no filtering)
//! - Flat tint shading baked into textures before projection
//! - Polygon masks for cutting textures into pieces

mod math;
mod types;
mod render;
mod shading;
mod mask;

pub use math::*;
pub use types::*;
pub use render::*;
pub use shading::*;
pub use mask::*;
