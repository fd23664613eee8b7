//! Isogen: isometric sprite tiles from flat textures
//!
//! Square textures are mapped onto the faces of unit-cube shapes and drawn
//! in one of four rotational views:
//! - Forward nearest-neighbor affine mapping (no filtering, no inverse mapping)
//! - Flat per-face tint shading
//! - Polygon masks for crenellations and skirts
//! - Immutable, chainable block and wall builders

pub mod rasterizer;
pub mod scene;
pub mod builders;
pub mod sheet;
pub mod batch;
pub mod error;

pub use builders::{Block, Corner, Corners, CrenellatedWall, Iso3d, Render};
pub use error::{BatchError, RenderError};
pub use rasterizer::{Canvas, Color, Orientation, Texture, UnitPoint};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
