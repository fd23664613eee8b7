//! Tile builders
//!
//! Immutable, chainable descriptions of a tile shape. A builder only turns
//! into pixels when it is rendered.

mod block;
mod wall;

pub use block::*;
pub use wall::*;

use std::sync::Arc;

use crate::error::RenderError;
use crate::rasterizer::{Canvas, Texture};

pub use crate::scene::canvas_bounds;

/// Anything that renders to a single tile canvas
pub trait Render {
    fn render(&self) -> Result<Canvas, RenderError>;
}

/// Starting point for builders that share one base texture and tile size
#[derive(Debug, Clone)]
pub struct Iso3d {
    base: Arc<Texture>,
    diagonal: u32,
}

impl Iso3d {
    pub fn new(base: impl Into<Arc<Texture>>, diagonal: u32) -> Self {
        Self { base: base.into(), diagonal }
    }

    pub fn diagonal(&self) -> u32 {
        self.diagonal
    }

    /// Full-height block with the base texture on every face
    pub fn block(&self) -> Block {
        Block::new(self.diagonal)
            .with_top_image(Arc::clone(&self.base))
            .with_left_image(Arc::clone(&self.base))
            .with_right_image(Arc::clone(&self.base))
    }

    /// Default wall with the base texture on every face, crenellation included
    pub fn crenellated_wall(&self) -> CrenellatedWall {
        CrenellatedWall::new(self.diagonal)
            .with_top_image(Arc::clone(&self.base))
            .with_left_image(Arc::clone(&self.base))
            .with_right_image(Arc::clone(&self.base))
            .with_crenellation_image(Arc::clone(&self.base))
    }
}
