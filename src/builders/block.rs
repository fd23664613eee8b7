//! Solid block tiles

use std::sync::Arc;
use super::Render;
use crate::error::RenderError;
use crate::rasterizer::{Canvas, Orientation, Texture, UnitPoint, SHADING_LEFT, SHADING_RIGHT, SHADING_TOP};
use crate::scene::{compose_scene, Face};

/// A unit cube, cut down to `height` tile heights, with up to three visible
/// faces. A face without a texture is left out.
///
/// Every `with_*` call returns a new block, so one configured block can be
/// branched into several variants.
#[derive(Debug, Clone)]
pub struct Block {
    top: Option<Arc<Texture>>,
    left: Option<Arc<Texture>>,
    right: Option<Arc<Texture>>,
    diagonal: u32,
    height: f32,
}

impl Block {
    /// Block of full height without any faces
    pub fn new(diagonal: u32) -> Self {
        Self {
            top: None,
            left: None,
            right: None,
            diagonal,
            height: 1.0,
        }
    }

    pub fn with_top_image(&self, image: impl Into<Arc<Texture>>) -> Self {
        Self { top: Some(image.into()), ..self.clone() }
    }

    pub fn with_left_image(&self, image: impl Into<Arc<Texture>>) -> Self {
        Self { left: Some(image.into()), ..self.clone() }
    }

    pub fn with_right_image(&self, image: impl Into<Arc<Texture>>) -> Self {
        Self { right: Some(image.into()), ..self.clone() }
    }

    pub fn with_height(&self, height: f32) -> Self {
        Self { height, ..self.clone() }
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn diagonal(&self) -> u32 {
        self.diagonal
    }

    /// Faces in drawing order: left, right, top.
    /// The top face starts at its apex so the apex pixel gets painted.
    pub fn faces(&self) -> Vec<Face<'_>> {
        let h = self.height;
        let mut faces = Vec::with_capacity(3);

        if let Some(left) = &self.left {
            faces.push(
                Face::new(
                    [UnitPoint::new(0.0, 0.0, 0.0), UnitPoint::new(0.0, 1.0, 0.0), UnitPoint::new(0.0, 0.0, h)],
                    left,
                    [0; 4],
                )
                .with_shadings([Some(SHADING_LEFT); 4]),
            );
        }

        if let Some(right) = &self.right {
            faces.push(
                Face::new(
                    [UnitPoint::new(0.0, 1.0, 0.0), UnitPoint::new(1.0, 1.0, 0.0), UnitPoint::new(0.0, 1.0, h)],
                    right,
                    [1; 4],
                )
                .with_shadings([Some(SHADING_RIGHT); 4]),
            );
        }

        if let Some(top) = &self.top {
            faces.push(
                Face::new(
                    [UnitPoint::new(1.0, 0.0, 0.0), UnitPoint::new(1.0, 1.0, 0.0), UnitPoint::new(0.0, 0.0, 0.0)],
                    top,
                    [2; 4],
                )
                .with_shadings([Some(SHADING_TOP); 4]),
            );
        }

        faces
    }
}

impl Render for Block {
    fn render(&self) -> Result<Canvas, RenderError> {
        compose_scene(&self.faces(), Orientation::TopLeft, self.diagonal, self.height)
    }
}
