//! Batch manifests
//!
//! A manifest names a tile sheet, how to slice it, and a grid of tiles to
//! render from the slices. Rendering a manifest yields one atlas with the
//! rendered tiles in the same grid.
//!
//! ```ron
//! BatchManifest(
//!     sheet: "jungle.png",
//!     tile_width: 64,
//!     tile_height: 64,
//!     diagonal: 64,
//!     output: "jungle_iso.png",
//!     rows: [
//!         [Block(base: (15, 3)), Block(base: (12, 0), right: (12, 1), height: 0.5)],
//!         [Wall(base: (19, 0), corners: [UpperLeft, UpperRight])],
//!     ],
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};

use crate::builders::{Corner, Corners, Iso3d, Render};
use crate::error::BatchError;
use crate::rasterizer::{Canvas, Orientation, Texture};
use crate::sheet::{assemble_atlas, extract_tile_set};

/// (row, column) of a tile in the sliced sheet
pub type TileRef = (usize, usize);

fn full_height() -> f32 {
    1.0
}

fn default_crenellation_height() -> f32 {
    0.75
}

fn default_crenellation_thickness() -> f32 {
    0.15
}

fn default_taper() -> f32 {
    0.25
}

fn default_corners() -> Vec<Corner> {
    vec![Corner::UpperLeft]
}

/// One tile to render. `base` textures every face; `top`, `left`, `right`
/// and `crenellation` override single faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TileSpec {
    Block {
        base: TileRef,
        #[serde(default)]
        top: Option<TileRef>,
        #[serde(default)]
        left: Option<TileRef>,
        #[serde(default)]
        right: Option<TileRef>,
        #[serde(default = "full_height")]
        height: f32,
    },
    Wall {
        base: TileRef,
        #[serde(default)]
        top: Option<TileRef>,
        #[serde(default)]
        left: Option<TileRef>,
        #[serde(default)]
        right: Option<TileRef>,
        #[serde(default)]
        crenellation: Option<TileRef>,
        #[serde(default = "full_height")]
        height: f32,
        #[serde(default = "default_crenellation_height")]
        crenellation_height: f32,
        #[serde(default = "default_crenellation_thickness")]
        crenellation_thickness: f32,
        #[serde(default = "default_taper")]
        taper: f32,
        #[serde(default = "default_corners")]
        corners: Vec<Corner>,
        #[serde(default)]
        orientation: Orientation,
    },
}

impl TileSpec {
    pub fn render(&self, sheet: &TileSheet, diagonal: u32) -> Result<Canvas, BatchError> {
        match self {
            TileSpec::Block { base, top, left, right, height } => {
                let mut block = Iso3d::new(sheet.get(*base)?, diagonal).block().with_height(*height);
                if let Some(t) = top {
                    block = block.with_top_image(sheet.get(*t)?);
                }
                if let Some(t) = left {
                    block = block.with_left_image(sheet.get(*t)?);
                }
                if let Some(t) = right {
                    block = block.with_right_image(sheet.get(*t)?);
                }
                Ok(block.render()?)
            }
            TileSpec::Wall {
                base,
                top,
                left,
                right,
                crenellation,
                height,
                crenellation_height,
                crenellation_thickness,
                taper,
                corners,
                orientation,
            } => {
                let mut wall = Iso3d::new(sheet.get(*base)?, diagonal)
                    .crenellated_wall()
                    .extrude(*height)
                    .with_crenellation_height(*crenellation_height)
                    .with_crenellation_thickness(*crenellation_thickness)
                    .with_taper(*taper)
                    .with_corners(corners.iter().copied().collect::<Corners>());
                if let Some(t) = top {
                    wall = wall.with_top_image(sheet.get(*t)?);
                }
                if let Some(t) = left {
                    wall = wall.with_left_image(sheet.get(*t)?);
                }
                if let Some(t) = right {
                    wall = wall.with_right_image(sheet.get(*t)?);
                }
                if let Some(t) = crenellation {
                    wall = wall.with_crenellation_image(sheet.get(*t)?);
                }
                Ok(wall.render_view(*orientation)?)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    /// Tile sheet image, relative to the manifest
    pub sheet: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Pixel width of every rendered tile
    pub diagonal: u32,
    /// Atlas image to write, relative to the manifest
    pub output: String,
    pub rows: Vec<Vec<TileSpec>>,
}

impl BatchManifest {
    pub fn tile_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Render every tile and lay the results out as an atlas.
    /// `on_tile` is called after each rendered tile.
    pub fn render_atlas(&self, sheet: &TileSheet, mut on_tile: impl FnMut()) -> Result<Canvas, BatchError> {
        let mut rendered = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut out = Vec::with_capacity(row.len());
            for spec in row {
                out.push(spec.render(sheet, self.diagonal)?);
                on_tile();
            }
            rendered.push(out);
        }
        Ok(assemble_atlas(&rendered))
    }
}

/// A sliced tile sheet
#[derive(Debug, Clone)]
pub struct TileSheet {
    tiles: Vec<Vec<Arc<Texture>>>,
}

impl TileSheet {
    pub fn from_texture(sheet: &Texture, tile_width: u32, tile_height: u32) -> Self {
        let tiles = extract_tile_set(sheet, tile_width as usize, tile_height as usize)
            .into_iter()
            .map(|row| row.into_iter().map(Arc::new).collect())
            .collect();
        Self { tiles }
    }

    pub fn load<P: AsRef<Path>>(path: P, tile_width: u32, tile_height: u32) -> Result<Self, BatchError> {
        let texture = Texture::from_file(path)?;
        Ok(Self::from_texture(&texture, tile_width, tile_height))
    }

    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn get(&self, (row, col): TileRef) -> Result<Arc<Texture>, BatchError> {
        self.tiles
            .get(row)
            .and_then(|r| r.get(col))
            .cloned()
            .ok_or(BatchError::TileOutOfRange { row, col })
    }
}

/// Load a manifest from a RON file
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<BatchManifest, BatchError> {
    let contents = fs::read_to_string(path)?;
    load_manifest_from_str(&contents)
}

/// Load a manifest from a RON string.
/// Optional tile references may be written bare, without `Some(..)`.
pub fn load_manifest_from_str(s: &str) -> Result<BatchManifest, BatchError> {
    let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
    Ok(options.from_str(s)?)
}

/// Resolve a manifest-relative path
pub fn resolve(manifest_path: &Path, relative: &str) -> PathBuf {
    manifest_path.parent().unwrap_or_else(|| Path::new("")).join(relative)
}
