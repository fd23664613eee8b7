//! Tile sheets in and atlases out

use crate::rasterizer::{Canvas, Texture};

/// Slice `sheet` into `tile_width` x `tile_height` tiles, row by row.
/// Partial tiles along the right and bottom edges are dropped.
pub fn extract_tile_set(sheet: &Texture, tile_width: usize, tile_height: usize) -> Vec<Vec<Texture>> {
    if tile_width == 0 || tile_height == 0 {
        return Vec::new();
    }
    let cols = sheet.width / tile_width;
    let rows = sheet.height / tile_height;

    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    sheet
                        .crop(c * tile_width, r * tile_height, tile_width, tile_height)
                        .with_name(format!("{}[{},{}]", sheet.name, r, c))
                })
                .collect()
        })
        .collect()
}

/// Lay rendered tiles out on a grid. Every cell is as wide as the widest tile
/// and as tall as the tallest, and each tile sits on the bottom of its cell so
/// tiles of different heights share a ground line. Rows may be ragged.
pub fn assemble_atlas(rows: &[Vec<Canvas>]) -> Canvas {
    let tiles = || rows.iter().flatten();
    let cell_w = tiles().map(|t| t.width).max().unwrap_or(0);
    let cell_h = tiles().map(|t| t.height).max().unwrap_or(0);
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);

    let mut atlas = Canvas::new(cell_w * cols, cell_h * rows.len());
    for (r, row) in rows.iter().enumerate() {
        for (c, tile) in row.iter().enumerate() {
            let x = c * cell_w;
            let y = r * cell_h + cell_h - tile.height;
            atlas.draw_over(tile, x as i64, y as i64);
        }
    }
    atlas
}
