//! Scene composition: draw a face list for one view

use super::face::Face;
use crate::error::RenderError;
use crate::rasterizer::{draw_affine, project, tint, Canvas, Color, Orientation, ScreenPoint};

/// Pixel size of a tile with the given diagonal and total height (in tile
/// heights): as wide as the diamond, as tall as the diamond plus the drop.
pub fn canvas_bounds(diagonal: u32, total_height: f32) -> (usize, usize) {
    let drop = (diagonal as f32 * 0.5 * total_height).floor().max(0.0) as usize;
    (diagonal as usize, diagonal as usize + drop)
}

/// Render `faces` as seen from `orientation` onto a fresh canvas sized for
/// `total_height`.
pub fn compose_scene(
    faces: &[Face],
    orientation: Orientation,
    diagonal: u32,
    total_height: f32,
) -> Result<Canvas, RenderError> {
    let (width, height) = canvas_bounds(diagonal, total_height);
    let mut canvas = Canvas::new(width, height);
    draw_faces(&mut canvas, faces, orientation, diagonal)?;
    Ok(canvas)
}

/// Painter's algorithm over `faces` for one view. Faces hidden in this view
/// are dropped, the rest are drawn by ascending order (ties keep list order),
/// each rotated into the view, projected, shaded and rasterized.
///
/// Every face goes through its own transparent scratch canvas that is then
/// composited over `canvas`, so transparent texels never punch holes into
/// faces drawn earlier. Returns the number of faces drawn.
pub fn draw_faces(
    canvas: &mut Canvas,
    faces: &[Face],
    orientation: Orientation,
    diagonal: u32,
) -> Result<usize, RenderError> {
    let idx = orientation.index();
    let mut visible: Vec<&Face> = faces.iter().filter(|f| f.render_orders[idx] >= 0).collect();
    visible.sort_by_key(|f| f.render_orders[idx]);

    let angle = orientation.rotation();
    let mut scratch = Canvas::new(canvas.width, canvas.height);

    for face in &visible {
        let dest: [ScreenPoint; 3] = face
            .points
            .map(|p| project(p.rotate_about_center(angle), diagonal));

        let shaded;
        let texture = match face.shadings[idx] {
            Some(color) => {
                shaded = tint(face.texture, color);
                &shaded
            }
            None => face.texture,
        };

        scratch.clear(Color::TRANSPARENT);
        draw_affine(&mut scratch, texture, &dest)?;
        canvas.blend_over(&scratch);
    }

    tracing::debug!(
        ?orientation,
        faces = faces.len(),
        drawn = visible.len(),
        "composed scene"
    );
    Ok(visible.len())
}
