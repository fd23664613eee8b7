//! Crenellated walls
//!
//! A wall is a block with an optional tapered skirt around its foot and up to
//! four crenellated parapets standing on its top edges. The parapet is
//! authored once along the upper-left edge and turned into place for the
//! other corners.

use std::ops::BitOr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Render;
use crate::error::RenderError;
use crate::rasterizer::{
    mask_polygon, Canvas, Orientation, ScreenPoint, Texture, UnitPoint, LEFT_FRONT_SHADINGS, TOP_SHADINGS,
};
use crate::scene::{compose_scene, Face, Side};

/// Bottom inset of the skirt, per unit of taper height
const SKIRT_INSET: f32 = 0.25;

/// Crenellation columns across one parapet: merlon, gap, merlon, gap, merlon
/// with half-width merlons at both ends
const CRENEL_COLUMNS: i32 = 8;

/// Draw orders of the wall body. Parapets come after.
const BODY_ORDER: i32 = 0;
const SKIRT_ORDER: i32 = 1;
const TOP_ORDER: i32 = 2;

/// Top edges of the wall that can carry a parapet, named for where they sit
/// in the TopLeft view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    /// y = 0
    UpperLeft,
    /// x = 1
    UpperRight,
    /// x = 0
    LowerLeft,
    /// y = 1
    LowerRight,
}

impl Corner {
    /// Evaluation order of the parapets
    pub const ALL: [Corner; 4] = [Corner::UpperLeft, Corner::UpperRight, Corner::LowerLeft, Corner::LowerRight];

    /// Quarter turns carrying the upper-left parapet onto this edge
    pub fn quarter_turns(self) -> i32 {
        match self {
            Corner::UpperLeft => 0,
            Corner::UpperRight => 1,
            Corner::LowerRight => 2,
            Corner::LowerLeft => 3,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Corner::UpperLeft => 1,
            Corner::UpperRight => 2,
            Corner::LowerLeft => 4,
            Corner::LowerRight => 8,
        }
    }
}

/// Set of corners carrying a parapet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Corners(u8);

impl Corners {
    pub const NONE: Corners = Corners(0);

    pub fn all() -> Self {
        Corner::ALL.into_iter().collect()
    }

    pub fn contains(self, corner: Corner) -> bool {
        self.0 & corner.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Same set with `corner` switched on or off, the rest untouched
    pub fn with(self, corner: Corner, on: bool) -> Self {
        if on {
            Corners(self.0 | corner.bit())
        } else {
            Corners(self.0 & !corner.bit())
        }
    }

    /// Members in evaluation order
    pub fn iter(self) -> impl Iterator<Item = Corner> {
        Corner::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Corner> for Corners {
    fn from(corner: Corner) -> Self {
        Corners(corner.bit())
    }
}

impl FromIterator<Corner> for Corners {
    fn from_iter<I: IntoIterator<Item = Corner>>(iter: I) -> Self {
        iter.into_iter().fold(Corners::NONE, |set, c| set.with(c, true))
    }
}

impl BitOr for Corner {
    type Output = Corners;
    fn bitor(self, rhs: Corner) -> Corners {
        Corners::from(self).with(rhs, true)
    }
}

impl BitOr<Corner> for Corners {
    type Output = Corners;
    fn bitor(self, rhs: Corner) -> Corners {
        self.with(rhs, true)
    }
}

/// Crenellation texture cut into its three roles
struct ParapetTextures {
    gap_floor: Texture,
    merlon_top: Texture,
    front: Texture,
}

impl ParapetTextures {
    fn cut(crenellation: &Texture) -> Result<Self, RenderError> {
        let w = crenellation.width as i32 / CRENEL_COLUMNS;
        let full_w = crenellation.width as i32;
        let h = crenellation.height as i32;
        let half_h = h / 2;
        let p = ScreenPoint::new;

        // Floors of the three gaps, running the whole depth of the parapet
        let gaps = [
            p(w, h), p(w, 0), p(3 * w, 0), p(3 * w, h),
            p(5 * w, h), p(5 * w, 0), p(7 * w, 0), p(7 * w, h),
        ];
        // Merlons reach the top, gaps are cut out of the upper half
        let front = [
            p(0, 0), p(w, 0), p(w, half_h), p(3 * w, half_h),
            p(3 * w, 0), p(5 * w, 0), p(5 * w, half_h), p(7 * w, half_h),
            p(7 * w, 0), p(full_w, 0), p(full_w, h), p(0, h),
        ];

        Ok(Self {
            gap_floor: mask_polygon(crenellation, &gaps, false)?,
            merlon_top: mask_polygon(crenellation, &gaps, true)?,
            front: mask_polygon(crenellation, &front, false)?,
        })
    }
}

/// Skirt panels: the side textures trimmed to a trapezoid
#[derive(Default)]
struct SkirtTextures {
    left: Option<Texture>,
    right: Option<Texture>,
}

impl SkirtTextures {
    fn cut(left: Option<&Texture>, right: Option<&Texture>, inset: f32) -> Result<Self, RenderError> {
        let trim = |tex: &Texture| {
            let w = tex.width as i32;
            let h = tex.height as i32;
            let i = (inset * w as f32).round() as i32;
            let shape = [
                ScreenPoint::new(0, 0),
                ScreenPoint::new(w, 0),
                ScreenPoint::new(w - i, h),
                ScreenPoint::new(i, h),
            ];
            mask_polygon(tex, &shape, false)
        };

        Ok(Self {
            left: left.map(trim).transpose()?,
            right: right.map(trim).transpose()?,
        })
    }
}

/// Upper-left parapet faces for a parapet `height` tall and `thickness` deep,
/// merlon tops at z = 0. Orders run from 0 to 5.
fn parapet_faces<'a>(
    crenellation: &'a Texture,
    pieces: &'a ParapetTextures,
    height: f32,
    thickness: f32,
) -> Vec<Face<'a>> {
    let half = height / 2.0;
    let pt = UnitPoint::new;
    let top = |z: f32, tex: &'a Texture, order: i32| {
        Face::new([pt(0.0, 0.0, z), pt(1.0, 0.0, z), pt(0.0, thickness, z)], tex, [order; 4])
            .with_shadings(TOP_SHADINGS)
    };
    let across = |y: f32, tex: &'a Texture, side: Side, order: i32| {
        Face::new([pt(0.0, y, 0.0), pt(1.0, y, 0.0), pt(0.0, y, height)], tex, side.orders(order))
            .with_shadings(side.shadings())
    };
    let end = |x: f32, drop: f32, side: Side, order: i32| {
        Face::new(
            [pt(x, 0.0, 0.0), pt(x, thickness, 0.0), pt(x, 0.0, drop)],
            crenellation,
            side.orders(order),
        )
        .with_shadings(side.shadings())
    };

    vec![
        top(half, &pieces.gap_floor, 0),
        top(0.0, &pieces.merlon_top, 1),
        across(thickness, &pieces.front, Side::RightFront, 2),
        across(0.0, &pieces.front, Side::LeftBack, 2),
        // Merlon flanks, outermost first for each facing
        end(1.0, height, Side::RightBack, 3),
        end(0.875, half, Side::LeftFront, 3),
        end(0.625, half, Side::RightBack, 4),
        end(0.375, half, Side::LeftFront, 4),
        end(0.125, half, Side::RightBack, 5),
        end(0.0, height, Side::LeftFront, 5),
    ]
}

/// Builder for crenellated wall tiles.
///
/// Like [`super::Block`], every setter returns a new wall.
#[derive(Debug, Clone)]
pub struct CrenellatedWall {
    top: Option<Arc<Texture>>,
    left: Option<Arc<Texture>>,
    right: Option<Arc<Texture>>,
    crenellation: Option<Arc<Texture>>,
    diagonal: u32,
    height: f32,
    crenellation_height: f32,
    crenellation_thickness: f32,
    taper: f32,
    corners: Corners,
}

impl CrenellatedWall {
    pub const DEFAULT_HEIGHT: f32 = 1.0;
    pub const DEFAULT_CRENELLATION_HEIGHT: f32 = 0.75;
    pub const DEFAULT_CRENELLATION_THICKNESS: f32 = 0.15;
    pub const DEFAULT_TAPER: f32 = 0.25;

    /// Untextured wall with the default proportions and a single upper-left
    /// parapet
    pub fn new(diagonal: u32) -> Self {
        Self {
            top: None,
            left: None,
            right: None,
            crenellation: None,
            diagonal,
            height: Self::DEFAULT_HEIGHT,
            crenellation_height: Self::DEFAULT_CRENELLATION_HEIGHT,
            crenellation_thickness: Self::DEFAULT_CRENELLATION_THICKNESS,
            taper: Self::DEFAULT_TAPER,
            corners: Corner::UpperLeft.into(),
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

    pub fn with_crenellation_image(&self, image: impl Into<Arc<Texture>>) -> Self {
        Self { crenellation: Some(image.into()), ..self.clone() }
    }

    /// Height of the wall body, parapet excluded
    pub fn extrude(&self, height: f32) -> Self {
        Self { height, ..self.clone() }
    }

    pub fn with_crenellation_height(&self, height: f32) -> Self {
        Self { crenellation_height: height, ..self.clone() }
    }

    pub fn with_crenellation_thickness(&self, thickness: f32) -> Self {
        Self { crenellation_thickness: thickness, ..self.clone() }
    }

    /// Height of the skirt band at the foot of the wall, 0 for none
    pub fn with_taper(&self, taper: f32) -> Self {
        Self { taper, ..self.clone() }
    }

    pub fn with_corners(&self, corners: impl Into<Corners>) -> Self {
        Self { corners: corners.into(), ..self.clone() }
    }

    /// Toggle one corner, leaving the others as they are
    pub fn with_corner(&self, corner: Corner, on: bool) -> Self {
        Self { corners: self.corners.with(corner, on), ..self.clone() }
    }

    pub fn diagonal(&self) -> u32 {
        self.diagonal
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn corners(&self) -> Corners {
        self.corners
    }

    /// True when at least one parapet will be drawn
    pub fn has_parapet(&self) -> bool {
        !self.corners.is_empty() && self.crenellation.is_some()
    }

    pub fn has_skirt(&self) -> bool {
        self.taper > 0.0 && self.height >= self.taper
    }

    /// Wall height plus the parapet, in tile heights
    pub fn total_height(&self) -> f32 {
        if self.has_parapet() {
            self.height + self.crenellation_height
        } else {
            self.height
        }
    }

    /// Render the wall as seen from `orientation`.
    ///
    /// Parapets are stacked in the fixed order UpperLeft, UpperRight,
    /// LowerLeft, LowerRight in every view. Where two parapets meet at a
    /// shared corner the later one covers the earlier, so a turned view is
    /// not always pixel-identical to the TopLeft render of the turned corner
    /// set: `{UpperLeft, UpperRight}` from BottomRight differs from
    /// `{LowerLeft, LowerRight}` from TopLeft at the shared corner.
    pub fn render_view(&self, orientation: Orientation) -> Result<Canvas, RenderError> {
        if !self.corners.is_empty() && self.crenellation.is_none() {
            tracing::debug!(corners = ?self.corners, "no crenellation image, parapets skipped");
        }

        let skirt = if self.has_skirt() {
            SkirtTextures::cut(self.left.as_deref(), self.right.as_deref(), self.taper * SKIRT_INSET)?
        } else {
            SkirtTextures::default()
        };
        let parapet = match &self.crenellation {
            Some(tex) if self.has_parapet() => Some(ParapetTextures::cut(tex)?),
            _ => None,
        };

        let mut faces = self.body_faces(&skirt);
        if let (Some(crenellation), Some(pieces)) = (self.crenellation.as_deref(), parapet.as_ref()) {
            self.push_parapets(&mut faces, crenellation, pieces);
        }

        compose_scene(&faces, orientation, self.diagonal, self.total_height())
    }

    /// Body sides, skirt and top. The top sits at the parapet's foot.
    fn body_faces<'a>(&'a self, skirt: &'a SkirtTextures) -> Vec<Face<'a>> {
        let z_top = if self.has_parapet() { self.crenellation_height } else { 0.0 };
        let z_floor = z_top + self.height;
        let z_skirt = if self.has_skirt() { z_floor - self.taper } else { z_floor };
        let inset = self.taper * SKIRT_INSET;
        let pt = UnitPoint::new;

        // Authored on the x = 0 side and turned onto the others
        let place = |points: [UnitPoint; 3], tex: &'a Texture, order: i32, side: Side| {
            Face::new(points, tex, Side::LeftFront.orders(order))
                .with_shadings(LEFT_FRONT_SHADINGS)
                .rotated(side.turns_from_left_front())
        };

        let mut faces = Vec::new();
        for s in Side::ALL {
            let (texture, skirt_texture) = match s {
                Side::LeftFront | Side::LeftBack => (self.left.as_deref(), skirt.left.as_ref()),
                Side::RightFront | Side::RightBack => (self.right.as_deref(), skirt.right.as_ref()),
            };
            let Some(texture) = texture else { continue };

            faces.push(place(
                [pt(0.0, 0.0, z_top), pt(0.0, 1.0, z_top), pt(0.0, 0.0, z_skirt)],
                texture,
                BODY_ORDER,
                s,
            ));
            if let Some(skirt_texture) = skirt_texture {
                faces.push(place(
                    [pt(0.0, 0.0, z_skirt), pt(0.0, 1.0, z_skirt), pt(inset, 0.0, z_floor)],
                    skirt_texture,
                    SKIRT_ORDER,
                    s,
                ));
            }
        }

        if let Some(top) = &self.top {
            faces.push(
                Face::new([pt(1.0, 0.0, z_top), pt(1.0, 1.0, z_top), pt(0.0, 0.0, z_top)], top, [TOP_ORDER; 4])
                    .with_shadings(TOP_SHADINGS),
            );
        }

        faces
    }

    fn push_parapets<'a>(&self, faces: &mut Vec<Face<'a>>, crenellation: &'a Texture, pieces: &'a ParapetTextures) {
        let template = parapet_faces(crenellation, pieces, self.crenellation_height, self.crenellation_thickness);
        let mut offset = TOP_ORDER + 1;

        for corner in self.corners.iter() {
            let turns = corner.quarter_turns();
            let placed: Vec<Face<'a>> = template.iter().map(|f| f.rotated(turns).offset_orders(offset)).collect();
            offset = placed.iter().map(Face::max_order).max().unwrap_or(offset) + 1;
            faces.extend(placed);
        }
    }
}

impl Render for CrenellatedWall {
    fn render(&self) -> Result<Canvas, RenderError> {
        self.render_view(Orientation::TopLeft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;
    use crate::scene::rotate_table;

    fn cren() -> Arc<Texture> {
        Arc::new(Texture::checkerboard(32, 16, Color::RED, Color::GREEN))
    }

    fn stone() -> Arc<Texture> {
        Arc::new(Texture::solid(16, 16, Color::WHITE))
    }

    #[test]
    fn test_corner_set_toggles_independently() {
        let set = Corner::UpperLeft | Corner::LowerRight;
        assert!(set.contains(Corner::UpperLeft));
        assert!(!set.contains(Corner::UpperRight));
        let set = set.with(Corner::UpperLeft, false).with(Corner::LowerLeft, true);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Corner::LowerLeft, Corner::LowerRight]);
        assert_eq!(Corners::all().iter().collect::<Vec<_>>(), Corner::ALL.to_vec());
        assert!(Corners::NONE.is_empty());
    }

    #[test]
    fn test_defaults() {
        let wall = CrenellatedWall::new(64);
        assert_eq!(wall.height(), 1.0);
        assert_eq!(wall.corners(), Corners::from(Corner::UpperLeft));
        assert!(wall.has_skirt());
        assert!(!wall.has_parapet(), "no crenellation image yet");
    }

    #[test]
    fn test_canvas_height_includes_parapet() {
        let wall = CrenellatedWall::new(64).with_left_image(stone());
        let c = wall.render().unwrap();
        assert_eq!((c.width, c.height), (64, 96));

        let c = wall.with_crenellation_image(cren()).render().unwrap();
        assert_eq!((c.width, c.height), (64, 64 + 56));

        let c = wall.with_crenellation_image(cren()).with_corners(Corners::NONE).render().unwrap();
        assert_eq!(c.height, 96);
    }

    #[test]
    fn test_no_corners_matches_plain_base() {
        let base = CrenellatedWall::new(64)
            .with_top_image(stone())
            .with_left_image(stone())
            .with_right_image(stone());
        let plain = base.with_corners(Corners::NONE).render().unwrap();
        let with_image = base.with_corners(Corners::NONE).with_crenellation_image(cren()).render().unwrap();
        let without_image = base.with_corner(Corner::UpperRight, true).render().unwrap();
        assert_eq!(plain, with_image);
        assert_eq!(plain, without_image);
    }

    #[test]
    fn test_upper_right_parapet_stays_on_its_edge() {
        let wall = CrenellatedWall::new(64)
            .with_crenellation_image(cren())
            .with_corners(Corner::UpperRight);
        let c = wall.render().unwrap();
        assert!(c.opaque_count() > 0);
        // The inner face at x = 1 - thickness starts at h * (1 - thickness),
        // a few pixels left of the tile's centre line
        let min_x = (32.0 * (1.0 - CrenellatedWall::DEFAULT_CRENELLATION_THICKNESS)).floor() as usize;
        assert_eq!(min_x, 27);
        assert!((0..c.height).any(|y| !c.is_transparent(min_x, y)));
        for y in 0..c.height {
            for x in 0..min_x {
                assert!(c.is_transparent(x, y), "({}, {}) should be empty", x, y);
            }
        }
        for y in 64..c.height {
            for x in 0..c.width {
                assert!(c.is_transparent(x, y), "({}, {}) should be empty", x, y);
            }
        }
    }

    #[test]
    fn test_turned_corner_matches_turned_view() {
        let wall = CrenellatedWall::new(64).with_crenellation_image(cren());
        let pairs = [
            (Corner::UpperRight, Orientation::TopRight),
            (Corner::LowerRight, Orientation::BottomRight),
            (Corner::LowerLeft, Orientation::BottomLeft),
        ];
        for (corner, view) in pairs {
            let turned = wall.with_corners(corner).render().unwrap();
            let viewed = wall.with_corners(Corner::UpperLeft).render_view(view).unwrap();
            assert_eq!(turned, viewed, "{:?}", corner);
        }
    }

    #[test]
    fn test_parapet_orders_do_not_interleave() {
        let wall = CrenellatedWall::new(64).with_crenellation_image(cren()).with_corners(Corners::all());
        let pieces = ParapetTextures::cut(&cren()).unwrap();
        let tex = cren();
        let mut faces = Vec::new();
        wall.push_parapets(&mut faces, &tex, &pieces);
        assert_eq!(faces.len(), 40);
        for (i, chunk) in faces.chunks(10).enumerate() {
            let lo = chunk.iter().flat_map(|f| f.render_orders).filter(|&o| o >= 0).min().unwrap();
            let hi = chunk.iter().map(Face::max_order).max().unwrap();
            assert!(lo > TOP_ORDER);
            if let Some(next) = faces.chunks(10).nth(i + 1) {
                let next_lo = next.iter().flat_map(|f| f.render_orders).filter(|&o| o >= 0).min().unwrap();
                assert!(next_lo > hi);
            }
        }
    }

    #[test]
    fn test_skirt_needs_room() {
        let wall = CrenellatedWall::new(64).with_left_image(stone()).with_taper(0.25);
        assert!(wall.has_skirt());
        let short = wall.extrude(0.2);
        assert!(!short.has_skirt());
        assert!(!wall.with_taper(0.0).has_skirt());

        let skirt = SkirtTextures::default();
        assert_eq!(wall.body_faces(&skirt).len(), 2, "left front and left back only");
        let skirt = SkirtTextures::cut(Some(&*stone()), None, 0.0625).unwrap();
        assert_eq!(wall.body_faces(&skirt).len(), 4);
    }

    #[test]
    fn test_skirt_is_trimmed_to_trapezoid() {
        let skirt = SkirtTextures::cut(Some(&Texture::solid(16, 8, Color::WHITE)), None, 0.25).unwrap();
        let left = skirt.left.unwrap();
        assert!(skirt.right.is_none());
        assert_eq!(left.get_pixel(0, 0).a, 255);
        assert_eq!(left.get_pixel(15, 0).a, 255);
        assert_eq!(left.get_pixel(0, 7).a, 0);
        assert_eq!(left.get_pixel(15, 7).a, 0);
        assert_eq!(left.get_pixel(8, 7).a, 255);
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_parapet_template() {
        let tex = Texture::solid(32, 16, Color::BLUE);
        let pieces = ParapetTextures::cut(&tex).unwrap();
        let faces = parapet_faces(&tex, &pieces, 0.75, 0.15);
        let pt = UnitPoint::new;
        assert_eq!(faces.len(), 10);

        // Gap floor halfway down, merlon tops at the top
        let tops = [(0.375, &pieces.gap_floor, 0), (0.0, &pieces.merlon_top, 1)];
        for (face, (z, texture, order)) in faces[..2].iter().zip(tops) {
            assert_eq!(face.points, [pt(0.0, 0.0, z), pt(1.0, 0.0, z), pt(0.0, 0.15, z)]);
            assert!(std::ptr::eq(face.texture, texture));
            assert_eq!(face.render_orders, [order; 4]);
            assert_eq!(face.shadings, TOP_SHADINGS);
        }

        // Inner and outer fronts, full height
        let fronts = [(0.15, Side::RightFront), (0.0, Side::LeftBack)];
        for (face, (y, side)) in faces[2..4].iter().zip(fronts) {
            assert_eq!(face.points, [pt(0.0, y, 0.0), pt(1.0, y, 0.0), pt(0.0, y, 0.75)]);
            assert!(std::ptr::eq(face.texture, &pieces.front));
            assert_eq!(face.render_orders, side.orders(2));
            assert_eq!(face.shadings, side.shadings());
        }

        // Merlon flanks: outer ends full height, inner ones half
        let ends = [
            (1.0, 0.75, Side::RightBack, 3),
            (0.875, 0.375, Side::LeftFront, 3),
            (0.625, 0.375, Side::RightBack, 4),
            (0.375, 0.375, Side::LeftFront, 4),
            (0.125, 0.375, Side::RightBack, 5),
            (0.0, 0.75, Side::LeftFront, 5),
        ];
        for (face, (x, drop, side, order)) in faces[4..].iter().zip(ends) {
            assert_eq!(face.points, [pt(x, 0.0, 0.0), pt(x, 0.15, 0.0), pt(x, 0.0, drop)], "x = {}", x);
            assert!(std::ptr::eq(face.texture, &tex));
            assert_eq!(face.render_orders, side.orders(order), "x = {}", x);
            assert_eq!(face.shadings, side.shadings(), "x = {}", x);
        }
    }

    #[test]
    fn test_corners_place_merlon_flanks() {
        let tex = Texture::solid(32, 16, Color::BLUE);
        let pieces = ParapetTextures::cut(&tex).unwrap();
        let template = parapet_faces(&tex, &pieces, 0.75, 0.15);
        let flanks = [1.0, 0.875, 0.625, 0.375, 0.125, 0.0];

        // Map a placed point back to (position along the edge, depth into the tile)
        let cases: [(Corner, fn(UnitPoint) -> (f32, f32)); 4] = [
            (Corner::UpperLeft, |p| (p.x, p.y)),
            (Corner::UpperRight, |p| (p.y, 1.0 - p.x)),
            (Corner::LowerRight, |p| (1.0 - p.x, 1.0 - p.y)),
            (Corner::LowerLeft, |p| (1.0 - p.y, p.x)),
        ];

        for (corner, unplace) in cases {
            let wall = CrenellatedWall::new(64).with_corners(corner);
            let mut faces = Vec::new();
            wall.push_parapets(&mut faces, &tex, &pieces);
            assert_eq!(faces.len(), 10);

            for (i, (face, along)) in faces[4..].iter().zip(flanks).enumerate() {
                let [o, a, b] = face.points.map(unplace);
                for (p, depth) in [(o, 0.0), (a, 0.15), (b, 0.0)] {
                    assert!(close(p.0, along), "{:?} flank {}: {:?}", corner, i, face.points);
                    assert!(close(p.1, depth), "{:?} flank {}: {:?}", corner, i, face.points);
                }
                let turns = corner.quarter_turns();
                assert_eq!(face.shadings, rotate_table(template[4 + i].shadings, turns));
            }
        }

        // Upper-right flanks stand on y = 1, 7/8, 5/8, ... along x = 1
        let wall = CrenellatedWall::new(64).with_corners(Corner::UpperRight);
        let mut faces = Vec::new();
        wall.push_parapets(&mut faces, &tex, &pieces);
        let ys: Vec<f32> = faces[4..].iter().map(|f| f.points[0].y).collect();
        assert_eq!(ys, flanks.to_vec());
        assert!(faces[4..].iter().all(|f| f.points[0].x == 1.0));
    }

    #[test]
    fn test_skirt_pulls_in_the_foot() {
        let plain = sides_only(0.0);
        let skirted = sides_only(0.25);

        // Outer bottom corners of the two visible sides
        for (x, y) in [(1, 63), (62, 63)] {
            assert!(!plain.is_transparent(x, y), "({}, {})", x, y);
            assert!(skirted.is_transparent(x, y), "({}, {})", x, y);
        }
        // Inside the skirt band, both draw
        assert!(!plain.is_transparent(30, 89));
        assert!(!skirted.is_transparent(30, 89));
    }

    fn sides_only(taper: f32) -> Canvas {
        CrenellatedWall::new(64)
            .with_left_image(stone())
            .with_right_image(stone())
            .with_taper(taper)
            .render()
            .unwrap()
    }

    #[test]
    fn test_crenellation_cut() {
        let tex = Texture::solid(32, 16, Color::BLUE);
        let pieces = ParapetTextures::cut(&tex).unwrap();
        // Columns of 4px: gaps at 4..12 and 20..28
        assert_eq!(pieces.gap_floor.get_pixel(6, 3).a, 255);
        assert_eq!(pieces.gap_floor.get_pixel(14, 3).a, 0);
        assert_eq!(pieces.merlon_top.get_pixel(14, 3).a, 255);
        assert_eq!(pieces.merlon_top.get_pixel(6, 3).a, 0);
        // Front: gaps open in the upper half only
        assert_eq!(pieces.front.get_pixel(6, 2).a, 0);
        assert_eq!(pieces.front.get_pixel(6, 12).a, 255);
        assert_eq!(pieces.front.get_pixel(14, 2).a, 255);
        assert_eq!(pieces.front.get_pixel(30, 2).a, 255);
    }
}
