//! Declarative textured faces
//!
//! A face is a textured parallelogram given by three unit-cube points plus
//! per-orientation tables saying when it is drawn and how it is shaded. One
//! list of faces describes a shape for all four views.

use crate::rasterizer::{
    ShadingTable, Texture, UnitPoint, LEFT_BACK_SHADINGS, LEFT_FRONT_SHADINGS, NO_SHADING,
    RIGHT_BACK_SHADINGS, RIGHT_FRONT_SHADINGS,
};

/// Draw order per orientation. Lower is drawn first, negative is not drawn.
pub type RenderOrders = [i32; 4];

pub const HIDDEN: i32 = -1;

/// Reindex a per-orientation table for geometry turned by `turns` quarter
/// turns: the turned face seen in view `o` looks like the original seen in
/// view `o + turns`.
pub fn rotate_table<T: Copy>(table: [T; 4], turns: i32) -> [T; 4] {
    let k = turns.rem_euclid(4) as usize;
    [table[k], table[(k + 1) % 4], table[(k + 2) % 4], table[(k + 3) % 4]]
}

#[derive(Debug, Clone, Copy)]
pub struct Face<'a> {
    /// Origin, end of the texture x axis, end of the texture y axis
    pub points: [UnitPoint; 3],
    pub texture: &'a Texture,
    pub render_orders: RenderOrders,
    pub shadings: ShadingTable,
}

impl<'a> Face<'a> {
    pub fn new(points: [UnitPoint; 3], texture: &'a Texture, render_orders: RenderOrders) -> Self {
        Self {
            points,
            texture,
            render_orders,
            shadings: NO_SHADING,
        }
    }

    pub fn with_shadings(mut self, shadings: ShadingTable) -> Self {
        self.shadings = shadings;
        self
    }

    /// Same face turned `turns` quarter turns about the tile centre, tables
    /// reindexed to match
    pub fn rotated(self, turns: i32) -> Self {
        Self {
            points: self.points.map(|p| p.rotate_quarter_turns(turns, UnitPoint::CENTER)),
            texture: self.texture,
            render_orders: rotate_table(self.render_orders, turns),
            shadings: rotate_table(self.shadings, turns),
        }
    }

    /// Push every visible order back by `offset`
    pub fn offset_orders(mut self, offset: i32) -> Self {
        for order in &mut self.render_orders {
            if *order >= 0 {
                *order += offset;
            }
        }
        self
    }

    /// Highest order this face is drawn at in any view
    pub fn max_order(&self) -> i32 {
        self.render_orders.iter().copied().max().unwrap_or(HIDDEN)
    }
}

/// Vertical side planes of the unit cube, named by where they sit in the
/// TopLeft view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// x = 0, facing -x
    LeftFront,
    /// y = 1, facing +y
    RightFront,
    /// x = 1, facing +x
    RightBack,
    /// y = 0, facing -y
    LeftBack,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::LeftFront, Side::RightFront, Side::RightBack, Side::LeftBack];

    pub fn shadings(self) -> ShadingTable {
        match self {
            Side::LeftFront => LEFT_FRONT_SHADINGS,
            Side::RightFront => RIGHT_FRONT_SHADINGS,
            Side::RightBack => RIGHT_BACK_SHADINGS,
            Side::LeftBack => LEFT_BACK_SHADINGS,
        }
    }

    /// `order` in the two views the side faces the viewer, hidden otherwise
    pub fn orders(self, order: i32) -> RenderOrders {
        let h = HIDDEN;
        match self {
            Side::LeftFront => [order, h, h, order],
            Side::RightFront => [order, order, h, h],
            Side::RightBack => [h, order, order, h],
            Side::LeftBack => [h, h, order, order],
        }
    }

    /// Quarter turns that carry the LeftFront plane onto this one
    pub fn turns_from_left_front(self) -> i32 {
        match self {
            Side::LeftFront => 0,
            Side::LeftBack => 1,
            Side::RightBack => 2,
            Side::RightFront => 3,
        }
    }
}
