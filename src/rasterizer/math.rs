//! Unit-cube coordinates and the isometric projector

use std::ops::{Add, Div, Mul, Sub};
use serde::{Serialize, Deserialize};

/// Point in the authoring unit cube.
///
/// `x` and `y` run along the two axes of the diamond footprint, `z` is measured
/// in tile heights and grows downwards on screen. Values outside 0..1 are
/// allowed and simply land outside the cube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl UnitPoint {
    pub const ZERO: UnitPoint = UnitPoint { x: 0.0, y: 0.0, z: 0.0 };
    /// Pivot used for orientation rotations (z is ignored when rotating)
    pub const CENTER: UnitPoint = UnitPoint { x: 0.5, y: 0.5, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate counter-clockwise around `pivot` in the x/y plane by `degrees`.
    /// z is left untouched.
    pub fn rotate(self, degrees: f32, pivot: UnitPoint) -> UnitPoint {
        // Quarter turns are done by swapping axes so projected pixels stay exact
        if degrees % 90.0 == 0.0 {
            let turns = (degrees / 90.0) as i32;
            return self.rotate_quarter_turns(turns, pivot);
        }

        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        UnitPoint {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
            z: self.z,
        }
    }

    /// Rotate by `turns` * 90 degrees counter-clockwise around `pivot`.
    pub fn rotate_quarter_turns(self, turns: i32, pivot: UnitPoint) -> UnitPoint {
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        let (rx, ry) = match turns.rem_euclid(4) {
            0 => (dx, dy),
            1 => (-dy, dx),
            2 => (-dx, -dy),
            _ => (dy, -dx),
        };
        UnitPoint {
            x: pivot.x + rx,
            y: pivot.y + ry,
            z: self.z,
        }
    }

    /// Rotate around the tile centre (0.5, 0.5).
    pub fn rotate_about_center(self, degrees: f32) -> UnitPoint {
        self.rotate(degrees, Self::CENTER)
    }

    pub fn scale(self, s: f32) -> UnitPoint {
        UnitPoint {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }
}

impl Add for UnitPoint {
    type Output = UnitPoint;
    fn add(self, other: UnitPoint) -> UnitPoint {
        UnitPoint {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for UnitPoint {
    type Output = UnitPoint;
    fn sub(self, other: UnitPoint) -> UnitPoint {
        UnitPoint {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul for UnitPoint {
    type Output = UnitPoint;
    fn mul(self, other: UnitPoint) -> UnitPoint {
        UnitPoint {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }
}

impl Mul<f32> for UnitPoint {
    type Output = UnitPoint;
    fn mul(self, s: f32) -> UnitPoint {
        self.scale(s)
    }
}

impl Div for UnitPoint {
    type Output = UnitPoint;
    fn div(self, other: UnitPoint) -> UnitPoint {
        UnitPoint {
            x: self.x / other.x,
            y: self.y / other.y,
            z: self.z / other.z,
        }
    }
}

/// Integer pixel position on a canvas or texture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One of the four rotational views of an authored geometry, enumerated
/// clockwise. The discriminant is the index into per-orientation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::TopLeft,
        Orientation::TopRight,
        Orientation::BottomRight,
        Orientation::BottomLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Heading of the view in degrees (TopRight is -90, BottomLeft is 90)
    pub fn angle(self) -> f32 {
        match self {
            Orientation::TopLeft => 0.0,
            Orientation::TopRight => -90.0,
            Orientation::BottomRight => 180.0,
            Orientation::BottomLeft => 90.0,
        }
    }

    /// Rotation applied to authored geometry to obtain this view.
    /// Geometry turns against the heading, so TopRight rotates by +90.
    pub fn rotation(self) -> f32 {
        (-self.angle()).rem_euclid(360.0)
    }

    /// Same rotation as [`Orientation::rotation`] in quarter turns
    pub fn quarter_turns(self) -> i32 {
        self.index() as i32
    }
}

/// Half of the diagonal, the scale of one unit along each axis.
pub fn half_diagonal(diagonal: u32) -> f32 {
    (diagonal / 2) as f32
}

/// Project a unit-cube point to fractional screen coordinates.
///
/// x and y move along the diamond footprint, z only moves downwards.
pub fn project_exact(p: UnitPoint, diagonal: u32) -> (f32, f32) {
    let h = half_diagonal(diagonal);
    let sx = h * (p.x + p.y);
    let sy = h * (1.0 - p.x + p.y) + h * p.z;
    (sx, sy)
}

/// Project a unit-cube point onto the pixel grid (coordinates floored)
pub fn project(p: UnitPoint, diagonal: u32) -> ScreenPoint {
    let (sx, sy) = project_exact(p, diagonal);
    ScreenPoint::new(sx.floor() as i32, sy.floor() as i32)
}
