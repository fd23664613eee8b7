//! Face shading
//!
//! Shading is baked into a copy of the texture before it is projected: the
//! texture is tinted towards a flat color by that color's alpha. Side faces get
//! one of two darkening colors depending on which way they face in the current
//! view, top faces a faint warm highlight.

use super::types::{Color, Texture};

/// Dark brown used for the side facing left in a view
pub const SHADING_LEFT: Color = Color::with_alpha(36, 22, 4, 200);
/// Same brown, lighter, for the side facing right in a view
pub const SHADING_RIGHT: Color = SHADING_LEFT.alpha(100);
/// Highlight for horizontal faces
pub const SHADING_TOP: Color = Color::with_alpha(255, 254, 172, 50);

/// Optional shading per orientation, indexed by `Orientation::index()`
pub type ShadingTable = [Option<Color>; 4];

pub const NO_SHADING: ShadingTable = [None; 4];

pub const TOP_SHADINGS: ShadingTable = [Some(SHADING_TOP); 4];

/// Side facing -x. Visible on the left in TopLeft and on the right in BottomLeft.
pub const LEFT_FRONT_SHADINGS: ShadingTable = [Some(SHADING_LEFT), None, None, Some(SHADING_RIGHT)];

// The remaining sides are the same table shifted one view at a time
pub const RIGHT_FRONT_SHADINGS: ShadingTable = shift_table(LEFT_FRONT_SHADINGS);
pub const RIGHT_BACK_SHADINGS: ShadingTable = shift_table(RIGHT_FRONT_SHADINGS);
pub const LEFT_BACK_SHADINGS: ShadingTable = shift_table(RIGHT_BACK_SHADINGS);

/// Move every entry one orientation further clockwise
pub const fn shift_table(t: ShadingTable) -> ShadingTable {
    [t[3], t[0], t[1], t[2]]
}

/// Blend every pixel's rgb towards `color.rgb` by `color.a / 255`.
/// Alpha is left as it was.
pub fn tint(texture: &Texture, color: Color) -> Texture {
    let mut out = texture.clone();
    if color.a == 0 {
        return out;
    }

    let a = color.a as f32 / 255.0;
    let keep = 1.0 - a;
    let lerp = |c: u8, t: u8| (c as f32 * keep + t as f32 * a) as u8;

    for p in &mut out.pixels {
        p.r = lerp(p.r, color.r);
        p.g = lerp(p.g, color.g);
        p.b = lerp(p.b, color.b);
    }
    out
}
