//! Scene module - faces and how they are put together
//!
//! - Face: three unit-cube points, a texture, per-view order and shading
//! - Composer: filters, sorts, rotates, shades and rasterizes a face list

mod face;
mod compose;

pub use face::*;
pub use compose::*;
