//! End-to-end tile scenarios through the public API

use std::sync::Arc;

use isogen::rasterizer::{draw_affine, mask_polygon, project, tint, ScreenPoint};
use isogen::{Block, Canvas, Color, Corner, Corners, CrenellatedWall, Iso3d, Orientation, Render, Texture, UnitPoint};

fn gradient(w: usize, h: usize) -> Texture {
    let pixels = (0..w * h)
        .map(|i| Color::new((i % w * 255 / w) as u8, (i / w * 255 / h) as u8, 77))
        .collect();
    Texture::from_pixels(w, h, pixels)
}

#[test]
fn projected_corners_of_the_footprint() {
    for d in [32u32, 64, 100] {
        let h = (d / 2) as i32;
        assert_eq!(project(UnitPoint::new(0.0, 0.0, 0.0), d), ScreenPoint::new(0, h));
        assert_eq!(project(UnitPoint::new(1.0, 0.0, 0.0), d), ScreenPoint::new(h, 0));
        assert_eq!(project(UnitPoint::new(0.0, 1.0, 0.0), d), ScreenPoint::new(h, d as i32));
        assert_eq!(project(UnitPoint::new(1.0, 1.0, 0.0), d), ScreenPoint::new(d as i32, h));
    }
}

#[test]
fn height_only_moves_down() {
    let d = 64;
    for (x, y) in [(0.0, 0.0), (0.5, 0.25), (1.0, 0.75)] {
        let ground = project(UnitPoint::new(x, y, 0.0), d);
        let raised = project(UnitPoint::new(x, y, 0.5), d);
        assert_eq!(raised.x, ground.x);
        assert_eq!(raised.y - ground.y, 16);
    }
}

#[test]
fn tint_extremes() {
    let img = gradient(8, 8).with_name("g");
    assert_eq!(tint(&img, Color::with_alpha(10, 200, 30, 0)).pixels, img.pixels);

    let solid = tint(&img, Color::with_alpha(10, 200, 30, 255));
    for (p, q) in solid.pixels.iter().zip(&img.pixels) {
        assert_eq!((p.r, p.g, p.b), (10, 200, 30));
        assert_eq!(p.a, q.a);
    }
}

#[test]
fn mask_halves_cover_the_image() {
    let img = gradient(24, 12);
    let poly = [ScreenPoint::new(3, 0), ScreenPoint::new(24, 5), ScreenPoint::new(10, 12)];
    let inside = mask_polygon(&img, &poly, false).unwrap();
    let outside = mask_polygon(&img, &poly, true).unwrap();
    for (a, b) in inside.pixels.iter().zip(&outside.pixels) {
        assert!((a.a != 0) != (b.a != 0));
    }
}

#[test]
fn axis_aligned_draw_reproduces_source() {
    let src = gradient(12, 9);
    let mut canvas = Canvas::new(12, 9);
    let basis = [ScreenPoint::new(0, 0), ScreenPoint::new(12, 0), ScreenPoint::new(0, 9)];
    draw_affine(&mut canvas, &src, &basis).unwrap();
    for y in 0..9 {
        for x in 0..12 {
            assert_eq!(canvas.get_pixel(x, y), src.get_pixel(x, y), "({}, {})", x, y);
        }
    }
}

#[test]
fn red_topped_block() {
    let red = Texture::solid(64, 64, Color::with_alpha(255, 0, 0, 255));
    let canvas = Block::new(64).with_top_image(red).with_height(1.0).render().unwrap();

    assert_eq!((canvas.width, canvas.height), (64, 96));
    let apex = canvas.get_pixel(32, 0);
    assert_eq!(apex.a, 255);
    // Red under the faint warm top shading
    assert!(apex.r >= 254, "{:?}", apex);
    assert!(apex.g < 64 && apex.b < 64, "{:?}", apex);
    assert_eq!(canvas.get_pixel(0, 90), Color::TRANSPARENT);
}

#[test]
fn wall_without_corners_is_plain_base() {
    let stone = Arc::new(gradient(32, 32));
    let iso = Iso3d::new(Arc::clone(&stone), 64);
    let without = iso.crenellated_wall().with_corners(Corners::NONE).render().unwrap();

    // Same body with nothing that could be a parapet
    let bare = CrenellatedWall::new(64)
        .with_top_image(Arc::clone(&stone))
        .with_left_image(Arc::clone(&stone))
        .with_right_image(stone)
        .with_corners(Corners::NONE)
        .render()
        .unwrap();
    assert_eq!(without, bare);
    assert_eq!(without.height, 96);
}

#[test]
fn upper_right_parapet_only() {
    let wall = CrenellatedWall::new(64)
        .with_crenellation_image(gradient(32, 32))
        .with_corners(Corner::UpperRight);
    let canvas = wall.render().unwrap();

    // The parapet is as deep as its thickness, so its inner face at
    // x = 1 - thickness reaches left of the tile's centre line, down to
    // screen x = h * (1 - thickness)
    let h = 32.0;
    let min_x = (h * (1.0 - CrenellatedWall::DEFAULT_CRENELLATION_THICKNESS)).floor() as usize;

    let mut drawn = 0;
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            if !canvas.is_transparent(x, y) {
                drawn += 1;
                assert!(x >= min_x, "pixel ({}, {}) left of the parapet's inner face", x, y);
                assert!(y < 64, "pixel ({}, {}) below the upper region", x, y);
            }
        }
    }
    assert!(drawn > 0);

    let mirrored = wall.with_corners(Corner::LowerLeft).render().unwrap();
    for y in 0..canvas.height {
        for x in 0..canvas.width {
            assert!(
                canvas.is_transparent(x, y) || mirrored.is_transparent(x, y),
                "({}, {}) drawn by both corners",
                x,
                y
            );
        }
    }
}

#[test]
fn every_view_renders_to_the_same_size() {
    let wall = Iso3d::new(gradient(16, 16), 48).crenellated_wall().with_corners(Corners::all());
    let sizes: Vec<_> = Orientation::ALL
        .iter()
        .map(|&o| {
            let c = wall.render_view(o).unwrap();
            (c.width, c.height)
        })
        .collect();
    assert!(sizes.iter().all(|&s| s == (48, 48 + 42)));
}
