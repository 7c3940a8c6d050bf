//! Icon generation for the tray and the overlay window.
//!
//! Draws a small skull: a round head with two eye sockets and a nose mark,
//! plus four teeth underneath.

use eframe::egui;
use image::{Rgba, RgbaImage};

/// Icon size in pixels.
pub const ICON_SIZE: u32 = 64;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Generate the skull icon as an RGBA image.
pub fn generate_skull_icon() -> RgbaImage {
    let mut img = RgbaImage::new(ICON_SIZE, ICON_SIZE);

    // Head
    fill_ellipse(&mut img, [8, 4, 56, 48], WHITE);
    stroke_ellipse(&mut img, [8, 4, 56, 48], 2.0, BLACK);

    // Eye sockets
    fill_ellipse(&mut img, [16, 18, 28, 32], BLACK);
    fill_ellipse(&mut img, [36, 18, 48, 32], BLACK);

    // Nose
    fill_triangle(&mut img, [(32.0, 34.0), (28.0, 42.0), (36.0, 42.0)], BLACK);

    // Teeth
    for i in 0..4 {
        let x = 20 + i * 8;
        fill_rect(&mut img, [x, 48, x + 6, 58], WHITE);
        stroke_rect(&mut img, [x, 48, x + 6, 58], BLACK);
    }

    img
}

/// The skull as window icon data for the overlay viewport.
pub fn window_icon() -> egui::IconData {
    egui::IconData {
        rgba: generate_skull_icon().into_raw(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

/// The skull as a tray icon.
#[cfg(windows)]
pub fn create_tray_icon() -> Result<tray_icon::Icon, crate::ui::TrayError> {
    tray_icon::Icon::from_rgba(generate_skull_icon().into_raw(), ICON_SIZE, ICON_SIZE)
        .map_err(|_| crate::ui::TrayError::IconLoadFailed)
}

/// Normalised distance of a pixel from an ellipse centre; <= 1.0 is inside.
fn ellipse_distance(x: u32, y: u32, bbox: [u32; 4], inset: f32) -> f32 {
    let [x0, y0, x1, y1] = bbox.map(|v| v as f32);
    let (cx, cy) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let rx = (x1 - x0) / 2.0 - inset;
    let ry = (y1 - y0) / 2.0 - inset;
    if rx <= 0.0 || ry <= 0.0 {
        return f32::INFINITY;
    }
    let dx = (x as f32 - cx) / rx;
    let dy = (y as f32 - cy) / ry;
    dx * dx + dy * dy
}

fn fill_ellipse(img: &mut RgbaImage, bbox: [u32; 4], color: Rgba<u8>) {
    for y in bbox[1]..=bbox[3].min(ICON_SIZE - 1) {
        for x in bbox[0]..=bbox[2].min(ICON_SIZE - 1) {
            if ellipse_distance(x, y, bbox, 0.0) <= 1.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn stroke_ellipse(img: &mut RgbaImage, bbox: [u32; 4], width: f32, color: Rgba<u8>) {
    for y in bbox[1]..=bbox[3].min(ICON_SIZE - 1) {
        for x in bbox[0]..=bbox[2].min(ICON_SIZE - 1) {
            let inside_outer = ellipse_distance(x, y, bbox, 0.0) <= 1.0;
            let inside_inner = ellipse_distance(x, y, bbox, width) <= 1.0;
            if inside_outer && !inside_inner {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn fill_rect(img: &mut RgbaImage, [x0, y0, x1, y1]: [u32; 4], color: Rgba<u8>) {
    for y in y0..=y1.min(ICON_SIZE - 1) {
        for x in x0..=x1.min(ICON_SIZE - 1) {
            img.put_pixel(x, y, color);
        }
    }
}

fn stroke_rect(img: &mut RgbaImage, [x0, y0, x1, y1]: [u32; 4], color: Rgba<u8>) {
    let (x1, y1) = (x1.min(ICON_SIZE - 1), y1.min(ICON_SIZE - 1));
    for x in x0..=x1 {
        img.put_pixel(x, y0, color);
        img.put_pixel(x, y1, color);
    }
    for y in y0..=y1 {
        img.put_pixel(x0, y, color);
        img.put_pixel(x1, y, color);
    }
}

fn fill_triangle(img: &mut RgbaImage, points: [(f32, f32); 3], color: Rgba<u8>) {
    let edge = |(ax, ay): (f32, f32), (bx, by): (f32, f32), (px, py): (f32, f32)| {
        (bx - ax) * (py - ay) - (by - ay) * (px - ax)
    };
    let [a, b, c] = points;
    let min_y = a.1.min(b.1).min(c.1).max(0.0) as u32;
    let max_y = (a.1.max(b.1).max(c.1) as u32).min(ICON_SIZE - 1);
    let min_x = a.0.min(b.0).min(c.0).max(0.0) as u32;
    let max_x = (a.0.max(b.0).max(c.0) as u32).min(ICON_SIZE - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x as f32, y as f32);
            let (e0, e1, e2) = (edge(a, b, p), edge(b, c, p), edge(c, a, p));
            let all_pos = e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0;
            let all_neg = e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0;
            if all_pos || all_neg {
                img.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_has_expected_dimensions() {
        let img = generate_skull_icon();
        assert_eq!(img.dimensions(), (ICON_SIZE, ICON_SIZE));
        assert_eq!(img.into_raw().len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
    }

    #[test]
    fn background_is_transparent() {
        let img = generate_skull_icon();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(63, 63)[3], 0);
        // Gap between the first two teeth
        assert_eq!(img.get_pixel(27, 55)[3], 0);
    }

    #[test]
    fn head_is_white_with_dark_outline() {
        let img = generate_skull_icon();
        assert_eq!(*img.get_pixel(32, 10), WHITE);
        assert_eq!(*img.get_pixel(9, 26), BLACK);
    }

    #[test]
    fn eyes_and_nose_are_black() {
        let img = generate_skull_icon();
        assert_eq!(*img.get_pixel(22, 25), BLACK);
        assert_eq!(*img.get_pixel(42, 25), BLACK);
        assert_eq!(*img.get_pixel(32, 39), BLACK);
    }

    #[test]
    fn four_outlined_teeth() {
        let img = generate_skull_icon();
        for i in 0..4 {
            let x = 20 + i * 8;
            assert_eq!(*img.get_pixel(x + 3, 53), WHITE, "tooth {i} body");
            assert_eq!(*img.get_pixel(x, 53), BLACK, "tooth {i} edge");
            assert_eq!(*img.get_pixel(x + 3, 58), BLACK, "tooth {i} bottom");
        }
    }

    #[test]
    fn window_icon_matches_generated_image() {
        let icon = window_icon();
        assert_eq!((icon.width, icon.height), (ICON_SIZE, ICON_SIZE));
        assert_eq!(icon.rgba, generate_skull_icon().into_raw());
    }
}
