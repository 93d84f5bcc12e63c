use image::{Rgba, RgbaImage};
use okcolor::{Color, Component, Space};

const WIDTH: u32 = 720;
const HEIGHT_PER_SHEET: u32 = 240;
const SATURATION: Component = 0.9;

fn main() {
    let sheets = [Space::Okhsl, Space::Okhsv];
    let height = sheets.len() as u32 * HEIGHT_PER_SHEET;

    let mut img = RgbaImage::new(WIDTH, height);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let hue = x as Component / WIDTH as Component;

        let sheet_index = (y / HEIGHT_PER_SHEET) as usize;
        let row = y % HEIGHT_PER_SHEET;

        // Lightness/value runs from 1 at the top of each sheet to 0 at the
        // bottom.
        let third = 1.0 - row as Component / (HEIGHT_PER_SHEET - 1) as Component;

        let c = Color::new(sheets[sheet_index], hue, SATURATION, third, 1.0)
            .to_space(Space::Srgb)
            .map_into_gamut_limits();

        assert!(
            c.in_gamut(),
            "Out of gamut limits: {:?} {:?}",
            sheets[sheet_index],
            c.components
        );

        *pixel = Rgba([
            (c.components.0.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.components.1.clamp(0.0, 1.0) * 255.0).round() as u8,
            (c.components.2.clamp(0.0, 1.0) * 255.0).round() as u8,
            255,
        ]);
    }

    img.save("swatches.png")
        .expect("could not write image to swatches.png");
}
