//! Text and image renderings of a finished symbol.

use image::{GrayImage, Luma};
use rayon::prelude::*;

use crate::models::QRCode;

const DARK: u8 = 0;
const LIGHT: u8 = 255;

/// Text picture of the symbol, two characters per module.
///
/// `border` blank lines go above and below, `2 * border` spaces to the left.
/// Invalid codes render as an empty string.
pub fn to_ascii(code: &QRCode, border: usize) -> String {
    if !code.is_valid() {
        return String::new();
    }

    let side = code.modules_per_side();
    let mut out = String::with_capacity((side * 2 + border * 2 + 1) * (side + border * 2));
    out.extend(std::iter::repeat_n('\n', border));

    for row in code.modules().chunks(side) {
        out.extend(std::iter::repeat_n(' ', 2 * border));
        for &module in row {
            out.push_str(if module != 0 { "##" } else { "  " });
        }
        out.push('\n');
    }

    out.extend(std::iter::repeat_n('\n', border));
    out
}

/// Grayscale image with `module_size` pixels per module and a light quiet
/// zone of `border` modules. Returns `None` for invalid codes or a zero
/// module size.
pub fn to_gray_image(code: &QRCode, module_size: u32, border: u32) -> Option<GrayImage> {
    if !code.is_valid() || module_size == 0 {
        return None;
    }

    let side = code.modules_per_side();
    let cell = module_size as usize;
    let width = (side + 2 * border as usize) * cell;
    let offset = border as usize * cell;
    let modules = code.modules();

    let mut pixels = vec![LIGHT; width * width];
    pixels.par_chunks_mut(width).enumerate().for_each(|(py, row)| {
        if py < offset || py >= offset + side * cell {
            return;
        }
        let y = (py - offset) / cell;
        for x in 0..side {
            if modules[y * side + x] != 0 {
                let start = offset + x * cell;
                row[start..start + cell].fill(DARK);
            }
        }
    });

    GrayImage::from_raw(width as u32, width as u32, pixels)
}

/// Sample the centre of every module of an axis-aligned rendering made by
/// [`to_gray_image`] with the same `module_size` and `border`.
///
/// Returns `None` if the image is not square or its size does not match a
/// whole number of modules.
pub fn modules_from_gray_image(image: &GrayImage, module_size: u32, border: u32) -> Option<Vec<u8>> {
    let (width, height) = image.dimensions();
    if module_size == 0 || width != height || width % module_size != 0 {
        return None;
    }
    let side = (width / module_size).checked_sub(2 * border)? as usize;
    if side == 0 {
        return None;
    }

    let half = module_size / 2;
    let mut modules = Vec::with_capacity(side * side);
    for y in 0..side as u32 {
        for x in 0..side as u32 {
            let px = (border + x) * module_size + half;
            let py = (border + y) * module_size + half;
            let Luma([value]) = *image.get_pixel(px, py);
            modules.push(u8::from(value < 128));
        }
    }
    Some(modules)
}
