use smart_leds::RGB8;

use crate::math8::blend8;

pub type Rgb = RGB8;

/// Fully off pixel
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

/// Map a 0-255 position onto the color wheel.
///
/// The colours are a transition r - g - b - back to r.
pub const fn wheel(pos: u8) -> Rgb {
    if pos < 85 {
        Rgb::new(pos * 3, 255 - pos * 3, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb::new(255 - pos * 3, 0, pos * 3)
    } else {
        let pos = pos - 170;
        Rgb::new(0, pos * 3, 255 - pos * 3)
    }
}

/// Blend two RGB colors
///
/// # Arguments
/// * `a` - First color
/// * `b` - Second color
/// * `amount_of_b` - Blend factor (0 = all a, 255 = all b)
#[inline]
pub fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
