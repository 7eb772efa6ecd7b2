//! Named colors.
//!
//! These are untagged, so they follow the active color space like any other
//! channel triple (in HSB mode `RED` reads as hue 255, saturation 0).

use super::Color;

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const RED: Color = Color::new(255, 0, 0);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const BLUE: Color = Color::new(0, 0, 255);
pub const YELLOW: Color = Color::new(255, 255, 0);
pub const CYAN: Color = Color::new(0, 255, 255);
pub const MAGENTA: Color = Color::new(255, 0, 255);
pub const PURPLE: Color = Color::new(128, 0, 128);
pub const GRAY: Color = Color::new(128, 128, 128);
pub const SILVER: Color = Color::new(192, 192, 192);
pub const MAROON: Color = Color::new(128, 0, 0);
pub const DARK_GREEN: Color = Color::new(0, 128, 0);
pub const NAVY: Color = Color::new(0, 0, 128);
pub const TEAL: Color = Color::new(0, 128, 128);
pub const OLIVE: Color = Color::new(128, 128, 0);
pub const ORANGE: Color = Color::new(255, 127, 50);
pub const CORNFLOWER_BLUE: Color = Color::new(101, 156, 239);
pub const AZURE: Color = Color::new(0, 127, 255);
pub const TURQUOISE: Color = Color::new(48, 213, 200);
pub const GOLD: Color = Color::new(255, 215, 0);
pub const PINK: Color = Color::new(255, 192, 203);
pub const BROWN: Color = Color::new(0xa5, 0x2a, 0x2a);

/// The C64 palette.
pub mod c64 {
    use super::Color;

    pub const RED: Color = Color::new(104, 55, 43);
    pub const CYAN: Color = Color::new(112, 164, 178);
    pub const PURPLE: Color = Color::new(111, 61, 134);
    pub const GREEN: Color = Color::new(88, 141, 67);
    pub const BLUE: Color = Color::new(53, 40, 121);
    pub const YELLOW: Color = Color::new(184, 199, 111);
    pub const ORANGE: Color = Color::new(111, 79, 37);
    pub const BROWN: Color = Color::new(67, 57, 0);
    pub const LIGHT_RED: Color = Color::new(154, 103, 89);
    pub const DARK_GREY: Color = Color::new(68, 68, 68);
    pub const GREY: Color = Color::new(108, 108, 108);
    pub const LIGHT_GREEN: Color = Color::new(154, 210, 132);
    pub const LIGHT_BLUE: Color = Color::new(108, 94, 181);
    pub const LIGHT_GREY: Color = Color::new(149, 149, 149);
}
