//! Color generation and manual-input validation.

use crate::errors::{ColorTapError, Result};
use crate::models::Color;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static hex color pattern"));

/// `rgb(r, g, b)` with a uniform random byte per channel.
pub fn random_rgb<R: Rng>(rng: &mut R) -> Color {
    let (r, g, b): (u8, u8, u8) = (rng.gen(), rng.gen(), rng.gen());
    Color(format!("rgb({}, {}, {})", r, g, b))
}

pub fn is_hex_color(input: &str) -> bool {
    HEX_COLOR.is_match(input)
}

/// Accepts `#` + exactly six hex digits, any case. The input is kept as typed.
pub fn parse_hex_color(input: &str) -> Result<Color> {
    if is_hex_color(input) {
        Ok(Color::new(input))
    } else {
        Err(ColorTapError::InvalidHexColor(input.to_string()))
    }
}
