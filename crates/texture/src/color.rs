//! Color parsing and per-channel blend modes.

use crate::error::{Result, TextureError};

/// Parses `#rrggbb` (or the short `#rgb`) into RGB bytes.
pub fn parse_hex_color(color: &str) -> Result<[u8; 3]> {
    let invalid = || TextureError::InvalidColor(color.to_string());
    let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match hex.len() {
        6 => Ok([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, i) in rgb.iter_mut().zip(0..3) {
                *slot = channel(&hex[i..i + 1])? * 17;
            }
            Ok(rgb)
        }
        _ => Err(invalid()),
    }
}

/// Multiply blend of normalized channels.
pub(crate) fn multiply(backdrop: f32, source: f32) -> f32 {
    backdrop * source
}

/// Overlay blend of normalized channels.
pub(crate) fn overlay(backdrop: f32, source: f32) -> f32 {
    if backdrop <= 0.5 {
        2.0 * backdrop * source
    } else {
        1.0 - 2.0 * (1.0 - backdrop) * (1.0 - source)
    }
}

/// Composites `blended` over `backdrop` at `alpha`.
pub(crate) fn mix(backdrop: f32, blended: f32, alpha: f32) -> f32 {
    backdrop * (1.0 - alpha) + blended * alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#3498db").unwrap(), [0x34, 0x98, 0xdb]);
        assert_eq!(parse_hex_color("#FFF").unwrap(), [255, 255, 255]);
        assert!(matches!(parse_hex_color("3498db"), Err(TextureError::InvalidColor(_))));
        assert!(matches!(parse_hex_color("#3498d"), Err(TextureError::InvalidColor(_))));
        assert!(matches!(parse_hex_color("#zzzzzz"), Err(TextureError::InvalidColor(_))));
    }

    #[test]
    fn test_overlay() {
        assert_relative_eq!(overlay(0.25, 0.5), 0.25);
        assert_relative_eq!(overlay(0.75, 0.5), 0.75);
        assert_relative_eq!(overlay(1.0, 0.0), 1.0);
    }

    #[test]
    fn test_mix() {
        assert_relative_eq!(mix(0.0, 1.0, 0.25), 0.25);
        assert_relative_eq!(multiply(0.5, 0.5), 0.25);
    }
}
