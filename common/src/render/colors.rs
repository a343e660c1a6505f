use image::Rgba;

pub const BACKGROUND: Rgba<u8> = Rgba([0x02, 0x06, 0x17, 0xff]);
pub const FLASH_BACKGROUND: Rgba<u8> = Rgba([0x45, 0x0a, 0x0a, 0xff]);
pub const GRID_LINE: Rgba<u8> = Rgba([0x1e, 0x29, 0x3b, 0xff]);
pub const GRID_LINE_AUTONOMOUS: Rgba<u8> = Rgba([0x4c, 0x1d, 0x95, 0xff]);
pub const GRID_LINE_FLASH: Rgba<u8> = Rgba([0xef, 0x44, 0x44, 0xff]);
pub const AUTONOMOUS_ACCENT: Rgba<u8> = Rgba([0xa8, 0x55, 0xf7, 0xff]);
pub const BACKGROUND_DIM: Rgba<u8> = Rgba([10, 15, 30, 178]);
pub const BACKGROUND_FLASH: Rgba<u8> = Rgba([239, 68, 68, 102]);
pub const SCANLINE: Rgba<u8> = Rgba([255, 255, 255, 8]);
pub const HEAD: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
pub const EYE: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);

/// Parses `#rrggbb` or `#rrggbbaa`.
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, String> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| format!("Color '{}' must start with '#'", value))?;

    if hex.len() != 6 && hex.len() != 8 {
        return Err(format!("Color '{}' must have 6 or 8 hex digits", value));
    }

    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| format!("Color '{}' contains invalid hex digits", value))
    };

    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

pub fn with_alpha(color: Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let [r, g, b, a] = color.0;
    Rgba([r, g, b, (a as f32 * alpha.clamp(0.0, 1.0)).round() as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_hex_color(color: Rgba<u8>) -> String {
        let [r, g, b, a] = color.0;
        if a == 0xff {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#00ffcc").unwrap(), Rgba([0, 255, 204, 255]));
        assert_eq!(parse_hex_color("#ff007780").unwrap(), Rgba([255, 0, 119, 128]));
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        assert!(parse_hex_color("00ffcc").is_err());
        assert!(parse_hex_color("#00ff").is_err());
        assert!(parse_hex_color("#00ffzz").is_err());
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        assert_eq!(to_hex_color(with_alpha(Rgba([0, 255, 204, 255]), 1.0)), "#00ffcc");
        assert_eq!(to_hex_color(with_alpha(Rgba([255, 0, 0, 255]), 0.5)), "#ff000080");
    }
}
