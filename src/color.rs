// ABOUTME: Theme color conversion for the slide-deck library
// ABOUTME: Converts between `#rrggbb` hex colors and the "H S% L%" triples used by themes

use crate::errors::{DeckError, Result};

/// Returned by [`hsl_to_hex`] when the input is not an HSL triple.
pub const FALLBACK_HEX: &str = "#ff6b00";

fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(DeckError::InvalidColor(hex.to_string())),
    };
    let channel = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .ok_or_else(|| DeckError::InvalidColor(hex.to_string()))
    };
    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// `"#f97316"` → `"25 95% 53%"`. Components are rounded to whole numbers.
pub fn hex_to_hsl(hex: &str) -> Result<String> {
    let (r, g, b) = parse_hex(hex)?;
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let (mut h, mut s) = (0.0, 0.0);

    if max != min {
        let d = max - min;
        s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
    }

    Ok(format!(
        "{} {}% {}%",
        (h * 360.0).round() as i64,
        (s * 100.0).round() as i64,
        (l * 100.0).round() as i64
    ))
}

fn parse_hsl(hsl: &str) -> Option<(f64, f64, f64)> {
    let mut parts = hsl
        .split_whitespace()
        .map(|p| {
            p.trim_end_matches('%')
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        });
    let h = parts.next()??;
    let s = parts.next()??;
    let l = parts.next()??;
    Some((h.rem_euclid(360.0) / 360.0, s / 100.0, l / 100.0))
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// `"0 100% 50%"` → `"#ff0000"`. Unparseable input maps to [`FALLBACK_HEX`].
pub fn hsl_to_hex(hsl: &str) -> String {
    let Some((h, s, l)) = parse_hsl(hsl) else {
        return FALLBACK_HEX.to_string();
    };

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    let to_byte = |x: f64| (x * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", to_byte(r), to_byte(g), to_byte(b))
}
