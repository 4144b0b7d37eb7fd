//! CSS color validation for untrusted input.
//!
//! The whole color grammar is delegated to `csscolorparser`: named colors,
//! hex forms (`#rgb`/`#rgba`/`#rrggbb`/`#rrggbbaa`), and functional notations
//! like `rgb()/rgba()/hsl()/hsla()`. Callers get a yes/no answer or channel
//! values, never a parse error to handle.

#![forbid(unsafe_code)]

use csscolorparser::Color;

/// 8-bit RGBA channels of a parsed color.
pub type Rgba8 = (u8, u8, u8, u8);

/// Whether `input` is a color the CSS grammar accepts.
///
/// Surrounding whitespace is ignored, matching how the value arrives from a
/// query string.
#[inline]
pub fn is_valid_css_color(input: &str) -> bool {
    input.trim().parse::<Color>().is_ok()
}

/// Parse a CSS `<color>` into 8-bit RGBA channels.
#[inline]
pub fn parse_css_color(input: &str) -> Option<Rgba8> {
    let parsed: Color = input.trim().parse().ok()?;
    let channels = parsed.to_rgba8();
    Some((channels[0], channels[1], channels[2], channels[3]))
}

/// Canonical lowercase hex form of a color: `#rrggbb`, or `#rrggbbaa` when
/// the alpha channel is not fully opaque. Handy for readable log output.
pub fn to_hex(input: &str) -> Option<String> {
    let (red, green, blue, alpha) = parse_css_color(input)?;
    if alpha == u8::MAX {
        Some(format!("#{red:02x}{green:02x}{blue:02x}"))
    } else {
        Some(format!("#{red:02x}{green:02x}{blue:02x}{alpha:02x}"))
    }
}
