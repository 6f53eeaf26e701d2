use crate::foundation::error::{InkError, InkResult};
use std::fmt;
use std::str::FromStr;

/// Straight-alpha sRGB color used as a stroke base color.
///
/// `lighten` / `darken` operate in HSL and are deliberately asymmetric: lightening desaturates,
/// darkening saturates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Color {
    /// Opaque color from RGB bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(s: &str) -> InkResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        if s.starts_with("rgb") {
            return parse_rgb_fn(s);
        }
        Err(InkError::color(format!("unsupported color format \"{s}\"")))
    }

    /// Lighten by `percent` (0..=100): raises lightness toward 1 and reduces saturation.
    pub fn lighten(self, percent: f64) -> Self {
        let (h, s, l) = rgb_to_hsl(self.r, self.g, self.b);
        let new_s = (s * (1.0 - percent / 200.0)).max(0.0);
        let new_l = (l + (percent / 100.0) * (1.0 - l)).min(1.0);
        self.with_hsl(h, new_s, new_l)
    }

    /// Darken by `percent` (0..=100): scales lightness toward 0 and increases saturation.
    pub fn darken(self, percent: f64) -> Self {
        let (h, s, l) = rgb_to_hsl(self.r, self.g, self.b);
        let new_s = (s * (1.0 + percent / 200.0)).min(1.0);
        let new_l = (l * (1.0 - percent / 100.0)).max(0.0);
        self.with_hsl(h, new_s, new_l)
    }

    /// Channel-wise linear interpolation (alpha included).
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    fn with_hsl(self, h: f64, s: f64, l: f64) -> Self {
        let (r, g, b) = hsl_to_rgb(h, s, l);
        Self { r, g, b, a: self.a }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = InkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_hex(s: &str) -> InkResult<Color> {
    fn hex_byte(pair: &str) -> InkResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| InkError::color(format!("invalid hex byte \"{pair}\"")))
    }

    if !s.is_ascii() {
        return Err(InkError::color("hex color must be ASCII"));
    }

    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let pair: String = [c, c].iter().collect();
                out[i] = hex_byte(&pair)?;
            }
            Ok(Color::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: f64::from(hex_byte(&s[6..8])?) / 255.0,
        }),
        _ => Err(InkError::color(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)",
        )),
    }
}

fn parse_rgb_fn(s: &str) -> InkResult<Color> {
    let open = s
        .find('(')
        .ok_or_else(|| InkError::color(format!("missing '(' in \"{s}\"")))?;
    let inner = s[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| InkError::color(format!("missing ')' in \"{s}\"")))?;

    let parts: Vec<&str> = inner
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(InkError::color(format!(
            "expected 3 or 4 components in \"{s}\""
        )));
    }

    let channel = |p: &str| -> InkResult<u8> {
        let v: f64 = p
            .parse()
            .map_err(|_| InkError::color(format!("invalid channel \"{p}\"")))?;
        Ok(v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match parts.get(3) {
        Some(p) => p
            .parse::<f64>()
            .map_err(|_| InkError::color(format!("invalid alpha \"{p}\"")))?
            .clamp(0.0, 1.0),
        None => 1.0,
    };

    Ok(Color {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha,
    })
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // achromatic
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    fn to_u8(x: f64) -> u8 {
        (x.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    if s == 0.0 {
        let v = to_u8(l);
        return (v, v, v);
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

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    (
        to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_u8(hue_to_rgb(p, q, h)),
        to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
