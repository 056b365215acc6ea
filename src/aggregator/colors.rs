//! Display colors for chart series and segments.
//!
//! Colors are cosmetic only. `Palette` spreads hues with the golden angle so
//! neighbouring segments stay distinguishable; `Random` picks fresh colors on
//! every call.

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Alpha used for every generated color
const SEGMENT_ALPHA: f32 = 0.7;

const GOLDEN_ANGLE: f64 = 137.508;

/// How colors are generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Deterministic, evenly spread hues
    #[default]
    Palette,

    /// Uniformly random RGB
    Random,
}

/// An RGBA color rendered as `rgba(r, g, b, a)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Rgba {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("not an rgba() color: {}", s))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected 4 components: {}", s));
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|e| format!("{}: {}", p, e));
        Ok(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a: parts[3]
                .parse::<f32>()
                .map_err(|e| format!("{}: {}", parts[3], e))?,
        })
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Produce `n` display colors, one per series or segment
pub fn assign_colors(n: usize, scheme: ColorScheme) -> Vec<Rgba> {
    match scheme {
        ColorScheme::Palette => (0..n).map(palette_color).collect(),
        ColorScheme::Random => {
            let mut rng = rand::thread_rng();
            (0..n)
                .map(|_| Rgba::new(rng.gen(), rng.gen(), rng.gen(), SEGMENT_ALPHA))
                .collect()
        }
    }
}

fn palette_color(index: usize) -> Rgba {
    let hue = (index as f64 * GOLDEN_ANGLE) % 360.0;
    let (r, g, b) = hsl_to_rgb(hue, 0.65, 0.55);
    Rgba::new(r, g, b, SEGMENT_ALPHA)
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    let to_byte = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
