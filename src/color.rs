use crate::error::Error;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LOW_COLOR: Rgb = Rgb(0x33, 0x99, 0xff);
pub const DEFAULT_HIGH_COLOR: Rgb = Rgb(0xff, 0x00, 0x00);

const MIN_PEN_WIDTH: f64 = 1.0;
const MAX_PEN_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::parse("color must be six hex digits", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| Error::parse("color must be six hex digits", s))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Two anchor colours an edge colour is interpolated between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    pub low: Rgb,
    pub high: Rgb,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_COLOR,
            high: DEFAULT_HIGH_COLOR,
        }
    }
}

/// Stretch `ratio` so that `min_percent` maps to 0.0 and 100% maps to 1.0.
pub fn normalize_ratio(ratio: f64, min_percent: u8) -> f64 {
    if min_percent == 100 {
        return ratio;
    }
    let floor = f64::from(min_percent) / 100.0;
    (ratio - floor) / (1.0 - floor)
}

fn lerp_channel(low: u8, high: u8, ratio: f64) -> u8 {
    let value = f64::from(low) + (f64::from(high) - f64::from(low)) * ratio;
    value.trunc().clamp(0.0, 255.0) as u8
}

impl ColorScale {
    pub fn new(low: Rgb, high: Rgb) -> Self {
        Self { low, high }
    }

    pub fn color_at(&self, ratio: f64, min_percent: u8) -> Rgb {
        let ratio = normalize_ratio(ratio, min_percent);
        Rgb(
            lerp_channel(self.low.0, self.high.0, ratio),
            lerp_channel(self.low.1, self.high.1, ratio),
            lerp_channel(self.low.2, self.high.2, ratio),
        )
    }

    pub fn link_color(&self, ratio: f64, min_percent: u8) -> String {
        self.color_at(ratio, min_percent).to_string()
    }
}

/// Edge colour for a match whose percentage is `ratio * 100`, using the
/// default anchors.
pub fn link_color(ratio: f64, min_percent: u8) -> String {
    ColorScale::default().link_color(ratio, min_percent)
}

/// Edge stroke width on the same normalised scale as the colour.
pub fn pen_width(ratio: f64, min_percent: u8) -> f64 {
    let ratio = normalize_ratio(ratio, min_percent).clamp(0.0, 1.0);
    MIN_PEN_WIDTH + (MAX_PEN_WIDTH - MIN_PEN_WIDTH) * ratio
}
