//! Color mappers: pure functions from a normalized value to an RGB triple.
//! Callers clamp the input to `[0, 1]` first; channel arithmetic saturates
//! into `[0, 255]` on the way out.

use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    RedBlue,
    BlueRed,
    Heat,
    Grayscale,
    GreenPurple,
    Rainbow,
    Random,
}

impl ColorMap {
    pub const ALL: [ColorMap; 7] = [
        ColorMap::RedBlue,
        ColorMap::BlueRed,
        ColorMap::Heat,
        ColorMap::Grayscale,
        ColorMap::GreenPurple,
        ColorMap::Rainbow,
        ColorMap::Random,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorMap::RedBlue => "red-blue",
            ColorMap::BlueRed => "blue-red",
            ColorMap::Heat => "heat",
            ColorMap::Grayscale => "grayscale",
            ColorMap::GreenPurple => "green-purple",
            ColorMap::Rainbow => "rainbow",
            ColorMap::Random => "random",
        }
    }

    pub fn about(&self) -> &'static str {
        match self {
            ColorMap::RedBlue => "high values red, low values blue",
            ColorMap::BlueRed => "high values blue, low values red",
            ColorMap::Heat => "heat map: black, red, yellow, white",
            ColorMap::Grayscale => "grayscale gradient",
            ColorMap::GreenPurple => "low green, high purple",
            ColorMap::Rainbow => "hue wheel at full saturation",
            ColorMap::Random => "a stable random color per value",
        }
    }

    pub fn from_name(name: &str) -> Result<ColorMap> {
        ColorMap::ALL.into_iter()
            .find(|map| map.name() == name)
            .ok_or_else(|| error! {
                "unknown color scheme",
                "name" => name,
                "available" => ColorMap::ALL.map(|m| m.name()).join(", "),
            })
    }

    /// Map a pre-clamped value in `[0, 1]` to an RGB triple.
    pub fn shade(&self, value: f64) -> [u8; 3] {
        let v = (value * 255.0) as u8;
        match self {
            ColorMap::RedBlue => [v, 0, 255 - v],
            ColorMap::BlueRed => [255 - v, 0, v],
            ColorMap::Grayscale => [v, v, v],
            ColorMap::GreenPurple => [v, 255 - v, v],
            ColorMap::Heat => heat(value),
            ColorMap::Rainbow => hsv_to_rgb(value * 360.0, 1.0, 1.0),
            ColorMap::Random => random(value),
        }
    }
}

impl std::fmt::Display for ColorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

/// Three-segment ramp: black to red, red to yellow, yellow to white. The
/// final segment overshoots 255 slightly; the cast saturates it.
fn heat(value: f64) -> [u8; 3] {
    if value < 0.33 {
        [(value * 3.0 * 255.0) as u8, 0, 0]
    } else if value < 0.66 {
        [255, ((value - 0.33) * 3.0 * 255.0) as u8, 0]
    } else {
        [255, 255, ((value - 0.66) * 3.0 * 255.0) as u8]
    }
}

/// Convert HSV to RGB. Hue in degrees, saturation and value in `[0, 1]`.
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let h = (hue % 360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ]
}

/// A stable pseudo-random color per value. The seed comes from the value
/// alone, so a repeated value gets the same color within and across runs.
fn random(value: f64) -> [u8; 3] {
    let mut rng = SmallRng::seed_from_u64((value * 10000.0).round() as u64);
    [rng.gen(), rng.gen(), rng.gen()]
}
