//! Bounded random integers and display colors

use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::consts::{CHANNEL_MAX, CHANNEL_MIN};

/// Uniform integer in `[min, max]`, both ends inclusive.
///
/// A degenerate range (`max < min`) yields `min` instead of panicking, which
/// happens when a viewport is too small for the requested spawn margin.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }
    rng.random_range(min..=max)
}

/// An opaque RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Renders as a CSS color string, e.g. `rgb(20,128,255)`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Random color with each channel in `[20, 255]` (never too dark on black)
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let mut channel = || random_int(rng, CHANNEL_MIN, CHANNEL_MAX) as u8;
    Rgb::new(channel(), channel(), channel())
}
