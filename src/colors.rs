//! RGBA8 color type and channel helpers.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Builds an opaque color from real-valued channels on the 0..=255
    /// scale, clamping each one and truncating the fraction.
    pub fn from_channels(channels: Vec3) -> Self {
        Self::rgb(
            clamp_channel(channels.x()) as u8,
            clamp_channel(channels.y()) as u8,
            clamp_channel(channels.z()) as u8,
        )
    }

    /// The color as a pack of 8-bit channels in RGBA order.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Clamps a channel value to `[0, 255]`. NaN maps to 0.
#[inline]
pub fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

/// Clamps every component of `channels` to `[0, 255]`.
pub fn clamp_channels(channels: Vec3) -> Vec3 {
    Vec3::direction(
        clamp_channel(channels.x()),
        clamp_channel(channels.y()),
        clamp_channel(channels.z()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_clamps() {
        let c = Color::from_channels(Vec3::direction(-12.0, 300.0, 127.9));
        assert_eq!(c, Color::new(0, 255, 127, 255));
    }

    #[test]
    fn test_nan_channel_is_black() {
        assert_eq!(clamp_channel(f64::NAN), 0.0);
    }
}
