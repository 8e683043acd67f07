//! Attach-time configuration.

use embedded_graphics_core::pixelcolor::{PixelColor, Rgb565, Rgb666, Rgb888};

/// Pixel format streamed over the video link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 24 bits per pixel.
    Rgb888,
    /// 18 bits per pixel, packed.
    Rgb666Packed,
    /// 16 bits per pixel.
    Rgb565,
}

impl PixelFormat {
    /// Bits per pixel on the wire.
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            PixelFormat::Rgb888 => 24,
            PixelFormat::Rgb666Packed => 18,
            PixelFormat::Rgb565 => 16,
        }
    }
}

/// Color types that map onto a DSI video pixel format.
pub trait DsiPixel: PixelColor {
    /// Wire format carrying this color type.
    const FORMAT: PixelFormat;
}

impl DsiPixel for Rgb888 {
    const FORMAT: PixelFormat = PixelFormat::Rgb888;
}

impl DsiPixel for Rgb666 {
    const FORMAT: PixelFormat = PixelFormat::Rgb666Packed;
}

impl DsiPixel for Rgb565 {
    const FORMAT: PixelFormat = PixelFormat::Rgb565;
}

/// DSI device mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeFlags {
    /// Video mode (continuous pixel stream) instead of command mode.
    pub video: bool,
    /// The clock lane may stop between transmissions.
    pub clock_non_continuous: bool,
    /// Commands are sent using low-power signaling by default.
    pub low_power: bool,
}

/// DSI device configuration applied when the panel attaches to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsiConfig {
    /// Number of data lanes, 1 to 4.
    pub lanes: u8,
    /// Pixel format.
    pub format: PixelFormat,
    /// Mode flags.
    pub mode_flags: ModeFlags,
}

impl DsiConfig {
    /// Returns `true` if the configuration can be applied to a DSI link.
    pub const fn is_valid(&self) -> bool {
        self.lanes >= 1 && self.lanes <= 4
    }
}

/// Electrical level that holds the panel in reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolarity {
    /// The pin is driven low to hold the panel in reset.
    #[default]
    ActiveLow,
    /// The pin is driven high to hold the panel in reset.
    ActiveHigh,
}

/// Options applied by the [crate::Builder].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOptions {
    /// Reset line polarity.
    pub reset_polarity: ResetPolarity,
    /// Brightness reported to the backlight consumer before the first read.
    pub initial_brightness: u16,
    /// DSI device configuration.
    pub dsi: DsiConfig,
}

impl PanelOptions {
    /// Default options for a model.
    pub fn for_model<M: crate::models::Model>() -> Self {
        Self {
            reset_polarity: ResetPolarity::default(),
            initial_brightness: M::BACKLIGHT.brightness,
            dsi: M::DSI_CONFIG,
        }
    }
}
