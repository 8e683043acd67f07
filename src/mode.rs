//! Video mode descriptors.

use embedded_graphics_core::geometry::Size;

/// Timing of one axis, in pixels (horizontal) or lines (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Active area.
    pub active: u16,
    /// Front porch.
    pub front_porch: u16,
    /// Sync pulse width.
    pub sync_width: u16,
    /// Back porch.
    pub back_porch: u16,
}

impl Timing {
    /// Create a new axis timing.
    pub const fn new(active: u16, front_porch: u16, sync_width: u16, back_porch: u16) -> Self {
        Self {
            active,
            front_porch,
            sync_width,
            back_porch,
        }
    }

    /// Start of the sync pulse.
    pub const fn sync_start(&self) -> u32 {
        self.active as u32 + self.front_porch as u32
    }

    /// End of the sync pulse.
    pub const fn sync_end(&self) -> u32 {
        self.sync_start() + self.sync_width as u32
    }

    /// Active area plus blanking.
    pub const fn total(&self) -> u32 {
        self.sync_end() + self.back_porch as u32
    }

    const fn is_positive(&self) -> bool {
        self.active > 0 && self.front_porch > 0 && self.sync_width > 0 && self.back_porch > 0
    }
}

/// How a mode was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeType {
    /// Defined by the driver.
    pub driver: bool,
    /// The mode consumers should pick.
    pub preferred: bool,
}

/// A fixed video mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDescriptor {
    /// Horizontal timing.
    pub horizontal: Timing,
    /// Vertical timing.
    pub vertical: Timing,
    /// Frame rate the clock was derived for.
    pub refresh_hz: u32,
    /// Pixel clock in kHz.
    pub clock_khz: u32,
    /// Physical size in millimeters, 0 if unknown.
    pub width_mm: u16,
    /// Physical size in millimeters, 0 if unknown.
    pub height_mm: u16,
    /// Mode type.
    pub kind: ModeType,
}

impl ModeDescriptor {
    /// Create a driver-preferred mode, deriving the pixel clock from the timings.
    pub const fn new(horizontal: Timing, vertical: Timing, refresh_hz: u32) -> Self {
        Self {
            horizontal,
            vertical,
            refresh_hz,
            clock_khz: derive_clock_khz(&horizontal, &vertical, refresh_hz),
            width_mm: 0,
            height_mm: 0,
            kind: ModeType {
                driver: true,
                preferred: true,
            },
        }
    }

    /// Active area.
    pub const fn size(&self) -> Size {
        Size::new(self.horizontal.active as u32, self.vertical.active as u32)
    }

    /// Exact pixel clock in Hz.
    pub const fn pixel_clock_hz(&self) -> u64 {
        self.horizontal.total() as u64 * self.vertical.total() as u64 * self.refresh_hz as u64
    }

    /// Returns `true` if every timing field is positive and the stored clock
    /// matches the one derived from the timings.
    pub const fn is_valid(&self) -> bool {
        self.horizontal.is_positive()
            && self.vertical.is_positive()
            && self.refresh_hz > 0
            && self.clock_khz == derive_clock_khz(&self.horizontal, &self.vertical, self.refresh_hz)
    }
}

impl core::fmt::Display for ModeDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.horizontal.active, self.vertical.active)
    }
}

/// Pixel clock in kHz: total width times total height times frame rate,
/// divided by 1000 with integer truncation.
const fn derive_clock_khz(horizontal: &Timing, vertical: &Timing, refresh_hz: u32) -> u32 {
    let hz = horizontal.total() as u64 * vertical.total() as u64 * refresh_hz as u64;
    (hz / 1000) as u32
}
