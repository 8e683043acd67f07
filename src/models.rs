//! Display models.

use crate::{
    backlight::{BacklightProperties, MAX_BRIGHTNESS},
    dcs::{EnterSleepMode, InterfaceExt, SetDisplayOff},
    error::Error,
    interface::Interface,
    mode::ModeDescriptor,
    options::{DsiConfig, DsiPixel},
    reset::ResetTiming,
};
use embedded_graphics_core::prelude::RgbColor;
use embedded_hal::delay::DelayNs;

mod himax_boe;

pub use himax_boe::*;

/// Display model.
pub trait Model {
    /// The color format. Its wire format must match [`Model::DSI_CONFIG`].
    type ColorFormat: RgbColor + DsiPixel;

    /// The only video mode, reported as preferred.
    const MODE: ModeDescriptor;

    /// DSI device configuration applied on attach.
    const DSI_CONFIG: DsiConfig;

    /// Minimum hold times of the reset pulse.
    const RESET_TIMING: ResetTiming;

    /// Backlight properties declared on attach.
    const BACKLIGHT: BacklightProperties = BacklightProperties::raw(MAX_BRIGHTNESS);

    /// Configures a freshly reset panel and turns the display on.
    ///
    /// Stops at the first failed write. Nothing is rolled back; the caller is
    /// expected to put the panel back into reset.
    fn power_on<DI, DELAY>(
        &mut self,
        di: &mut DI,
        delay: &mut DELAY,
    ) -> Result<(), Error<DI::Error>>
    where
        DI: Interface,
        DELAY: DelayNs;

    /// Turns the display off and puts the panel to sleep.
    ///
    /// Every step runs even if an earlier one failed. Returns the first error.
    fn power_off<DI, DELAY>(
        &mut self,
        di: &mut DI,
        delay: &mut DELAY,
    ) -> Result<(), Error<DI::Error>>
    where
        DI: Interface,
        DELAY: DelayNs,
    {
        let display_off = di
            .write_command(SetDisplayOff)
            .inspect_err(|e| log::debug!("Failed to set display off: {}", e));
        delay.delay_ms(30);

        let sleep = di
            .write_command(EnterSleepMode)
            .inspect_err(|e| log::debug!("Failed to enter sleep mode: {}", e));
        delay.delay_ms(60);

        display_off.and(sleep)
    }
}
