#![cfg_attr(not(test), no_std)]

//! This crate provides a blocking driver for the Himax BOE 1200x2000 MIPI DSI
//! video mode panel.
//!
//! The driver owns the panel's reset line and its DCS command interface. It
//! brings the panel from an unknown electrical state to a streaming state
//! ([`Panel::prepare`]) and back ([`Panel::unprepare`]), reports the panel's
//! only video mode, and exposes 12-bit brightness control.
//!
//! ```ignore
//! use himax_boe::{interface::DsiInterface, models::HimaxBoe, Builder};
//!
//! let mut panel = Builder::new(HimaxBoe, DsiInterface::new(host))
//!     .reset_pin(reset)
//!     .attach()?;
//!
//! let mode = panel.preferred_mode();
//! panel.prepare(&mut delay)?;
//! panel.set_brightness(2048)?;
//! ```
//!
//! All operations block the calling thread until done; a prepare takes
//! roughly 200 ms.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

pub mod backlight;
pub mod dcs;
pub mod error;
pub mod interface;
pub mod mode;
pub mod models;
pub mod options;
pub mod reset;
pub mod sequence;

mod builder;
pub use builder::*;

#[cfg(test)]
mod _mock;

use crate::{
    backlight::BacklightProperties, error::Error, mode::ModeDescriptor, models::Model,
    reset::ResetLine,
};

/// Power state of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Held in reset or asleep. Initial state.
    Unprepared,
    /// Configured and ready for video.
    Prepared,
}

/// Panel driver structure.
pub struct Panel<DI, MODEL, RST>
where
    DI: interface::Interface,
    MODEL: Model,
    RST: OutputPin,
{
    /// The display interface.
    di: DI,
    /// The display model instance.
    model: MODEL,
    /// The reset line.
    rst: ResetLine<RST>,
    /// Declared backlight properties.
    backlight: BacklightProperties,
    /// Power state.
    state: PowerState,
}

impl<DI, M, RST> Panel<DI, M, RST>
where
    DI: interface::Interface,
    M: Model,
    RST: OutputPin,
{
    /// Returns the current power state.
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Returns `true` if the panel is prepared.
    pub fn is_prepared(&self) -> bool {
        self.state == PowerState::Prepared
    }

    /// Resets the panel and runs the power-on sequence.
    ///
    /// Does nothing if the panel is already prepared. On failure the panel is
    /// put back into reset and stays unprepared.
    pub fn prepare<DLY: DelayNs>(&mut self, delay: &mut DLY) -> Result<(), Error<DI::Error>> {
        if self.state == PowerState::Prepared {
            return Ok(());
        }

        self.rst.pulse(delay, &M::RESET_TIMING);

        if let Err(e) = self.model.power_on(&mut self.di, delay) {
            log::error!("Failed to initialize panel: {}", e);
            self.rst.assert();
            return Err(e);
        }

        self.state = PowerState::Prepared;
        log::debug!("panel prepared");
        Ok(())
    }

    /// Runs the power-off sequence and puts the panel into reset.
    ///
    /// Does nothing if the panel is already unprepared. The panel always ends
    /// up in reset and unprepared; a failure of the power-off sequence is
    /// logged and returned afterwards.
    pub fn unprepare<DLY: DelayNs>(&mut self, delay: &mut DLY) -> Result<(), Error<DI::Error>> {
        if self.state == PowerState::Unprepared {
            return Ok(());
        }

        let result = self
            .model
            .power_off(&mut self.di, delay)
            .inspect_err(|e| log::error!("Failed to un-initialize panel: {}", e));

        self.rst.assert();
        self.state = PowerState::Unprepared;
        log::debug!("panel unprepared");

        result
    }

    /// Returns the panel's video mode.
    pub fn preferred_mode(&self) -> ModeDescriptor {
        M::MODE
    }

    /// Returns the backlight properties declared on attach.
    pub fn backlight(&self) -> &BacklightProperties {
        &self.backlight
    }

    /// Sets the display brightness.
    ///
    /// Values above the declared maximum are rejected without bus traffic.
    pub fn set_brightness(&mut self, value: u16) -> Result<(), Error<DI::Error>> {
        if value > self.backlight.max_brightness {
            return Err(Error::BrightnessOutOfRange {
                value,
                max: self.backlight.max_brightness,
            });
        }
        if !self.is_prepared() {
            log::debug!("brightness set while unprepared");
        }
        backlight::set_brightness(&mut self.di, value)
    }

    /// Reads the display brightness back from the panel.
    pub fn get_brightness(&mut self) -> Result<u16, Error<DI::Error>> {
        if !self.is_prepared() {
            log::debug!("brightness read while unprepared");
        }
        backlight::get_brightness(&mut self.di)
    }

    /// Detaches from the bus host and releases the interface, model instance
    /// and reset pin.
    ///
    /// The panel is not unprepared first.
    pub fn detach(mut self) -> (DI, M, RST) {
        if let Err(e) = self.di.detach() {
            log::error!("Failed to detach from DSI host: {:?}", e);
        }
        (self.di, self.model, self.rst.into_inner())
    }

    /// Returns a mutable reference to the underlying display interface for sending raw commands.
    /// # Safety
    /// (User responsible for not desynchronizing state)
    pub unsafe fn raw_interface_mut(&mut self) -> &mut DI {
        &mut self.di
    }
}
