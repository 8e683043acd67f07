//! Hardware reset line.

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::options::ResetPolarity;

/// Hold times of the reset pulse, in milliseconds.
///
/// These are minimums; longer holds are tolerated by the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    /// Released before the pulse.
    pub pre_release_ms: u32,
    /// Held in reset.
    pub assert_ms: u32,
    /// Released after the pulse, before the first command.
    pub post_release_ms: u32,
}

/// Reset pin with its polarity.
///
/// Driving a GPIO is treated as infallible here: a pin that cannot be driven
/// is reported when the pin is acquired. Errors from the pin are logged and
/// otherwise ignored.
pub struct ResetLine<RST> {
    pin: RST,
    polarity: ResetPolarity,
}

impl<RST> ResetLine<RST>
where
    RST: OutputPin,
{
    /// Wraps `pin`.
    pub fn new(pin: RST, polarity: ResetPolarity) -> Self {
        Self { pin, polarity }
    }

    /// Holds the panel in reset.
    pub fn assert(&mut self) {
        self.drive(true);
    }

    /// Releases the panel from reset.
    pub fn release(&mut self) {
        self.drive(false);
    }

    /// Drives the release, assert, release pulse. Blocks for the sum of the
    /// hold times.
    pub fn pulse<DELAY: DelayNs>(&mut self, delay: &mut DELAY, timing: &ResetTiming) {
        self.release();
        delay.delay_ms(timing.pre_release_ms);
        self.assert();
        delay.delay_ms(timing.assert_ms);
        self.release();
        delay.delay_ms(timing.post_release_ms);
    }

    /// Returns the pin.
    pub fn into_inner(self) -> RST {
        self.pin
    }

    fn drive(&mut self, asserted: bool) {
        let high = match self.polarity {
            ResetPolarity::ActiveLow => !asserted,
            ResetPolarity::ActiveHigh => asserted,
        };
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            log::error!("Failed to drive reset line: {:?}", e);
        }
    }
}
