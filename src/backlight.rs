//! Brightness control.
//!
//! Brightness commands need high-speed signaling. Each transaction clears the
//! interface's low-power flag through [`HighSpeed`], which puts the previous
//! value back when it goes out of scope, whether the transaction succeeded or
//! not.

use core::ops::{Deref, DerefMut};

use crate::{
    dcs::{InterfaceExt, SetDisplayBrightness, GET_DISPLAY_BRIGHTNESS},
    error::Error,
    interface::Interface,
};

/// Largest value the 12-bit brightness commands carry.
pub const MAX_BRIGHTNESS: u16 = 4095;

/// How brightness values map to the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BacklightType {
    /// Values are written to the panel unchanged.
    Raw,
}

/// Properties declared to backlight consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightProperties {
    /// Backlight type.
    pub kind: BacklightType,
    /// Brightness before the first update.
    pub brightness: u16,
    /// Highest accepted brightness.
    pub max_brightness: u16,
}

impl BacklightProperties {
    /// Raw backlight starting at full brightness.
    pub const fn raw(max_brightness: u16) -> Self {
        Self {
            kind: BacklightType::Raw,
            brightness: max_brightness,
            max_brightness,
        }
    }

    /// Returns `true` if the range fits the command and the initial value is in range.
    pub const fn is_valid(&self) -> bool {
        self.max_brightness <= MAX_BRIGHTNESS && self.brightness <= self.max_brightness
    }
}

/// Scoped high-speed signaling.
///
/// Clears the low-power flag on creation and restores the previous value on drop.
pub struct HighSpeed<'a, DI: Interface> {
    di: &'a mut DI,
    restore: bool,
}

impl<'a, DI: Interface> HighSpeed<'a, DI> {
    /// Switches `di` to high-speed signaling.
    pub fn new(di: &'a mut DI) -> Self {
        let restore = di.low_power_mode();
        di.set_low_power_mode(false);
        Self { di, restore }
    }
}

impl<DI: Interface> Deref for HighSpeed<'_, DI> {
    type Target = DI;

    fn deref(&self) -> &DI {
        self.di
    }
}

impl<DI: Interface> DerefMut for HighSpeed<'_, DI> {
    fn deref_mut(&mut self) -> &mut DI {
        self.di
    }
}

impl<DI: Interface> Drop for HighSpeed<'_, DI> {
    fn drop(&mut self) {
        self.di.set_low_power_mode(self.restore);
    }
}

/// Writes the display brightness with one large-form command.
pub fn set_brightness<DI: Interface>(di: &mut DI, value: u16) -> Result<(), Error<DI::Error>> {
    if value > MAX_BRIGHTNESS {
        return Err(Error::BrightnessOutOfRange {
            value,
            max: MAX_BRIGHTNESS,
        });
    }
    let mut di = HighSpeed::new(di);
    di.write_command(SetDisplayBrightness(value))
}

/// Reads the display brightness with one large-form command.
pub fn get_brightness<DI: Interface>(di: &mut DI) -> Result<u16, Error<DI::Error>> {
    let mut di = HighSpeed::new(di);
    let mut buf = [0u8; 2];
    di.read_raw(GET_DISPLAY_BRIGHTNESS, &mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_mock::{Event, MockDisplayInterface, MockError, Trace};

    fn interface(trace: &Trace) -> MockDisplayInterface {
        let mut di = MockDisplayInterface::new(trace);
        di.set_low_power_mode(true);
        di
    }

    #[test]
    fn round_trip_full_range() {
        let trace = Trace::default();
        let mut di = interface(&trace);
        for value in 0..=MAX_BRIGHTNESS {
            set_brightness(&mut di, value).unwrap();
            assert_eq!(get_brightness(&mut di).unwrap(), value);
        }
        assert!(di.low_power_mode());
    }

    #[test]
    fn transaction_runs_in_high_speed() {
        let trace = Trace::default();
        let mut di = interface(&trace);
        set_brightness(&mut di, 0x123).unwrap();
        get_brightness(&mut di).unwrap();

        assert_eq!(
            trace.events(),
            [
                Event::write(0x51, &[0x01, 0x23], false),
                Event::Read {
                    opcode: 0x52,
                    low_power: false
                },
            ]
        );
        assert!(di.low_power_mode());
    }

    #[test]
    fn flag_restored_on_failure() {
        let trace = Trace::default();
        let mut di = interface(&trace).fail_opcode(0x51).fail_reads();

        assert_eq!(
            set_brightness(&mut di, 100),
            Err(Error::Write {
                opcode: 0x51,
                source: MockError
            })
        );
        assert!(di.low_power_mode());

        assert_eq!(
            get_brightness(&mut di),
            Err(Error::Read {
                opcode: 0x52,
                source: MockError
            })
        );
        assert!(di.low_power_mode());
    }

    #[test]
    fn prior_flag_value_is_kept() {
        let trace = Trace::default();
        let mut di = MockDisplayInterface::new(&trace);
        di.set_low_power_mode(false);
        set_brightness(&mut di, 1).unwrap();
        assert!(!di.low_power_mode());
    }

    #[test]
    fn short_read_is_an_error() {
        let trace = Trace::default();
        let mut di = interface(&trace).short_read();
        assert_eq!(
            get_brightness(&mut di),
            Err(Error::ShortRead {
                opcode: 0x52,
                expected: 2,
                received: 1
            })
        );
        assert!(di.low_power_mode());
    }

    #[test]
    fn out_of_range_sends_nothing() {
        let trace = Trace::default();
        let mut di = interface(&trace);
        assert_eq!(
            set_brightness(&mut di, 4096),
            Err(Error::BrightnessOutOfRange {
                value: 4096,
                max: 4095
            })
        );
        assert!(trace.events().is_empty());
    }

    #[test]
    fn properties() {
        let props = BacklightProperties::raw(MAX_BRIGHTNESS);
        assert_eq!(props.brightness, 4095);
        assert!(props.is_valid());
        assert!(!BacklightProperties::raw(4096).is_valid());
    }
}
