//! Command sequences.
//!
//! Vendor initialization is expressed as a table of [`Step`]s rather than
//! straight-line code, so the exact byte stream can be inspected and replayed
//! against a test bus. Order is significant: page-select writes change which
//! register bank the following opcodes address.

use embedded_hal::delay::DelayNs;

use crate::{dcs::InterfaceExt, error::Error, interface::Interface};

/// A command write: opcode plus parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    /// Opcode.
    pub opcode: u8,
    /// Parameters sent after the opcode.
    pub params: &'static [u8],
}

/// A delay between commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    /// Fixed sleep in milliseconds.
    Millis(u32),
    /// Sleep for somewhere between `min` and `max` microseconds.
    MicrosRange {
        /// Lower bound, required by the panel.
        min: u32,
        /// Upper bound.
        max: u32,
    },
}

impl Delay {
    /// Blocks for the delay.
    ///
    /// [`DelayNs`] has no notion of slack, so a range sleeps for its lower bound.
    pub fn wait<DELAY: DelayNs>(&self, delay: &mut DELAY) {
        match *self {
            Delay::Millis(ms) => delay.delay_ms(ms),
            Delay::MicrosRange { min, .. } => delay.delay_us(min),
        }
    }
}

/// One entry of a command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Write a command.
    Write(Command),
    /// Wait.
    Sleep(Delay),
}

impl Step {
    /// Command write step.
    pub const fn write(opcode: u8, params: &'static [u8]) -> Self {
        Step::Write(Command { opcode, params })
    }

    /// Fixed sleep step.
    pub const fn sleep_ms(ms: u32) -> Self {
        Step::Sleep(Delay::Millis(ms))
    }

    /// Jittered sleep step.
    pub const fn sleep_range_us(min: u32, max: u32) -> Self {
        Step::Sleep(Delay::MicrosRange { min, max })
    }
}

/// Returns the command writes of a sequence, in order.
pub fn commands(steps: &[Step]) -> impl Iterator<Item = &Command> {
    steps.iter().filter_map(|step| match step {
        Step::Write(command) => Some(command),
        Step::Sleep(_) => None,
    })
}

/// Executes `steps` in order.
///
/// Stops at the first failed write; nothing after it is sent.
pub fn run<DI, DELAY>(
    di: &mut DI,
    delay: &mut DELAY,
    steps: &[Step],
) -> Result<(), Error<DI::Error>>
where
    DI: Interface,
    DELAY: DelayNs,
{
    for (index, step) in steps.iter().enumerate() {
        match step {
            Step::Write(command) => {
                log::trace!("step {}: write {:#04x}", index, command.opcode);
                di.write_raw(command.opcode, command.params)
                    .inspect_err(|e| log::debug!("step {} failed: {:?}", index, e))?;
            }
            Step::Sleep(d) => d.wait(delay),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::_mock::{Event, MockDelay, MockDisplayInterface, Trace};

    const STEPS: &[Step] = &[
        Step::write(0xbd, &[0x01]),
        Step::write(0xb1, &[0x01, 0x9b]),
        Step::sleep_range_us(5000, 6000),
        Step::write(0xbd, &[0x00]),
        Step::sleep_ms(2),
    ];

    #[test]
    fn runs_steps_in_order() {
        let trace = Trace::default();
        let mut di = MockDisplayInterface::new(&trace);
        let mut delay = MockDelay::new(&trace);

        run(&mut di, &mut delay, STEPS).unwrap();

        assert_eq!(
            trace.events(),
            [
                Event::write(0xbd, &[0x01], false),
                Event::write(0xb1, &[0x01, 0x9b], false),
                Event::Delay(5_000_000),
                Event::write(0xbd, &[0x00], false),
                Event::Delay(2_000_000),
            ]
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let trace = Trace::default();
        let mut di = MockDisplayInterface::new(&trace).fail_write(1);
        let mut delay = MockDelay::new(&trace);

        let err = run(&mut di, &mut delay, STEPS).unwrap_err();

        assert_eq!(err.opcode(), Some(0xb1));
        assert_eq!(trace.written_opcodes(), [0xbd]);
        assert_eq!(trace.total_delay_ns(), 0);
    }

    #[test]
    fn commands_skips_sleeps() {
        let opcodes: std::vec::Vec<u8> = commands(STEPS).map(|c| c.opcode).collect();
        assert_eq!(opcodes, [0xbd, 0xb1, 0xbd]);
    }
}
