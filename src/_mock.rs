//! Recording test doubles.
//!
//! The bus, the reset pin and the delay share one [`Trace`], so tests can
//! check the interleaving of pin edges, sleeps and command writes on a single
//! simulated timeline.

use core::cell::RefCell;
use std::{rc::Rc, vec::Vec};

use embedded_hal::{delay::DelayNs, digital};

use crate::{
    dcs::{GET_DISPLAY_BRIGHTNESS, SET_DISPLAY_BRIGHTNESS},
    interface::{Interface, MAX_PAYLOAD},
    options::DsiConfig,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Write {
        opcode: u8,
        params: Vec<u8>,
        low_power: bool,
    },
    WriteFailed {
        opcode: u8,
    },
    Read {
        opcode: u8,
        low_power: bool,
    },
    ReadFailed {
        opcode: u8,
    },
    /// Physical pin level, `true` is high.
    Pin(bool),
    /// Sleep in nanoseconds.
    Delay(u32),
    Attach(DsiConfig),
    Detach,
}

impl Event {
    pub fn write(opcode: u8, params: &[u8], low_power: bool) -> Self {
        Event::Write {
            opcode,
            params: params.to_vec(),
            low_power,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Event>>>);

impl Trace {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Opcodes of writes that completed.
    pub fn written_opcodes(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write { opcode, .. } => Some(*opcode),
                _ => None,
            })
            .collect()
    }

    /// Opcodes of all writes, including failed ones.
    pub fn attempted_opcodes(&self) -> Vec<u8> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write { opcode, .. } | Event::WriteFailed { opcode } => Some(*opcode),
                _ => None,
            })
            .collect()
    }

    pub fn pin_levels(&self) -> Vec<bool> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Pin(level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    pub fn last_pin_level(&self) -> Option<bool> {
        self.pin_levels().last().copied()
    }

    pub fn total_delay_ns(&self) -> u64 {
        self.0
            .borrow()
            .iter()
            .map(|e| match e {
                Event::Delay(ns) => u64::from(*ns),
                _ => 0,
            })
            .sum()
    }

    /// Simulated time each pin level was held before the next pin edge or
    /// bus transaction, in nanoseconds.
    pub fn pin_hold_times(&self) -> Vec<(bool, u64)> {
        let mut holds = Vec::new();
        let mut current: Option<(bool, u64)> = None;
        for event in self.0.borrow().iter() {
            match event {
                Event::Pin(level) => {
                    if let Some(hold) = current.take() {
                        holds.push(hold);
                    }
                    current = Some((*level, 0));
                }
                Event::Delay(ns) => {
                    if let Some((_, elapsed)) = current.as_mut() {
                        *elapsed += u64::from(*ns);
                    }
                }
                Event::Write { .. }
                | Event::WriteFailed { .. }
                | Event::Read { .. }
                | Event::ReadFailed { .. } => {
                    if let Some(hold) = current.take() {
                        holds.push(hold);
                    }
                }
                Event::Attach(_) | Event::Detach => {}
            }
        }
        holds.extend(current);
        holds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

pub struct MockDisplayInterface {
    trace: Trace,
    low_power: bool,
    writes: usize,
    fail_write: Option<usize>,
    fail_opcode: Option<u8>,
    fail_reads: bool,
    fail_attach: bool,
    fail_detach: bool,
    short_read: bool,
    brightness: [u8; 2],
}

impl MockDisplayInterface {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            low_power: false,
            writes: 0,
            fail_write: None,
            fail_opcode: None,
            fail_reads: false,
            fail_attach: false,
            fail_detach: false,
            short_read: false,
            brightness: [0; 2],
        }
    }

    /// Fails the write with the given zero based index.
    pub fn fail_write(mut self, index: usize) -> Self {
        self.fail_write = Some(index);
        self
    }

    /// Fails every write of `opcode`.
    pub fn fail_opcode(mut self, opcode: u8) -> Self {
        self.fail_opcode = Some(opcode);
        self
    }

    pub fn fail_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn fail_attach(mut self) -> Self {
        self.fail_attach = true;
        self
    }

    pub fn fail_detach(mut self) -> Self {
        self.fail_detach = true;
        self
    }

    pub fn short_read(mut self) -> Self {
        self.short_read = true;
        self
    }

    pub fn set_fail_opcode(&mut self, opcode: Option<u8>) {
        self.fail_opcode = opcode;
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }
}

impl Interface for MockDisplayInterface {
    type Error = MockError;

    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), MockError> {
        let index = self.writes;
        self.writes += 1;
        if args.len() > MAX_PAYLOAD
            || self.fail_write == Some(index)
            || self.fail_opcode == Some(command)
        {
            self.trace.push(Event::WriteFailed { opcode: command });
            return Err(MockError);
        }
        self.trace.push(Event::write(command, args, self.low_power));
        if command == SET_DISPLAY_BRIGHTNESS && args.len() == 2 {
            self.brightness.copy_from_slice(args);
        }
        Ok(())
    }

    fn read_command(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, MockError> {
        if self.fail_reads {
            self.trace.push(Event::ReadFailed { opcode: command });
            return Err(MockError);
        }
        self.trace.push(Event::Read {
            opcode: command,
            low_power: self.low_power,
        });
        if command != GET_DISPLAY_BRIGHTNESS {
            return Ok(0);
        }
        let available = if self.short_read { 1 } else { 2 };
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.brightness[..n]);
        Ok(n)
    }

    fn low_power_mode(&self) -> bool {
        self.low_power
    }

    fn set_low_power_mode(&mut self, enabled: bool) {
        self.low_power = enabled;
    }

    fn attach(&mut self, config: &DsiConfig) -> Result<(), MockError> {
        self.trace.push(Event::Attach(*config));
        if self.fail_attach {
            return Err(MockError);
        }
        self.low_power = config.mode_flags.low_power;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), MockError> {
        self.trace.push(Event::Detach);
        if self.fail_detach {
            return Err(MockError);
        }
        Ok(())
    }
}

pub struct MockOutputPin {
    trace: Trace,
}

impl MockOutputPin {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl digital::OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Pin(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.push(Event::Pin(true));
        Ok(())
    }
}

impl digital::ErrorType for MockOutputPin {
    type Error = core::convert::Infallible;
}

pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(Event::Delay(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.push(Event::Delay(us * 1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(Event::Delay(ms * 1_000_000));
    }
}
