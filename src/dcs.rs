//! MIPI DCS commands.

use crate::{error::Error, interface::Interface};

/// Common trait for DCS commands.
///
/// The methods in this traits are used to convert a DCS command into bytes.
pub trait DcsCommand {
    /// Returns the instruction code.
    fn instruction(&self) -> u8;

    /// Fills the given buffer with the command parameters.
    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize;
}

/// An extension trait for [`Interface`] with support for writing DCS commands.
///
/// Every error is tagged with the opcode of the command that failed.
pub trait InterfaceExt: Interface {
    /// Sends a DCS command to the display interface.
    fn write_command(&mut self, command: impl DcsCommand) -> Result<(), Error<Self::Error>> {
        let mut param_bytes: [u8; 16] = [0; 16];
        let n = command.fill_params_buf(&mut param_bytes);
        self.write_raw(command.instruction(), &param_bytes[..n])
    }

    /// Sends a raw command with the given `instruction` to the display interface.
    ///
    /// The `param_bytes` slice can contain the instruction parameters, which are sent as data after
    /// the instruction code was sent. If no parameters are required an empty slice can be passed to
    /// this method.
    fn write_raw(&mut self, instruction: u8, param_bytes: &[u8]) -> Result<(), Error<Self::Error>> {
        self.send_command(instruction, param_bytes)
            .map_err(|source| Error::Write {
                opcode: instruction,
                source,
            })
    }

    /// Sends a read command and fills `buf` with exactly `buf.len()` response bytes.
    fn read_raw(&mut self, instruction: u8, buf: &mut [u8]) -> Result<(), Error<Self::Error>> {
        let received = self
            .read_command(instruction, buf)
            .map_err(|source| Error::Read {
                opcode: instruction,
                source,
            })?;
        if received < buf.len() {
            return Err(Error::ShortRead {
                opcode: instruction,
                expected: buf.len(),
                received,
            });
        }
        Ok(())
    }
}

impl<T: Interface + ?Sized> InterfaceExt for T {}

macro_rules! dcs_basic_command {
    (#[$meta:meta] $instr_name:ident, $instr:expr) => {
        #[$meta]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $instr_name;

        impl DcsCommand for $instr_name {
            fn instruction(&self) -> u8 {
                $instr
            }

            fn fill_params_buf(&self, _buffer: &mut [u8]) -> usize {
                0
            }
        }
    };
}

dcs_basic_command!(
    /// Enter Sleep Mode
    EnterSleepMode,
    0x10
);
dcs_basic_command!(
    /// Exit Sleep Mode
    ExitSleepMode,
    0x11
);
dcs_basic_command!(
    /// Turn Display Off
    SetDisplayOff,
    0x28
);
dcs_basic_command!(
    /// Turn Display On
    SetDisplayOn,
    0x29
);

/// Opcode of the display brightness write command.
pub const SET_DISPLAY_BRIGHTNESS: u8 = 0x51;
/// Opcode of the display brightness read command.
pub const GET_DISPLAY_BRIGHTNESS: u8 = 0x52;

/// Set Display Brightness, large form.
///
/// Sends the value as two big-endian bytes, which covers the 12-bit range
/// some panels use instead of the single byte short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetDisplayBrightness(pub u16);

impl DcsCommand for SetDisplayBrightness {
    fn instruction(&self) -> u8 {
        SET_DISPLAY_BRIGHTNESS
    }

    fn fill_params_buf(&self, buffer: &mut [u8]) -> usize {
        buffer[..2].copy_from_slice(&self.0.to_be_bytes());
        2
    }
}
