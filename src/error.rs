//! Error types for panel operations.
//!
//! Every bus failure carries the opcode of the command that failed so a log
//! line is enough to tell which step of a sequence went wrong.

/// Errors returned by panel operations.
///
/// Generic over the interface error so callers can match on the underlying
/// bus failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<DiError> {
    /// A command write did not complete.
    Write {
        /// Opcode of the failed command.
        opcode: u8,
        /// Interface error.
        source: DiError,
    },
    /// A command read did not complete.
    Read {
        /// Opcode of the failed command.
        opcode: u8,
        /// Interface error.
        source: DiError,
    },
    /// A read returned fewer bytes than the command defines.
    ShortRead {
        /// Opcode of the read command.
        opcode: u8,
        /// Bytes expected.
        expected: usize,
        /// Bytes returned by the panel.
        received: usize,
    },
    /// Requested brightness is above the declared maximum.
    BrightnessOutOfRange {
        /// Requested value.
        value: u16,
        /// Declared maximum.
        max: u16,
    },
}

impl<DiError> Error<DiError> {
    /// Returns the opcode of the command that failed, if the error came from the bus.
    pub fn opcode(&self) -> Option<u8> {
        match self {
            Error::Write { opcode, .. }
            | Error::Read { opcode, .. }
            | Error::ShortRead { opcode, .. } => Some(*opcode),
            Error::BrightnessOutOfRange { .. } => None,
        }
    }
}

impl<DiError: core::fmt::Debug> core::fmt::Display for Error<DiError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Write { opcode, source } => {
                write!(f, "write of command {opcode:#04x} failed: {source:?}")
            }
            Error::Read { opcode, source } => {
                write!(f, "read of command {opcode:#04x} failed: {source:?}")
            }
            Error::ShortRead {
                opcode,
                expected,
                received,
            } => write!(
                f,
                "read of command {opcode:#04x} returned {received} of {expected} bytes"
            ),
            Error::BrightnessOutOfRange { value, max } => {
                write!(f, "brightness {value} out of range (max {max})")
            }
        }
    }
}

impl<DiError: core::fmt::Debug> core::error::Error for Error<DiError> {}
