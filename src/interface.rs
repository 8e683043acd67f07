mod dsi;
pub use dsi::*;

use crate::options::DsiConfig;

/// Largest parameter payload a single command may carry.
pub const MAX_PAYLOAD: usize = 64;

/// Command interface of a display bus.
///
/// One call is one bus transaction. Implementations never retry a failed
/// transfer, the error is returned to the caller as is.
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Send a command with optional parameters.
    ///
    /// Parameter slices longer than [`MAX_PAYLOAD`] must be rejected with an
    /// error, never truncated.
    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error>;

    /// Send a read command and store the response in `buf`.
    ///
    /// Returns the number of bytes the panel returned.
    fn read_command(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Returns `true` if subsequent transactions use low-power signaling.
    fn low_power_mode(&self) -> bool;

    /// Selects low-power (`true`) or high-speed (`false`) signaling for
    /// subsequent transactions.
    fn set_low_power_mode(&mut self, enabled: bool);

    /// Applies the device configuration and attaches to the bus host.
    fn attach(&mut self, config: &DsiConfig) -> Result<(), Self::Error> {
        self.set_low_power_mode(config.mode_flags.low_power);
        Ok(())
    }

    /// Detaches from the bus host.
    fn detach(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error> {
        T::send_command(self, command, args)
    }

    fn read_command(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        T::read_command(self, command, buf)
    }

    fn low_power_mode(&self) -> bool {
        T::low_power_mode(self)
    }

    fn set_low_power_mode(&mut self, enabled: bool) {
        T::set_low_power_mode(self, enabled)
    }

    fn attach(&mut self, config: &DsiConfig) -> Result<(), Self::Error> {
        T::attach(self, config)
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        T::detach(self)
    }
}
