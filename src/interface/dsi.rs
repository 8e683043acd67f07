use heapless::Vec;

use super::{Interface, MAX_PAYLOAD};
use crate::options::DsiConfig;

/// Opcode byte plus the largest payload.
const PACKET_CAPACITY: usize = MAX_PAYLOAD + 1;

/// Highest DSI virtual channel.
pub const MAX_CHANNEL: u8 = 3;

/// DSI data types used for DCS traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PacketType {
    /// DCS short write, no parameter.
    DcsShortWrite = 0x05,
    /// DCS short write, one parameter.
    DcsShortWriteParam = 0x15,
    /// DCS long write.
    DcsLongWrite = 0x39,
    /// DCS read request.
    DcsRead = 0x06,
}

impl PacketType {
    /// Picks the write packet type for an opcode followed by `params` bytes.
    pub const fn for_write(params: usize) -> Self {
        match params {
            0 => PacketType::DcsShortWrite,
            1 => PacketType::DcsShortWriteParam,
            _ => PacketType::DcsLongWrite,
        }
    }
}

/// A single message handed to the DSI host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    /// Virtual channel.
    pub channel: u8,
    /// Packet data type.
    pub packet: PacketType,
    /// Opcode followed by the parameters.
    pub tx: &'a [u8],
    /// Send using low-power signaling.
    pub low_power: bool,
}

/// Packet level access to a DSI host controller.
///
/// The host is responsible for packet headers, ECC, checksums and lane
/// timing. This crate only decides what goes into each packet.
pub trait DsiHost {
    /// Error type
    type Error: core::fmt::Debug;

    /// Configures the link for the attached device.
    fn attach(&mut self, config: &DsiConfig) -> Result<(), Self::Error>;

    /// Releases the link.
    fn detach(&mut self) -> Result<(), Self::Error>;

    /// Transmits `msg` and, for read requests, stores the response in `rx`.
    ///
    /// Returns the number of bytes written to `rx`.
    fn transfer(&mut self, msg: &Message<'_>, rx: &mut [u8]) -> Result<usize, Self::Error>;
}

/// DSI interface error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DsiError<HOST> {
    /// The host reported a failure.
    Host(HOST),
    /// The payload does not fit in a single packet.
    PayloadTooLong {
        /// Payload length in bytes.
        len: usize,
    },
    /// The virtual channel is above [`MAX_CHANNEL`].
    InvalidChannel {
        /// Requested channel.
        channel: u8,
    },
}

/// DCS command interface over a DSI host.
pub struct DsiInterface<HOST> {
    host: HOST,
    channel: u8,
    low_power: bool,
}

impl<HOST> DsiInterface<HOST>
where
    HOST: DsiHost,
{
    /// Create new interface on virtual channel 0.
    pub fn new(host: HOST) -> Self {
        Self {
            host,
            channel: 0,
            low_power: false,
        }
    }

    /// Use the given virtual channel.
    pub fn with_channel(mut self, channel: u8) -> Result<Self, DsiError<HOST::Error>> {
        if channel > MAX_CHANNEL {
            return Err(DsiError::InvalidChannel { channel });
        }
        self.channel = channel;
        Ok(self)
    }

    /// Release the host back, deconstructing the interface
    pub fn release(self) -> HOST {
        self.host
    }

    fn message<'a>(&self, packet: PacketType, tx: &'a [u8]) -> Message<'a> {
        Message {
            channel: self.channel,
            packet,
            tx,
            low_power: self.low_power,
        }
    }
}

impl<HOST> Interface for DsiInterface<HOST>
where
    HOST: DsiHost,
{
    type Error = DsiError<HOST::Error>;

    fn send_command(&mut self, command: u8, args: &[u8]) -> Result<(), Self::Error> {
        if args.len() > MAX_PAYLOAD {
            return Err(DsiError::PayloadTooLong { len: args.len() });
        }

        let too_long = || DsiError::PayloadTooLong { len: args.len() };
        let mut tx: Vec<u8, PACKET_CAPACITY> = Vec::new();
        tx.push(command).map_err(|_| too_long())?;
        tx.extend_from_slice(args).map_err(|()| too_long())?;

        let msg = self.message(PacketType::for_write(args.len()), &tx);
        self.host
            .transfer(&msg, &mut [])
            .map(|_| ())
            .map_err(DsiError::Host)
    }

    fn read_command(&mut self, command: u8, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let tx = [command];
        let msg = self.message(PacketType::DcsRead, &tx);
        self.host.transfer(&msg, buf).map_err(DsiError::Host)
    }

    fn low_power_mode(&self) -> bool {
        self.low_power
    }

    fn set_low_power_mode(&mut self, enabled: bool) {
        self.low_power = enabled;
    }

    fn attach(&mut self, config: &DsiConfig) -> Result<(), Self::Error> {
        self.low_power = config.mode_flags.low_power;
        self.host.attach(config).map_err(DsiError::Host)
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        self.host.detach().map_err(DsiError::Host)
    }
}
