mod i2cdev_sys;
mod linux;
mod fake;

use bitflags::bitflags;
use log::error;
use crate::errors::TransferError;

pub use self::linux::LinuxI2c;
pub use self::fake::FakeGauge;

bitflags! {
    /// Per-message flags, with the values of the kernel's `i2c_msg`.
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    pub struct MsgFlags: u16 {
        const RD = 0x0001;
        const TEN = 0x0010;
    }
}

/// One segment of a combined transfer.
pub struct Msg<'a> {
    pub addr: u16,
    pub flags: MsgFlags,
    pub buf: &'a mut [u8],
}

pub trait I2cAdapter {
    /// Performs all the messages as a single combined transaction and
    /// returns the number of messages that were completed.
    fn transfer(&mut self, msgs: &mut [Msg]) -> Result<usize, nix::Error>;
}

/// A peripheral on the bus.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct I2cClient {
    pub addr: u16,
    pub flags: MsgFlags,
}

impl I2cClient {
    pub fn new(addr: u16) -> I2cClient {
        I2cClient { addr, flags: MsgFlags::empty() }
    }
}

/// Writes the command byte *cmd* then reads `data.len()` bytes.
///
/// `data` is only written to when both messages went through.
pub fn read_bytes<A>(adapter: &mut A, client: &I2cClient, cmd: u8, data: &mut [u8]) -> Result<(), TransferError>
                    where A: I2cAdapter + ?Sized {
    let mut command = [cmd];
    let mut buffer = vec![0u8; data.len()];
    let write_flags = client.flags - MsgFlags::RD;
    let read_flags = client.flags | MsgFlags::RD;

    let mut msgs = [
        Msg { addr: client.addr, flags: write_flags, buf: &mut command },
        Msg { addr: client.addr, flags: read_flags, buf: &mut buffer },
    ];
    let expected = msgs.len();

    match adapter.transfer(&mut msgs) {
        Ok(completed) if completed == expected => {
            data.copy_from_slice(&buffer);
            Ok(())
        },
        Ok(completed) => {
            error!("i2c read of {:#04x} at {:#04x} failed: {} of {} messages completed",
                   cmd, client.addr, completed, expected);
            Err(TransferError::Incomplete { completed, expected })
        },
        Err(e) => {
            error!("i2c read of {:#04x} at {:#04x} failed: {}", cmd, client.addr, e);
            Err(TransferError::Bus(e))
        },
    }
}
