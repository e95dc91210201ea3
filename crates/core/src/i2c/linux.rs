use std::fs::{File, OpenOptions};
use std::path::Path;
use std::os::unix::io::AsRawFd;
use nix::errno::Errno;
use anyhow::{Error, Context};
use super::{I2cAdapter, Msg};
use super::i2cdev_sys::{i2c_rdwr, I2cMsg, I2cRdwrIoctlData, I2C_RDWR_IOCTL_MAX_MSGS};

/// A bus exposed by the i2c-dev driver, e.g. `/dev/i2c-0`.
pub struct LinuxI2c(File);

impl LinuxI2c {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<LinuxI2c, Error> {
        let file = OpenOptions::new().read(true).write(true)
                                     .open(path.as_ref())
                                     .with_context(|| format!("can't open i2c bus {}", path.as_ref().display()))?;
        Ok(LinuxI2c(file))
    }
}

impl I2cAdapter for LinuxI2c {
    fn transfer(&mut self, msgs: &mut [Msg]) -> Result<usize, nix::Error> {
        if msgs.is_empty() || msgs.len() > I2C_RDWR_IOCTL_MAX_MSGS {
            return Err(Errno::EINVAL);
        }

        let mut raw = Vec::with_capacity(msgs.len());
        for msg in msgs.iter_mut() {
            let len = u16::try_from(msg.buf.len()).map_err(|_| Errno::EINVAL)?;
            raw.push(I2cMsg {
                addr: msg.addr,
                flags: msg.flags.bits(),
                len,
                buf: msg.buf.as_mut_ptr(),
            });
        }

        let data = I2cRdwrIoctlData {
            msgs: raw.as_mut_ptr(),
            nmsgs: raw.len() as libc::c_uint,
        };

        unsafe {
            i2c_rdwr(self.0.as_raw_fd(), &data).map(|n| n as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use nix::errno::Errno;
    use crate::i2c::{I2cAdapter, Msg, MsgFlags};
    use super::LinuxI2c;

    #[test]
    fn test_oversized_message() {
        let mut bus = LinuxI2c::new("/dev/null").unwrap();
        let mut buf = vec![0u8; 70_000];
        let mut msgs = [Msg { addr: 0x76, flags: MsgFlags::RD, buf: &mut buf }];
        assert_eq!(bus.transfer(&mut msgs), Err(Errno::EINVAL));
    }

    #[test]
    fn test_empty_transfer() {
        let mut bus = LinuxI2c::new("/dev/null").unwrap();
        let mut msgs: [Msg; 0] = [];
        assert_eq!(bus.transfer(&mut msgs), Err(Errno::EINVAL));
    }
}
