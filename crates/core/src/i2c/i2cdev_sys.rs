use nix::ioctl_write_ptr_bad;

// Upper bound enforced by the i2c-dev driver.
pub const I2C_RDWR_IOCTL_MAX_MSGS: usize = 42;

ioctl_write_ptr_bad!(i2c_rdwr, 0x0707, I2cRdwrIoctlData);

#[repr(C)]
#[derive(Debug)]
pub struct I2cMsg {
    pub addr: libc::c_ushort,
    pub flags: libc::c_ushort,
    pub len: libc::c_ushort,
    pub buf: *mut u8,
}

#[repr(C)]
#[derive(Debug)]
pub struct I2cRdwrIoctlData {
    pub msgs: *mut I2cMsg,
    pub nmsgs: libc::c_uint,
}
