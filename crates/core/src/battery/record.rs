use bitflags::bitflags;
use byteorder::{ByteOrder, BigEndian, LittleEndian};
use log::debug;
use crate::errors::GaugeError;
use crate::helpers::hex_dump;
use crate::i2c::{read_bytes, I2cAdapter, I2cClient};
use crate::power_supply::Status;

const MAX_RECORD_LEN: usize = 16;

bitflags! {
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    pub struct Flags: u8 {
        const PRESENT = 1 << 0;
        const FULL = 1 << 1;
        const DISCHARGING = 1 << 2;
        const CHARGING = 1 << 3;
    }
}

/// What the gauge returns after a given command byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RecordDesc {
    pub name: &'static str,
    pub command: u8,
    pub len: usize,
}

pub const STATIC_RECORD: RecordDesc = RecordDesc { name: "static", command: 0x08, len: 16 };
pub const DYNAMIC_RECORD: RecordDesc = RecordDesc { name: "dynamic", command: 0x07, len: 11 };

pub trait Record: Sized {
    const DESC: RecordDesc;

    /// Fails when `buf` is shorter than `DESC.len`, trailing bytes are ignored.
    fn parse(buf: &[u8]) -> Result<Self, GaugeError>;
}

fn check_len(desc: &RecordDesc, buf: &[u8]) -> Result<(), GaugeError> {
    if buf.len() < desc.len {
        return Err(GaugeError::ShortRecord { record: desc.name, len: buf.len(), expected: desc.len });
    }
    Ok(())
}

// Little-endian fields.
//
// 0      unused
// 1      flags
// 2..4   unused
// 4..6   design voltage (mV)
// 6..8   full charge capacity (mAh)
// 8..10  unused
// 10..12 serial number
// 12     model id
// 13     vendor id
// 14..16 reserved
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StaticRecord {
    pub flags: Flags,
    pub voltage_design: u16,
    pub capacity_full: u16,
    pub serial: u16,
    pub model_id: u8,
    pub vendor_id: u8,
}

impl Record for StaticRecord {
    const DESC: RecordDesc = STATIC_RECORD;

    fn parse(buf: &[u8]) -> Result<StaticRecord, GaugeError> {
        check_len(&Self::DESC, buf)?;
        Ok(StaticRecord {
            flags: Flags::from_bits_retain(buf[1]),
            voltage_design: LittleEndian::read_u16(&buf[4..6]),
            capacity_full: LittleEndian::read_u16(&buf[6..8]),
            serial: LittleEndian::read_u16(&buf[10..12]),
            model_id: buf[12],
            vendor_id: buf[13],
        })
    }
}

// Big-endian fields.
//
// 0      unused
// 1      flags
// 2      unused
// 3..5   remaining capacity (mAh)
// 5..7   voltage (mV)
// 7..9   current (mA, negative when discharging)
// 9..11  unused
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DynamicRecord {
    pub flags: Flags,
    pub capacity_now: u16,
    pub voltage_now: u16,
    pub current_now: i16,
}

impl Record for DynamicRecord {
    const DESC: RecordDesc = DYNAMIC_RECORD;

    fn parse(buf: &[u8]) -> Result<DynamicRecord, GaugeError> {
        check_len(&Self::DESC, buf)?;
        Ok(DynamicRecord {
            flags: Flags::from_bits_retain(buf[1]),
            capacity_now: BigEndian::read_u16(&buf[3..5]),
            voltage_now: BigEndian::read_u16(&buf[5..7]),
            current_now: BigEndian::read_i16(&buf[7..9]),
        })
    }
}

impl DynamicRecord {
    // The charging bit wins over the discharging bit, which wins over the full bit.
    pub fn status(&self) -> Status {
        if self.flags.contains(Flags::CHARGING) {
            Status::Charging
        } else if self.flags.contains(Flags::DISCHARGING) {
            Status::Discharging
        } else if self.flags.contains(Flags::FULL) {
            Status::Full
        } else {
            Status::Unknown
        }
    }
}

pub fn read_record<R, A>(adapter: &mut A, client: &I2cClient) -> Result<R, GaugeError>
                        where R: Record, A: I2cAdapter + ?Sized {
    debug_assert!(R::DESC.len <= MAX_RECORD_LEN);
    let mut buf = [0u8; MAX_RECORD_LEN];
    let buf = &mut buf[..R::DESC.len];
    read_bytes(adapter, client, R::DESC.command, buf)
        .map_err(|source| GaugeError::Transport { record: R::DESC.name, source })?;
    debug!("{} record: {}", R::DESC.name, hex_dump(buf));
    R::parse(buf)
}
