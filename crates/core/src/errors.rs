use thiserror::Error;
use crate::power_supply::Property;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("i2c transfer failed: {0}")]
    Bus(#[from] nix::Error),
    #[error("incomplete i2c transfer: {completed} of {expected} messages")]
    Incomplete { completed: usize, expected: usize },
}

#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("can't read the {record} record")]
    Transport {
        record: &'static str,
        #[source]
        source: TransferError,
    },
    #[error("the {record} record is too short: {len} of {expected} bytes")]
    ShortRecord { record: &'static str, len: usize, expected: usize },
    #[error("unsupported property: {0}")]
    UnsupportedProperty(Property),
    #[error("the full charge capacity is zero")]
    ZeroFullCapacity,
}
