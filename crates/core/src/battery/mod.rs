mod record;
mod aspire;

use crate::errors::GaugeError;
use crate::power_supply::{PowerSupply, Property};

pub use crate::power_supply::Status;

pub use self::record::{Record, RecordDesc, Flags, StaticRecord, DynamicRecord};
pub use self::record::{read_record, STATIC_RECORD, DYNAMIC_RECORD};
pub use self::aspire::{AspireBattery, ASPIRE_BATTERY_DESC, simulated_gauge};

pub trait Battery {
    fn capacity(&mut self) -> Result<u8, GaugeError>;
    fn status(&mut self) -> Result<Status, GaugeError>;
}

impl<T: PowerSupply + ?Sized> Battery for T {
    fn capacity(&mut self) -> Result<u8, GaugeError> {
        self.get_property(Property::Capacity)
            .map(|value| value.clamp(0, 100) as u8)
    }

    fn status(&mut self) -> Result<Status, GaugeError> {
        self.get_property(Property::Status)
            .map(Status::from_intval)
    }
}
