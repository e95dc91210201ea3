use crate::errors::GaugeError;
use crate::i2c::{FakeGauge, I2cAdapter, I2cClient};
use crate::power_supply::{PowerSupply, PowerSupplyDesc, Property, SupplyType};
use super::record::{read_record, StaticRecord, DynamicRecord, STATIC_RECORD, DYNAMIC_RECORD};

const ASPIRE_BATTERY_PROPS: &[Property] = &[
    Property::Status,
    Property::VoltageNow,
    Property::VoltageMaxDesign,
    Property::CurrentNow,
    Property::ChargeNow,
    Property::ChargeFull,
    Property::Capacity,
];

pub const ASPIRE_BATTERY_DESC: PowerSupplyDesc = PowerSupplyDesc {
    name: "aspire-battery",
    kind: SupplyType::Battery,
    properties: ASPIRE_BATTERY_PROPS,
};

// A 3S pack, discharging at 1 A.
const SIMULATED_STATIC: [u8; 16] = [0x00, 0x01, 0x00, 0x00, 0x7c, 0x2d, 0x1a, 0x13,
                                    0x00, 0x00, 0x39, 0x30, 0x01, 0x02, 0x00, 0x00];
const SIMULATED_DYNAMIC: [u8; 11] = [0x00, 0x05, 0x00, 0x0d, 0x48, 0x2c, 0xec,
                                     0xfc, 0x18, 0x00, 0x00];

pub fn simulated_gauge(addr: u16) -> FakeGauge {
    FakeGauge::new(addr).with_record(STATIC_RECORD.command, &SIMULATED_STATIC)
                        .with_record(DYNAMIC_RECORD.command, &SIMULATED_DYNAMIC)
}

/// The battery behind the embedded controller of the Acer Aspire 1.
pub struct AspireBattery<A: I2cAdapter> {
    adapter: A,
    client: I2cClient,
}

impl<A: I2cAdapter> AspireBattery<A> {
    pub fn new(adapter: A, client: I2cClient) -> AspireBattery<A> {
        AspireBattery { adapter, client }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }
}

impl<A: I2cAdapter> PowerSupply for AspireBattery<A> {
    fn desc(&self) -> &PowerSupplyDesc {
        &ASPIRE_BATTERY_DESC
    }

    fn get_property(&mut self, prop: Property) -> Result<i32, GaugeError> {
        if !ASPIRE_BATTERY_DESC.supports(prop) {
            return Err(GaugeError::UnsupportedProperty(prop));
        }

        let sdat: StaticRecord = read_record(&mut self.adapter, &self.client)?;
        let ddat: DynamicRecord = read_record(&mut self.adapter, &self.client)?;

        decode(prop, &sdat, &ddat)
    }
}

#[inline]
fn micro(milli: i32) -> i32 {
    milli * 1000
}

fn decode(prop: Property, sdat: &StaticRecord, ddat: &DynamicRecord) -> Result<i32, GaugeError> {
    match prop {
        Property::Status => Ok(ddat.status().intval()),
        Property::VoltageNow => Ok(micro(ddat.voltage_now.into())),
        Property::VoltageMaxDesign => Ok(micro(sdat.voltage_design.into())),
        Property::CurrentNow => Ok(micro(ddat.current_now.into())),
        Property::ChargeNow => Ok(micro(ddat.capacity_now.into())),
        Property::ChargeFull => Ok(micro(sdat.capacity_full.into())),
        Property::Capacity => capacity_percent(ddat.capacity_now, sdat.capacity_full),
        _ => Err(GaugeError::UnsupportedProperty(prop)),
    }
}

// Uses the raw values: integer division, rounded down.
fn capacity_percent(charge_now: u16, charge_full: u16) -> Result<i32, GaugeError> {
    if charge_full == 0 {
        return Err(GaugeError::ZeroFullCapacity);
    }
    Ok((u32::from(charge_now) * 100 / u32::from(charge_full)) as i32)
}

#[cfg(test)]
mod tests {
    use nix::errno::Errno;
    use crate::errors::{GaugeError, TransferError};
    use crate::i2c::{FakeGauge, I2cClient};
    use crate::battery::{Battery, Status};
    use crate::power_supply::{PowerSupply, Property};
    use super::*;

    const ADDR: u16 = 0x76;

    fn static_bytes(voltage_design: u16, capacity_full: u16) -> [u8; 16] {
        let mut bytes = SIMULATED_STATIC;
        bytes[4..6].copy_from_slice(&voltage_design.to_le_bytes());
        bytes[6..8].copy_from_slice(&capacity_full.to_le_bytes());
        bytes
    }

    fn dynamic_bytes(flags: u8, capacity_now: u16, voltage_now: u16, current_now: i16) -> [u8; 11] {
        let mut bytes = SIMULATED_DYNAMIC;
        bytes[1] = flags;
        bytes[3..5].copy_from_slice(&capacity_now.to_be_bytes());
        bytes[5..7].copy_from_slice(&voltage_now.to_be_bytes());
        bytes[7..9].copy_from_slice(&current_now.to_be_bytes());
        bytes
    }

    fn aspire(sdat: &[u8], ddat: &[u8]) -> AspireBattery<FakeGauge> {
        let gauge = FakeGauge::new(ADDR).with_record(0x08, sdat)
                                        .with_record(0x07, ddat);
        AspireBattery::new(gauge, I2cClient::new(ADDR))
    }

    #[test]
    fn test_simulated_gauge() {
        let mut battery = AspireBattery::new(simulated_gauge(ADDR), I2cClient::new(ADDR));
        assert_eq!(battery.get_property(Property::Status).unwrap(), Status::Discharging.intval());
        assert_eq!(battery.get_property(Property::VoltageNow).unwrap(), 11_500_000);
        assert_eq!(battery.get_property(Property::VoltageMaxDesign).unwrap(), 11_644_000);
        assert_eq!(battery.get_property(Property::CurrentNow).unwrap(), -1_000_000);
        assert_eq!(battery.get_property(Property::ChargeNow).unwrap(), 3_400_000);
        assert_eq!(battery.get_property(Property::ChargeFull).unwrap(), 4_890_000);
        assert_eq!(battery.get_property(Property::Capacity).unwrap(), 69);
    }

    #[test]
    fn test_zero_dynamic_record() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &[0u8; 11]);
        assert_eq!(battery.get_property(Property::Status).unwrap(), Status::Unknown.intval());
        assert_eq!(battery.get_property(Property::VoltageNow).unwrap(), 0);
        assert_eq!(battery.get_property(Property::CurrentNow).unwrap(), 0);
        assert_eq!(battery.get_property(Property::ChargeNow).unwrap(), 0);
        assert_eq!(battery.get_property(Property::Capacity).unwrap(), 0);
    }

    #[test]
    fn test_voltage_max_design() {
        let mut battery = aspire(&static_bytes(0x2710, 4000), &dynamic_bytes(0x01, 0, 0, 0));
        assert_eq!(battery.get_property(Property::VoltageMaxDesign).unwrap(), 10_000_000);
    }

    #[test]
    fn test_status_from_flags() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x0c, 0, 0, 0));
        assert_eq!(battery.status().unwrap(), Status::Charging);

        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x02, 0, 0, 0));
        assert_eq!(battery.status().unwrap(), Status::Full);
    }

    #[test]
    fn test_current_is_signed() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 0, 0, -32768));
        assert_eq!(battery.get_property(Property::CurrentNow).unwrap(), -32_768_000);

        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x09, 0, 0, 1500));
        assert_eq!(battery.get_property(Property::CurrentNow).unwrap(), 1_500_000);
    }

    #[test]
    fn test_full_scale_values() {
        let mut battery = aspire(&static_bytes(u16::MAX, u16::MAX), &dynamic_bytes(0x01, u16::MAX, u16::MAX, 0));
        assert_eq!(battery.get_property(Property::VoltageNow).unwrap(), 65_535_000);
        assert_eq!(battery.get_property(Property::ChargeFull).unwrap(), 65_535_000);
        assert_eq!(battery.get_property(Property::Capacity).unwrap(), 100);
    }

    #[test]
    fn test_capacity() {
        let mut battery = aspire(&static_bytes(11_100, 100), &dynamic_bytes(0x05, 50, 0, 0));
        assert_eq!(battery.get_property(Property::Capacity).unwrap(), 50);
        assert_eq!(battery.capacity().unwrap(), 50);

        let mut battery = aspire(&static_bytes(11_100, 3), &dynamic_bytes(0x05, 2, 0, 0));
        assert_eq!(battery.get_property(Property::Capacity).unwrap(), 66);
    }

    #[test]
    fn test_capacity_with_zero_full_charge() {
        let mut battery = aspire(&static_bytes(11_100, 0), &dynamic_bytes(0x05, 50, 0, 0));
        assert!(matches!(battery.get_property(Property::Capacity),
                         Err(GaugeError::ZeroFullCapacity)));
        assert_eq!(battery.get_property(Property::ChargeFull).unwrap(), 0);
    }

    #[test]
    fn test_capacity_is_clamped_for_battery_trait() {
        let mut battery = aspire(&static_bytes(11_100, 100), &dynamic_bytes(0x0b, 103, 0, 0));
        assert_eq!(battery.get_property(Property::Capacity).unwrap(), 103);
        assert_eq!(battery.capacity().unwrap(), 100);
    }

    #[test]
    fn test_every_query_reads_both_records() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 2000, 0, 0));
        battery.get_property(Property::VoltageMaxDesign).unwrap();
        assert_eq!(battery.adapter().transfers(), 2);
        assert_eq!(battery.adapter().last_command(), Some(0x07));
        battery.get_property(Property::Status).unwrap();
        assert_eq!(battery.adapter().transfers(), 4);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 2000, 11_000, -700));
        for &prop in ASPIRE_BATTERY_PROPS {
            let first = battery.get_property(prop).unwrap();
            let second = battery.get_property(prop).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_fresh_values_on_each_query() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 2000, 0, 0));
        assert_eq!(battery.get_property(Property::ChargeNow).unwrap(), 2_000_000);
        battery.adapter_mut().set_record(0x07, &dynamic_bytes(0x05, 1999, 0, 0));
        assert_eq!(battery.get_property(Property::ChargeNow).unwrap(), 1_999_000);
    }

    #[test]
    fn test_unsupported_property_skips_the_bus() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 2000, 0, 0));
        for prop in [Property::Present, Property::Temp, Property::ChargeFullDesign] {
            assert!(matches!(battery.get_property(prop),
                             Err(GaugeError::UnsupportedProperty(p)) if p == prop));
        }
        assert_eq!(battery.adapter().transfers(), 0);
    }

    #[test]
    fn test_transport_failure_is_reported() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 2000, 0, 0));
        battery.adapter_mut().fail_with(Errno::EREMOTEIO);
        assert!(matches!(battery.get_property(Property::VoltageNow),
                         Err(GaugeError::Transport { record: "static", source: TransferError::Bus(Errno::EREMOTEIO) })));
        assert_eq!(battery.adapter().transfers(), 1);
    }

    #[test]
    fn test_incomplete_transfer_is_reported() {
        let mut battery = aspire(&static_bytes(11_100, 4000), &dynamic_bytes(0x05, 2000, 0, 0));
        battery.adapter_mut().complete_only(1);
        assert!(matches!(battery.status(),
                         Err(GaugeError::Transport { source: TransferError::Incomplete { completed: 1, expected: 2 }, .. })));
    }

    #[test]
    fn test_missing_dynamic_record() {
        let gauge = FakeGauge::new(ADDR).with_record(0x08, &static_bytes(11_100, 4000));
        let mut battery = AspireBattery::new(gauge, I2cClient::new(ADDR));
        assert!(matches!(battery.get_property(Property::VoltageMaxDesign),
                         Err(GaugeError::Transport { record: "dynamic", .. })));
    }
}
