mod uevent;

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use anyhow::{Error, format_err};
use crate::errors::GaugeError;

pub use self::uevent::uevent;

/// Charge status, numbered like the Linux power supply class.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Unknown,
    Charging,
    Discharging,
    NotCharging,
    Full,
}

impl Status {
    pub fn intval(self) -> i32 {
        match self {
            Status::Unknown => 0,
            Status::Charging => 1,
            Status::Discharging => 2,
            Status::NotCharging => 3,
            Status::Full => 4,
        }
    }

    pub fn from_intval(value: i32) -> Status {
        match value {
            1 => Status::Charging,
            2 => Status::Discharging,
            3 => Status::NotCharging,
            4 => Status::Full,
            _ => Status::Unknown,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Status::Unknown     => write!(f, "Unknown"),
            Status::Charging    => write!(f, "Charging"),
            Status::Discharging => write!(f, "Discharging"),
            Status::NotCharging => write!(f, "Not charging"),
            Status::Full        => write!(f, "Full"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Property {
    Status,
    Present,
    Online,
    Health,
    Technology,
    CycleCount,
    VoltageNow,
    VoltageMaxDesign,
    CurrentNow,
    ChargeFullDesign,
    ChargeFull,
    ChargeNow,
    Capacity,
    Temp,
    ModelName,
}

pub const ALL_PROPERTIES: &[Property] = &[
    Property::Status,
    Property::Present,
    Property::Online,
    Property::Health,
    Property::Technology,
    Property::CycleCount,
    Property::VoltageNow,
    Property::VoltageMaxDesign,
    Property::CurrentNow,
    Property::ChargeFullDesign,
    Property::ChargeFull,
    Property::ChargeNow,
    Property::Capacity,
    Property::Temp,
    Property::ModelName,
];

impl Property {
    /// The attribute name under `/sys/class/power_supply/<name>/`.
    pub fn name(self) -> &'static str {
        match self {
            Property::Status           => "status",
            Property::Present          => "present",
            Property::Online           => "online",
            Property::Health           => "health",
            Property::Technology       => "technology",
            Property::CycleCount       => "cycle_count",
            Property::VoltageNow       => "voltage_now",
            Property::VoltageMaxDesign => "voltage_max_design",
            Property::CurrentNow       => "current_now",
            Property::ChargeFullDesign => "charge_full_design",
            Property::ChargeFull       => "charge_full",
            Property::ChargeNow        => "charge_now",
            Property::Capacity         => "capacity",
            Property::Temp             => "temp",
            Property::ModelName        => "model_name",
        }
    }

    pub fn uevent_key(self) -> String {
        format!("POWER_SUPPLY_{}", self.name().to_uppercase())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Accepts both the attribute name and its kebab-case variant.
impl FromStr for Property {
    type Err = Error;

    fn from_str(s: &str) -> Result<Property, Error> {
        let name = s.trim().to_lowercase().replace('-', "_");
        ALL_PROPERTIES.iter()
                      .find(|prop| prop.name() == name)
                      .copied()
                      .ok_or_else(|| format_err!("unknown property: {}", s))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SupplyType {
    Unknown,
    Battery,
    Mains,
    Usb,
}

impl fmt::Display for SupplyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SupplyType::Unknown => write!(f, "Unknown"),
            SupplyType::Battery => write!(f, "Battery"),
            SupplyType::Mains   => write!(f, "Mains"),
            SupplyType::Usb     => write!(f, "USB"),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct PowerSupplyDesc {
    pub name: &'static str,
    pub kind: SupplyType,
    pub properties: &'static [Property],
}

impl PowerSupplyDesc {
    pub fn supports(&self, prop: Property) -> bool {
        self.properties.contains(&prop)
    }
}

pub trait PowerSupply {
    fn desc(&self) -> &PowerSupplyDesc;

    /// Integer readings use micro units (µV, µA, µAh), the status uses the
    /// numbering of [`Status`] and the capacity is a percentage.
    fn get_property(&mut self, prop: Property) -> Result<i32, GaugeError>;

    fn property_text(&mut self, prop: Property) -> Result<String, GaugeError> {
        let value = self.get_property(prop)?;
        match prop {
            Property::Status => Ok(Status::from_intval(value).to_string()),
            _ => Ok(value.to_string()),
        }
    }
}
