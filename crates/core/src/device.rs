use std::fmt;
use anyhow::Error;
use log::info;
use crate::battery::{AspireBattery, ASPIRE_BATTERY_DESC};
use crate::i2c::{I2cAdapter, I2cClient, LinuxI2c};
use crate::power_supply::{PowerSupply, PowerSupplyDesc};
use crate::settings::Settings;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Model {
    Aspire1,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Model::Aspire1 => write!(f, "Acer Aspire 1"),
        }
    }
}

pub const I2C_DEVICE_IDS: &[(&str, Model)] = &[
    ("aspire1-battery", Model::Aspire1),
];

pub const OF_MATCH_TABLE: &[(&str, Model)] = &[
    ("acer,aspire1-battery", Model::Aspire1),
];

#[derive(Debug)]
pub struct Device {
    pub model: Model,
}

impl Device {
    /// Matches either an I2C device id or a device tree compatible string.
    pub fn from_id(id: &str) -> Option<Device> {
        I2C_DEVICE_IDS.iter()
                      .chain(OF_MATCH_TABLE.iter())
                      .find(|(name, _)| *name == id)
                      .map(|&(_, model)| Device { model })
    }

    pub fn desc(&self) -> &'static PowerSupplyDesc {
        match self.model {
            Model::Aspire1 => &ASPIRE_BATTERY_DESC,
        }
    }

    pub fn attach<A>(&self, adapter: A, client: I2cClient) -> Box<dyn PowerSupply> where A: I2cAdapter + 'static {
        match self.model {
            Model::Aspire1 => Box::new(AspireBattery::new(adapter, client)),
        }
    }

    pub fn probe(&self, settings: &Settings) -> Result<Box<dyn PowerSupply>, Error> {
        let adapter = LinuxI2c::new(&settings.bus)?;
        let client = settings.client();
        info!("{} ({}) at {:#04x} on {}", self.desc().name, self.model,
              client.addr, settings.bus.display());
        Ok(self.attach(adapter, client))
    }
}
