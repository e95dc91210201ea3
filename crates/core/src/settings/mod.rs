use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use anyhow::Error;
use log::info;
use crate::helpers::load_toml;
use crate::i2c::{I2cClient, MsgFlags};
use crate::power_supply::Property;

pub const SETTINGS_PATH: &str = "Settings.toml";
pub const DEFAULT_BUS: &str = "/dev/i2c-0";
// Address of the embedded controller on the Aspire 1.
pub const DEFAULT_ADDRESS: u16 = 0x76;
pub const DEFAULT_COMPATIBLE: &str = "acer,aspire1-battery";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub bus: PathBuf,
    pub address: u16,
    pub ten_bit_address: bool,
    pub compatible: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bus: PathBuf::from(DEFAULT_BUS),
            address: DEFAULT_ADDRESS,
            ten_bit_address: false,
            compatible: DEFAULT_COMPATIBLE.to_string(),
            properties: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        if !path.as_ref().exists() {
            info!("{} not found, using the default settings", path.as_ref().display());
            return Ok(Settings::default());
        }
        load_toml(path)
    }

    pub fn client(&self) -> I2cClient {
        let flags = if self.ten_bit_address {
            MsgFlags::TEN
        } else {
            MsgFlags::empty()
        };
        I2cClient { addr: self.address, flags }
    }
}
