pub mod errors;
pub mod helpers;
pub mod i2c;
pub mod battery;
pub mod power_supply;
pub mod device;
pub mod settings;

pub use anyhow;
pub use log;
