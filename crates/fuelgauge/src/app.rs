use std::env;
use std::path::PathBuf;
use getopts::Options;
use log::info;
use fuelgauge_core::anyhow::{Error, format_err};
use fuelgauge_core::battery::{Battery, simulated_gauge};
use fuelgauge_core::device::Device;
use fuelgauge_core::helpers::save_toml;
use fuelgauge_core::power_supply::{Property, uevent};
use fuelgauge_core::settings::{Settings, SETTINGS_PATH};

pub const APP_NAME: &str = "fuelgauge";

pub fn run() -> Result<(), Error> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = Options::new();

    opts.optflag("h", "help", "Print this help message.");
    opts.optopt("c", "config", "Read the settings from FILE.", "FILE");
    opts.optflag("s", "simulate", "Query a simulated gauge instead of the bus.");
    opts.optflag("u", "uevent", "Print the properties as uevent lines.");
    opts.optflag("b", "brief", "Print the capacity and the status on one line.");
    opts.optflag("w", "write-settings", "Save the effective settings and exit.");

    let matches = opts.parse(&args)?;

    if matches.opt_present("h") {
        let brief = format!("Usage: {} [-c FILE] [-s] [-u|-b|-w] [PROPERTY...]", APP_NAME);
        print!("{}", opts.usage(&brief));
        return Ok(());
    }

    let path = matches.opt_str("c")
                      .map(PathBuf::from)
                      .unwrap_or_else(|| PathBuf::from(SETTINGS_PATH));
    let mut settings = Settings::load(&path)?;

    if !matches.free.is_empty() {
        settings.properties = matches.free.iter()
                                     .map(|name| name.parse::<Property>())
                                     .collect::<Result<Vec<Property>, Error>>()?;
    }

    if matches.opt_present("w") {
        save_toml(&settings, &path)?;
        info!("Settings saved to {}.", path.display());
        return Ok(());
    }

    let device = Device::from_id(&settings.compatible)
                        .ok_or_else(|| format_err!("no driver matches {}", settings.compatible))?;

    let mut supply = if matches.opt_present("s") {
        let client = settings.client();
        device.attach(simulated_gauge(client.addr), client)
    } else {
        device.probe(&settings)?
    };

    if matches.opt_present("u") {
        for line in uevent(supply.as_mut())? {
            println!("{}", line);
        }
        return Ok(());
    }

    if matches.opt_present("b") {
        let capacity = supply.capacity()?;
        let status = supply.status()?;
        println!("{}: {}% ({})", supply.desc().name, capacity, status);
        return Ok(());
    }

    let properties = if settings.properties.is_empty() {
        supply.desc().properties.to_vec()
    } else {
        settings.properties.clone()
    };

    for prop in properties {
        println!("{}={}", prop, supply.property_text(prop)?);
    }

    Ok(())
}
