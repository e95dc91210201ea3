mod app;

use fuelgauge_core::anyhow::Error;
use crate::app::run;

fn main() -> Result<(), Error> {
    env_logger::init();
    run()?;
    Ok(())
}
