use log::debug;
use crate::errors::GaugeError;
use super::PowerSupply;

/// Renders the supply the way the power supply class fills its uevent
/// environment: name, type, then every described property in order.
///
/// Properties without data are left out, other errors abort.
pub fn uevent<S: PowerSupply + ?Sized>(supply: &mut S) -> Result<Vec<String>, GaugeError> {
    let desc = *supply.desc();
    let mut lines = vec![
        format!("POWER_SUPPLY_NAME={}", desc.name),
        format!("POWER_SUPPLY_TYPE={}", desc.kind),
    ];

    for &prop in desc.properties {
        match supply.property_text(prop) {
            Ok(text) => lines.push(format!("{}={}", prop.uevent_key(), text)),
            Err(GaugeError::ZeroFullCapacity) => {
                debug!("no data for {} on {}", prop, desc.name);
            },
            Err(e) => return Err(e),
        }
    }

    Ok(lines)
}
