use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use anyhow::{Error, Context};

pub fn load_toml<T, P: AsRef<Path>>(path: P) -> Result<T, Error> where for<'a> T: Deserialize<'a> {
    let s = fs::read_to_string(path.as_ref())
               .with_context(|| format!("can't read file {}", path.as_ref().display()))?;
    toml::from_str(&s)
         .with_context(|| format!("can't parse TOML content from {}", path.as_ref().display()))
         .map_err(Into::into)
}

pub fn save_toml<T, P: AsRef<Path>>(data: &T, path: P) -> Result<(), Error> where T: Serialize {
    let s = toml::to_string(data)
                 .context("can't convert to TOML format")?;
    fs::write(path.as_ref(), &s)
       .with_context(|| format!("can't write to file {}", path.as_ref().display()))
       .map_err(Into::into)
}

// Formats bytes the way i2c tools print register dumps.
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes.iter()
         .map(|b| format!("{:02x}", b))
         .collect::<Vec<String>>()
         .join(" ")
}
