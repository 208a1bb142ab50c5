use std::io::{BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}

pub fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    Ok(serde_json::from_str(raw)?)
}

pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let file = fs_err::File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Couldn't parse JSON from {}", path))
}

pub fn write_json<T: Serialize>(path: &str, obj: &T) -> Result<()> {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    let mut file = BufWriter::new(fs_err::File::create(path)?);
    serde_json::to_writer_pretty(&mut file, obj)?;
    file.flush()?;
    info!("Wrote {}", path);
    Ok(())
}
