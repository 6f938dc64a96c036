//! JSON output writer.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::error::Result;

/// Writes any serializable value to a file as pretty-printed JSON.
///
/// Used for both the statistics report and plain message lists.
pub fn write_json<T>(value: &T, output_path: &str) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let json = to_json(value)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Converts a value to a pretty-printed JSON string.
pub fn to_json<T>(value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_string_pretty(value)?)
}
