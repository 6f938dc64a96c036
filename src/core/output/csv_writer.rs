//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::output::TIMESTAMP_FORMAT;
use crate::error::Result;

const HEADER: [&str; 6] = ["Timestamp", "Date", "Time", "Name", "FullName", "Body"];

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Timestamp`, `Date`, `Time`, `Name`, `FullName`, `Body`
/// - `Date` and `Time` are the labels as written in the export
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message]) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, messages)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(sink: W, messages: &[Message]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(HEADER)?;
    for msg in messages {
        writer.write_record(build_record(msg))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV record for a single message.
fn build_record(msg: &Message) -> [String; 6] {
    [
        msg.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        msg.date.clone(),
        msg.time.clone(),
        msg.name.clone(),
        msg.full_name.clone().unwrap_or_default(),
        msg.body.clone(),
    ]
}
