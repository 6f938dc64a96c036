//! JSON Lines (JSONL) output writer.
//!
//! One message object per line, in list order.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::error::Result;

/// Writes messages to a JSONL file.
///
/// ```jsonl
/// {"date":"2024년 1월 1일","time":"오전 10:00","name":"철수","full_name":"철수","body":"안녕","timestamp":"2024-01-01T10:00:00Z"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for msg in messages {
        serde_json::to_writer(&mut writer, msg)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message]) -> Result<String> {
    let mut output = String::new();
    for msg in messages {
        output.push_str(&serde_json::to_string(msg)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn sample() -> Vec<Message> {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        vec![
            Message::new("철수", "안녕", ts).with_full_name("철수/PC"),
            Message::new("영희", "첫 줄\n둘째 줄", ts),
        ]
    }

    #[test]
    fn test_to_jsonl_one_line_per_message() {
        let jsonl = to_jsonl(&sample()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
        assert!(lines[0].contains(r#""full_name":"철수/PC""#));
        assert!(lines[1].contains(r#"\n"#));
    }

    #[test]
    fn test_write_jsonl() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&sample(), path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, to_jsonl(&sample()).unwrap());
    }

    #[test]
    fn test_empty_jsonl() {
        assert_eq!(to_jsonl(&[]).unwrap(), "");
    }
}
