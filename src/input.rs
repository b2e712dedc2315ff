use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// How records are laid out in an input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InputFormat {
    /// One record per line, line terminators stripped
    #[default]
    Lines,
    /// A single JSON array of strings
    Json,
}

/// Read all records from `reader`
pub fn read_records<R: Read>(reader: R, format: InputFormat) -> Result<Vec<String>> {
    match format {
        InputFormat::Lines => BufReader::new(reader)
            .lines()
            .enumerate()
            .map(|(i, line)| line.with_context(|| format!("Failed to read line {}", i + 1)))
            .collect(),
        InputFormat::Json => {
            serde_json::from_reader(reader).context("Input is not a JSON array of strings")
        }
    }
}

/// Read records from a file, or from stdin when `path` is `-`
pub fn read_records_from(path: &str, format: InputFormat) -> Result<Vec<String>> {
    let records = if path == "-" {
        read_records(std::io::stdin().lock(), format)?
    } else {
        let file = File::open(Path::new(path))
            .with_context(|| format!("Failed to open input: {}", path))?;
        read_records(file, format).with_context(|| format!("Failed to read input: {}", path))?
    };

    tracing::debug!(count = records.len(), ?format, "Read input records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_lines() {
        let input = "first\nsecond\r\n\nlast\n";
        let records = read_records(input.as_bytes(), InputFormat::Lines).unwrap();
        assert_eq!(records, vec!["first", "second", "", "last"]);
    }

    #[test]
    fn test_read_lines_empty() {
        let records = read_records("".as_bytes(), InputFormat::Lines).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_json_array() {
        let input = r#"["a", "multi\nline", "你好"]"#;
        let records = read_records(input.as_bytes(), InputFormat::Json).unwrap();
        assert_eq!(records, vec!["a", "multi\nline", "你好"]);
    }

    #[test]
    fn test_read_json_rejects_non_strings() {
        let result = read_records("[1, 2]".as_bytes(), InputFormat::Json);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_lines_rejects_invalid_utf8() {
        let bytes: &[u8] = &[0x66, 0x6f, 0xff, 0x0a];
        let err = read_records(bytes, InputFormat::Lines).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_records_from("/nonexistent/recbatch-input.txt", InputFormat::Lines)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open input"));
    }
}
