use crate::partitioner::{BatchLimits, LimitsError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Limits as written in a JSON config file or passed on the command line.
///
/// Every field is optional; missing values fall back to the defaults of
/// [`BatchLimits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsFile {
    pub max_record_size: Option<usize>,
    pub max_batch_size: Option<usize>,
    pub max_records_per_batch: Option<usize>,
}

impl LimitsFile {
    /// Read limits from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file: LimitsFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?file, "Loaded limits config");
        Ok(file)
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: LimitsFile) -> Self {
        Self {
            max_record_size: overrides.max_record_size.or(self.max_record_size),
            max_batch_size: overrides.max_batch_size.or(self.max_batch_size),
            max_records_per_batch: overrides
                .max_records_per_batch
                .or(self.max_records_per_batch),
        }
    }

    /// Fill gaps with defaults and validate
    pub fn into_limits(self) -> Result<BatchLimits, LimitsError> {
        let mut builder = BatchLimits::builder();

        if let Some(size) = self.max_record_size {
            builder = builder.max_record_size(size);
        }
        if let Some(size) = self.max_batch_size {
            builder = builder.max_batch_size(size);
        }
        if let Some(count) = self.max_records_per_batch {
            builder = builder.max_records_per_batch(count);
        }

        builder.build()
    }
}

/// Resolve effective limits: defaults, then the optional config file, then `overrides`
pub fn resolve_limits(config_path: Option<&Path>, overrides: LimitsFile) -> Result<BatchLimits> {
    let base = match config_path {
        Some(path) => LimitsFile::load(path)?,
        None => LimitsFile::default(),
    };

    let limits = base
        .merge(overrides)
        .into_limits()
        .context("Invalid batch limits")?;

    Ok(limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("recbatch-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let limits = LimitsFile::default().into_limits().unwrap();
        assert_eq!(limits, BatchLimits::default());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = LimitsFile {
            max_record_size: Some(10),
            max_batch_size: Some(100),
            max_records_per_batch: None,
        };
        let overrides = LimitsFile {
            max_batch_size: Some(50),
            ..Default::default()
        };

        let merged = file.merge(overrides);
        assert_eq!(merged.max_record_size, Some(10));
        assert_eq!(merged.max_batch_size, Some(50));
        assert_eq!(merged.max_records_per_batch, None);
    }

    #[test]
    fn test_into_limits_rejects_zero() {
        let file = LimitsFile {
            max_records_per_batch: Some(0),
            ..Default::default()
        };
        assert!(file.into_limits().is_err());
    }

    #[test]
    fn test_load_and_resolve() {
        let path = write_temp_config(r#"{ "max_record_size": 64, "max_records_per_batch": 4 }"#);

        let overrides = LimitsFile {
            max_records_per_batch: Some(8),
            ..Default::default()
        };
        let limits = resolve_limits(Some(path.as_path()), overrides).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(limits.max_record_size(), 64);
        assert_eq!(limits.max_batch_size(), 5 * 1024 * 1024);
        assert_eq!(limits.max_records_per_batch(), 8);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let path = write_temp_config(r#"{ "max_batch_bytes": 10 }"#);
        let result = LimitsFile::load(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = std::env::temp_dir().join("recbatch-does-not-exist.json");
        let err = resolve_limits(Some(path.as_path()), LimitsFile::default()).unwrap_err();
        assert!(err.to_string().contains("recbatch-does-not-exist.json"));
    }

    #[test]
    fn test_resolve_zero_override_fails() {
        let overrides = LimitsFile {
            max_batch_size: Some(0),
            ..Default::default()
        };
        let err = resolve_limits(None, overrides).unwrap_err();
        assert!(format!("{:#}", err).contains("max_batch_size"));
    }
}
