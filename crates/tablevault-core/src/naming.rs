//! Archive naming and timestamp policy.
//!
//! Archives are named `backup_<timestamp>` with the packed artifact at
//! `backup_<timestamp>.zip`, where the timestamp is the export start time
//! rendered in the Asia/Karachi zone (UTC+5, no DST) at second precision.
//! Two exports started within the same second would collide; that hazard is
//! accepted rather than guarded against.

use crate::table::TableName;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every archive in the destination store.
pub const ARCHIVE_PREFIX: &str = "backup_";

/// File extension of the packed artifact.
pub const ARCHIVE_EXTENSION: &str = ".zip";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// The fixed Asia/Karachi offset (UTC+5) archives are timestamped in.
pub fn karachi() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600).expect("UTC+5 is a valid offset")
}

/// Error type for parsing archive names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveNameError {
    /// The name does not start with [ARCHIVE_PREFIX].
    MissingPrefix { name: String },
    /// The timestamp portion does not match the expected layout.
    InvalidTimestamp { name: String },
}

impl fmt::Display for ArchiveNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix { name } => {
                write!(f, "archive name '{name}' does not start with '{ARCHIVE_PREFIX}'")
            }
            Self::InvalidTimestamp { name } => {
                write!(f, "archive name '{name}' has no valid timestamp")
            }
        }
    }
}

impl std::error::Error for ArchiveNameError {}

/// Deterministic archive name derived from a run's start time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveName(String);

impl ArchiveName {
    /// Derive the archive name for a run started at `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let local = now.with_timezone(&karachi());
        Self(format!("{ARCHIVE_PREFIX}{}", local.format(TIMESTAMP_FORMAT)))
    }

    /// Parse a base or artifact name back into an [ArchiveName].
    pub fn parse(name: impl AsRef<str>) -> Result<Self, ArchiveNameError> {
        let s = name.as_ref();
        let base = s.strip_suffix(ARCHIVE_EXTENSION).unwrap_or(s);

        let Some(stamp) = base.strip_prefix(ARCHIVE_PREFIX) else {
            return Err(ArchiveNameError::MissingPrefix {
                name: s.to_string(),
            });
        };

        if NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_err() {
            return Err(ArchiveNameError::InvalidTimestamp {
                name: s.to_string(),
            });
        }

        Ok(Self(base.to_string()))
    }

    /// The timestamp the name was derived from, in the Karachi offset.
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let stamp = self.0.strip_prefix(ARCHIVE_PREFIX)?;
        let naive = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
        karachi().from_local_datetime(&naive).single()
    }

    /// Name of the packed artifact (`<base>.zip`).
    pub fn artifact(&self) -> String {
        format!("{}{ARCHIVE_EXTENSION}", self.0)
    }

    /// The base name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Archive member name for one table (`<table>.csv`).
pub fn member_name(table: &TableName) -> String {
    format!("{table}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn generates_name_in_karachi_time() {
        // 2024-03-01 21:00:30 UTC is 2024-03-02 02:00:30 in UTC+5.
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 30).unwrap();
        let name = ArchiveName::generate(now);
        assert_eq!(name.as_str(), "backup_2024-03-02_02-00-30");
        assert_eq!(name.artifact(), "backup_2024-03-02_02-00-30.zip");
    }

    #[test]
    fn same_second_generates_identical_names() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(ArchiveName::generate(now), ArchiveName::generate(now));
    }

    #[test]
    fn parses_base_and_artifact_forms() {
        let base = ArchiveName::parse("backup_2024-03-02_02-00-30").unwrap();
        let artifact = ArchiveName::parse("backup_2024-03-02_02-00-30.zip").unwrap();
        assert_eq!(base, artifact);
        assert!(base.timestamp().is_some());
    }

    #[test]
    fn rejects_foreign_names() {
        assert!(matches!(
            ArchiveName::parse("snapshot_2024-03-02"),
            Err(ArchiveNameError::MissingPrefix { .. })
        ));
        assert!(matches!(
            ArchiveName::parse("backup_not-a-timestamp"),
            Err(ArchiveNameError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn member_names_follow_table_csv_layout() {
        let table = TableName::parse("items").unwrap();
        assert_eq!(member_name(&table), "items.csv");
    }
}
