use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Configuration required to run the export process.
/// This decouples the logic from how the arguments were parsed (CLI/Config file).
#[derive(Clone, Debug)]
pub struct ExportConfig {
    pub input_path: PathBuf,
    pub target_dir: PathBuf,
    pub db_location: String,
    pub verbose: bool,
    pub quiet: bool,
}

/// Convert fractional epoch seconds to UTC at microsecond precision.
/// Values chrono cannot represent map to the epoch.
pub fn epoch_to_utc(seconds: f64) -> DateTime<Utc> {
    if !seconds.is_finite() {
        return DateTime::<Utc>::default();
    }
    DateTime::from_timestamp_micros((seconds * 1_000_000.0).round() as i64).unwrap_or_default()
}

/// Resolve a storage location to a SQLite path.
///
/// Accepts a plain path, an SQLAlchemy-style `sqlite:///relative.db` or
/// `sqlite:////absolute.db` URI, or `:memory:`.
pub fn sqlite_path(location: &str) -> &Path {
    Path::new(location.strip_prefix("sqlite:///").unwrap_or(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_conversion() {
        assert_eq!(epoch_to_utc(0.0), DateTime::<Utc>::default());
        assert_eq!(epoch_to_utc(1_700_000_000.0).to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(epoch_to_utc(1.25).timestamp_subsec_micros(), 250_000);
        assert_eq!(epoch_to_utc(f64::NAN), DateTime::<Utc>::default());
        assert_eq!(epoch_to_utc(1e30), DateTime::<Utc>::default());
    }

    #[test]
    fn storage_locations() {
        assert_eq!(sqlite_path("conversations.db"), Path::new("conversations.db"));
        assert_eq!(sqlite_path("sqlite:///conversations.db"), Path::new("conversations.db"));
        assert_eq!(sqlite_path("sqlite:////tmp/c.db"), Path::new("/tmp/c.db"));
        assert_eq!(sqlite_path(":memory:"), Path::new(":memory:"));
    }
}
