//! Error types for dashboard filters
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Main error type for the crate
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// A category ratio outside `[0, 1]` under the reject policy
    #[snafu(display("Invalid ratio {ratio}: expected a value in [0, 1]"))]
    InvalidRatio { ratio: f64 },

    /// An inverted range under the reject policy
    #[snafu(display("Invalid range [{start}, {end}]: expected 0 <= start <= end <= {last_index}"))]
    InvalidRange {
        start: i64,
        end: i64,
        last_index: usize,
    },

    /// A range store needs at least one bucket
    #[snafu(display("Timeline has no buckets"))]
    EmptyTimeline,

    /// Explicit buckets are mis-indexed, overlapping or have gaps
    #[snafu(display("Timeline bucket {index} is not contiguous with its predecessor"))]
    NonContiguousTimeline { index: usize },

    /// Invalid configuration value
    #[snafu(display("Invalid config: {message}"))]
    InvalidConfig { message: String },

    /// IO error (config file access)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
