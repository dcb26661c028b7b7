// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_THREADS: usize = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub output: OutputConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub file: Option<String>,
    pub silent: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            file: None,
            silent: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub threads: usize,
    pub timeout: Duration,
    pub nameservers: Vec<String>,
    pub use_system_resolver: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            timeout: Duration::from_secs(5),
            nameservers: vec![
                "8.8.8.8:53".to_string(),
                "8.8.4.4:53".to_string(),
                "1.1.1.1:53".to_string(),
                "1.0.0.1:53".to_string(),
            ],
            use_system_resolver: true,
        }
    }
}

/// A single successful lookup: the fully-qualified target and the first
/// address it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Found {
    pub target: String,
    pub address: String,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.target, self.address)
    }
}

/// Why a target did not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unresolved {
    /// The name does not exist or has no address records.
    NoSuchName,
    /// Timeout, server failure or any other resolver fault.
    Transient(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFound {
    pub target: String,
    pub cause: Unresolved,
}

impl NotFound {
    pub fn is_transient(&self) -> bool {
        matches!(self.cause, Unresolved::Transient(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(Found),
    NotFound(NotFound),
}

impl Resolution {
    pub fn found(target: impl Into<String>, address: impl Into<String>) -> Self {
        Resolution::Found(Found {
            target: target.into(),
            address: address.into(),
        })
    }

    pub fn not_found(target: impl Into<String>, cause: Unresolved) -> Self {
        Resolution::NotFound(NotFound {
            target: target.into(),
            cause,
        })
    }

    pub fn target(&self) -> &str {
        match self {
            Resolution::Found(found) => &found.target,
            Resolution::NotFound(missing) => &missing.target,
        }
    }
}

/// Successful resolutions in the order they completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: Vec<Found>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, found: Found) {
        self.entries.push(found);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Found> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Found> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Found;
    type IntoIter = std::slice::Iter<'a, Found>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub attempted: usize,
    pub found: usize,
    pub not_found: usize,
    pub transient: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub domain: String,
    pub results: ResultSet,
    pub stats: ScanStats,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum SubprobeError {
    #[error("Wordlist file {} could not be read: {source}", .path.display())]
    WordlistUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("Resolver initialisation failed: {0}")]
    ResolverInit(String),

    #[error("Output error: {0}")]
    OutputError(String),
}

impl SubprobeError {
    /// Process exit status for this failure, following sysexits(3).
    pub fn exit_code(&self) -> i32 {
        match self {
            SubprobeError::WordlistUnreadable { .. } => 66,
            SubprobeError::ResolverInit(_) => 69,
            SubprobeError::OutputError(_) => 74,
            SubprobeError::ConfigError(_) | SubprobeError::InvalidConcurrency => 78,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_display_format() {
        let found = Found {
            target: "www.example.com".to_string(),
            address: "93.184.216.34".to_string(),
        };
        assert_eq!(found.to_string(), "www.example.com -> 93.184.216.34");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        let wordlist = SubprobeError::WordlistUnreadable {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(wordlist.exit_code(), 66);
        assert_eq!(SubprobeError::ResolverInit("x".into()).exit_code(), 69);
        assert_eq!(SubprobeError::OutputError("x".into()).exit_code(), 74);
        assert_eq!(SubprobeError::ConfigError("x".into()).exit_code(), 78);
        assert!(wordlist.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_result_set_serializes_as_list() {
        let mut results = ResultSet::new();
        results.push(Found {
            target: "mail.example.com".to_string(),
            address: "10.0.0.1".to_string(),
        });
        let json = serde_json::to_value(&results).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["target"], "mail.example.com");
    }
}
