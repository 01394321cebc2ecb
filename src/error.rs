// src/error.rs
// =============================================================================
// Every way a run of linkscout can fail.
//
// Each variant is one failure class. All of them end the run, and each one
// maps to its own process exit code so scripts can tell them apart.
//
// A malformed custom header (-r without a colon) is deliberately NOT here:
// it only produces a warning and the run continues without that header.
// =============================================================================

use thiserror::Error;

/// Result type alias used by every module below main.rs
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable command-line input
    #[error("{0}")]
    Usage(String),

    /// -uO and -pO were both given
    #[error("You can't use both -uO and -pO flags together")]
    ConflictingModes,

    /// The target could not be parsed as a URL at all
    #[error("Error parsing URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// The target parsed, but its scheme is not http or https
    #[error("Invalid URL scheme '{0}' (only http and https are supported)")]
    InvalidScheme(String),

    /// DNS lookup for the target host failed
    #[error("Could not resolve host '{host}': {source}")]
    HostUnresolvable {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// Proxy spec does not split into exactly ip and port
    #[error("Invalid proxy: {0}\nPlease insert a valid proxy in the ip:port format")]
    MalformedProxySpec(String),

    /// Proxy ip is not an IP literal, or the port is outside 1..=65535
    #[error("Invalid proxy: {spec} ({reason})\nPlease insert a valid proxy in the ip:port format")]
    InvalidProxy { spec: String, reason: String },

    /// reqwest refused to build the client
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, TLS or protocol failure while sending the request
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body broke off while we were reading it
    #[error("Failed to read response body: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// Writing the results to stdout failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The process exit code for this failure class
    ///
    ///   2 = usage / conflicting flags
    ///   3 = bad URL or scheme
    ///   4 = DNS failure
    ///   5 = bad proxy
    ///   6 = client / transport failure
    ///   7 = body read failure
    ///   8 = output failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) | Error::ConflictingModes => 2,
            Error::InvalidUrl { .. } | Error::InvalidScheme(_) => 3,
            Error::HostUnresolvable { .. } => 4,
            Error::MalformedProxySpec(_) | Error::InvalidProxy { .. } => 5,
            Error::ClientBuild(_) | Error::Transport(_) => 6,
            Error::BodyRead(_) => 7,
            Error::Output(_) | Error::Json(_) => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_class() {
        assert_eq!(Error::ConflictingModes.exit_code(), 2);
        assert_eq!(Error::Usage("x".to_string()).exit_code(), 2);
        assert_eq!(Error::InvalidScheme("ftp".to_string()).exit_code(), 3);
        assert_eq!(
            Error::MalformedProxySpec("a:b:c".to_string()).exit_code(),
            5
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "nope");
        assert_eq!(
            Error::HostUnresolvable { host: "x".to_string(), source: io }.exit_code(),
            4
        );
    }

    #[test]
    fn test_conflict_message() {
        assert_eq!(
            Error::ConflictingModes.to_string(),
            "You can't use both -uO and -pO flags together"
        );
    }
}
