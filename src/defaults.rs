//! Default Configuration Values
//!
//! This module centralizes the default values used by the fetch client.

/// HTTP client default configurations
pub mod http {
    use std::time::Duration;

    /// Default request timeout, covering connect, send and the full body read.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests.
    ///
    /// Many REST APIs (GitHub among them) reject requests without one.
    pub const USER_AGENT: &str = concat!("json-fetch/", env!("CARGO_PKG_VERSION"));

    /// Accept header sent when the caller does not supply one.
    pub const ACCEPT: &str = "application/json";
}
