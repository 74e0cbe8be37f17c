//! Shared constants used across the crate.

/// User agent string sent with every request to the story service.
///
/// Identifies this client and its version so server-side logs can tell
/// library traffic apart from browser traffic.
pub const CLIENT_USER_AGENT: &str = concat!("storynest/", env!("CARGO_PKG_VERSION"));
