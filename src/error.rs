//! Error types for the exam session engine.

use crate::lockdown::host::WindowGeometry;

/// Top-level error type for the session engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Lockdown error: {0}")]
    Lockdown(#[from] LockdownError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid exam-take URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("URL scheme '{scheme}' not allowed; only http/https permitted")]
    UnsupportedScheme { scheme: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Errors from the exam-take API endpoint.
///
/// Reducers never see these: the autosave coordinator converts them into
/// `SnapshotFailure` state, and the lockdown coordinator logs and drops them
/// (lockout proceeds regardless of report outcome).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    /// The request never completed (DNS, TLS, connection, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 2xx but the body did not match the contract.
    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),
}

/// Errors from lockdown precondition checks.
///
/// Messages are user-facing: they end up verbatim in the lockdown failure
/// banner, so they tell the student what to fix.
#[derive(Debug, thiserror::Error)]
pub enum LockdownError {
    #[error("Please use Chrome, Chromium, or Firefox to continue.")]
    UnsupportedBrowser,

    #[error("Error entering fullscreen. Please manually fullscreen the window with F11.")]
    FullscreenDenied,

    #[error("Cannot confirm fullscreen. {geometry:?}")]
    FullscreenUnconfirmed { geometry: WindowGeometry },

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}
