//! Session configuration.
//!
//! A [`SessionConfig`] is validated once at construction; the coordinators
//! trust it afterwards. Invalid URLs or degenerate timer values are caught
//! here, not at save time in a background task.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::lockdown::policy::PolicySet;

/// Default interval between periodic autosaves.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(10);

/// Default quiet window after an answer edit before an edit-triggered save.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Validated configuration for one exam-taking session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    take_url: Url,
    autosave_interval: Duration,
    debounce: Duration,
    request_timeout: Duration,
    policies: PolicySet,
}

impl SessionConfig {
    /// Start building a config for the given exam-take URL.
    pub fn builder(take_url: impl Into<String>) -> SessionConfigBuilder {
        SessionConfigBuilder {
            take_url: take_url.into(),
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            policies: PolicySet::default(),
        }
    }

    /// The exam-take endpoint all session tasks are POSTed to.
    pub fn take_url(&self) -> &Url {
        &self.take_url
    }

    /// Interval between periodic autosaves.
    pub fn autosave_interval(&self) -> Duration {
        self.autosave_interval
    }

    /// Quiet window after an answer edit before an edit-triggered save.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Lockdown policies configured for this exam version.
    pub fn policies(&self) -> &PolicySet {
        &self.policies
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug, Clone)]
pub struct SessionConfigBuilder {
    take_url: String,
    autosave_interval: Duration,
    debounce: Duration,
    request_timeout: Duration,
    policies: PolicySet,
}

impl SessionConfigBuilder {
    pub fn autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn policies(mut self, policies: PolicySet) -> Self {
        self.policies = policies;
        self
    }

    /// Validate and build the config.
    ///
    /// Returns `Err` if the URL does not parse, uses a scheme other than
    /// `http`/`https`, or if a timer duration is zero.
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        let take_url = Url::parse(&self.take_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.take_url.clone(),
            message: e.to_string(),
        })?;

        if take_url.scheme() != "http" && take_url.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme {
                scheme: take_url.scheme().to_string(),
            });
        }

        if self.autosave_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "autosave_interval".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        if self.debounce.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "debounce".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout".to_string(),
                message: "must be non-zero".to_string(),
            });
        }

        Ok(SessionConfig {
            take_url,
            autosave_interval: self.autosave_interval,
            debounce: self.debounce,
            request_timeout: self.request_timeout,
            policies: self.policies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lockdown::policy::Policy;

    #[test]
    fn builds_with_defaults() {
        let config = SessionConfig::builder("https://exam.test/take/1")
            .build()
            .unwrap();
        assert_eq!(config.autosave_interval(), DEFAULT_AUTOSAVE_INTERVAL);
        assert_eq!(config.debounce(), DEFAULT_DEBOUNCE);
        assert_eq!(config.take_url().as_str(), "https://exam.test/take/1");
        assert!(!config.policies().permits(Policy::IgnoreLockdown));
    }

    #[test]
    fn rejects_bad_url() {
        let err = SessionConfig::builder("not a url at all").build();
        assert!(matches!(err, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = SessionConfig::builder("ftp://exam.test/take/1").build();
        assert!(matches!(err, Err(ConfigError::UnsupportedScheme { .. })));
    }

    #[test]
    fn rejects_zero_durations() {
        let err = SessionConfig::builder("https://exam.test/take/1")
            .autosave_interval(Duration::ZERO)
            .build();
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));

        let err = SessionConfig::builder("https://exam.test/take/1")
            .debounce(Duration::ZERO)
            .build();
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));

        let err = SessionConfig::builder("https://exam.test/take/1")
            .request_timeout(Duration::ZERO)
            .build();
        assert!(matches!(err, Err(ConfigError::InvalidValue { .. })));
    }
}
