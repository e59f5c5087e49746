//! Lockdown policies configured per exam version.

use serde::{Deserialize, Serialize};

/// Security policies an exam version may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Policy {
    /// Don't install anomaly listeners at all.
    IgnoreLockdown,
    /// Allow the browser to stay windowed (skip fullscreen preconditions).
    TolerateWindowed,
    /// Install listeners, but surface anomalies locally instead of
    /// reporting and locking out. Used for practice exams.
    MockLockdown,
}

/// The set of policies in effect for one exam version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySet(Vec<Policy>);

impl PolicySet {
    pub fn new(policies: impl IntoIterator<Item = Policy>) -> Self {
        PolicySet(policies.into_iter().collect())
    }

    /// Whether the given policy is in effect.
    pub fn permits(&self, query: Policy) -> bool {
        self.0.contains(&query)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Policy> for PolicySet {
    fn from_iter<T: IntoIterator<Item = Policy>>(iter: T) -> Self {
        PolicySet::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permits_checks_membership() {
        let set = PolicySet::new([Policy::TolerateWindowed]);
        assert!(set.permits(Policy::TolerateWindowed));
        assert!(!set.permits(Policy::IgnoreLockdown));
        assert!(!PolicySet::default().permits(Policy::MockLockdown));
    }

    #[test]
    fn wire_names_are_screaming_snake() {
        let json = serde_json::to_value(Policy::IgnoreLockdown).unwrap();
        assert_eq!(json, "IGNORE_LOCKDOWN");
        let back: Policy = serde_json::from_value("TOLERATE_WINDOWED".into()).unwrap();
        assert_eq!(back, Policy::TolerateWindowed);
    }
}
