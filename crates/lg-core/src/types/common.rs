use serde::{Deserialize, Serialize};
use std::fmt;

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl AddressFamily {
    /// Both families, IPv4 first
    pub const BOTH: [Self; 2] = [Self::V4, Self::V6];

    /// Path segment used by the router API (`v4` / `v6`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "v4",
            Self::V6 => "v6",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a best-effort enrichment lookup.
///
/// Enrichment never fails a report: when the lookup fails the default value
/// is kept and the reason is recorded instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment<T> {
    /// The lookup succeeded
    Complete(T),
    /// The lookup failed; `value` holds the substitute
    Degraded {
        /// Substitute value
        value: T,
        /// Why the lookup failed
        reason: String,
    },
}

impl<T: Default> Enrichment<T> {
    /// Turn a fallible lookup into an enrichment, logging the failure.
    pub fn from_result<E: fmt::Display>(result: Result<T, E>, what: &str) -> Self {
        match result {
            Ok(value) => Self::Complete(value),
            Err(e) => {
                tracing::warn!(lookup = what, error = %e, "enrichment degraded");
                Self::Degraded {
                    value: T::default(),
                    reason: format!("{what}: {e}"),
                }
            }
        }
    }
}

impl<T> Enrichment<T> {
    /// Returns true if the lookup failed
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The value, whether looked up or substituted
    pub fn into_value(self) -> T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } => value,
        }
    }

    /// Borrow the value
    pub const fn value(&self) -> &T {
        match self {
            Self::Complete(value) | Self::Degraded { value, .. } => value,
        }
    }

    /// Failure reason, if degraded
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Complete(_) => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_keeps_default() {
        let result: Result<Vec<String>, &str> = Err("SERVFAIL");
        let enrichment = Enrichment::from_result(result, "PTR 1.2.0.192.in-addr.arpa");
        assert!(enrichment.is_degraded());
        assert_eq!(
            enrichment.reason(),
            Some("PTR 1.2.0.192.in-addr.arpa: SERVFAIL")
        );
        assert!(enrichment.into_value().is_empty());
    }

    #[test]
    fn complete_passes_value_through() {
        let enrichment = Enrichment::from_result(Ok::<_, &str>(7u32), "serial");
        assert!(!enrichment.is_degraded());
        assert_eq!(*enrichment.value(), 7);
        assert_eq!(enrichment.reason(), None);
    }
}
