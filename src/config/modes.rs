//! Error policy definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How filesystem walks treat entries they cannot read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Count unreadable entries as empty and keep going (default).
    #[default]
    Skip,
    /// Stop at the first unreadable entry.
    Fail,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Skip => write!(f, "skip"),
            ErrorPolicy::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(ErrorPolicy::Skip),
            "fail" => Ok(ErrorPolicy::Fail),
            _ => Err(format!("Unknown error policy: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_policy_from_str() {
        assert_eq!("skip".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Skip));
        assert_eq!("FAIL".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Fail));
        assert!("ignore".parse::<ErrorPolicy>().is_err());
    }

    #[test]
    fn test_error_policy_display_round_trips() {
        for policy in [ErrorPolicy::Skip, ErrorPolicy::Fail] {
            assert_eq!(policy.to_string().parse::<ErrorPolicy>(), Ok(policy));
        }
    }
}
