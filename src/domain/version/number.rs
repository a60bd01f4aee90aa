//! VersionNumber - 1-based per-proposal export counter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Version number of an export.
///
/// Numbers start at 1 and only increase within a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionNumber(u32);

impl VersionNumber {
    /// The first version of any proposal.
    pub fn first() -> Self {
        Self(1)
    }

    /// Creates a version number from a stored value.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for 0.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(
                "version_number",
                1,
                u32::MAX as i64,
                0,
            ));
        }
        Ok(Self(value))
    }

    /// Number to assign after the highest existing one (`None` when there
    /// are no versions yet).
    pub fn next_after(latest: Option<VersionNumber>) -> Self {
        match latest {
            Some(VersionNumber(n)) => Self(n.saturating_add(1)),
            None => Self::first(),
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_after_none_is_first() {
        assert_eq!(VersionNumber::next_after(None), VersionNumber::first());
        assert_eq!(VersionNumber::first().as_u32(), 1);
    }

    #[test]
    fn next_after_is_one_past_max() {
        let latest = VersionNumber::new(7).unwrap();
        assert_eq!(VersionNumber::next_after(Some(latest)).as_u32(), 8);
    }

    #[test]
    fn zero_is_rejected() {
        assert!(VersionNumber::new(0).is_err());
    }

    #[test]
    fn displays_with_prefix() {
        assert_eq!(VersionNumber::new(3).unwrap().to_string(), "v3");
    }
}
