//! Address type with `gld_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque guild address, always prefixed with `gld_`.
///
/// The engine uses the same address space for members, treasury assets, and
/// external call targets; resolving an address to a key or contract is the
/// job of an external identity resolver, not the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard prefix for all guild addresses.
    pub const PREFIX: &'static str = "gld_";

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `gld_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with gld_");
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_address_roundtrips() {
        let a = Address::new("gld_member_one");
        assert!(a.is_valid());
        assert_eq!(a.as_str(), "gld_member_one");
        assert_eq!(a.to_string(), "gld_member_one");
    }

    #[test]
    #[should_panic(expected = "must start with gld_")]
    fn bad_prefix_panics() {
        Address::new("brst_member_one");
    }

    #[test]
    fn bare_prefix_is_not_valid() {
        let a = Address::new("gld_");
        assert!(!a.is_valid());
    }
}
