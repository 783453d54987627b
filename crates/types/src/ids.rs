//! Newtype wrappers for the string identifiers that flow through a generation run.
//!
//! Chart ids and report ids are both plain strings on the wire; wrapping them keeps a
//! catalog lookup from accidentally being fed a chart id.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a single chart within a report.
    ChartId
);

string_id!(
    /// Identifies a report configuration (e.g. `rent_collection`).
    ReportId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id1 = ChartId::new("monthly-collection");
        let id2 = ChartId::from("monthly-collection");
        let id3 = ChartId::from(String::from("monthly-collection"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "monthly-collection");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id: ReportId = serde_json::from_str("\"occupancy\"").unwrap();
        assert_eq!(id.as_str(), "occupancy");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"occupancy\"");
    }
}
