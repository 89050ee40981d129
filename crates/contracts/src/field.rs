//! PublishField - closed vocabulary of projectable metric attributes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric attribute that may appear in an outgoing document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublishField {
    Namespace,
    Config,
    Data,
    Description,
    Timestamp,
    Unit,
    Version,
}

impl PublishField {
    /// Every field, in canonical order
    pub const ALL: [PublishField; 7] = [
        PublishField::Namespace,
        PublishField::Config,
        PublishField::Data,
        PublishField::Description,
        PublishField::Timestamp,
        PublishField::Unit,
        PublishField::Version,
    ];

    /// Document key for this field
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namespace => "Namespace",
            Self::Config => "Config",
            Self::Data => "Data",
            Self::Description => "Description",
            Self::Timestamp => "Timestamp",
            Self::Unit => "Unit",
            Self::Version => "Version",
        }
    }
}

impl fmt::Display for PublishField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishField {
    type Err = String;

    /// Case-sensitive; anything outside the vocabulary is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unsupported field '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for field in PublishField::ALL {
            assert_eq!(field.as_str().parse::<PublishField>(), Ok(field));
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert!("namespace".parse::<PublishField>().is_err());
        assert!("".parse::<PublishField>().is_err());
    }
}
