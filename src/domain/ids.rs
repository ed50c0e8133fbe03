use crate::error::TaskNestError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Declares an opaque string identifier.
///
/// Fresh ids are random UUIDs, but any non-empty string read back from a
/// stored snapshot is accepted as-is so older data keeps its ids. Parsing
/// and deserialization apply the same rules.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generates a new unique identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = TaskNestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(TaskNestError::InvalidId(s.to_string()));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = TaskNestError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a board
    BoardId
);
string_id!(
    /// Identifier of a column within a board
    ColumnId
);
string_id!(
    /// Identifier of a task card
    TaskId
);
string_id!(TagId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TaskId::generate();
        let b = TaskId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_parse_accepts_legacy_ids() {
        let id = ColumnId::from_str("1700000000000-k3j4h5g6f").unwrap();
        assert_eq!(id.as_str(), "1700000000000-k3j4h5g6f");

        let id: BoardId = "  spaced  ".parse().unwrap();
        assert_eq!(id.as_str(), "spaced");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(TaskId::from_str("").is_err());
        assert!(TaskId::from_str("   ").is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: BoardId = "board-1".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"board-1\"");

        let back: BoardId = serde_json::from_str("\"board-1\"").unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "board-1");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<TaskId>("\"\"").is_err());
        assert!(serde_json::from_str::<ColumnId>("\"  \"").is_err());

        let err = serde_json::from_str::<BoardId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("Invalid identifier"));
    }
}
