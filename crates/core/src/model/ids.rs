use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing an identifier from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the underlying u64 value
            #[must_use]
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self::new).map_err(|_| ParseIdError {
                    kind: stringify!($name),
                })
            }
        }
    };
}

backend_id!(
    /// Backend identifier of a student.
    StudentId
);
backend_id!(
    /// Backend identifier of a question.
    QuestionId
);
backend_id!(
    /// Backend identifier of a question report.
    ReportId
);
backend_id!(
    /// Backend identifier of a VIP student entry.
    VipStudentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_display_and_parse() {
        let id = QuestionId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(" 42 ".parse::<QuestionId>().unwrap(), id);
    }

    #[test]
    fn invalid_id_names_the_kind() {
        let err = "abc".parse::<StudentId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse StudentId from string");
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&ReportId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: ReportId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReportId::new(7));
    }

    #[test]
    fn debug_includes_type_name() {
        assert_eq!(format!("{:?}", VipStudentId::new(3)), "VipStudentId(3)");
    }
}
