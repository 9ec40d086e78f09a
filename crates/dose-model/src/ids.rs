//! Stable identifiers for tasks and per-task entries.
//!
//! Identifiers are allocated from monotonically increasing counters and are
//! never reused, so ordering by identifier is ordering by creation. They
//! render as `<prefix>-<n>` and serialize as that string.

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

macro_rules! sequential_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            pub fn new(value: u32) -> Self {
                Self(value)
            }

            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .strip_prefix($prefix)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .filter(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .map(Self)
                    .ok_or_else(|| ModelError::InvalidId {
                        kind: $prefix,
                        value: s.to_string(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

sequential_id!(
    /// Identifier of a task within a worksheet (`task-<n>`).
    TaskId,
    "task"
);

sequential_id!(
    /// Identifier of an internal-dose source term (`nuc-<n>`).
    ///
    /// Shared by the entry and all of its companion records.
    RadionuclideId,
    "nuc"
);

sequential_id!(
    /// Identifier of an extremity/skin dose entry (`ext-<n>`).
    ExtremityId,
    "ext"
);

/// Hands out identifiers from a counter that only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct IdCounter(u32);

impl Default for IdCounter {
    fn default() -> Self {
        Self(1)
    }
}

impl IdCounter {
    /// Next value that `allocate` will hand out.
    pub fn peek(&self) -> u32 {
        self.0
    }

    /// Hands out the next identifier, or `None` once the counter has run
    /// out; an exhausted counter never repeats a value.
    pub fn allocate(&mut self) -> Option<u32> {
        let next = self.0.checked_add(1)?;
        Some(std::mem::replace(&mut self.0, next))
    }

    /// State after handing out the first identifier, with that identifier.
    pub fn with_first() -> (u32, Self) {
        (1, Self(2))
    }
}
