//! Legality formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named legality window, each with its own card pool and banned list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Standard,
    Expanded,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Standard, Format::Expanded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Standard => "standard",
            Format::Expanded => "expanded",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Format::Standard),
            "expanded" => Ok(Format::Expanded),
            _ => Err(format!(
                "invalid format '{s}' (expected: standard, expanded)"
            )),
        }
    }
}
