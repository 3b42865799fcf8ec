use std::fmt;
use std::str::FromStr;

use civic_result::{create_error, Error};

auto_derived!(
    /// Direction of a vote on a report's validity
    #[derive(Copy, Hash)]
    pub enum VoteDirection {
        /// The report describes a real issue
        True,
        /// The report is inaccurate
        False,
    }
);

impl VoteDirection {
    /// Value stored in the vote row
    pub fn is_true(&self) -> bool {
        matches!(self, VoteDirection::True)
    }
}

impl From<bool> for VoteDirection {
    fn from(is_true: bool) -> Self {
        if is_true {
            VoteDirection::True
        } else {
            VoteDirection::False
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_true() { "true" } else { "false" })
    }
}

impl FromStr for VoteDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "true" | "up" | "yes" => Ok(VoteDirection::True),
            "false" | "down" | "no" => Ok(VoteDirection::False),
            _ => Err(create_error!(FailedValidation {
                error: format!("Unknown vote direction: {s}")
            })),
        }
    }
}
