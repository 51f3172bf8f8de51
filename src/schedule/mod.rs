//! Schedule slots keyed by `(date, bowl, start_time)`.
//!
//! Start and end times are wall-clock `HH:MM` strings. A slot starting between
//! midnight and [`crate::utils::SESSION_ROLLOVER`] belongs to the session of
//! the calendar date it is filed under, not to the following morning.

pub mod defaults;
pub mod populate;
pub mod queries;
pub mod reconcile;
pub mod reset;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bowl {
    Upper,
    Lower,
}

impl Bowl {
    pub fn as_str(self) -> &'static str {
        match self {
            Bowl::Upper => "upper",
            Bowl::Lower => "lower",
        }
    }
}

impl fmt::Display for Bowl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bowl {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Bowl::Upper),
            "lower" => Ok(Bowl::Lower),
            _ => Err(ScheduleError::validation(format!(
                "Invalid bowl {:?}. Must be \"upper\" or \"lower\"",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bowl_names_match_exactly() {
        assert_eq!("upper".parse::<Bowl>().unwrap(), Bowl::Upper);
        assert_eq!("lower".parse::<Bowl>().unwrap(), Bowl::Lower);
        for name in ["middle", "Lower", " upper ", "UPPER"].iter() {
            let err = name.parse::<Bowl>().unwrap_err();
            assert_eq!(err.kind(), "validation");
        }
    }
}
