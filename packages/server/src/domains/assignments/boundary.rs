//! Interval containment policy for assignment history.
//!
//! An assignment row covers `[from_date, to_date]`. Whether a stint that ends
//! (or starts) exactly on the query date counts as "in the department on that
//! date" is a policy choice, made here rather than left to whichever comparison
//! operator a query happens to use.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// `from_date <= date <= to_date`; both endpoints count.
    #[default]
    Closed,
    /// `from_date <= date < to_date`; the end date is the first day outside.
    HalfOpen,
}

impl BoundaryPolicy {
    pub fn contains(self, from_date: NaiveDate, to_date: NaiveDate, date: NaiveDate) -> bool {
        match self {
            BoundaryPolicy::Closed => from_date <= date && date <= to_date,
            BoundaryPolicy::HalfOpen => from_date <= date && date < to_date,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoundaryPolicy::Closed => "closed",
            BoundaryPolicy::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "closed" => Ok(BoundaryPolicy::Closed),
            "half_open" | "half-open" => Ok(BoundaryPolicy::HalfOpen),
            other => Err(format!(
                "unsupported boundary policy `{other}`; expected closed|half_open"
            )),
        }
    }
}
