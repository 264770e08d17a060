//! Respondent input: one forced-choice pick per `Selection`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of statements in the instrument (ids are 1-based).
pub const STATEMENT_COUNT: u16 = 96;

/// Statement identifier as received from the caller.
///
/// Range is not enforced at construction; input validation reports
/// out-of-range ids instead of silently coercing them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementId(pub u16);

impl StatementId {
    #[inline]
    pub fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn is_in_range(self) -> bool {
        (1..=STATEMENT_COUNT).contains(&self.0)
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for StatementId {
    fn from(v: u16) -> Self {
        StatementId(v)
    }
}

/// Which end of a forced-choice block the respondent picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Polarity {
    #[serde(rename = "most")]
    Most,
    #[serde(rename = "least")]
    Least,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Polarity::Most => "most",
            Polarity::Least => "least",
        })
    }
}

/// One respondent answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub statement_id: StatementId,
    pub polarity: Polarity,
}

impl Selection {
    pub fn most(id: u16) -> Self {
        Selection { statement_id: StatementId(id), polarity: Polarity::Most }
    }

    pub fn least(id: u16) -> Self {
        Selection { statement_id: StatementId(id), polarity: Polarity::Least }
    }
}
