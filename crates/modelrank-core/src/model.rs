//! Core data model types for modelrank.
//!
//! A [`Claim`] is graded against a [`RankedCatalog`], producing a
//! [`ScoreResult`]. All of these are request-scoped values.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Highest total a claim can score.
pub const MAX_SCORE: u32 = 7;

/// The four assertions extracted from one input string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Only catalog records created strictly before this date are ranked.
    pub cutoff: NaiveDate,
    /// "`<model>` was created on `<date>`".
    pub creation: CreationAssertion,
    /// "`<model>` is located at index `<n>`".
    pub position: PositionAssertion,
    /// "`<model>` was created `<n>` models before `<anchor>`".
    pub ordering: OrderingAssertion,
}

/// Claims that a model was created on a given UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationAssertion {
    pub model: String,
    /// The date as written, `YYYY-MM-DD`. It need not be a real calendar
    /// date; an impossible one simply never matches.
    pub expected: String,
}

impl CreationAssertion {
    /// The claimed date, if it names a real calendar day.
    pub fn expected_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.expected, "%Y-%m-%d").ok()
    }
}

/// Claims that a model sits at a given 0-based index of the ranked catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAssertion {
    pub model: String,
    pub expected_index: Count,
}

/// Claims how many records separate two models in newest-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingAssertion {
    /// The model said to be created earlier.
    pub model: String,
    /// Number of records claimed to sit between the two models.
    pub gap: Count,
    /// The model the gap is measured from.
    pub anchor: String,
}

/// A non-negative integer as written in a claim.
///
/// Unbounded: a claim may name an index or gap larger than any machine
/// integer, which then never matches a catalog position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Count {
    /// ASCII digits without leading zeros ("0" for zero).
    digits: String,
}

impl Count {
    /// The value as an index, or `None` if it exceeds `usize`.
    pub fn to_usize(&self) -> Option<usize> {
        self.digits.parse().ok()
    }

    /// The value as a signed gap, or `None` if it exceeds `i64`.
    pub fn to_i64(&self) -> Option<i64> {
        self.digits.parse().ok()
    }
}

impl FromStr for Count {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FormatError);
        }
        let trimmed = s.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self {
            digits: digits.to_string(),
        })
    }
}

impl From<u64> for Count {
    fn from(value: u64) -> Self {
        Self {
            digits: value.to_string(),
        }
    }
}

impl TryFrom<String> for Count {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Count> for String {
    fn from(value: Count) -> Self {
        value.digits
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// One entry from a model catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Opaque model identifier, unique within one catalog snapshot.
    pub id: String,
    /// Creation time in seconds since the Unix epoch, UTC.
    pub created: i64,
}

impl CatalogRecord {
    pub fn new(id: impl Into<String>, created: i64) -> Self {
        Self {
            id: id.into(),
            created,
        }
    }

    /// Creation time as a UTC instant, or `None` if out of chrono's range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }

    /// Creation time as a UTC calendar date, ignoring time of day.
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at().map(|dt| dt.date_naive())
    }
}

/// Catalog records ordered newest first.
///
/// Built fresh for every request and never mutated afterwards. Records that
/// share a timestamp keep the order they had in the source listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedCatalog {
    records: Vec<CatalogRecord>,
}

impl RankedCatalog {
    /// Keep records created strictly before midnight UTC on `cutoff`, then rank them.
    pub fn build(records: impl IntoIterator<Item = CatalogRecord>, cutoff: NaiveDate) -> Self {
        let boundary = cutoff_timestamp(cutoff);
        Self::rank(records.into_iter().filter(|r| r.created < boundary))
    }

    /// Rank records newest first without filtering.
    pub fn rank(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut records: Vec<CatalogRecord> = records.into_iter().collect();
        // sort_by is stable, so equal timestamps stay in listing order
        records.sort_by(|a, b| b.created.cmp(&a.created));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogRecord> {
        self.records.get(index)
    }

    /// Index of the first record with this id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn find(&self, id: &str) -> Option<&CatalogRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RankedCatalog {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Epoch seconds of midnight UTC at the start of `date`.
pub fn cutoff_timestamp(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// The three scoring rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    /// Assertion A: creation date.
    Creation,
    /// Assertion B: positional index.
    Position,
    /// Assertion C/D: relative ordering.
    Ordering,
}

impl Rule {
    /// Points awarded when the rule holds.
    pub fn weight(self) -> u32 {
        match self {
            Rule::Creation => 4,
            Rule::Position => 2,
            Rule::Ordering => 1,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Creation => write!(f, "creation"),
            Rule::Position => write!(f, "position"),
            Rule::Ordering => write!(f, "ordering"),
        }
    }
}

/// The result of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: Rule,
    /// Either `rule.weight()` or 0.
    pub points: u32,
    /// Human-readable justification, one trace line.
    pub detail: String,
}

impl RuleOutcome {
    pub(crate) fn awarded(rule: Rule, detail: String) -> Self {
        Self {
            rule,
            points: rule.weight(),
            detail,
        }
    }

    pub(crate) fn withheld(rule: Rule, detail: String) -> Self {
        Self {
            rule,
            points: 0,
            detail,
        }
    }

    pub fn passed(&self) -> bool {
        self.points > 0
    }
}

/// Total score plus one outcome per rule, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: u32,
    pub outcomes: Vec<RuleOutcome>,
}

impl ScoreResult {
    pub fn from_outcomes(outcomes: Vec<RuleOutcome>) -> Self {
        let total = outcomes.iter().map(|o| o.points).sum();
        Self { total, outcomes }
    }

    /// The justification lines, one per rule.
    pub fn trace(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.detail.as_str()).collect()
    }
}
