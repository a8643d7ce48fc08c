//! Claim parser.
//!
//! Extracts the four assertions of a [`Claim`] from free text. Each pattern is
//! matched independently against the whole input, so their order and any
//! surrounding text do not matter. Parsing is all-or-nothing.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::error::FormatError;
use crate::model::{Claim, Count, CreationAssertion, OrderingAssertion, PositionAssertion};

// Model identifiers are the longest run of non-whitespace, so ids like
// "gpt-4o-2024-05-13" or "ft:gpt-3.5:org" survive intact.

static CUTOFF_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"before ([0-9]{1,2}) ([A-Za-z]+) ([0-9]{4})").expect("valid cutoff pattern")
});

static CREATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+) was created on ([0-9]{4}-[0-9]{2}-[0-9]{2})")
        .expect("valid creation pattern")
});

static POSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+) is located at index ([0-9]+)").expect("valid position pattern")
});

static ORDERING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\S+) was created ([0-9]+) models before (\S+)").expect("valid ordering pattern")
});

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a claim from free text.
///
/// Only the first match of each pattern is considered. If any pattern is
/// absent, or the first cutoff match is not a real date (unknown month,
/// impossible day), the whole parse fails with [`FormatError`]. Creation
/// dates, indices and gaps are kept as written and checked when scoring.
pub fn parse_claim(input: &str) -> Result<Claim, FormatError> {
    let cutoff = parse_cutoff(input);
    let creation = parse_creation(input);
    let position = parse_position(input);
    let ordering = parse_ordering(input);

    match (cutoff, creation, position, ordering) {
        (Some(cutoff), Some(creation), Some(position), Some(ordering)) => Ok(Claim {
            cutoff,
            creation,
            position,
            ordering,
        }),
        (cutoff, creation, position, ordering) => {
            tracing::debug!(
                cutoff = cutoff.is_some(),
                creation = creation.is_some(),
                position = position.is_some(),
                ordering = ordering.is_some(),
                "claim rejected"
            );
            Err(FormatError)
        }
    }
}

impl FromStr for Claim {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_claim(s)
    }
}

/// Parse a cutoff like "1 January 2024" (day, full month name, year).
///
/// Month names are matched case-insensitively.
pub fn parse_cutoff_date(text: &str) -> Result<NaiveDate, FormatError> {
    let mut parts = text.split_whitespace();
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(FormatError);
    };
    decode_day_month_year(day, month, year).ok_or(FormatError)
}

fn parse_cutoff(input: &str) -> Option<NaiveDate> {
    let caps = CUTOFF_PATTERN.captures(input)?;
    decode_day_month_year(&caps[1], &caps[2], &caps[3])
}

fn parse_creation(input: &str) -> Option<CreationAssertion> {
    let caps = CREATION_PATTERN.captures(input)?;
    Some(CreationAssertion {
        model: capture(&caps, 1),
        expected: capture(&caps, 2),
    })
}

fn parse_position(input: &str) -> Option<PositionAssertion> {
    let caps = POSITION_PATTERN.captures(input)?;
    Some(PositionAssertion {
        model: capture(&caps, 1),
        expected_index: caps[2].parse::<Count>().ok()?,
    })
}

fn parse_ordering(input: &str) -> Option<OrderingAssertion> {
    let caps = ORDERING_PATTERN.captures(input)?;
    Some(OrderingAssertion {
        model: capture(&caps, 1),
        gap: caps[2].parse::<Count>().ok()?,
        anchor: capture(&caps, 3),
    })
}

fn decode_day_month_year(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))?;
    NaiveDate::from_ymd_opt(year, month as u32 + 1, day)
}

fn capture(caps: &Captures<'_>, group: usize) -> String {
    caps.get(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
