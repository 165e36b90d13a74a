//! Remaining-balance extraction, anchored on "is" / "remaining".

use once_cell::sync::Lazy;
use tracing::debug;

use super::units::{DataAmount, DisplaySite};
use super::{Pattern, compile};

/// Currently unused allowance. `None` means no clause was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemainingFields {
    /// Sum over every "is N minute" clause.
    pub minutes: Option<u64>,
    pub data: Option<String>,
    pub sms: Option<String>,
}

static SMS_REMAINING: Pattern = Lazy::new(|| compile(r"(?i)\bremaining\s+(\d+)\s*sms\b"));
static SMS_IS: Pattern = Lazy::new(|| compile(r"(?i)\bis\s+(\d+)\s*sms\b"));

static MINUTES: Pattern = Lazy::new(|| compile(r"(?i)\bis\s+(\d+)\s*min(?:ute)?s?\b"));

static DATA_VALUE_FIRST: Pattern =
    Lazy::new(|| compile(r"(?i)\b(?:remaining|is)\s+(\d+(?:\.\d+)?)\s*(MB|GB)\b"));
/// Unit then anchor, with no digits or full stops in between.
static DATA_UNIT_FIRST: Pattern = Lazy::new(|| {
    compile(r"(?i)(?:^|[\d\s])(MB|GB)\b[^\d.]{0,40}?\b(?:remaining|is)\s+(\d+(?:\.\d+)?)")
});

fn remaining_sms(text: &str) -> Option<String> {
    [&SMS_REMAINING, &SMS_IS]
        .into_iter()
        .find_map(|pattern| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn remaining_minutes(text: &str) -> Option<u64> {
    let pools: Vec<u64> = MINUTES
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .collect();

    if pools.len() > 1 {
        debug!("Summing {} remaining-minute pools", pools.len());
    }

    (!pools.is_empty()).then(|| pools.iter().fold(0u64, |acc, n| acc.saturating_add(*n)))
}

/// Words that, right after a value, make it a count of something other than data.
const OTHER_UNITS: [&str; 3] = ["min", "sms", "second"];

fn followed_by_other_unit(rest: &str) -> bool {
    let rest = rest.trim_start().to_lowercase();
    OTHER_UNITS.iter().any(|unit| rest.starts_with(unit))
}

fn remaining_data(text: &str) -> Option<String> {
    let amount = DATA_VALUE_FIRST
        .captures(text)
        .and_then(|caps| DataAmount::parse(caps.get(1)?.as_str(), caps.get(2)?.as_str()))
        .or_else(|| {
            DATA_UNIT_FIRST.captures_iter(text).find_map(|caps| {
                let value = caps.get(2)?;
                if followed_by_other_unit(&text[value.end()..]) {
                    return None;
                }
                DataAmount::parse(value.as_str(), caps.get(1)?.as_str())
            })
        })?;

    Some(amount.normalize(DisplaySite::Remaining))
}

/// Scan for remaining minutes, data and SMS independently of the package.
#[must_use]
pub fn extract_remaining(text: &str) -> RemainingFields {
    RemainingFields {
        minutes: remaining_minutes(text),
        data: remaining_data(text),
        sms: remaining_sms(text),
    }
}
