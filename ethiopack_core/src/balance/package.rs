//! Original-package extraction.
//!
//! Pattern families are kept in [`RULES`] in precedence order. A rule runs only
//! while one of its slots is still empty, and it only fills empty slots, so the
//! first rule to match owns each field.

use once_cell::sync::Lazy;
use regex::Captures;
use tracing::debug;

use super::units::{DataAmount, DisplaySite};
use super::{Pattern, compile};

/// Purchased allowance as display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageFields {
    pub minutes: Option<String>,
    pub data: Option<String>,
    pub sms: Option<String>,
}

impl PackageFields {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.minutes.is_none() && self.data.is_none() && self.sms.is_none()
    }

    const fn is_open(&self, slot: Slot) -> bool {
        match slot {
            Slot::Minutes => self.minutes.is_none(),
            Slot::Data => self.data.is_none(),
            Slot::Sms => self.sms.is_none(),
        }
    }

    fn fill(&mut self, found: Self) {
        if self.minutes.is_none() {
            self.minutes = found.minutes;
        }
        if self.data.is_none() {
            self.data = found.data;
        }
        if self.sms.is_none() {
            self.sms = found.sms;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Minutes,
    Data,
    Sms,
}

struct PackageRule {
    name: &'static str,
    pattern: &'static Pattern,
    slots: &'static [Slot],
    apply: fn(&Captures<'_>) -> PackageFields,
}

/// `<N> Min + <M> SMS [plus <K> Min ... bonus]`
static BONUS_PACK: Pattern = Lazy::new(|| {
    compile(
        r"(?is)(\d+)\s*min(?:ute)?s?\s*\+\s*(\d+)\s*sms\b(?:.*?\bplus\s+(\d+)\s*min(?:ute)?s?\b.*?\bbonus)?",
    )
});

/// `<N> Min, <D> <MB|GB> and <M> [from telebirr] SMS`
static COMBO: Pattern = Lazy::new(|| {
    compile(
        r"(?i)(\d+)\s*min(?:ute)?s?\s*,\s*(\d+(?:\.\d+)?)\s*(MB|GB)\s+and\s+(\d+)\s*(?:[a-z]+\s+){0,3}?sms\b",
    )
});

/// `<N> Min(ute)(s) and <M> SMS`
static VOICE_SMS: Pattern =
    Lazy::new(|| compile(r"(?i)(\d+)\s*min(?:ute)?s?\s+and\s+(\d+)\s*sms\b"));

/// `(from|package|pack|bundle) ... <D> <GB|MB>`
static GENERIC_DATA: Pattern = Lazy::new(|| {
    compile(r"(?is)\b(?:from|package|pack|bundle)\b.*?(\d+(?:\.\d+)?)\s*(GB|MB)\b")
});

static RULES: [PackageRule; 4] = [
    PackageRule {
        name: "bonus_pack",
        pattern: &BONUS_PACK,
        slots: &[Slot::Minutes, Slot::Sms],
        apply: bonus_pack,
    },
    PackageRule {
        name: "combo",
        pattern: &COMBO,
        slots: &[Slot::Minutes, Slot::Data, Slot::Sms],
        apply: combo,
    },
    PackageRule {
        name: "voice_sms",
        pattern: &VOICE_SMS,
        slots: &[Slot::Minutes, Slot::Sms],
        apply: voice_sms,
    },
    PackageRule {
        name: "generic_data",
        pattern: &GENERIC_DATA,
        slots: &[Slot::Data],
        apply: generic_data,
    },
];

fn group<'t>(caps: &Captures<'t>, index: usize) -> Option<&'t str> {
    caps.get(index).map(|m| m.as_str())
}

fn package_data(caps: &Captures<'_>, value: usize, unit: usize) -> Option<String> {
    DataAmount::parse(group(caps, value)?, group(caps, unit)?)
        .map(|amount| amount.normalize(DisplaySite::Package))
}

/// Bonus minutes add to the base allotment.
fn bonus_pack(caps: &Captures<'_>) -> PackageFields {
    let base = group(caps, 1).and_then(|n| n.parse::<u64>().ok());
    let bonus = group(caps, 3).map_or(Some(0), |n| n.parse::<u64>().ok());
    let minutes = base
        .zip(bonus)
        .and_then(|(base, bonus)| base.checked_add(bonus));

    PackageFields {
        minutes: minutes.map(|total| total.to_string()),
        data: None,
        sms: group(caps, 2).map(str::to_string),
    }
}

fn combo(caps: &Captures<'_>) -> PackageFields {
    PackageFields {
        minutes: group(caps, 1).map(str::to_string),
        data: package_data(caps, 2, 3),
        sms: group(caps, 4).map(str::to_string),
    }
}

fn voice_sms(caps: &Captures<'_>) -> PackageFields {
    PackageFields {
        minutes: group(caps, 1).map(str::to_string),
        data: None,
        sms: group(caps, 2).map(str::to_string),
    }
}

fn generic_data(caps: &Captures<'_>) -> PackageFields {
    PackageFields {
        data: package_data(caps, 1, 2),
        ..PackageFields::default()
    }
}

/// Recover the purchased allowance, or `None` if no rule yields anything.
#[must_use]
pub fn extract_package(text: &str) -> Option<PackageFields> {
    let mut fields = PackageFields::default();

    for rule in &RULES {
        if !rule.slots.iter().any(|slot| fields.is_open(*slot)) {
            continue;
        }
        if let Some(caps) = rule.pattern.captures(text) {
            debug!("Package rule matched: {}", rule.name);
            fields.fill((rule.apply)(&caps));
        }
    }

    (!fields.is_empty()).then_some(fields)
}
