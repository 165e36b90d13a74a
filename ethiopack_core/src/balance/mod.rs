//! Balance message extraction engine.
//!
//! Turns a free-form telecom balance SMS into a [`BalanceRecord`] and renders
//! it for display. Every function here is pure: no I/O, no shared state.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

mod classify;
mod format;
mod package;
mod record;
mod remaining;
mod units;

pub use classify::{KEYWORDS, classify};
pub use format::Formatter;
pub use package::{PackageFields, extract_package};
pub use record::{BalanceRecord, Field, NOT_AVAILABLE, ZERO};
pub use remaining::{RemainingFields, extract_remaining};
pub use units::{DataAmount, DataUnit, DisplaySite};

/// Result of running the engine over one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rejected by the classifier, or no package pattern matched.
    NotUnderstood,
    /// A package was recognized but some fields fell back to sentinels.
    Partial(BalanceRecord),
    /// Every field was recovered from the text.
    Full(BalanceRecord),
}

impl Outcome {
    #[must_use]
    pub const fn record(&self) -> Option<&BalanceRecord> {
        match self {
            Self::NotUnderstood => None,
            Self::Partial(record) | Self::Full(record) => Some(record),
        }
    }
}

/// Classify, then run both extractors over the same input.
#[must_use]
pub fn extract(text: &str) -> Outcome {
    if !classify(text) {
        debug!("Classifier rejected message ({} chars)", text.len());
        return Outcome::NotUnderstood;
    }

    let Some(package) = extract_package(text) else {
        debug!("No package pattern matched");
        return Outcome::NotUnderstood;
    };

    let remaining = extract_remaining(text);
    let record = BalanceRecord::assemble(package, remaining);

    if record.is_complete() {
        Outcome::Full(record)
    } else {
        Outcome::Partial(record)
    }
}

/// Extract and render in one step.
#[must_use]
pub fn summarize_text(text: &str, formatter: &Formatter) -> String {
    formatter.render(&extract(text))
}

/// Compile a pattern that is a literal in this crate.
#[expect(clippy::expect_used, reason = "patterns are constants covered by tests")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("balance pattern must compile")
}

type Pattern = Lazy<Regex>;
