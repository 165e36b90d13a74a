use std::fmt;

use super::package::PackageFields;
use super::remaining::RemainingFields;

/// Placeholder for a value that could not be read.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a count that could not be read.
pub const ZERO: &str = "0";

/// Data shown when a package has data but no remaining-data clause.
const EXHAUSTED_DATA: &str = "0 MB";

/// One display field: either recovered from the text or a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Found(String),
    Missing(&'static str),
}

impl Field {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(value) => value,
            Self::Missing(sentinel) => sentinel,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    fn or_missing(value: Option<String>, sentinel: &'static str) -> Self {
        value.map_or(Self::Missing(sentinel), Self::Found)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Original package and remaining balance extracted from one message.
///
/// Every field is always present; unreadable ones hold a sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRecord {
    pub original_minutes: Field,
    pub original_data: Field,
    pub original_sms: Field,
    pub remaining_minutes: Field,
    pub remaining_data: Field,
    pub remaining_sms: Field,
}

impl Default for BalanceRecord {
    fn default() -> Self {
        Self {
            original_minutes: Field::Missing(NOT_AVAILABLE),
            original_data: Field::Missing(NOT_AVAILABLE),
            original_sms: Field::Missing(NOT_AVAILABLE),
            remaining_minutes: Field::Missing(ZERO),
            remaining_data: Field::Missing(NOT_AVAILABLE),
            remaining_sms: Field::Missing(ZERO),
        }
    }
}

impl BalanceRecord {
    /// Combine the two extractor results, filling sentinels for gaps.
    #[must_use]
    pub fn assemble(package: PackageFields, remaining: RemainingFields) -> Self {
        let has_package_data = package.data.is_some();

        let remaining_data = match remaining.data {
            Some(data) => Field::Found(data),
            None if has_package_data => Field::Found(EXHAUSTED_DATA.to_string()),
            None => Field::Missing(NOT_AVAILABLE),
        };

        Self {
            original_minutes: Field::or_missing(package.minutes, NOT_AVAILABLE),
            original_data: Field::or_missing(package.data, NOT_AVAILABLE),
            original_sms: Field::or_missing(package.sms, NOT_AVAILABLE),
            remaining_minutes: Field::or_missing(
                remaining.minutes.map(|total| total.to_string()),
                ZERO,
            ),
            remaining_data,
            remaining_sms: Field::or_missing(remaining.sms, ZERO),
        }
    }

    /// True when every field was recovered from the text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|field| field.is_found())
    }

    #[must_use]
    pub const fn fields(&self) -> [&Field; 6] {
        [
            &self.original_minutes,
            &self.original_data,
            &self.original_sms,
            &self.remaining_minutes,
            &self.remaining_data,
            &self.remaining_sms,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_sentinels() {
        let record = BalanceRecord::default();
        assert!(record.fields().iter().all(|f| !f.is_found()));
        assert_eq!(record.original_data.as_str(), "N/A");
        assert_eq!(record.remaining_minutes.as_str(), "0");
    }

    #[test]
    fn missing_remaining_data_means_exhausted_when_package_has_data() {
        let package = PackageFields {
            minutes: Some("100".into()),
            data: Some("2GB".into()),
            sms: None,
        };
        let record = BalanceRecord::assemble(package, RemainingFields::default());

        assert_eq!(record.remaining_data, Field::Found("0 MB".into()));
        assert_eq!(record.original_sms, Field::Missing(NOT_AVAILABLE));
        assert!(!record.is_complete());
    }

    #[test]
    fn missing_remaining_data_without_package_data_is_not_available() {
        let package = PackageFields {
            minutes: Some("100".into()),
            data: None,
            sms: Some("20".into()),
        };
        let record = BalanceRecord::assemble(package, RemainingFields::default());

        assert_eq!(record.remaining_data, Field::Missing(NOT_AVAILABLE));
    }
}
