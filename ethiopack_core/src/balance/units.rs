//! MB/GB normalization.
//!
//! Two call sites use two different GB thresholds: package allowances switch
//! to GB from 100 MB, remaining balances from 1024 MB.

use std::fmt;

const MB_PER_GB: f64 = 1024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUnit {
    Mb,
    Gb,
}

impl DataUnit {
    /// Parse `MB`/`GB` in any letter case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MB" => Some(Self::Mb),
            "GB" => Some(Self::Gb),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mb => "MB",
            Self::Gb => "GB",
        }
    }
}

impl fmt::Display for DataUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a data amount is going to be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySite {
    /// Purchased allowance, rendered compactly (`1.1GB`).
    Package,
    /// Remaining balance, rendered with a space (`2.00 GB`, `500 MB`).
    Remaining,
}

impl DisplaySite {
    /// Smallest MB value shown in GB at this site.
    #[must_use]
    pub const fn gb_threshold_mb(self) -> f64 {
        match self {
            Self::Package => 100.0,
            Self::Remaining => MB_PER_GB,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataAmount {
    pub value: f64,
    pub unit: DataUnit,
}

impl DataAmount {
    #[must_use]
    pub const fn new(value: f64, unit: DataUnit) -> Self {
        Self { value, unit }
    }

    /// Build from the captured number and unit text of a pattern match.
    #[must_use]
    pub fn parse(value: &str, unit: &str) -> Option<Self> {
        let value = value.parse::<f64>().ok()?;
        let unit = DataUnit::parse(unit)?;
        value.is_finite().then_some(Self { value, unit })
    }

    /// Render for display, converting MB to GB past the site's threshold.
    #[must_use]
    pub fn normalize(self, site: DisplaySite) -> String {
        let to_gb = self.unit == DataUnit::Mb && self.value >= site.gb_threshold_mb();

        match (site, to_gb, self.unit) {
            (DisplaySite::Package, true, _) => format!("{:.2}GB", self.value / MB_PER_GB),
            (DisplaySite::Package, false, unit) => format!("{}{unit}", self.value),
            (DisplaySite::Remaining, true, _) => format!("{:.2} GB", self.value / MB_PER_GB),
            (DisplaySite::Remaining, false, DataUnit::Mb) => format!("{:.0} MB", self.value),
            (DisplaySite::Remaining, false, DataUnit::Gb) => format!("{} GB", self.value),
        }
    }
}
