//! Probe values and fallback sentinels

use std::fmt;

use super::{DiskUsageTable, PackageTally};

/// Text shown when a probe could not obtain a value
pub const UNKNOWN: &str = "Unknown";

/// Battery probe fallback
pub const NO_BATTERY: &str = "No Battery";

/// GPU probe fallback
pub const NO_GPU: &str = "No GPU found";

/// Count recorded for a package manager that is missing or failed. Such
/// managers are left out of a tally rather than shown.
pub const NO_COUNT: u64 = 0;

/// Bytes per GiB
pub const GIB: f64 = (1u64 << 30) as f64;

/// A used/total pair of byte quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteUsage {
    pub used: u64,
    pub total: u64,
}

impl ByteUsage {
    pub fn new(used: u64, total: u64) -> Self {
        Self { used, total }
    }
}

/// Render a byte count as GiB with two decimals, e.g. `16.00GiB`
pub fn format_gib(bytes: u64) -> String {
    format!("{:.2}GiB", bytes as f64 / GIB)
}

impl fmt::Display for ByteUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", format_gib(self.used), format_gib(self.total))
    }
}

/// What a probe produced, either real data or its fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeValue {
    Text(String),
    Bytes(ByteUsage),
    Tally(PackageTally),
    Disks(DiskUsageTable),
}

impl ProbeValue {
    pub fn text(value: impl Into<String>) -> Self {
        ProbeValue::Text(value.into())
    }

    /// The text-unavailable sentinel
    pub fn unknown() -> Self {
        ProbeValue::Text(UNKNOWN.to_string())
    }

    /// The table-empty sentinel for package counts
    pub fn empty_tally() -> Self {
        ProbeValue::Tally(PackageTally::new())
    }

    /// The table-empty sentinel for disk usage
    pub fn empty_disks() -> Self {
        ProbeValue::Disks(DiskUsageTable::new())
    }

    /// True for either table-empty sentinel
    pub fn is_empty_table(&self) -> bool {
        match self {
            ProbeValue::Tally(tally) => tally.is_empty(),
            ProbeValue::Disks(disks) => disks.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ProbeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.as_text() == Some(UNKNOWN)
    }
}

impl fmt::Display for ProbeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeValue::Text(text) => f.write_str(text),
            ProbeValue::Bytes(usage) => usage.fmt(f),
            ProbeValue::Tally(tally) => write!(f, "{} package managers", tally.len()),
            ProbeValue::Disks(disks) => write!(f, "{} disks", disks.len()),
        }
    }
}
