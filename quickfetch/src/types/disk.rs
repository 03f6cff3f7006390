//! Disk usage per mount point

use super::ByteUsage;

/// Mount points under this prefix are snap package loop mounts, never shown
pub const RESERVED_MOUNT_PREFIX: &str = "/snap";

/// Ordered mount point -> used/total bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskUsageTable {
    entries: Vec<(String, ByteUsage)>,
}

impl DiskUsageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mount point. Returns false (and stores nothing) for reserved
    /// mount points.
    pub fn insert(&mut self, mount_point: impl Into<String>, usage: ByteUsage) -> bool {
        let mount_point = mount_point.into();
        if mount_point.starts_with(RESERVED_MOUNT_PREFIX) {
            return false;
        }
        self.entries.push((mount_point, usage));
        true
    }

    pub fn get(&self, mount_point: &str) -> Option<ByteUsage> {
        self.entries
            .iter()
            .find(|(mount, _)| mount == mount_point)
            .map(|(_, usage)| *usage)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ByteUsage)> {
        self.entries.iter().map(|(mount, usage)| (mount.as_str(), *usage))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
