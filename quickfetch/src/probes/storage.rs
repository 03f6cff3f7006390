//! Disk usage probe

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};
use sysinfo::Disks;

use crate::registry::{Probe, ProbeContext};
use crate::types::{ByteUsage, DiskUsageTable, ProbeValue};

/// Used/total bytes for every mounted filesystem except snap loop mounts
pub struct DiskUsageProbe;

#[async_trait]
impl Probe for DiskUsageProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let disks = Disks::new_with_refreshed_list();
        let table = build_table(disks.iter().map(|disk| {
            (
                disk.mount_point().to_string_lossy().into_owned(),
                disk.total_space(),
                disk.available_space(),
            )
        }));

        if table.is_empty() {
            return Err(ProbeError::unavailable("no mounted disks"));
        }
        Ok(ProbeValue::Disks(table))
    }

    fn fallback(&self) -> ProbeValue {
        ProbeValue::empty_disks()
    }
}

/// Build the table from `(mount point, total, available)` rows
pub fn build_table(rows: impl IntoIterator<Item = (String, u64, u64)>) -> DiskUsageTable {
    let mut table = DiskUsageTable::new();
    for (mount_point, total, available) in rows {
        let usage = ByteUsage::new(total.saturating_sub(available), total);
        if !table.insert(mount_point.as_str(), usage) {
            tracing::trace!(mount = %mount_point, "skipping reserved mount point");
        }
    }
    table
}
