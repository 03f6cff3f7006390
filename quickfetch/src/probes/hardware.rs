//! Hardware probes: CPU, GPU, memory, swap, battery

use std::path::Path;

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};
use sysinfo::System;

use crate::registry::{Probe, ProbeContext};
use crate::types::{ByteUsage, ProbeValue, NO_BATTERY, NO_GPU};

/// Privileged hardware lister used when no GPU library answers
const LSHW_DISPLAY: &str = "sudo lshw -C display 2>/dev/null";

/// CPU brand string plus logical core count
pub struct CpuProbe;

#[async_trait]
impl Probe for CpuProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let mut sys = System::new();
        sys.refresh_cpu_all();

        let cpus = sys.cpus();
        let brand = cpus
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .ok_or_else(|| ProbeError::unavailable("CPU brand"))?;

        Ok(ProbeValue::Text(format!("{} ({} cores)", brand, cpus.len())))
    }
}

/// GPU names, comma-joined.
///
/// Tries the NVIDIA management tool first, then `product:` lines from lshw.
pub struct GpuProbe;

#[async_trait]
impl Probe for GpuProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let mut names = match ctx
            .runner
            .run_ok("nvidia-smi", &["--query-gpu=name", "--format=csv,noheader"])
            .await
        {
            Ok(stdout) => parse_nvidia_smi(&stdout),
            Err(e) => {
                tracing::debug!(error = %e, "GPU enumeration unavailable");
                Vec::new()
            }
        };

        if names.is_empty() {
            match ctx.runner.shell_ok(LSHW_DISPLAY).await {
                Ok(stdout) => names = parse_lshw_products(&stdout),
                Err(e) => tracing::debug!(error = %e, "lshw fallback failed"),
            }
        }

        if names.is_empty() {
            return Err(ProbeError::unavailable("no GPU reported"));
        }
        Ok(ProbeValue::Text(names.join(", ")))
    }

    fn fallback(&self) -> ProbeValue {
        ProbeValue::text(NO_GPU)
    }
}

/// One GPU name per non-empty line of `nvidia-smi --format=csv,noheader`
pub fn parse_nvidia_smi(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Values of every `product:` line in `lshw -C display` output
pub fn parse_lshw_products(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| line.split_once("product:"))
        .map(|(_, product)| product.trim().to_string())
        .filter(|product| !product.is_empty())
        .collect()
}

/// Physical memory (used, total)
pub struct MemoryProbe;

#[async_trait]
impl Probe for MemoryProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        if total == 0 {
            return Err(ProbeError::unavailable("memory totals"));
        }
        Ok(ProbeValue::Bytes(ByteUsage::new(sys.used_memory(), total)))
    }
}

/// Swap (used, total). No swap configured counts as unavailable.
pub struct SwapProbe;

#[async_trait]
impl Probe for SwapProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_swap();
        if total == 0 {
            return Err(ProbeError::unavailable("no swap configured"));
        }
        Ok(ProbeValue::Bytes(ByteUsage::new(sys.used_swap(), total)))
    }
}

/// Charge percent and status of the first battery
pub struct BatteryProbe;

#[async_trait]
impl Probe for BatteryProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        read_battery(&ctx.settings.power_supply_dir).map(ProbeValue::Text)
    }

    fn fallback(&self) -> ProbeValue {
        ProbeValue::text(NO_BATTERY)
    }
}

/// Scan a power supply directory for `BAT*` entries and render the first
/// readable one as `87% (Discharging)`
pub fn read_battery(power_supply_dir: &Path) -> ProbeResult<String> {
    let mut batteries: Vec<_> = std::fs::read_dir(power_supply_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("BAT"))
        })
        .collect();
    batteries.sort();

    for path in batteries {
        let capacity = std::fs::read_to_string(path.join("capacity"));
        let status = std::fs::read_to_string(path.join("status"));
        if let (Ok(capacity), Ok(status)) = (capacity, status) {
            let percent: u8 = capacity
                .trim()
                .parse()
                .map_err(|_| ProbeError::parse(format!("battery capacity {:?}", capacity.trim())))?;
            return Ok(format!("{}% ({})", percent, status.trim()));
        }
    }

    Err(ProbeError::unavailable("no battery sensor"))
}
