//! Installed package counts

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};

use crate::registry::{Probe, ProbeContext};
use crate::types::{PackageTally, ProbeValue};

/// Known package managers and the pipeline that counts their packages
pub const PACKAGE_MANAGERS: &[(&str, &str)] = &[
    ("dpkg", "dpkg-query -f '.\\n' -W 2>/dev/null | wc -l"),
    ("apt", "apt list --installed 2>/dev/null | grep -c '\\[installed'"),
    ("rpm", "rpm -qa 2>/dev/null | wc -l"),
    ("pacman", "pacman -Q 2>/dev/null | wc -l"),
    ("dnf", "dnf list installed 2>/dev/null | wc -l"),
    ("snap", "snap list 2>/dev/null | wc -l"),
    ("flatpak", "flatpak list 2>/dev/null | wc -l"),
];

/// Per-manager installed package counts. Managers that are missing, fail, or
/// report zero are left out entirely.
pub struct PackageManagerProbe;

#[async_trait]
impl Probe for PackageManagerProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let mut tally = PackageTally::new();

        for &(manager, script) in PACKAGE_MANAGERS {
            let count = ctx
                .runner
                .shell_ok(script)
                .await
                .and_then(|stdout| parse_count(&stdout));
            match count {
                Ok(count) => tally.insert(manager, count),
                Err(e) => tracing::debug!(manager, error = %e, "skipping package manager"),
            }
        }

        Ok(ProbeValue::Tally(tally))
    }

    fn fallback(&self) -> ProbeValue {
        ProbeValue::empty_tally()
    }
}

/// Parse the single integer printed by `wc -l`
pub fn parse_count(stdout: &str) -> ProbeResult<u64> {
    let trimmed = stdout.trim();
    trimmed
        .parse()
        .map_err(|_| ProbeError::parse(format!("not a count: {:?}", trimmed)))
}
