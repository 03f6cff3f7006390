//! Host identity probes: user, hostname, OS, kernel, architecture, uptime

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fetch_common::{ProbeError, ProbeResult};
use sysinfo::System;

use crate::registry::{Probe, ProbeContext};
use crate::types::ProbeValue;

/// Login name from `USER`, then `LOGNAME`
pub struct UserProbe;

#[async_trait]
impl Probe for UserProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        ctx.env
            .non_empty("USER")
            .or_else(|| ctx.env.non_empty("LOGNAME"))
            .map(ProbeValue::Text)
            .ok_or_else(|| ProbeError::MissingEnv("USER".to_string()))
    }
}

pub struct HostnameProbe;

#[async_trait]
impl Probe for HostnameProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        System::host_name()
            .map(ProbeValue::Text)
            .ok_or_else(|| ProbeError::unavailable("hostname"))
    }
}

/// Pretty distribution name on Linux, `{family} {release}` elsewhere
pub struct OsProbe;

#[async_trait]
impl Probe for OsProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        if cfg!(target_os = "linux") {
            let content = std::fs::read_to_string(&ctx.settings.os_release_path)?;
            parse_os_release(&content)
                .map(ProbeValue::Text)
                .ok_or_else(|| ProbeError::parse("os-release has no NAME"))
        } else {
            let family = System::name().ok_or_else(|| ProbeError::unavailable("OS name"))?;
            let release = System::kernel_version().unwrap_or_default();
            Ok(ProbeValue::Text(format!("{} {}", family, release).trim().to_string()))
        }
    }
}

/// `PRETTY_NAME` from an os-release file, falling back to `NAME`
pub fn parse_os_release(content: &str) -> Option<String> {
    let field = |wanted: &str| {
        content.lines().find_map(|line| {
            let (key, value) = line.split_once('=')?;
            if key.trim() != wanted {
                return None;
            }
            let value = value.trim().trim_matches('"').trim_matches('\'').trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    };

    field("PRETTY_NAME").or_else(|| field("NAME"))
}

pub struct KernelProbe;

#[async_trait]
impl Probe for KernelProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        System::kernel_version()
            .map(ProbeValue::Text)
            .ok_or_else(|| ProbeError::unavailable("kernel version"))
    }
}

pub struct ArchitectureProbe;

#[async_trait]
impl Probe for ArchitectureProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        Ok(ProbeValue::text(std::env::consts::ARCH))
    }
}

/// Wall-clock time since boot
pub struct UptimeProbe;

#[async_trait]
impl Probe for UptimeProbe {
    async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let boot_secs = System::boot_time();
        if boot_secs == 0 {
            return Err(ProbeError::unavailable("boot time"));
        }
        let booted = i64::try_from(boot_secs)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or_else(|| ProbeError::parse(format!("boot time {} out of range", boot_secs)))?;

        Ok(ProbeValue::Text(format_uptime(Utc::now() - booted)))
    }
}

/// Render elapsed time as `H:MM:SS`, prefixed with `N day(s), ` once a day
/// has passed. Sub-second precision is truncated.
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let rest = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);

    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fetch_common::{MapEnv, ScriptedRunner};

    use crate::registry::ProbeSettings;

    fn ctx_with(env: MapEnv) -> ProbeContext {
        ProbeContext::new(Arc::new(ScriptedRunner::new()), Arc::new(env))
    }

    #[test]
    fn test_format_uptime_truncates_subseconds() {
        let elapsed = Duration::days(1)
            + Duration::hours(2)
            + Duration::minutes(3)
            + Duration::milliseconds(4_567);
        assert_eq!(format_uptime(elapsed), "1 day, 2:03:04");
    }

    #[test]
    fn test_format_uptime_without_days() {
        assert_eq!(format_uptime(Duration::seconds(59)), "0:00:59");
        assert_eq!(format_uptime(Duration::milliseconds(3_599_999)), "0:59:59");
    }

    #[test]
    fn test_format_uptime_plural_days() {
        let elapsed = Duration::days(12) + Duration::hours(23) + Duration::seconds(5);
        assert_eq!(format_uptime(elapsed), "12 days, 23:00:05");
    }

    #[test]
    fn test_format_uptime_negative_clamps() {
        assert_eq!(format_uptime(Duration::seconds(-30)), "0:00:00");
    }

    #[test]
    fn test_parse_os_release_prefers_pretty_name() {
        let content = r#"NAME="Ubuntu"
VERSION_ID="22.04"
PRETTY_NAME="Ubuntu 22.04.3 LTS"
ID=ubuntu
"#;
        assert_eq!(parse_os_release(content).as_deref(), Some("Ubuntu 22.04.3 LTS"));
    }

    #[test]
    fn test_parse_os_release_falls_back_to_name() {
        assert_eq!(
            parse_os_release("NAME=Gentoo\nID=gentoo\n").as_deref(),
            Some("Gentoo")
        );
        assert_eq!(parse_os_release("ID=void\n"), None);
        assert_eq!(parse_os_release("PRETTY_NAME=\"\"\n"), None);
    }

    #[tokio::test]
    async fn test_user_probe_prefers_user() {
        let env = MapEnv::new().with("USER", "ada").with("LOGNAME", "root");
        let value = UserProbe.collect(&ctx_with(env)).await.unwrap();
        assert_eq!(value.as_text(), Some("ada"));

        let env = MapEnv::new().with("LOGNAME", "grace");
        let value = UserProbe.collect(&ctx_with(env)).await.unwrap();
        assert_eq!(value.as_text(), Some("grace"));

        assert!(UserProbe.collect(&ctx_with(MapEnv::new())).await.is_err());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_os_probe_reads_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("os-release");
        std::fs::write(&path, "PRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n").unwrap();

        let ctx = ctx_with(MapEnv::new()).with_settings(ProbeSettings {
            os_release_path: path,
            ..ProbeSettings::default()
        });
        let value = OsProbe.collect(&ctx).await.unwrap();
        assert_eq!(value.as_text(), Some("Debian GNU/Linux 12 (bookworm)"));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_os_probe_missing_file_fails() {
        let ctx = ctx_with(MapEnv::new()).with_settings(ProbeSettings {
            os_release_path: "/nonexistent/os-release".into(),
            ..ProbeSettings::default()
        });
        assert!(matches!(OsProbe.collect(&ctx).await, Err(ProbeError::Io(_))));
    }

    #[tokio::test]
    async fn test_architecture_probe() {
        let value = ArchitectureProbe
            .collect(&ctx_with(MapEnv::new()))
            .await
            .unwrap();
        assert_eq!(value.as_text(), Some(std::env::consts::ARCH));
    }
}
