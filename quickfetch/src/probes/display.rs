//! Screen resolution probe

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};
use regex::Regex;

use crate::registry::{Probe, ProbeContext};
use crate::types::ProbeValue;

/// Current mode from `xrandr`, else the `dimensions:` line of `xdpyinfo`
pub struct ResolutionProbe;

#[async_trait]
impl Probe for ResolutionProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        match ctx.runner.run_ok("xrandr", &[]).await {
            Ok(stdout) => {
                if let Some(mode) = parse_xrandr_current_mode(&stdout) {
                    return Ok(ProbeValue::Text(mode));
                }
                tracing::debug!("xrandr listed no active mode");
            }
            Err(e) => tracing::debug!(error = %e, "xrandr unavailable"),
        }

        let stdout = ctx.runner.run_ok("xdpyinfo", &[]).await?;
        parse_xdpyinfo_dimensions(&stdout)
            .map(ProbeValue::Text)
            .ok_or_else(|| ProbeError::parse("xdpyinfo has no dimensions line"))
    }
}

/// First token of the first mode line flagged with `*` (the active mode)
pub fn parse_xrandr_current_mode(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .filter(|line| line.starts_with(char::is_whitespace))
        .find(|line| line.contains('*'))
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string)
}

/// `WIDTHxHEIGHT` from `dimensions:    1920x1080 pixels (508x285 millimeters)`
pub fn parse_xdpyinfo_dimensions(stdout: &str) -> Option<String> {
    let re = Regex::new(r"dimensions:\s+(\d+x\d+)").ok()?;
    re.captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
