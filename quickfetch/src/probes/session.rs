//! Session probes read straight from the environment

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};

use crate::registry::{Probe, ProbeContext};
use crate::types::ProbeValue;

/// Variables consulted for the terminal name, most specific first
pub const TERMINAL_VARS: &[&str] = &["TERMINAL", "COLORTERM", "TERM"];

pub struct TerminalProbe;

#[async_trait]
impl Probe for TerminalProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        TERMINAL_VARS
            .iter()
            .find_map(|var| ctx.env.non_empty(var))
            .map(ProbeValue::Text)
            .ok_or_else(|| ProbeError::MissingEnv("TERM".to_string()))
    }
}

pub struct LocaleProbe;

#[async_trait]
impl Probe for LocaleProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        ctx.env.require("LANG").map(ProbeValue::Text)
    }
}
