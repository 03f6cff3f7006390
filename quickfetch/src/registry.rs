//! Probe registry
//!
//! Holds the fixed, ordered list of probes and runs them uniformly. A probe
//! either yields a value or fails; failures are swapped for the probe's
//! declared fallback so one broken probe never costs the rest of the report.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fetch_common::{CommandRunner, Environment, ProbeResult};
use thiserror::Error;

use crate::types::ProbeValue;

// ============================================================================
// Probe Trait
// ============================================================================

/// A single information-gathering operation
#[async_trait]
pub trait Probe: Send + Sync {
    /// Gather the value. Any error is replaced by [`fallback`](Self::fallback).
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue>;

    /// Value recorded when [`collect`](Self::collect) fails
    fn fallback(&self) -> ProbeValue {
        ProbeValue::unknown()
    }
}

/// Host-specific knobs for probes
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Interface searched by the local IP probe when the hostname resolves
    /// to loopback. There is no sensible default.
    pub fallback_interface: Option<String>,
    /// os-release file read by the OS probe
    pub os_release_path: PathBuf,
    /// Directory holding `BAT*` power supply entries
    pub power_supply_dir: PathBuf,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            fallback_interface: None,
            os_release_path: PathBuf::from("/etc/os-release"),
            power_supply_dir: PathBuf::from("/sys/class/power_supply"),
        }
    }
}

/// Everything a probe may consult
#[derive(Clone)]
pub struct ProbeContext {
    pub runner: Arc<dyn CommandRunner>,
    pub env: Arc<dyn Environment>,
    pub settings: ProbeSettings,
}

impl ProbeContext {
    pub fn new(runner: Arc<dyn CommandRunner>, env: Arc<dyn Environment>) -> Self {
        Self {
            runner,
            env,
            settings: ProbeSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ProbeSettings) -> Self {
        self.settings = settings;
        self
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Ordered key -> value results of one registry run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<(String, ProbeValue)>,
}

impl Snapshot {
    pub fn get(&self, key: &str) -> Option<&ProbeValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Text value for `key`, or `"Unknown"` if absent or not text
    pub fn text(&self, key: &str) -> &str {
        self.get(key)
            .and_then(ProbeValue::as_text)
            .unwrap_or(crate::types::UNKNOWN)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ProbeValue)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, ProbeValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("probe already registered: {0}")]
    DuplicateKey(String),
}

/// Fixed, ordered set of named probes
pub struct ProbeRegistry {
    ctx: ProbeContext,
    probes: Vec<(String, Box<dyn Probe>)>,
}

impl ProbeRegistry {
    pub fn new(ctx: ProbeContext) -> Self {
        Self {
            ctx,
            probes: Vec::new(),
        }
    }

    /// Add a probe under a unique key
    pub fn register(
        &mut self,
        key: impl Into<String>,
        probe: impl Probe + 'static,
    ) -> Result<(), RegistryError> {
        let key = key.into();
        if self.probes.iter().any(|(existing, _)| *existing == key) {
            return Err(RegistryError::DuplicateKey(key));
        }
        self.probes.push((key, Box::new(probe)));
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.probes.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Run every probe once, in registration order, one at a time.
    ///
    /// Never fails: a probe error is logged and replaced by its fallback.
    pub async fn run_all(&self) -> Snapshot {
        let mut entries = Vec::with_capacity(self.probes.len());

        for (key, probe) in &self.probes {
            let value = match probe.collect(&self.ctx).await {
                Ok(value) => {
                    tracing::debug!(probe = %key, %value, "probe succeeded");
                    value
                }
                Err(e) => {
                    tracing::debug!(probe = %key, error = %e, "probe failed, using fallback");
                    probe.fallback()
                }
            };
            entries.push((key.clone(), value));
        }

        Snapshot { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fetch_common::{MapEnv, ProbeError, ScriptedRunner};

    use crate::types::{NO_BATTERY, UNKNOWN};

    fn ctx() -> ProbeContext {
        ProbeContext::new(Arc::new(ScriptedRunner::new()), Arc::new(MapEnv::new()))
    }

    struct Fixed(&'static str);

    #[async_trait]
    impl Probe for Fixed {
        async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
            Ok(ProbeValue::text(self.0))
        }
    }

    struct Broken;

    #[async_trait]
    impl Probe for Broken {
        async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
            Err(ProbeError::parse("garbage"))
        }

        fn fallback(&self) -> ProbeValue {
            ProbeValue::text(NO_BATTERY)
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Probe for Counting {
        async fn collect(&self, _ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(ProbeError::unavailable("never works"))
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut registry = ProbeRegistry::new(ctx());
        registry.register("os", Fixed("Arch Linux")).unwrap();

        let err = registry.register("os", Fixed("Debian")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("os".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_and_continues() {
        let mut registry = ProbeRegistry::new(ctx());
        registry.register("kernel", Fixed("6.8.0")).unwrap();
        registry.register("battery", Broken).unwrap();
        registry.register("locale", Fixed("en_US.UTF-8")).unwrap();

        let snapshot = registry.run_all().await;

        assert_eq!(snapshot.text("kernel"), "6.8.0");
        assert_eq!(snapshot.text("battery"), NO_BATTERY);
        assert_eq!(snapshot.text("locale"), "en_US.UTF-8");
    }

    #[tokio::test]
    async fn test_registration_order_preserved() {
        let mut registry = ProbeRegistry::new(ctx());
        for key in ["uptime", "cpu", "os", "gpu"] {
            registry.register(key, Fixed("x")).unwrap();
        }

        let snapshot = registry.run_all().await;
        let keys: Vec<_> = snapshot.keys().collect();
        assert_eq!(keys, vec!["uptime", "cpu", "os", "gpu"]);
    }

    #[tokio::test]
    async fn test_each_probe_runs_exactly_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut registry = ProbeRegistry::new(ctx());
        registry.register("flaky", Counting(hits.clone())).unwrap();

        let snapshot = registry.run_all().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(snapshot.text("flaky"), UNKNOWN);
    }

    #[test]
    fn test_snapshot_text_defaults_to_unknown() {
        let snapshot: Snapshot = vec![("os".to_string(), ProbeValue::text("Fedora Linux 40"))]
            .into_iter()
            .collect();
        assert_eq!(snapshot.text("os"), "Fedora Linux 40");
        assert_eq!(snapshot.text("gpu"), UNKNOWN);
    }
}
