//! Environment variable access
//!
//! Probes read session variables (`DESKTOP_SESSION`, `TERM`, ...) through
//! [`Environment`] so tests can supply a fixed set instead of the real one.

use std::collections::HashMap;

use crate::error::{ProbeError, ProbeResult};

pub trait Environment: Send + Sync {
    /// Raw lookup
    fn var(&self, key: &str) -> Option<String>;

    /// Lookup that treats an empty value as unset
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.trim().is_empty())
    }

    /// Lookup that fails with [`ProbeError::MissingEnv`] when unset or empty
    fn require(&self, key: &str) -> ProbeResult<String> {
        self.non_empty(key)
            .ok_or_else(|| ProbeError::MissingEnv(key.to_string()))
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// A fixed in-memory environment
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
