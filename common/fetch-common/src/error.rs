//! Error taxonomy for probes
//!
//! Every way a probe can come up empty-handed. The registry collapses all of
//! these into the probe's fallback value, so the variants exist for logging
//! and for tests that want to assert on the cause.

use thiserror::Error;

/// Type alias for probe results
pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("command `{command}` exited with status {status:?}{}", stderr_note(.stderr))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(String),

    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Shorthand for a parse failure
    pub fn parse(message: impl Into<String>) -> Self {
        ProbeError::Parse(message.into())
    }

    /// Shorthand for a missing capability
    pub fn unavailable(message: impl Into<String>) -> Self {
        ProbeError::Unavailable(message.into())
    }
}

/// First stderr line, prefixed for appending to a message
fn stderr_note(stderr: &str) -> String {
    match stderr.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => format!(": {}", line),
        None => String::new(),
    }
}
