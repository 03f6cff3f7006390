//! Fetch Common - Shared plumbing for quickfetch probes
//!
//! This crate provides the pieces every probe leans on:
//!
//! - **Initialization**: [`init_tracing`] for stderr logging
//! - **Errors**: [`ProbeError`] and the [`ProbeResult`] alias
//! - **Execution**: [`CommandRunner`] seam with the real [`ShellRunner`]
//! - **Environment**: [`Environment`] seam over process variables
//!
//! # Example
//!
//! ```rust,ignore
//! use fetch_common::{CommandRunner, ShellRunner};
//!
//! let runner = ShellRunner::new("/bin/sh");
//! let stdout = runner.run_ok("uname", &["-r"]).await?;
//! ```

pub mod env;
pub mod error;
pub mod exec;
pub mod init;

// Re-export commonly used items at crate root
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::{ProbeError, ProbeResult};
pub use exec::{CommandOutput, CommandRunner, ShellRunner};
pub use init::init_tracing;

#[cfg(any(test, feature = "test-utils"))]
pub use exec::ScriptedRunner;

// Re-export async_trait for implementing CommandRunner
pub use async_trait::async_trait;
