//! Tracing initialization
//!
//! Logs always go to stderr: stdout carries the report and must stay clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to a log level (0 = warn, 1 = info, 2 = debug, 3+ = trace)
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber for a quickfetch binary.
///
/// `crate_name` and `fetch_common` log at the level picked by `-v`; `RUST_LOG`
/// can still add directives. Output is plain text on stderr, or one JSON
/// object per line when `LOG_FORMAT=json`. Fails if a subscriber is already
/// installed.
pub fn init_tracing(crate_name: &str, verbosity: u8) -> anyhow::Result<()> {
    let level = level_for(verbosity);
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("{}={}", crate_name, level).parse()?)
        .add_directive(format!("fetch_common={}", level).parse()?);

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // Exactly one of the two layers is present
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(verbosity >= 2)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(7), "trace");
    }

    #[test]
    fn test_second_install_is_an_error() {
        // Whichever call runs first in this process wins; the next must fail
        // instead of panicking.
        let _ = init_tracing("quickfetch", 0);
        assert!(init_tracing("quickfetch", 0).is_err());
    }
}
