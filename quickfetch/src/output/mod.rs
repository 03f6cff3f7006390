//! Report rendering
//!
//! Turns a [`Snapshot`] into the text printed to stdout. Two modes:
//!
//! - **Lines**: one `Label: value` line per field, then the color strip
//! - **Artwork**: a distribution logo above the same block; falls back to
//!   plain lines when no logo matches the OS name

pub mod logo;

use crate::probes::desktop::capitalize;
use crate::probes::keys;
use crate::registry::Snapshot;
use crate::types::{ProbeValue, UNKNOWN};

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BRIGHT_RED: &str = "\x1b[91m";
const BRIGHT_GREEN: &str = "\x1b[92m";
const BRIGHT_YELLOW: &str = "\x1b[93m";
const BRIGHT_BLUE: &str = "\x1b[94m";
const BRIGHT_MAGENTA: &str = "\x1b[95m";
const BRIGHT_CYAN: &str = "\x1b[96m";
const BRIGHT_WHITE: &str = "\x1b[97m";

const BLOCK: char = '█';

/// Palette shown in the color strip, bright colors twice over
const STRIP_COLORS: [&str; 14] = [
    BRIGHT_RED,
    BRIGHT_GREEN,
    BRIGHT_YELLOW,
    BRIGHT_BLUE,
    BRIGHT_MAGENTA,
    BRIGHT_CYAN,
    BRIGHT_WHITE,
    BRIGHT_RED,
    BRIGHT_GREEN,
    BRIGHT_YELLOW,
    BRIGHT_BLUE,
    BRIGHT_MAGENTA,
    BRIGHT_CYAN,
    BRIGHT_WHITE,
];

/// Single-value fields in display order, after the `User:` line
const FIELDS: &[(&str, &str)] = &[
    ("OS", keys::OS),
    ("Kernel", keys::KERNEL),
    ("Architecture", keys::ARCHITECTURE),
    ("CPU", keys::CPU),
    ("GPU", keys::GPU),
    ("Memory", keys::MEMORY),
    ("Swap", keys::SWAP),
    ("Uptime", keys::UPTIME),
    ("Resolution", keys::RESOLUTION),
    ("DE", keys::DESKTOP_ENVIRONMENT),
    ("WM", keys::WINDOW_MANAGER),
    ("WM Theme", keys::WM_THEME),
    ("Theme", keys::GTK_THEME),
    ("Icons", keys::ICON_THEME),
    ("Terminal", keys::TERMINAL),
    ("Terminal Font", keys::TERMINAL_FONT),
    ("Font", keys::SYSTEM_FONT),
    ("Locale", keys::LOCALE),
    ("Local IP", keys::LOCAL_IP),
    ("Battery", keys::BATTERY),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Lines,
    Artwork,
}

/// Renders snapshots in a fixed mode
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    mode: RenderMode,
}

impl Presenter {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode }
    }

    /// Full report text, newline-terminated
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let block = render_block(&detail_lines(snapshot));

        match self.mode {
            RenderMode::Lines => block,
            RenderMode::Artwork => match logo::lookup(snapshot.text(keys::OS)) {
                Some(art) => format!("{}\n{}", art, block),
                None => {
                    tracing::debug!(os = snapshot.text(keys::OS), "no logo for OS, using plain lines");
                    block
                }
            },
        }
    }
}

/// The `Label: value` lines of a report, without the color strip
pub fn detail_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(FIELDS.len() + 8);

    lines.push(format!(
        "User: {}@{}",
        snapshot.text(keys::USER),
        snapshot.text(keys::HOSTNAME)
    ));

    for (label, key) in FIELDS {
        lines.push(format!("{}: {}", label, display_value(snapshot.get(key))));
    }

    if let Some(ProbeValue::Disks(disks)) = snapshot.get(keys::DISK_USAGE) {
        for (mount_point, usage) in disks.iter() {
            lines.push(format!("Disk ({}): {}", mount_point, usage));
        }
    }

    if let Some(ProbeValue::Tally(tally)) = snapshot.get(keys::PACKAGE_MANAGERS) {
        for (manager, count) in tally.iter() {
            lines.push(format!("{}: {} packages", capitalize(manager), count));
        }
    }

    lines
}

fn display_value(value: Option<&ProbeValue>) -> String {
    match value {
        Some(value @ (ProbeValue::Text(_) | ProbeValue::Bytes(_))) => value.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// A strip of full blocks in each palette color, ending with a reset
pub fn color_strip() -> String {
    let mut strip: String = STRIP_COLORS
        .iter()
        .flat_map(|color| color.chars().chain(std::iter::once(BLOCK)))
        .collect();
    strip.push_str(RESET);
    strip
}

fn render_block(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out.push_str(&color_strip());
    out.push('\n');
    out
}
