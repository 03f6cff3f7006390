//! Theme and font probes
//!
//! One probe type covers every appearance setting. Where the value lives
//! depends on the desktop: GNOME-based desktops answer through `gsettings`,
//! KDE Plasma through `kreadconfig5`. Other desktops report Unknown.

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};

use super::desktop::current_desktop;
use crate::registry::{Probe, ProbeContext};
use crate::types::ProbeValue;

/// Which appearance setting to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSetting {
    WindowManagerTheme,
    GtkTheme,
    IconTheme,
    TerminalFont,
    SystemFont,
}

impl ThemeSetting {
    /// `(schema, key)` for `gsettings get`
    pub fn gsettings_key(self) -> (&'static str, &'static str) {
        match self {
            ThemeSetting::WindowManagerTheme => ("org.gnome.desktop.wm.preferences", "theme"),
            ThemeSetting::GtkTheme => ("org.gnome.desktop.interface", "gtk-theme"),
            ThemeSetting::IconTheme => ("org.gnome.desktop.interface", "icon-theme"),
            ThemeSetting::TerminalFont => ("org.gnome.desktop.interface", "monospace-font-name"),
            ThemeSetting::SystemFont => ("org.gnome.desktop.interface", "font-name"),
        }
    }

    /// `(file, group, key)` for `kreadconfig5`
    pub fn kconfig_key(self) -> (&'static str, &'static str, &'static str) {
        match self {
            ThemeSetting::WindowManagerTheme => ("kwinrc", "org.kde.kdecoration2", "theme"),
            ThemeSetting::GtkTheme => ("gtk-3.0/settings.ini", "Settings", "gtk-theme-name"),
            ThemeSetting::IconTheme => ("kdeglobals", "Icons", "Theme"),
            ThemeSetting::TerminalFont => ("kdeglobals", "General", "fixed"),
            ThemeSetting::SystemFont => ("kdeglobals", "General", "font"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsBackend {
    Gsettings,
    Kconfig,
}

fn backend_for(desktop: &str) -> Option<SettingsBackend> {
    match desktop {
        "GNOME" | "Zorin" | "Budgie" => Some(SettingsBackend::Gsettings),
        "KDE Plasma" => Some(SettingsBackend::Kconfig),
        _ => None,
    }
}

pub struct ThemeProbe {
    setting: ThemeSetting,
}

impl ThemeProbe {
    pub fn new(setting: ThemeSetting) -> Self {
        Self { setting }
    }
}

#[async_trait]
impl Probe for ThemeProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let desktop = current_desktop(ctx.env.as_ref())
            .ok_or_else(|| ProbeError::MissingEnv("DESKTOP_SESSION".to_string()))?;

        let value = match backend_for(&desktop) {
            Some(SettingsBackend::Gsettings) => {
                let (schema, key) = self.setting.gsettings_key();
                let stdout = ctx.runner.run_ok("gsettings", &["get", schema, key]).await?;
                strip_quotes(&stdout)
            }
            Some(SettingsBackend::Kconfig) => {
                let (file, group, key) = self.setting.kconfig_key();
                let stdout = ctx
                    .runner
                    .run_ok(
                        "kreadconfig5",
                        &["--file", file, "--group", group, "--key", key],
                    )
                    .await?;
                stdout.trim().to_string()
            }
            None => {
                return Err(ProbeError::unavailable(format!(
                    "no settings reader for {}",
                    desktop
                )))
            }
        };

        if value.is_empty() {
            return Err(ProbeError::parse(format!("{:?} is empty", self.setting)));
        }
        Ok(ProbeValue::Text(value))
    }
}

/// Trim whitespace and the quotes gsettings wraps string values in
pub fn strip_quotes(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '\'' || c == '"')
        .to_string()
}
