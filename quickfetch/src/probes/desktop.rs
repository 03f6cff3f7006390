//! Desktop environment and window manager probes

use async_trait::async_trait;
use fetch_common::{Environment, ProbeError, ProbeResult};

use crate::registry::{Probe, ProbeContext};
use crate::types::ProbeValue;

/// Session keywords and display names, checked in order; first match wins
pub const KNOWN_DESKTOPS: &[(&str, &str)] = &[
    ("zorin", "Zorin"),
    ("gnome", "GNOME"),
    ("kde", "KDE Plasma"),
    ("xfce", "XFCE"),
    ("lxqt", "LXQt"),
    ("lxde", "LXDE"),
    ("mate", "MATE"),
    ("cinnamon", "Cinnamon"),
    ("budgie", "Budgie"),
    ("pantheon", "Pantheon"),
];

/// Map a session identifier to a desktop name.
///
/// Unknown identifiers are returned capitalized; an empty one yields `None`.
pub fn match_desktop(session: &str) -> Option<String> {
    let lowered = session.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let known = KNOWN_DESKTOPS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, name)| name.to_string());

    Some(known.unwrap_or_else(|| capitalize(&lowered)))
}

/// Upper-case the first character, lower-case the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Desktop name for the current session, from `DESKTOP_SESSION`
pub fn current_desktop(env: &dyn Environment) -> Option<String> {
    env.non_empty("DESKTOP_SESSION")
        .and_then(|session| match_desktop(&session))
}

pub struct DesktopEnvironmentProbe;

#[async_trait]
impl Probe for DesktopEnvironmentProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        current_desktop(ctx.env.as_ref())
            .map(ProbeValue::Text)
            .ok_or_else(|| ProbeError::MissingEnv("DESKTOP_SESSION".to_string()))
    }
}

/// `Wayland` on Wayland sessions, the running WM's name on X11
pub struct WindowManagerProbe;

#[async_trait]
impl Probe for WindowManagerProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let session = ctx.env.require("XDG_SESSION_TYPE")?.trim().to_lowercase();

        if session == "wayland" {
            return Ok(ProbeValue::text("Wayland"));
        }
        if session.contains("x11") {
            let stdout = ctx.runner.run_ok("wmctrl", &["-m"]).await?;
            return parse_wmctrl_name(&stdout)
                .map(ProbeValue::Text)
                .ok_or_else(|| ProbeError::parse("wmctrl printed no Name: line"));
        }

        Err(ProbeError::unavailable(format!(
            "unsupported session type {:?}",
            session
        )))
    }
}

/// Value of the `Name:` line printed by `wmctrl -m`
pub fn parse_wmctrl_name(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Name:"))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fetch_common::{MapEnv, ScriptedRunner};

    fn ctx(runner: ScriptedRunner, env: MapEnv) -> ProbeContext {
        ProbeContext::new(Arc::new(runner), Arc::new(env))
    }

    #[test]
    fn test_first_keyword_wins() {
        assert_eq!(match_desktop("ubuntu-gnome-something").as_deref(), Some("GNOME"));
        assert_eq!(match_desktop("zorin-gnome").as_deref(), Some("Zorin"));
        assert_eq!(match_desktop("plasmawayland-kde").as_deref(), Some("KDE Plasma"));
        assert_eq!(match_desktop("LXQt").as_deref(), Some("LXQt"));
    }

    #[test]
    fn test_unknown_session_is_capitalized() {
        assert_eq!(match_desktop("hyprland").as_deref(), Some("Hyprland"));
        assert_eq!(match_desktop("SWAY").as_deref(), Some("Sway"));
        assert_eq!(match_desktop(""), None);
        assert_eq!(match_desktop("   "), None);
    }

    #[test]
    fn test_parse_wmctrl_name() {
        let stdout = "Name: GNOME Shell\nClass: N/A\nPID: N/A\nWindow manager's \"showing the desktop\" mode: OFF\n";
        assert_eq!(parse_wmctrl_name(stdout).as_deref(), Some("GNOME Shell"));
        assert_eq!(parse_wmctrl_name("Class: N/A\n"), None);
        assert_eq!(parse_wmctrl_name("Name:   \n"), None);
    }

    #[tokio::test]
    async fn test_desktop_probe_reads_session() {
        let env = MapEnv::new().with("DESKTOP_SESSION", "xubuntu-xfce");
        let value = DesktopEnvironmentProbe
            .collect(&ctx(ScriptedRunner::new(), env))
            .await
            .unwrap();
        assert_eq!(value.as_text(), Some("XFCE"));

        let result = DesktopEnvironmentProbe
            .collect(&ctx(ScriptedRunner::new(), MapEnv::new()))
            .await;
        assert!(matches!(result, Err(ProbeError::MissingEnv(_))));
    }

    #[tokio::test]
    async fn test_wayland_skips_wmctrl() {
        let runner = Arc::new(ScriptedRunner::new());
        let env = MapEnv::new().with("XDG_SESSION_TYPE", "Wayland");
        let ctx = ProbeContext::new(runner.clone(), Arc::new(env));

        let value = WindowManagerProbe.collect(&ctx).await.unwrap();
        assert_eq!(value.as_text(), Some("Wayland"));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_x11_parses_wmctrl() {
        let runner = ScriptedRunner::new().respond("wmctrl -m", "Name: i3\nClass: N/A\n");
        let env = MapEnv::new().with("XDG_SESSION_TYPE", "x11");
        let value = WindowManagerProbe.collect(&ctx(runner, env)).await.unwrap();
        assert_eq!(value.as_text(), Some("i3"));
    }

    #[tokio::test]
    async fn test_x11_without_wmctrl_fails() {
        let env = MapEnv::new().with("XDG_SESSION_TYPE", "x11");
        assert!(WindowManagerProbe
            .collect(&ctx(ScriptedRunner::new(), env))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_tty_session_is_unknown() {
        let env = MapEnv::new().with("XDG_SESSION_TYPE", "tty");
        assert!(WindowManagerProbe
            .collect(&ctx(ScriptedRunner::new(), env))
            .await
            .is_err());
    }
}
