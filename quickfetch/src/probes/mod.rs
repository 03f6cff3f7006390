//! Built-in probes
//!
//! Each probe pairs an OS query or external command with a pure parser that
//! can be tested against captured output. Modules group probes by concern.

pub mod desktop;
pub mod display;
pub mod hardware;
pub mod host;
pub mod network;
pub mod packages;
pub mod session;
pub mod storage;
pub mod theme;

use crate::registry::{ProbeContext, ProbeRegistry, RegistryError};

/// Stable probe keys
pub mod keys {
    pub const USER: &str = "user";
    pub const HOSTNAME: &str = "hostname";
    pub const OS: &str = "os";
    pub const KERNEL: &str = "kernel";
    pub const ARCHITECTURE: &str = "architecture";
    pub const CPU: &str = "cpu";
    pub const GPU: &str = "gpu";
    pub const MEMORY: &str = "memory";
    pub const SWAP: &str = "swap";
    pub const UPTIME: &str = "uptime";
    pub const RESOLUTION: &str = "resolution";
    pub const DESKTOP_ENVIRONMENT: &str = "desktop_environment";
    pub const WINDOW_MANAGER: &str = "window_manager";
    pub const WM_THEME: &str = "wm_theme";
    pub const GTK_THEME: &str = "gtk_theme";
    pub const ICON_THEME: &str = "icon_theme";
    pub const TERMINAL: &str = "terminal";
    pub const TERMINAL_FONT: &str = "terminal_font";
    pub const SYSTEM_FONT: &str = "system_font";
    pub const LOCALE: &str = "locale";
    pub const LOCAL_IP: &str = "local_ip";
    pub const BATTERY: &str = "battery";
    pub const DISK_USAGE: &str = "disk_usage";
    pub const PACKAGE_MANAGERS: &str = "package_managers";
}

/// Registry holding every built-in probe in report order
pub fn builtin(ctx: ProbeContext) -> Result<ProbeRegistry, RegistryError> {
    use theme::{ThemeProbe, ThemeSetting};

    let mut registry = ProbeRegistry::new(ctx);

    registry.register(keys::USER, host::UserProbe)?;
    registry.register(keys::HOSTNAME, host::HostnameProbe)?;
    registry.register(keys::OS, host::OsProbe)?;
    registry.register(keys::KERNEL, host::KernelProbe)?;
    registry.register(keys::ARCHITECTURE, host::ArchitectureProbe)?;
    registry.register(keys::CPU, hardware::CpuProbe)?;
    registry.register(keys::GPU, hardware::GpuProbe)?;
    registry.register(keys::MEMORY, hardware::MemoryProbe)?;
    registry.register(keys::SWAP, hardware::SwapProbe)?;
    registry.register(keys::UPTIME, host::UptimeProbe)?;
    registry.register(keys::RESOLUTION, display::ResolutionProbe)?;
    registry.register(keys::DESKTOP_ENVIRONMENT, desktop::DesktopEnvironmentProbe)?;
    registry.register(keys::WINDOW_MANAGER, desktop::WindowManagerProbe)?;
    registry.register(keys::WM_THEME, ThemeProbe::new(ThemeSetting::WindowManagerTheme))?;
    registry.register(keys::GTK_THEME, ThemeProbe::new(ThemeSetting::GtkTheme))?;
    registry.register(keys::ICON_THEME, ThemeProbe::new(ThemeSetting::IconTheme))?;
    registry.register(keys::TERMINAL, session::TerminalProbe)?;
    registry.register(keys::TERMINAL_FONT, ThemeProbe::new(ThemeSetting::TerminalFont))?;
    registry.register(keys::SYSTEM_FONT, ThemeProbe::new(ThemeSetting::SystemFont))?;
    registry.register(keys::LOCALE, session::LocaleProbe)?;
    registry.register(keys::LOCAL_IP, network::LocalIpProbe)?;
    registry.register(keys::BATTERY, hardware::BatteryProbe)?;
    registry.register(keys::DISK_USAGE, storage::DiskUsageProbe)?;
    registry.register(keys::PACKAGE_MANAGERS, packages::PackageManagerProbe)?;

    Ok(registry)
}
