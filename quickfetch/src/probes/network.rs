//! Local IP address probe

use std::net::{IpAddr, Ipv4Addr};

use async_trait::async_trait;
use fetch_common::{ProbeError, ProbeResult};
use sysinfo::{Networks, System};

use crate::registry::{Probe, ProbeContext};
use crate::types::ProbeValue;

/// IPv4 address the hostname resolves to.
///
/// Hosts often map their own name to 127.0.1.1; in that case the configured
/// fallback interface is searched instead.
pub struct LocalIpProbe;

#[async_trait]
impl Probe for LocalIpProbe {
    async fn collect(&self, ctx: &ProbeContext) -> ProbeResult<ProbeValue> {
        let host = System::host_name().ok_or_else(|| ProbeError::unavailable("hostname"))?;
        let resolved: Vec<IpAddr> = tokio::net::lookup_host((host.as_str(), 0))
            .await?
            .map(|addr| addr.ip())
            .collect();

        let interface_addrs = if resolved_loopback(&resolved) {
            ctx.settings
                .fallback_interface
                .as_deref()
                .map(interface_addresses)
        } else {
            None
        };

        pick_local_ip(&resolved, interface_addrs.as_deref())
            .map(|addr| ProbeValue::Text(addr.to_string()))
            .ok_or_else(|| ProbeError::unavailable("no usable local address"))
    }
}

fn resolved_loopback(resolved: &[IpAddr]) -> bool {
    first_ipv4(resolved).map_or(true, |addr| addr.is_loopback())
}

fn interface_addresses(name: &str) -> Vec<IpAddr> {
    let networks = Networks::new_with_refreshed_list();
    networks
        .iter()
        .find(|(iface, _)| iface.as_str() == name)
        .map(|(_, data)| data.ip_networks().iter().map(|net| net.addr).collect())
        .unwrap_or_else(|| {
            tracing::debug!(interface = name, "fallback interface not present");
            Vec::new()
        })
}

fn first_ipv4(addrs: &[IpAddr]) -> Option<Ipv4Addr> {
    addrs.iter().find_map(|addr| match addr {
        IpAddr::V4(v4) => Some(*v4),
        IpAddr::V6(_) => None,
    })
}

/// First non-loopback IPv4 from resolution, else the first IPv4 on the
/// fallback interface (if one was searched)
pub fn pick_local_ip(resolved: &[IpAddr], interface_addrs: Option<&[IpAddr]>) -> Option<Ipv4Addr> {
    match first_ipv4(resolved) {
        Some(addr) if !addr.is_loopback() => Some(addr),
        _ => interface_addrs.and_then(first_ipv4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_non_loopback_resolution_wins() {
        let resolved = [ip("192.168.1.20")];
        let iface = [ip("10.0.0.5")];
        assert_eq!(
            pick_local_ip(&resolved, Some(&iface)),
            Some(Ipv4Addr::new(192, 168, 1, 20))
        );
    }

    #[test]
    fn test_loopback_searches_interface() {
        let resolved = [ip("127.0.1.1")];
        let iface = [ip("fe80::1"), ip("10.0.0.5"), ip("10.0.0.6")];
        assert!(resolved_loopback(&resolved));
        assert_eq!(
            pick_local_ip(&resolved, Some(&iface)),
            Some(Ipv4Addr::new(10, 0, 0, 5))
        );
    }

    #[test]
    fn test_loopback_without_interface_is_unknown() {
        let resolved = [ip("127.0.0.1")];
        assert_eq!(pick_local_ip(&resolved, None), None);

        let iface = [ip("fe80::1")];
        assert_eq!(pick_local_ip(&resolved, Some(&iface)), None);
    }

    #[test]
    fn test_ipv6_only_resolution_counts_as_loopback() {
        let resolved = [ip("::1")];
        assert!(resolved_loopback(&resolved));
        assert!(!resolved_loopback(&[ip("::1"), ip("172.16.0.2")]));
    }
}
