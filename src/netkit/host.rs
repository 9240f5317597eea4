use crate::utils::error::{KitError, Result};
use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};
use std::process::{Command, Stdio};

/// Whether a single ping to `host` gets an answer within five seconds.
pub fn network_status(host: &str) -> bool {
    tracing::debug!("Pinging {}", host);
    let status = Command::new("ping")
        .args(["-c", "1", "-W", "5", host])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => true,
        Ok(status) => {
            tracing::warn!("ping {} exited with {}", host, status);
            false
        }
        Err(e) => {
            tracing::warn!("ping {} could not run: {}", host, e);
            false
        }
    }
}

pub fn gethostname() -> Result<String> {
    sysinfo::System::host_name().ok_or_else(|| KitError::CommandError {
        message: "host name is not available".to_string(),
    })
}

fn resolve_ipv4(hostname: &str) -> Result<Vec<Ipv4Addr>> {
    let addrs = (hostname, 0).to_socket_addrs()?;
    let mut ips = Vec::new();
    for addr in addrs {
        if let IpAddr::V4(ip) = addr.ip() {
            if !ips.contains(&ip) {
                ips.push(ip);
            }
        }
    }
    Ok(ips)
}

/// First IPv4 address of `hostname`, `""` when it only has IPv6 records.
pub fn gethostbyname(hostname: &str) -> Result<String> {
    Ok(resolve_ipv4(hostname)?
        .first()
        .map(ToString::to_string)
        .unwrap_or_default())
}

/// Every IPv4 address of `hostname`.
pub fn gethostbynamel(hostname: &str) -> Result<Vec<String>> {
    Ok(resolve_ipv4(hostname)?.iter().map(ToString::to_string).collect())
}

/// Dotted IPv4 text to its big-endian integer, 0 when it does not parse.
pub fn ip2long(ip_address: &str) -> u32 {
    ip_address
        .parse::<Ipv4Addr>()
        .map(u32::from)
        .unwrap_or(0)
}

pub fn long2ip(proper_address: u32) -> String {
    Ipv4Addr::from(proper_address).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_long_conversion() {
        assert_eq!(ip2long("127.0.0.1"), 2130706433);
        assert_eq!(ip2long("192.168.1.1"), 3232235777);
        assert_eq!(ip2long("not.an.ip"), 0);
        assert_eq!(ip2long("::1"), 0);
        assert_eq!(long2ip(2130706433), "127.0.0.1");
        assert_eq!(long2ip(0), "0.0.0.0");
    }

    #[test]
    fn test_localhost_lookup() {
        assert_eq!(gethostbyname("127.0.0.1").unwrap(), "127.0.0.1");
        assert_eq!(gethostbynamel("127.0.0.1").unwrap(), vec!["127.0.0.1"]);
    }
}
