//! DNS name helpers

use std::fmt::Write;
use std::net::IpAddr;

/// Drop one trailing dot
pub fn trim_dns_suffix(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Fully qualified form (exactly one trailing dot)
pub fn fqdn(name: &str) -> String {
    format!("{}.", trim_dns_suffix(name))
}

/// Reverse-lookup name for `addr` (`in-addr.arpa.` / `ip6.arpa.`)
pub fn reverse_name(addr: &IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{}.{}.{}.{}.in-addr.arpa.", d, c, b, a)
        }
        IpAddr::V6(v6) => {
            let mut name = String::with_capacity(72);
            for byte in v6.octets().iter().rev() {
                // Low nibble first within each byte
                let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
            }
            name.push_str("ip6.arpa.");
            name
        }
    }
}
