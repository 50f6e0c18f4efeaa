//! Properties inherent in an IP address
//!
//! IPv4-mapped IPv6 addresses (`::ffff:192.0.2.1`) are classified and
//! rendered as the IPv4 address they carry.

use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::features::network::unmap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressProperties {
    pub ip: String,
    pub unspecified: bool,
    pub loopback: bool,
    pub private: bool,
    pub multicast: bool,
    pub interface_local_multicast: bool,
    pub link_local_multicast: bool,
    pub link_local_unicast: bool,
}

impl AddressProperties {
    pub fn of(addr: IpAddr) -> Self {
        match unmap(addr) {
            IpAddr::V4(v4) => Self::v4(v4),
            IpAddr::V6(v6) => Self::v6(v6),
        }
    }

    fn v4(addr: Ipv4Addr) -> Self {
        let [a, b, c, _] = addr.octets();
        Self {
            ip: addr.to_string(),
            unspecified: addr.is_unspecified(),
            loopback: addr.is_loopback(),
            private: addr.is_private(),
            multicast: addr.is_multicast(),
            interface_local_multicast: false,
            link_local_multicast: a == 224 && b == 0 && c == 0,
            link_local_unicast: addr.is_link_local(),
        }
    }

    fn v6(addr: Ipv6Addr) -> Self {
        let octets = addr.octets();
        let multicast = octets[0] == 0xff;
        Self {
            ip: addr.to_string(),
            unspecified: addr.is_unspecified(),
            loopback: addr.is_loopback(),
            // fc00::/7
            private: octets[0] & 0xfe == 0xfc,
            multicast,
            // Scope nibble of the multicast address
            interface_local_multicast: multicast && octets[1] & 0x0f == 0x01,
            link_local_multicast: multicast && octets[1] & 0x0f == 0x02,
            // fe80::/10
            link_local_unicast: octets[0] == 0xfe && octets[1] & 0xc0 == 0x80,
        }
    }
}
