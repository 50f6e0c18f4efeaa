//! Covering network for a registry-reported address range
//!
//! Registries report allocations as a start/end pair. The prefix length is
//! the number of leading bits shared by both ends, which always covers the
//! reported range even when the allocation isn't power-of-two aligned.

use std::net::IpAddr;
use std::str::FromStr;

use super::ip_network::{IpNetwork, NetworkError};

/// Minimal covering network for `start_address..=end_address`
pub fn covering_network(start_address: &str, end_address: &str) -> Result<IpNetwork, NetworkError> {
    let start = parse_address(start_address)?;
    let end = parse_address(end_address)?;

    let prefix_len = match (start, end) {
        (IpAddr::V4(s), IpAddr::V4(e)) => common_prefix_len(&s.octets(), &e.octets()),
        (IpAddr::V6(s), IpAddr::V6(e)) => common_prefix_len(&s.octets(), &e.octets()),
        _ => return Err(NetworkError::FamilyMismatch { start, end }),
    };

    IpNetwork::new(start, prefix_len)
}

fn parse_address(s: &str) -> Result<IpAddr, NetworkError> {
    IpAddr::from_str(s.trim()).map_err(|_| NetworkError::InvalidAddress(s.to_string()))
}

/// Count identical leading bits, byte by byte from the most significant end
fn common_prefix_len(start: &[u8], end: &[u8]) -> u8 {
    let mut prefix_len: u32 = 0;

    for (s, e) in start.iter().zip(end) {
        let diff = s ^ e;
        if diff != 0 {
            prefix_len += diff.leading_zeros();
            break;
        }
        prefix_len += 8;
    }

    prefix_len as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_ipv4_slash_24() {
        let net = covering_network("192.0.2.0", "192.0.2.255").unwrap();
        assert_eq!(net.prefix_len(), 24);
        assert_eq!(net.to_string(), "192.0.2.0/24");
    }

    #[test]
    fn test_ipv6_slash_64() {
        let net = covering_network("2001:db8::", "2001:db8::ffff:ffff:ffff:ffff").unwrap();
        assert_eq!(net.prefix_len(), 64);
        assert_eq!(net.to_string(), "2001:db8::/64");
    }

    #[test]
    fn test_slash_16() {
        let net = covering_network("10.1.0.0", "10.1.255.255").unwrap();
        assert_eq!(net.prefix_len(), 16);
    }

    #[test]
    fn test_single_address() {
        let net = covering_network("203.0.113.5", "203.0.113.5").unwrap();
        assert_eq!(net.prefix_len(), 32);
    }

    #[test]
    fn test_unaligned_range_is_widened() {
        // 1.1.1.5 = ...0101, 1.1.1.6 = ...0110 share 30 leading bits
        let net = covering_network("1.1.1.5", "1.1.1.6").unwrap();
        assert_eq!(net.prefix_len(), 30);
        assert_eq!(net.to_string(), "1.1.1.4/30");

        // Non power-of-two allocation spanning a byte boundary
        let net = covering_network("192.0.2.128", "192.0.3.127").unwrap();
        assert_eq!(net.prefix_len(), 23);
    }

    #[test]
    fn test_whole_space() {
        let net = covering_network("0.0.0.0", "255.255.255.255").unwrap();
        assert_eq!(net.prefix_len(), 0);
    }

    #[test]
    fn test_invalid_addresses() {
        assert_eq!(
            covering_network("not-an-ip", "192.0.2.255"),
            Err(NetworkError::InvalidAddress("not-an-ip".to_string()))
        );
        assert!(covering_network("192.0.2.0", "").is_err());
    }

    #[test]
    fn test_family_mismatch() {
        assert!(matches!(
            covering_network("192.0.2.0", "2001:db8::1"),
            Err(NetworkError::FamilyMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_covering_network_contains_both_ends(a in any::<u32>(), b in any::<u32>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let start = Ipv4Addr::from(lo).to_string();
            let end = Ipv4Addr::from(hi).to_string();

            let net = covering_network(&start, &end).unwrap();

            prop_assert!(net.contains(&IpAddr::V4(Ipv4Addr::from(lo))));
            prop_assert!(net.contains(&IpAddr::V4(Ipv4Addr::from(hi))));
            prop_assert_eq!(u32::from(net.prefix_len()), (lo ^ hi).leading_zeros());
        }
    }
}
