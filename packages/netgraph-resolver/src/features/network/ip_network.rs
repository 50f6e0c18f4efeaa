//! IP network (address + prefix length)

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("Invalid IP address: {0}")]
    InvalidAddress(String),

    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Prefix length {prefix_len} exceeds {max} for {addr}")]
    PrefixTooLong { addr: IpAddr, prefix_len: u8, max: u8 },

    #[error("Address family mismatch: {start} and {end}")]
    FamilyMismatch { start: IpAddr, end: IpAddr },
}

/// A network prefix
///
/// The stored address is always masked to the network address, so
/// `192.0.2.77/24` and `192.0.2.0/24` are the same network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpNetwork {
    addr: IpAddr,
    prefix_len: u8,
}

impl IpNetwork {
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self, NetworkError> {
        let max = max_prefix_len(&addr);
        if prefix_len > max {
            return Err(NetworkError::PrefixTooLong {
                addr,
                prefix_len,
                max,
            });
        }

        Ok(Self {
            addr: mask_addr(addr, prefix_len),
            prefix_len,
        })
    }

    /// Single-address network (/32 or /128)
    pub fn host(addr: IpAddr) -> Self {
        Self {
            addr,
            prefix_len: max_prefix_len(&addr),
        }
    }

    /// Parse `addr/prefix`
    pub fn parse_cidr(s: &str) -> Result<Self, NetworkError> {
        let (addr, prefix) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| NetworkError::InvalidCidr(s.to_string()))?;

        let addr =
            IpAddr::from_str(addr).map_err(|_| NetworkError::InvalidCidr(s.to_string()))?;
        let prefix_len: u8 = prefix
            .parse()
            .map_err(|_| NetworkError::InvalidCidr(s.to_string()))?;

        Self::new(addr, prefix_len)
    }

    pub fn network_address(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    pub fn is_ipv6(&self) -> bool {
        self.addr.is_ipv6()
    }

    /// Last address in the network
    pub fn broadcast_address(&self) -> IpAddr {
        let width = max_prefix_len(&self.addr);
        let host_bits = !prefix_mask(width, self.prefix_len) & full_mask(width);
        from_bits(&self.addr, to_bits(&self.addr) | host_bits)
    }

    /// Whether `addr` lies inside this network
    ///
    /// IPv4-mapped IPv6 addresses are matched as their IPv4 form.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        let addr = unmap(*addr);
        if self.addr.is_ipv4() != addr.is_ipv4() {
            return false;
        }
        mask_addr(addr, self.prefix_len) == self.addr
    }

    /// Whether `other` is a subset of (or equal to) this network
    pub fn contains_network(&self, other: &IpNetwork) -> bool {
        self.prefix_len <= other.prefix_len && self.contains(&other.addr)
    }
}

/// `::ffff:a.b.c.d` as `a.b.c.d`; any other address unchanged
pub fn unmap(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl FromStr for IpNetwork {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_cidr(s)
    }
}

pub(crate) fn max_prefix_len(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn full_mask(width: u8) -> u128 {
    if width == 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

fn prefix_mask(width: u8, prefix_len: u8) -> u128 {
    if prefix_len == 0 {
        0
    } else {
        (u128::MAX << (width - prefix_len)) & full_mask(width)
    }
}

fn to_bits(addr: &IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(*v4) as u128,
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

fn from_bits(template: &IpAddr, bits: u128) -> IpAddr {
    match template {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

fn mask_addr(addr: IpAddr, prefix_len: u8) -> IpAddr {
    let width = max_prefix_len(&addr);
    from_bits(&addr, to_bits(&addr) & prefix_mask(width, prefix_len))
}
