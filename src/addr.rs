//! Canonical address codec
//!
//! Converts host addresses to and from a single 128-bit integer form so
//! IPv4 and IPv6 share one arithmetic path. The integer is the value of
//! the fixed 16-byte canonical representation: IPv6 addresses map
//! directly, IPv4 addresses use their IPv4-mapped placement (the low 32
//! bits carry the dotted quad, bits 32-47 the `ffff` marker). Comparing
//! canonical values is therefore equivalent to comparing 16-byte forms,
//! regardless of how the address was written as text.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Address family, carried explicitly alongside the canonical integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    /// Family of a concrete address.
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => IpFamily::V4,
            IpAddr::V6(_) => IpFamily::V6,
        }
    }

    /// Width of the family's address space in bits.
    pub fn bits(self) -> u32 {
        match self {
            IpFamily::V4 => 32,
            IpFamily::V6 => 128,
        }
    }

    /// Largest address value of the family.
    pub fn max_value(self) -> u128 {
        match self {
            IpFamily::V4 => u128::from(u32::MAX),
            IpFamily::V6 => u128::MAX,
        }
    }
}

/// Convert an address to its canonical integer value.
pub fn to_canonical(ip: &IpAddr) -> u128 {
    match ip {
        IpAddr::V4(v4) => u128::from(v4.to_ipv6_mapped()),
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

/// Convert a canonical integer value back to an address of the given family.
pub fn from_canonical(family: IpFamily, value: u128) -> IpAddr {
    match family {
        IpFamily::V4 => IpAddr::V4(Ipv4Addr::from((value & u128::from(u32::MAX)) as u32)),
        IpFamily::V6 => IpAddr::V6(Ipv6Addr::from(value)),
    }
}
