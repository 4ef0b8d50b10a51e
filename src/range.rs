//! Usable-range resolution
//!
//! Computes the first and last usable address of a network (network and
//! broadcast addresses excluded) and provides a lazy iterator over the
//! resulting inclusive span. All arithmetic runs on the canonical integer
//! form, so IPv4 and IPv6 follow the identical path.

use crate::addr::{from_canonical, to_canonical, IpFamily};
use crate::{Error, Result};
use ipnet::IpNet;
use std::net::IpAddr;

/// Resolve the inclusive usable range of `network`, derived from any
/// address inside it.
///
/// The network address is computed by clearing the host bits of `start`,
/// so callers do not need to pre-normalize. When `start` lies above the
/// first usable address it replaces the lower bound, letting allocation
/// begin mid-range without moving the upper bound.
///
/// Fails with [`Error::RangeTooSmall`] when the mask leaves fewer than 2
/// host bits: such a network has no usable span once the network and
/// broadcast addresses are removed.
pub fn resolve_range(start: IpAddr, network: IpNet) -> Result<(IpAddr, IpAddr)> {
    let family = match network {
        IpNet::V4(_) => IpFamily::V4,
        IpNet::V6(_) => IpFamily::V6,
    };
    let bits = family.bits();
    let host_bits = bits - u32::from(network.prefix_len());
    if host_bits < 2 {
        return Err(Error::RangeTooSmall { host_bits });
    }

    let max = family.max_value();
    let start_value = to_canonical(&start) & max;

    // Clearing the host bits yields the network's base address.
    let base = if host_bits >= bits {
        0
    } else {
        (start_value >> host_bits) << host_bits
    };
    let host_mask = max >> network.prefix_len();
    let broadcast = base | host_mask;

    // Step inside the network/broadcast boundary.
    let mut first = base + 1;
    let last = broadcast - 1;

    if start_value > first {
        first = start_value;
    }

    Ok((from_canonical(family, first), from_canonical(family, last)))
}

/// Split CIDR text into its address text and prefix length.
///
/// The address part is returned as written by the caller, host bits
/// included; it is not truncated to the network address.
pub fn cidr_parts(cidr: &str) -> Result<(String, u8)> {
    let net: IpNet = cidr.parse()?;
    Ok((net.addr().to_string(), net.prefix_len()))
}

/// Lazy ascending iterator over an inclusive address span.
///
/// Candidates are produced on demand; nothing is materialized, so even a
/// wide IPv6 prefix costs constant memory.
#[derive(Debug, Clone)]
pub struct HostRange {
    family: IpFamily,
    next: u128,
    last: u128,
    exhausted: bool,
}

impl HostRange {
    /// Iterate from `first` to `last` inclusive. The family of `first`
    /// determines how candidates are rendered.
    pub fn new(first: IpAddr, last: IpAddr) -> Self {
        let next = to_canonical(&first);
        let last = to_canonical(&last);
        Self {
            family: IpFamily::of(&first),
            next,
            last,
            exhausted: next > last,
        }
    }
}

impl Iterator for HostRange {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        if self.exhausted {
            return None;
        }
        let current = self.next;
        if current == self.last {
            self.exhausted = true;
        } else {
            self.next = current + 1;
        }
        Some(from_canonical(self.family, current))
    }
}
