//! Address allocation
//!
//! Walks the usable range of a network in ascending address order and
//! returns the first candidate that survives three filters: the caller's
//! reservation list, the structural skip rule, and the configured
//! exclusion sub-ranges. The engine is a pure computation over borrowed
//! inputs; it keeps no state between calls and performs no I/O.

use crate::addr::to_canonical;
use crate::models::{Allocation, AllocationRequest, IpReservation};
use crate::range::{resolve_range, HostRange};
use crate::{Error, Result};
use ipnet::IpNet;
use std::collections::HashSet;
use std::net::IpAddr;
use tracing::{debug, warn};

/// Structural eligibility policy applied to every candidate, independent
/// of reservations and exclusions.
///
/// The network/broadcast exclusion is already handled by range
/// resolution; this hook exists for conventions in which further
/// addresses carry meaning and must never be handed to a host.
pub trait SkipRule {
    /// Return `true` to pass over `ip` without allocating it.
    fn skip(&self, ip: &IpAddr) -> bool;
}

/// Default rule: a trailing-zero final byte marks the address as a
/// role/subnet identifier, not a host address.
///
/// Assumes the final octet is byte-aligned with subnet boundaries; on
/// non-byte-aligned subnets this can exclude ordinary host addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroFinalByte;

impl SkipRule for ZeroFinalByte {
    fn skip(&self, ip: &IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => v4.octets()[3] == 0,
            IpAddr::V6(v6) => v6.octets()[15] == 0,
        }
    }
}

/// Allocate the next free address under the default [`ZeroFinalByte`]
/// rule.
pub fn allocate(request: &AllocationRequest) -> Result<Allocation> {
    allocate_with(request, &ZeroFinalByte)
}

/// Allocate the next free address using a caller-supplied skip rule.
///
/// Iterates the range in ascending order and stops at the first address
/// that is not reserved, not structurally skipped and not inside any
/// exclusion sub-range. On success the returned [`Allocation`] carries
/// the address with the request's prefix length and a copy of the
/// role-scoped reservation list with the new entry appended; the request
/// itself is never modified.
///
/// Fails with [`Error::AllocationExhausted`] when no candidate survives,
/// and with [`Error::RangeTooSmall`] when no explicit end was given and
/// the network cannot hold a usable range.
pub fn allocate_with(request: &AllocationRequest, rule: &dyn SkipRule) -> Result<Allocation> {
    let (first, last) = match request.range_end {
        // An explicit end takes the bounds verbatim.
        Some(end) => (request.range_start, end),
        None => resolve_range(request.range_start, request.ip_net)?,
    };
    debug!(%first, %last, network = %request.ip_net, "iterating range for assignment");

    let reserved = reserved_set(&request.reservations);

    let mut excluded = Vec::with_capacity(request.exclude_ranges.len());
    for cidr in &request.exclude_ranges {
        excluded.push(cidr.parse::<IpNet>()?);
    }

    // Excluded spans are not fast-forwarded past; each member is visited
    // and rejected individually.
    let candidate = HostRange::new(first, last).find(|ip| {
        !reserved.contains(&to_canonical(ip))
            && !rule.skip(ip)
            && !excluded.iter().any(|subnet| subnet.contains(ip))
    });

    let ip = candidate.ok_or(Error::AllocationExhausted {
        first,
        last,
        network: request.ip_net,
    })?;
    debug!(%ip, hostname = %request.hostname, "assigned address");

    let mut reservations = request.role_reservations.clone();
    reservations.push(IpReservation {
        hostname: request.hostname.clone(),
        ip: ip.to_string(),
        vip: request.vip,
        deleted: request.deleted,
    });

    Ok(Allocation {
        address: IpNet::new(ip, request.ip_net.prefix_len())?,
        reservations,
    })
}

/// Normalize the reservation list into a set of canonical address values.
///
/// Entries whose address text does not parse are treated as unmatched:
/// they can never block a candidate, but they are logged rather than
/// dropped without trace.
fn reserved_set(reservations: &[IpReservation]) -> HashSet<u128> {
    let mut reserved = HashSet::with_capacity(reservations.len());
    for r in reservations {
        match r.ip.parse::<IpAddr>() {
            Ok(ip) => {
                reserved.insert(to_canonical(&ip));
            }
            Err(_) => {
                warn!(hostname = %r.hostname, ip = %r.ip, "unparsable reservation address, treating as unmatched");
            }
        }
    }
    reserved
}
