//! Allocation request and reservation models

use ipnet::IpNet;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// One reserved address.
///
/// Reservations are owned by the caller: the engine reads existing entries
/// and appends new ones, it never mutates or removes them. The address is
/// kept in text form; comparisons run through the canonical codec so
/// textual formatting differences cannot cause a missed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpReservation {
    /// Host this address is reserved for
    pub hostname: String,
    /// Reserved address in text form
    pub ip: String,
    /// Whether the reservation is a virtual IP rather than a host address
    pub vip: bool,
    /// Logical-deletion marker carried through from the caller
    pub deleted: bool,
}

/// Everything one allocation attempt needs.
///
/// Constructed fresh by the caller per attempt and only borrowed by the
/// engine; none of the lists are modified in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Network to allocate from (address + prefix length)
    pub ip_net: IpNet,
    /// Start of the allocation range
    pub range_start: IpAddr,
    /// Explicit end of the range; when absent the usable range of
    /// `ip_net` is resolved instead
    pub range_end: Option<IpAddr>,
    /// All reservations, across every role
    pub reservations: Vec<IpReservation>,
    /// Reservations scoped to the role being allocated for; the new entry
    /// is appended to a copy of this list
    pub role_reservations: Vec<IpReservation>,
    /// CIDR sub-ranges whose addresses are never eligible
    pub exclude_ranges: Vec<String>,
    /// Host the new reservation is recorded for
    pub hostname: String,
    /// Role flag recorded on the new reservation
    pub vip: bool,
    /// Deletion flag recorded on the new reservation
    pub deleted: bool,
}

/// A successful allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    /// The allocated address carrying the request's prefix length
    pub address: IpNet,
    /// The role-scoped reservation list with the new entry appended; this
    /// becomes the caller's source of truth for the next attempt
    pub reservations: Vec<IpReservation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_serde_round_trip() {
        let reservation = IpReservation {
            hostname: "controller-0".to_string(),
            ip: "192.168.25.20".to_string(),
            vip: false,
            deleted: false,
        };

        let json = serde_json::to_string(&reservation).unwrap();
        let back: IpReservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reservation);
    }

    #[test]
    fn test_request_deserializes_without_range_end() {
        let request: AllocationRequest = serde_json::from_value(serde_json::json!({
            "ip_net": "192.168.25.0/24",
            "range_start": "192.168.25.0",
            "range_end": null,
            "reservations": [],
            "role_reservations": [],
            "exclude_ranges": [],
            "hostname": "compute-0",
            "vip": false,
            "deleted": false,
        }))
        .unwrap();

        assert!(request.range_end.is_none());
        assert_eq!(request.ip_net.prefix_len(), 24);
    }
}
