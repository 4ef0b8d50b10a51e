//! End-to-end allocation scenarios
//!
//! Exercises the engine through its public surface only: repeated
//! allocations threading the returned reservation list back in, the
//! interplay of the three candidate filters, and the failure modes.

use ipam_engine::{
    allocate, cidr_parts, resolve_range, AllocationRequest, Error, IpReservation,
};
use ipnet::IpNet;
use std::net::IpAddr;
use std::str::FromStr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn base_request(net: &str, hostname: &str) -> AllocationRequest {
    let ip_net = IpNet::from_str(net).unwrap();
    AllocationRequest {
        ip_net,
        range_start: ip_net.network(),
        range_end: None,
        reservations: Vec::new(),
        role_reservations: Vec::new(),
        exclude_ranges: Vec::new(),
        hostname: hostname.to_string(),
        vip: false,
        deleted: false,
    }
}

// ============================================================================
// Sequential allocation flows
// ============================================================================

#[test]
fn test_sequential_allocations_thread_the_returned_list() {
    let mut reservations: Vec<IpReservation> = Vec::new();

    for (index, hostname) in ["compute-0", "compute-1", "compute-2"].iter().enumerate() {
        let mut request = base_request("192.168.25.0/24", hostname);
        request.reservations = reservations.clone();
        request.role_reservations = reservations.clone();

        let allocation = allocate(&request).unwrap();
        assert_eq!(
            allocation.address.addr(),
            ip(&format!("192.168.25.{}", index + 1))
        );
        reservations = allocation.reservations;
    }

    assert_eq!(reservations.len(), 3);
    assert_eq!(reservations[0].hostname, "compute-0");
    assert_eq!(reservations[2].ip, "192.168.25.3");
}

#[test]
fn test_full_list_filters_even_outside_the_role() {
    // An address reserved by another role blocks the candidate, but the
    // returned list only grows the requesting role's entries.
    let mut request = base_request("192.168.25.0/24", "compute-0");
    request.reservations = vec![IpReservation {
        hostname: "controller-0".to_string(),
        ip: "192.168.25.1".to_string(),
        vip: false,
        deleted: false,
    }];

    let allocation = allocate(&request).unwrap();
    assert_eq!(allocation.address.addr(), ip("192.168.25.2"));
    assert_eq!(allocation.reservations.len(), 1);
    assert_eq!(allocation.reservations[0].hostname, "compute-0");
}

#[test]
fn test_all_filters_together() {
    let mut request = base_request("10.0.0.0/24", "compute-0");
    request.reservations = vec![IpReservation {
        hostname: "controller-0".to_string(),
        ip: "10.0.0.1".to_string(),
        vip: true,
        deleted: false,
    }];
    request.exclude_ranges = vec!["10.0.0.0/29".to_string()];

    // .1 reserved, .2-.7 excluded by the /29, .8 is the first survivor.
    let allocation = allocate(&request).unwrap();
    assert_eq!(allocation.address.addr(), ip("10.0.0.8"));
}

#[test]
fn test_mid_range_start_is_respected() {
    let mut request = base_request("192.168.25.0/24", "compute-0");
    request.range_start = ip("192.168.25.200");

    let allocation = allocate(&request).unwrap();
    assert_eq!(allocation.address.addr(), ip("192.168.25.200"));
}

#[test]
fn test_v6_flow() {
    let mut request = base_request("fd00:abcd::/120", "compute-0");
    request.reservations = vec![IpReservation {
        hostname: "controller-0".to_string(),
        ip: "fd00:abcd::1".to_string(),
        vip: false,
        deleted: false,
    }];

    let allocation = allocate(&request).unwrap();
    assert_eq!(allocation.address.addr(), ip("fd00:abcd::2"));
    assert_eq!(allocation.address.prefix_len(), 120);
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_exhaustion_reports_attempted_bounds() {
    let mut request = base_request("192.168.25.0/30", "compute-0");
    request.reservations = vec![
        IpReservation {
            hostname: "a".to_string(),
            ip: "192.168.25.1".to_string(),
            vip: false,
            deleted: false,
        },
        IpReservation {
            hostname: "b".to_string(),
            ip: "192.168.25.2".to_string(),
            vip: false,
            deleted: false,
        },
    ];

    match allocate(&request).unwrap_err() {
        Error::AllocationExhausted {
            first,
            last,
            network,
        } => {
            assert_eq!(first, ip("192.168.25.1"));
            assert_eq!(last, ip("192.168.25.2"));
            assert_eq!(network, request.ip_net);
        }
        other => panic!("expected AllocationExhausted, got {:?}", other),
    }
}

#[test]
fn test_undersized_mask_is_a_configuration_defect() {
    let request = base_request("192.168.25.0/31", "compute-0");
    assert_eq!(
        allocate(&request).unwrap_err(),
        Error::RangeTooSmall { host_bits: 1 }
    );
}

// ============================================================================
// Helper surface
// ============================================================================

#[test]
fn test_cidr_parts_matches_resolver_input() {
    let (addr, prefix) = cidr_parts("192.168.25.0/24").unwrap();
    let network = IpNet::from_str(&format!("{}/{}", addr, prefix)).unwrap();

    let (first, last) = resolve_range(ip(&addr), network).unwrap();
    assert_eq!(first, ip("192.168.25.1"));
    assert_eq!(last, ip("192.168.25.254"));
}
