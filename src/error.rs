//! Error types for address allocation

use ipnet::IpNet;
use std::net::IpAddr;
use thiserror::Error;

/// Result type for allocation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Allocation engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The network mask leaves fewer than 2 host bits, so no usable range
    /// exists once the network and broadcast addresses are removed.
    /// A configuration defect; retrying with the same mask cannot succeed.
    #[error("net mask is too short, must leave 2 or more host bits: {host_bits}")]
    RangeTooSmall { host_bits: u32 },

    /// Every address between `first` and `last` was reserved, excluded or
    /// structurally skipped.
    #[error("could not allocate IP in range: ip: {first} - {last} / range: {network}")]
    AllocationExhausted {
        first: IpAddr,
        last: IpAddr,
        network: IpNet,
    },

    #[error("invalid CIDR: {0}")]
    InvalidCidr(String),
}

impl From<ipnet::PrefixLenError> for Error {
    fn from(e: ipnet::PrefixLenError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}

impl From<ipnet::AddrParseError> for Error {
    fn from(e: ipnet::AddrParseError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}

impl From<std::net::AddrParseError> for Error {
    fn from(e: std::net::AddrParseError) -> Self {
        Error::InvalidCidr(e.to_string())
    }
}
