//! IP Address Allocation Engine
//!
//! Deterministic next-free-address selection over a network range:
//! - Dual-stack (IPv4/IPv6) arithmetic on one canonical 128-bit path
//! - Usable-range resolution excluding network and broadcast addresses
//! - First-fit iteration filtered by reservations, a pluggable structural
//!   skip rule and excluded CIDR sub-ranges
//!
//! The engine is a pure synchronous computation: the caller owns the
//! reservation list, supplies it on every call and receives an updated
//! copy back on success. Serializing competing allocation attempts and
//! persisting the returned list between calls are the caller's job.

pub mod addr;
pub mod allocator;
pub mod error;
pub mod models;
pub mod range;

// Re-export core types
pub use addr::{from_canonical, to_canonical, IpFamily};
pub use allocator::{allocate, allocate_with, SkipRule, ZeroFinalByte};
pub use error::{Error, Result};
pub use models::{Allocation, AllocationRequest, IpReservation};
pub use range::{cidr_parts, resolve_range, HostRange};
