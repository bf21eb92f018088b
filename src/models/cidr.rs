//! Address block (CIDR) support for IPv4 and IPv6.
//!
//! Provides [`AddressBlock`] along with the bit-math helpers used by the
//! address planner. All arithmetic is done on `u128` so both families share
//! one code path.

use crate::error::{PlanError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for an IPv4 block.
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 block.
pub const MAX_LENGTH_V6: u8 = 128;

/// Prefix width of the address family of `addr`.
pub fn max_length(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => MAX_LENGTH_V4,
        IpAddr::V6(_) => MAX_LENGTH_V6,
    }
}

pub fn addr_to_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u32::from(v4) as u128,
        IpAddr::V6(v6) => u128::from(v6),
    }
}

/// Convert bits back to an address of the same family as `family`.
pub fn bits_to_addr(bits: u128, family: IpAddr) -> IpAddr {
    match family {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// Highest offset inside a block with `host_bits` host bits (block size - 1).
///
/// Always representable, unlike the block size of a `/0` IPv6 block.
pub fn last_offset(host_bits: u8) -> u128 {
    if host_bits == 0 {
        0
    } else {
        u128::MAX >> (128 - host_bits as u32)
    }
}

/// Network mask for `len` within a family of `width` bits.
///
/// # Examples
/// ```
/// use vpc_topology::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24, 32).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8, width: u8) -> Result<u128> {
    if len > width {
        return Err(PlanError::InvalidCidr(format!(
            "Network length /{len} is too long (max /{width})"
        )));
    }
    let family_bits = last_offset(width);
    Ok(family_bits & !last_offset(width - len))
}

/// A contiguous range of addresses: base address plus prefix length.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct AddressBlock {
    /// The base address.
    pub addr: IpAddr,
    /// The prefix length (0-32 for IPv4, 0-128 for IPv6).
    pub mask: u8,
}

impl AddressBlock {
    /// Create a new [`AddressBlock`] from a CIDR string (e.g., "10.0.0.0/16").
    pub fn new(addr_cidr: &str) -> Result<AddressBlock> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| PlanError::InvalidCidr(format!("Missing prefix length: {addr_cidr}")))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| PlanError::InvalidCidr(format!("Invalid address {addr}")))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| PlanError::InvalidCidr(format!("Invalid prefix length {mask}")))?;
        Self::from_parts(addr, mask)
    }

    pub fn from_parts(addr: IpAddr, mask: u8) -> Result<AddressBlock> {
        let width = max_length(addr);
        if mask > width {
            return Err(PlanError::InvalidCidr(format!(
                "Network length /{mask} is too long for {addr} (max /{width})"
            )));
        }
        Ok(AddressBlock { addr, mask })
    }

    /// Prefix width of this block's address family.
    pub fn width(&self) -> u8 {
        max_length(self.addr)
    }

    pub fn is_ipv4(&self) -> bool {
        self.addr.is_ipv4()
    }

    /// Number of host bits (width - mask).
    pub fn host_bits(&self) -> u8 {
        self.width() - self.mask
    }

    /// Same block with host bits cleared.
    pub fn network(&self) -> AddressBlock {
        AddressBlock {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    /// Get the lowest (network) address in the block.
    pub fn lo(&self) -> IpAddr {
        let mask = get_cidr_mask(self.mask, self.width()).unwrap_or(0);
        bits_to_addr(addr_to_bits(self.addr) & mask, self.addr)
    }

    /// Get the highest (broadcast) address in the block.
    pub fn hi(&self) -> IpAddr {
        let bits = addr_to_bits(self.lo()) | last_offset(self.host_bits());
        bits_to_addr(bits, self.addr)
    }

    /// Number of addresses in the block, `None` for a full IPv6 `/0`.
    pub fn num_addresses(&self) -> Option<u128> {
        last_offset(self.host_bits()).checked_add(1)
    }

    /// True when `other` lies entirely within this block.
    pub fn contains(&self, other: &AddressBlock) -> bool {
        self.is_ipv4() == other.is_ipv4()
            && other.mask >= self.mask
            && addr_to_bits(self.lo()) <= addr_to_bits(other.lo())
            && addr_to_bits(other.hi()) <= addr_to_bits(self.hi())
    }

    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        self.is_ipv4() == other.is_ipv4()
            && addr_to_bits(self.lo()) <= addr_to_bits(other.hi())
            && addr_to_bits(other.lo()) <= addr_to_bits(self.hi())
    }
}

impl FromStr for AddressBlock {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        AddressBlock::new(s)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AddressBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<AddressBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressBlock::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl std::fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for AddressBlock {
    fn eq(&self, other: &AddressBlock) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for AddressBlock {
    fn partial_cmp(&self, other: &AddressBlock) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
