//! Address planning: carve a parent block into child blocks.

use crate::error::{PlanError, Result};
use crate::models::{addr_to_bits, bits_to_addr, last_offset, AddressBlock};

/// Partition `parent` into one child block per requested prefix length.
///
/// Children are allocated contiguously in request order. Each child starts at
/// the first boundary of its own size at or after the end of the previous
/// child, so mixed sizes may leave alignment gaps but never overlap.
///
/// # Errors
/// * [`PlanError::InvalidCidr`] - a prefix is longer than the address family allows
/// * [`PlanError::AddressSpaceExhausted`] - the children do not fit in `parent`
pub fn partition(parent: &AddressBlock, requests: &[u8]) -> Result<Vec<AddressBlock>> {
    let parent = parent.network();
    let width = parent.width();
    let parent_last = last_offset(parent.host_bits());
    let base = addr_to_bits(parent.addr);

    let exhausted = |requested: u8, index: usize| PlanError::AddressSpaceExhausted {
        parent: parent.to_string(),
        requested,
        index,
    };

    // Offset of the next free address; `None` once the parent is full.
    let mut cursor: Option<u128> = Some(0);
    let mut children = Vec::with_capacity(requests.len());

    for (index, &mask) in requests.iter().enumerate() {
        if mask > width {
            return Err(PlanError::InvalidCidr(format!(
                "Child prefix /{mask} is too long for {parent} (max /{width})"
            )));
        }
        if mask < parent.mask {
            return Err(exhausted(mask, index));
        }
        let next = cursor.ok_or_else(|| exhausted(mask, index))?;

        let child_last = last_offset(width - mask);
        let start = next
            .checked_add(child_last)
            .map(|v| v & !child_last)
            .ok_or_else(|| exhausted(mask, index))?;
        let end = start
            .checked_add(child_last)
            .filter(|end| *end <= parent_last)
            .ok_or_else(|| exhausted(mask, index))?;

        log::trace!("partition: request #{index} /{mask} -> offset {start}..={end}");
        children.push(AddressBlock {
            addr: bits_to_addr(base + start, parent.addr),
            mask,
        });
        cursor = end.checked_add(1);
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> AddressBlock {
        AddressBlock::new(s).unwrap()
    }

    fn assert_valid_partition(parent: &AddressBlock, children: &[AddressBlock]) {
        for (i, a) in children.iter().enumerate() {
            assert!(parent.contains(a), "{a} not inside {parent}");
            for b in children.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "{a} overlaps {b}");
            }
        }
        let total: u128 = children.iter().map(|c| c.num_addresses().unwrap()).sum();
        assert!(total <= parent.num_addresses().unwrap());
    }

    #[test]
    fn test_partition_contiguous_24s() {
        let parent = block("10.0.0.0/16");
        let children = partition(&parent, &[24, 24, 24, 24]).unwrap();
        let cidrs: Vec<String> = children.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            cidrs,
            vec!["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24", "10.0.3.0/24"]
        );
        assert_valid_partition(&parent, &children);
    }

    #[test]
    fn test_partition_exact_fit() {
        // A /p parent holds exactly 2^(p'-p) children of /p'.
        let parent = block("10.0.0.0/22");
        let children = partition(&parent, &[24; 4]).unwrap();
        assert_eq!(children.last().unwrap().to_string(), "10.0.3.0/24");
        assert_valid_partition(&parent, &children);

        let err = partition(&parent, &[24; 5]).unwrap_err();
        assert_eq!(
            err,
            PlanError::AddressSpaceExhausted {
                parent: "10.0.0.0/22".to_string(),
                requested: 24,
                index: 4,
            }
        );
    }

    #[test]
    fn test_partition_aligns_mixed_sizes() {
        let parent = block("10.0.0.0/16");
        let children = partition(&parent, &[28, 24, 26, 26, 23]).unwrap();
        let cidrs: Vec<String> = children.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            cidrs,
            vec![
                "10.0.0.0/28",
                "10.0.1.0/24",
                "10.0.2.0/26",
                "10.0.2.64/26",
                "10.0.4.0/23",
            ]
        );
        assert_valid_partition(&parent, &children);
    }

    #[test]
    fn test_partition_child_larger_than_parent() {
        let err = partition(&block("10.0.0.0/24"), &[23]).unwrap_err();
        assert!(matches!(
            err,
            PlanError::AddressSpaceExhausted { requested: 23, index: 0, .. }
        ));
    }

    #[test]
    fn test_partition_invalid_prefix() {
        let err = partition(&block("10.0.0.0/24"), &[33]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidCidr(_)));
    }

    #[test]
    fn test_partition_normalizes_parent_and_fills_to_top() {
        let parent = block("10.0.0.77/30");
        let children = partition(&parent, &[32, 32, 32, 32]).unwrap();
        assert_eq!(children[0].to_string(), "10.0.0.76/32");
        assert_eq!(children[3].to_string(), "10.0.0.79/32");
        assert!(partition(&parent, &[32; 5]).is_err());

        let whole = partition(&block("0.0.0.0/0"), &[1, 1]).unwrap();
        assert_eq!(whole[1].to_string(), "128.0.0.0/1");
        assert!(partition(&block("0.0.0.0/0"), &[1, 1, 1]).is_err());
    }

    #[test]
    fn test_partition_ipv6() {
        let parent = block("2001:db8::/56");
        let children = partition(&parent, &[64, 64, 64]).unwrap();
        assert_eq!(children[0].to_string(), "2001:db8::/64");
        assert_eq!(children[2].to_string(), "2001:db8:0:2::/64");
        assert_valid_partition(&parent, &children);

        let whole = partition(&block("::/0"), &[0]).unwrap();
        assert_eq!(whole[0].to_string(), "::/0");
        assert!(partition(&block("::/0"), &[0, 1]).is_err());
    }

    #[test]
    fn test_partition_empty_request() {
        assert!(partition(&block("10.0.0.0/16"), &[]).unwrap().is_empty());
    }
}
