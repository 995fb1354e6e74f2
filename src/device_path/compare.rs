// SPDX-License-Identifier: MIT OR Apache-2.0

//! Total order over device paths.
//!
//! Paths are compared node by node. For the first pair of nodes that
//! differ, the result is decided by, in this order:
//!
//! 1. the node type, where the *larger* type sorts first,
//! 2. the sub-type, ascending,
//! 3. the node length, ascending,
//! 4. the raw node bytes, compared like `memcmp`.
//!
//! Two paths are equal only if every node up to and including the
//! end-entire node is equal. Since the end node has the largest type, a
//! path sorts before every longer path it is a prefix of.
//!
//! The same comparison decides both the order of the drive lists and
//! whether two devices are duplicates, so drive numbers depend on it.

use super::DevicePath;
use core::cmp::Ordering;

/// Compare two device paths.
#[must_use]
pub fn compare(a: &DevicePath, b: &DevicePath) -> Ordering {
    for (node_a, node_b) in a.all_nodes_iter().zip(b.all_nodes_iter()) {
        let ordering = node_b
            .device_type()
            .cmp(&node_a.device_type())
            .then_with(|| node_a.sub_type().cmp(&node_b.sub_type()))
            .then_with(|| node_a.length().cmp(&node_b.length()))
            .then_with(|| node_a.as_bytes().cmp(node_b.as_bytes()));
        if ordering != Ordering::Equal {
            return ordering;
        }
        if node_a.is_end_entire() {
            break;
        }
    }
    Ordering::Equal
}

/// Compare two device paths that may be absent.
///
/// An absent path is incomparable with everything, including another
/// absent path, so it never matches anything.
#[must_use]
pub fn compare_optional(a: Option<&DevicePath>, b: Option<&DevicePath>) -> Option<Ordering> {
    Some(compare(a?, b?))
}

/// True if the two paths are equal under [`compare`].
#[must_use]
pub fn paths_equal(a: &DevicePath, b: &DevicePath) -> bool {
    compare(a, b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_path::DevicePathHeader;
    use alloc::vec::Vec;

    fn path(nodes: &[(u8, u8, &[u8])]) -> Vec<u8> {
        let mut raw = Vec::new();
        for &(device_type, sub_type, data) in nodes {
            raw.extend([device_type, sub_type]);
            raw.extend(u16::try_from(4 + data.len()).unwrap().to_le_bytes());
            raw.extend(data);
        }
        raw.extend(DevicePathHeader::END_ENTIRE.to_bytes());
        raw
    }

    fn cmp(a: &[u8], b: &[u8]) -> Ordering {
        compare(
            DevicePath::from_bytes(a).unwrap(),
            DevicePath::from_bytes(b).unwrap(),
        )
    }

    #[test]
    fn test_duplicate_compares_equal() {
        let raw = path(&[(1, 1, &[0, 2]), (3, 18, &[1, 0, 0xff, 0xff, 0, 0])]);
        let dp = DevicePath::from_bytes(&raw).unwrap();
        assert_eq!(compare(&dp.duplicate().unwrap(), dp), Ordering::Equal);
        assert!(paths_equal(dp, dp));
    }

    #[test]
    fn test_larger_type_sorts_first() {
        let messaging = path(&[(3, 1, &[0])]);
        let acpi = path(&[(2, 1, &[0])]);
        assert_eq!(cmp(&messaging, &acpi), Ordering::Less);
        assert_eq!(cmp(&acpi, &messaging), Ordering::Greater);
    }

    #[test]
    fn test_key_precedence() {
        // Type dominates sub-type.
        assert_eq!(
            cmp(&path(&[(3, 9, &[])]), &path(&[(2, 1, &[])])),
            Ordering::Less
        );
        // Sub-type dominates length.
        assert_eq!(
            cmp(&path(&[(3, 1, &[0, 0, 0])]), &path(&[(3, 2, &[])])),
            Ordering::Less
        );
        // Length dominates payload.
        assert_eq!(
            cmp(&path(&[(3, 1, &[9])]), &path(&[(3, 1, &[0, 0])])),
            Ordering::Less
        );
        // Payload decides last.
        assert_eq!(
            cmp(&path(&[(3, 1, &[1, 2])]), &path(&[(3, 1, &[1, 3])])),
            Ordering::Less
        );
    }

    #[test]
    fn test_prefix_sorts_first() {
        let disk = path(&[(1, 1, &[0, 2])]);
        let partition = path(&[(1, 1, &[0, 2]), (4, 1, &[7; 38])]);
        assert_eq!(cmp(&disk, &partition), Ordering::Less);
        assert_eq!(cmp(&partition, &disk), Ordering::Greater);
    }

    #[test]
    fn test_first_difference_wins() {
        let a = path(&[(1, 1, &[0, 1]), (3, 5, &[9, 9])]);
        let b = path(&[(1, 1, &[0, 2]), (3, 1, &[0, 0])]);
        assert_eq!(cmp(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_transitive() {
        let paths = [
            path(&[(3, 1, &[1])]),
            path(&[(3, 1, &[2])]),
            path(&[(3, 2, &[])]),
            path(&[(2, 1, &[0; 8])]),
            path(&[(1, 1, &[0, 1])]),
        ];
        for i in 0..paths.len() {
            for j in 0..paths.len() {
                assert_eq!(cmp(&paths[i], &paths[j]), i.cmp(&j), "{i} vs {j}");
            }
        }
    }

    #[test]
    fn test_absent_paths_never_match() {
        let raw = path(&[(3, 1, &[1])]);
        let dp = DevicePath::from_bytes(&raw).unwrap();
        assert_eq!(compare_optional(None, Some(dp)), None);
        assert_eq!(compare_optional(Some(dp), None), None);
        assert_eq!(compare_optional(None, None), None);
        assert_eq!(compare_optional(Some(dp), Some(dp)), Some(Ordering::Equal));
    }
}
