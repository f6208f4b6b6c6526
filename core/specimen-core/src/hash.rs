//! Name hashing and bucketed lookup over link / font set entries.
//!
//! Consumers hash a candidate name, binary search the sorted bucket list and
//! compare full strings for the few entries in the bucket. Collisions are
//! expected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::link::NamedIndices;

/// Modulus of [`hash_code`]; every code is below it.
pub const HASH_PRIME: u32 = 1777;

/// Nominal upper bound on the number of distinct buckets. Only used to size
/// the bucket map while building.
pub const HASH_SIZE_HINT: usize = 2100;

/// Hash of the UTF-8 bytes of `key`. The empty key hashes to 0.
pub fn hash_code(key: &str) -> u32 {
    let mut bytes = key.bytes();
    let Some(first) = bytes.next() else {
        return 0;
    };
    bytes.fold(u32::from(first), |h, b| (2 * h + u32::from(b)) % HASH_PRIME)
}

/// Entry positions sharing one hash code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashBucket {
    pub key: u32,
    pub vals: Vec<usize>,
}

/// Bucket the positions of `entries` by the hash of their name, sorted by key.
pub fn build_buckets(entries: &[NamedIndices]) -> Vec<HashBucket> {
    let mut buckets: HashMap<u32, Vec<usize>> =
        HashMap::with_capacity(entries.len().min(HASH_SIZE_HINT));
    for (position, entry) in entries.iter().enumerate() {
        buckets
            .entry(hash_code(&entry.name))
            .or_default()
            .push(position);
    }

    let mut buckets: Vec<HashBucket> = buckets
        .into_iter()
        .map(|(key, vals)| HashBucket { key, vals })
        .collect();
    buckets.sort_unstable_by_key(|bucket| bucket.key);
    buckets
}

/// Find the entry called `name` through its hash bucket.
pub fn lookup<'a>(
    buckets: &[HashBucket],
    entries: &'a [NamedIndices],
    name: &str,
) -> Option<&'a NamedIndices> {
    let code = hash_code(name);
    let bucket = buckets
        .binary_search_by_key(&code, |bucket| bucket.key)
        .ok()
        .map(|at| &buckets[at])?;

    bucket
        .vals
        .iter()
        .filter_map(|&position| entries.get(position))
        .find(|entry| entry.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> NamedIndices {
        NamedIndices {
            name: name.to_string(),
            inst: vec![0],
        }
    }

    #[test]
    fn hashes_known_values() {
        assert_eq!(hash_code("A"), 65);
        // 2 * 65 + 66
        assert_eq!(hash_code("AB"), 196);
        assert_eq!(hash_code(""), 0);
        // long keys wrap below the prime
        assert!(hash_code(&"z".repeat(64)) < HASH_PRIME);
    }

    #[test]
    fn buckets_are_sorted_and_keep_list_order() {
        // "AB" and "B@" collide: 2*65+66 == 2*66+64
        let entries = vec![entry("B@"), entry("A"), entry("AB")];
        let buckets = build_buckets(&entries);

        assert_eq!(
            buckets,
            vec![
                HashBucket { key: 65, vals: vec![1] },
                HashBucket {
                    key: 196,
                    vals: vec![0, 2],
                },
            ]
        );
    }

    #[test]
    fn lookup_resolves_collisions_by_name() {
        let entries = vec![entry("B@"), entry("A"), entry("AB")];
        let buckets = build_buckets(&entries);

        assert_eq!(lookup(&buckets, &entries, "AB"), Some(&entries[2]));
        assert_eq!(lookup(&buckets, &entries, "B@"), Some(&entries[0]));
        assert_eq!(lookup(&buckets, &entries, "C"), None);
    }
}
