// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::iter::FusedIterator;

use crate::hash::fnv1_32;
use crate::hash::murmurhash3_x86_32;

/// Maps a key to `num_hashes` bit positions in a filter of `num_bits` bits.
///
/// Two base digests are computed once per key:
/// - `h1` = MurmurHash3 x86_32 of the key with the filter seed
/// - `h2` = FNV-1 32 of the key
///
/// and combined with a quadratic perturbation of the Kirsch-Mitzenmacher construction:
///
/// ```text
/// position_i = (h1 + i * h2 + i * i) mod num_bits,  i in 0..num_hashes
/// ```
///
/// The sum is taken in wrapping 32-bit arithmetic before the reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashFamily {
    seed: u32,
    num_hashes: u32,
    num_bits: u32,
}

impl HashFamily {
    /// Creates the family. `num_bits` and `num_hashes` must both be positive.
    pub(crate) fn new(seed: u32, num_hashes: u32, num_bits: u32) -> Self {
        debug_assert!(num_bits > 0 && num_hashes > 0);
        HashFamily {
            seed,
            num_hashes,
            num_bits,
        }
    }

    /// Returns the seed of the primary digest.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the number of positions produced per key.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the modulus of every position.
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Returns the bit positions of `key`, in order of `i`.
    ///
    /// The result depends only on `(key, seed, num_hashes, num_bits)`.
    pub fn positions(&self, key: &[u8]) -> Positions {
        Positions {
            h1: murmurhash3_x86_32(key, self.seed),
            h2: fnv1_32(key),
            num_bits: self.num_bits,
            next: 0,
            end: self.num_hashes,
        }
    }
}

/// Iterator over the bit positions of one key. See [`HashFamily::positions`].
#[derive(Debug, Clone)]
pub struct Positions {
    h1: u32,
    h2: u32,
    num_bits: u32,
    next: u32,
    end: u32,
}

impl Positions {
    #[inline]
    fn position_at(&self, i: u32) -> u32 {
        let hash = self
            .h1
            .wrapping_add(i.wrapping_mul(self.h2))
            .wrapping_add(i.wrapping_mul(i));
        hash % self.num_bits
    }
}

impl Iterator for Positions {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next == self.end {
            return None;
        }
        let position = self.position_at(self.next);
        self.next += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.end - self.next) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_in_range_and_sized() {
        let family = HashFamily::new(42, 10, 1438);
        let positions = family.positions(&[1, 2, 3, 4]);
        assert_eq!(positions.len(), 10);
        for p in positions {
            assert!(p < 1438);
        }
    }

    #[test]
    fn test_reference_positions() {
        let family = HashFamily::new(42, 10, 1438);
        let positions: Vec<u32> = family.positions(&[0]).collect();
        assert_eq!(
            positions,
            vec![1364, 954, 546, 140, 1174, 772, 372, 748, 352, 1396]
        );
    }

    #[test]
    fn test_first_position_is_primary_digest() {
        let family = HashFamily::new(7, 3, u32::MAX);
        let key = b"The quick brown fox";
        let first = family.positions(key).next().unwrap();
        assert_eq!(first, murmurhash3_x86_32(key, 7) % u32::MAX);
    }

    #[test]
    fn test_deterministic() {
        let family = HashFamily::new(9001, 7, 959);
        let a: Vec<u32> = family.positions(b"apple").collect();
        let b: Vec<u32> = family.positions(b"apple").collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_positions() {
        let a: Vec<u32> = HashFamily::new(1, 7, 959).positions(b"apple").collect();
        let b: Vec<u32> = HashFamily::new(2, 7, 959).positions(b"apple").collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_each_index_bound_independently() {
        // with h1 = h2 = 0 only the quadratic term remains
        let positions = Positions {
            h1: 0,
            h2: 0,
            num_bits: 1000,
            next: 0,
            end: 5,
        };
        assert_eq!(positions.collect::<Vec<_>>(), vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_next_yields_position_at_each_index() {
        let family = HashFamily::new(42, 10, 1438);
        let positions = family.positions(b"kiwi");
        let expected: Vec<u32> = (0..10).map(|i| positions.position_at(i)).collect();
        assert_eq!(positions.collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_empty_key() {
        let family = HashFamily::new(0, 4, 64);
        assert_eq!(family.positions(b"").count(), 4);
    }
}
