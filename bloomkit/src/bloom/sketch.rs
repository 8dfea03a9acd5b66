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

use super::BitArray;
use super::BloomFilterBuilder;
use super::FilterParams;
use super::HashFamily;
use super::Positions;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::codec::family::Family;
use crate::error::Error;

const SERIAL_VERSION: u8 = 1;
const EMPTY_FLAG_MASK: u8 = 1 << 2;

/// A Bloom filter for probabilistic set membership testing over byte keys.
///
/// Provides membership queries with:
/// - No false negatives (inserted keys always return `true`)
/// - A false positive rate bounded by the tolerance while at most `capacity` keys are inserted
/// - Constant space usage, fixed at construction
///
/// Use [`BloomFilter::new`] or [`BloomFilterBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    /// Intended maximum number of keys, informational only
    capacity: u64,
    /// Number of inserts that set at least one bit
    count: u64,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    hashes: HashFamily,
    bits: BitArray,
}

impl BloomFilter {
    /// Creates a filter sized for `capacity` keys at false positive `tolerance`.
    ///
    /// Equivalent to `BloomFilterBuilder::with_accuracy(capacity, tolerance).seed(seed).build()`.
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0, `tolerance` is outside (0, 1), or the derived bit
    /// length exceeds `u32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomkit::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.001, 42).unwrap();
    /// filter.insert([1, 2, 3, 4]);
    /// assert!(filter.contains([1, 2, 3, 4]));
    /// ```
    pub fn new(capacity: u64, tolerance: f64, seed: u32) -> Result<Self, Error> {
        BloomFilterBuilder::with_accuracy(capacity, tolerance)
            .seed(seed)
            .build()
    }

    pub(super) fn from_params(capacity: u64, seed: u32, params: FilterParams) -> Self {
        BloomFilter {
            capacity,
            count: 0,
            num_bits_set: 0,
            hashes: HashFamily::new(seed, params.num_hashes, params.num_bits),
            bits: BitArray::new(params.num_bits),
        }
    }

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: key was **possibly** inserted (or false positive)
    /// - `false`: key was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomkit::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01, 9001).unwrap();
    /// filter.insert("apple");
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(!filter.contains("grape"));
    /// ```
    pub fn contains<K: AsRef<[u8]>>(&self, key: K) -> bool {
        if self.num_bits_set == 0 {
            return false;
        }
        self.positions(key)
            .all(|position| self.bits.get_in_range(position))
    }

    /// Inserts a key into the filter.
    ///
    /// After insertion, `contains(key)` will always return `true`. The insert count only grows
    /// when at least one of the key's bits was previously unset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomkit::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01, 9001).unwrap();
    /// filter.insert("apple");
    /// filter.insert(b"\x00\x01");
    /// filter.insert(b"");
    ///
    /// assert!(filter.contains("apple"));
    /// assert_eq!(filter.count(), 3);
    /// ```
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K) {
        self.insert_key(key.as_ref());
    }

    /// Tests and inserts a key in a single operation.
    ///
    /// Returns whether the key was possibly already in the set before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomkit::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01, 9001).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple")); // first insertion
    /// assert!(filter.contains_and_insert("apple")); // now it's in the set
    /// ```
    pub fn contains_and_insert<K: AsRef<[u8]>>(&mut self, key: K) -> bool {
        !self.insert_key(key.as_ref())
    }

    /// Sets every bit of `key`, returning whether any of them changed.
    fn insert_key(&mut self, key: &[u8]) -> bool {
        let mut changed = false;
        for position in self.hashes.positions(key) {
            if self.bits.set_in_range(position) {
                self.num_bits_set += 1;
                changed = true;
            }
        }

        if changed {
            self.count += 1;
            if self.count - 1 == self.capacity {
                log::warn!(
                    "bloom filter exceeded its capacity of {} items; false positive rate is now above the target",
                    self.capacity
                );
            }
        }
        changed
    }

    /// Returns the bit positions `key` maps to.
    pub fn positions<K: AsRef<[u8]>>(&self, key: K) -> Positions {
        self.hashes.positions(key.as_ref())
    }

    /// Estimates the false positive probability from the insert count.
    ///
    /// Formula: `(1 - e^(-k * n / m))^k`
    /// where:
    /// - k = num_hashes
    /// - n = count of inserted keys
    /// - m = num_bits
    ///
    /// Grows monotonically with the number of inserted keys.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        let k = f64::from(self.num_hashes());
        let n = self.count as f64;
        let m = f64::from(self.num_bits());
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Returns whether no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the intended maximum number of keys.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the number of inserts that set at least one new bit.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the hash seed.
    pub fn seed(&self) -> u32 {
        self.hashes.seed()
    }

    /// Returns the total number of bits in the filter.
    pub fn num_bits(&self) -> u32 {
        self.bits.len()
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.hashes.num_hashes()
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values above 0.5 indicate the filter holds more keys than it was sized for.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / f64::from(self.num_bits())
    }

    /// Returns the hash family mapping keys to bit positions.
    pub fn hash_family(&self) -> &HashFamily {
        &self.hashes
    }

    /// Returns the underlying bit array.
    pub fn bit_array(&self) -> &BitArray {
        &self.bits
    }

    /// Serializes the filter to a byte vector.
    ///
    /// The bit array is written verbatim after a 32-byte preamble; an empty filter omits it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomkit::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01, 9001).unwrap();
    /// filter.insert("test");
    ///
    /// let bytes = filter.serialize();
    /// let restored = BloomFilter::deserialize(&bytes).unwrap();
    /// assert!(restored.contains("test"));
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        let is_empty = self.is_empty();
        let preamble_longs = Family::BLOOMFILTER.pre_longs;
        let payload = self.bits.as_bytes();

        let capacity = 8 * preamble_longs as usize + if is_empty { 0 } else { payload.len() };
        let mut bytes = SketchBytes::with_capacity(capacity);

        bytes.write_u8(preamble_longs); // Byte 0
        bytes.write_u8(SERIAL_VERSION); // Byte 1
        bytes.write_u8(Family::BLOOMFILTER.id); // Byte 2
        bytes.write_u8(if is_empty { EMPTY_FLAG_MASK } else { 0 }); // Byte 3: flags
        bytes.write_u32_le(self.num_hashes()); // Bytes 4-7
        bytes.write_u32_le(self.seed()); // Bytes 8-11
        bytes.write_u32_le(self.num_bits()); // Bytes 12-15
        bytes.write_u64_le(self.capacity); // Bytes 16-23
        bytes.write_u64_le(self.count); // Bytes 24-31

        if !is_empty {
            bytes.write(payload);
        }

        bytes.into_bytes()
    }

    /// Deserializes a filter from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data is truncated, has trailing bytes or is otherwise corrupted
    /// - The family ID doesn't match (not a Bloom filter)
    /// - The serial version is unsupported
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut cursor = SketchSlice::new(bytes);

        let preamble_longs = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("preamble_longs"))?;
        let serial_version = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("serial_version"))?;
        let family_id = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("family_id"))?;
        let flags = cursor
            .read_u8()
            .map_err(|_| Error::insufficient_data("flags"))?;

        Family::BLOOMFILTER.validate_id(family_id)?;
        if serial_version != SERIAL_VERSION {
            return Err(Error::unsupported_serial_version(
                SERIAL_VERSION,
                serial_version,
            ));
        }
        if preamble_longs != Family::BLOOMFILTER.pre_longs {
            return Err(Error::invalid_preamble_longs(
                Family::BLOOMFILTER.pre_longs,
                preamble_longs,
            ));
        }
        let is_empty = (flags & EMPTY_FLAG_MASK) != 0;

        let num_hashes = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("num_hashes"))?;
        let seed = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("seed"))?;
        let num_bits = cursor
            .read_u32_le()
            .map_err(|_| Error::insufficient_data("num_bits"))?;
        let capacity = cursor
            .read_u64_le()
            .map_err(|_| Error::insufficient_data("capacity"))?;
        let count = cursor
            .read_u64_le()
            .map_err(|_| Error::insufficient_data("count"))?;

        if num_hashes == 0 || num_bits == 0 {
            return Err(Error::deserial("num_hashes and num_bits must be positive")
                .with_context("num_hashes", num_hashes)
                .with_context("num_bits", num_bits));
        }

        let bits = if is_empty {
            if count != 0 {
                return Err(Error::deserial("empty filter with non-zero count")
                    .with_context("count", count));
            }
            BitArray::new(num_bits)
        } else {
            if count == 0 {
                return Err(Error::deserial("non-empty filter with zero count"));
            }
            let mut payload = vec![0u8; num_bits.div_ceil(8) as usize];
            cursor
                .read_exact(&mut payload)
                .map_err(|_| Error::insufficient_data("bit_array"))?;
            BitArray::from_bytes(num_bits, payload)?
        };

        if cursor.remaining() != 0 {
            return Err(Error::deserial("trailing bytes after bit array")
                .with_context("remaining", cursor.remaining()));
        }

        // every counted insert sets at least one new bit
        let num_bits_set = bits.count_ones();
        if count > num_bits_set {
            return Err(Error::deserial("count exceeds the number of set bits")
                .with_context("count", count)
                .with_context("bits_used", num_bits_set));
        }

        log::debug!(
            "deserialized bloom filter: num_bits={num_bits}, num_hashes={num_hashes}, count={count}, bits_used={num_bits_set}"
        );

        Ok(BloomFilter {
            capacity,
            count,
            num_bits_set,
            hashes: HashFamily::new(seed, num_hashes, num_bits),
            bits,
        })
    }
}
