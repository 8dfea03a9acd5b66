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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a key is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was inserted, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for keys never inserted
//! - **Fixed size**: the filter never resizes, and keys cannot be removed
//! - **Linear space**: Size is proportional to the expected number of distinct keys
//!
//! # Usage
//!
//! ```rust
//! use bloomkit::bloom::BloomFilter;
//!
//! // A filter for 1000 keys with 1% false positive rate and seed 42
//! let mut filter = BloomFilter::new(1000, 0.01, 42).unwrap();
//!
//! filter.insert("apple");
//! filter.insert(b"banana");
//! filter.insert(42_u64.to_le_bytes());
//!
//! assert!(filter.contains("apple")); // true - definitely inserted
//! assert!(!filter.contains("grape")); // false - never inserted (probably)
//!
//! println!("Bits: {}", filter.num_bits());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_false_positive_rate() * 100.0);
//! ```
//!
//! # Sizing
//!
//! For `n` expected keys and tolerance `p`, the filter uses
//! `m = ceil(-n * ln(p) / ln(2)^2)` bits and `k = ceil(-log2(p))` hash functions:
//!
//! ```rust
//! # use bloomkit::bloom::derive;
//! let params = derive(100, 0.01).unwrap();
//! assert_eq!((params.num_bits, params.num_hashes), (959, 7));
//! ```
//!
//! # Implementation Details
//!
//! - MurmurHash3 x86_32 (seeded) and FNV-1 32 provide the two base digests
//! - Double hashing with a quadratic term derives the `k` positions:
//!   `(h1 + i * h2 + i * i) mod m`
//! - Bits are packed in bytes, bit `i` at byte `i / 8`, offset `i % 8` (LSB first)
//!
//! # Concurrency
//!
//! `contains` borrows the filter shared and `insert` borrows it exclusively, so any number of
//! readers may query a filter while no insert is in progress. Wrap the filter in a `RwLock` to
//! share it between threads that insert.
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"
//! - Kirsch and Mitzenmacher (2008). "Less Hashing, Same Performance: Building a Better Bloom
//!   Filter"

mod bits;
mod builder;
mod hashing;
mod params;
mod sketch;

pub use self::bits::BitArray;
pub use self::builder::BloomFilterBuilder;
pub use self::hashing::HashFamily;
pub use self::hashing::Positions;
pub use self::params::FilterParams;
pub use self::params::derive;
pub use self::params::suggest_num_bits;
pub use self::params::suggest_num_hashes;
pub use self::sketch::BloomFilter;
