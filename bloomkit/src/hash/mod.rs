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

mod fnv;
mod murmurhash;

use std::hash::Hasher;

use self::fnv::Fnv1Hash32;
use self::murmurhash::MurmurHash3X8632;

/// The seed 9001 used when a filter is built without an explicit seed is a prime number with no
/// special properties beyond being non-zero.
///
/// Filters that are meant to answer for the same key space must share the seed, otherwise the
/// same key maps to different bit positions.
pub(crate) const DEFAULT_UPDATE_SEED: u32 = 9001;

/// Computes the seeded MurmurHash3 x86_32 digest of `key`.
pub(crate) fn murmurhash3_x86_32(key: &[u8], seed: u32) -> u32 {
    let mut hasher = MurmurHash3X8632::with_seed(seed);
    hasher.write(key);
    hasher.finish32()
}

/// Computes the FNV-1 32-bit digest of `key`.
pub(crate) fn fnv1_32(key: &[u8]) -> u32 {
    let mut hasher = Fnv1Hash32::new();
    hasher.write(key);
    hasher.finish32()
}
