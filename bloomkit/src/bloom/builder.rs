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

use super::BloomFilter;
use super::params::derive;
use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;

/// Builder for creating [`BloomFilter`] instances.
///
/// Parameters are validated by [`build()`](Self::build), which derives the bit length and hash
/// count from the requested capacity and false positive tolerance.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    capacity: u64,
    tolerance: f64,
    seed: u32,
}

impl BloomFilterBuilder {
    /// Creates a builder for a filter sized to hold `capacity` items at `tolerance`.
    ///
    /// # Arguments
    ///
    /// - `capacity`: Maximum expected number of distinct items
    /// - `tolerance`: Target false positive probability (e.g., 0.01 for 1%)
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomkit::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01)
    ///     .seed(42)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(capacity: u64, tolerance: f64) -> Self {
        BloomFilterBuilder {
            capacity,
            tolerance,
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Sets a custom hash seed (default: 9001).
    ///
    /// Filters built with different seeds map the same key to different bits.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// Fails with the errors of [`derive`](super::derive): zero capacity, a tolerance outside
    /// (0, 1), or a bit length beyond the 32-bit index range.
    pub fn build(self) -> Result<BloomFilter, Error> {
        let params = derive(self.capacity, self.tolerance)?;
        log::debug!(
            "building bloom filter: capacity={}, tolerance={}, seed={}, num_bits={}, num_hashes={}",
            self.capacity,
            self.tolerance,
            self.seed,
            params.num_bits,
            params.num_hashes
        );
        Ok(BloomFilter::from_params(self.capacity, self.seed, params))
    }
}
