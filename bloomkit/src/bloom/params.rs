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

//! Sizing of a Bloom filter from its expected capacity and false positive tolerance.

use std::f64::consts::LN_2;

use crate::error::Error;

/// Bit length and hash count derived for a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterParams {
    /// Number of addressable bits (m).
    pub num_bits: u32,
    /// Number of hash functions (k).
    pub num_hashes: u32,
}

/// Derives the optimal bit length and hash count for `capacity` items at `tolerance`.
///
/// Both values are rounded up, so the requested tolerance is met or bettered.
///
/// # Errors
///
/// - [`ErrorKind::InvalidCapacity`](crate::error::ErrorKind::InvalidCapacity) if `capacity` is 0.
/// - [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) if `tolerance` is
///   not in the open interval (0, 1).
/// - [`ErrorKind::Overflow`](crate::error::ErrorKind::Overflow) if the bit length does not fit
///   in a `u32`.
///
/// # Examples
///
/// ```
/// # use bloomkit::bloom::derive;
/// let params = derive(100, 0.01).unwrap();
/// assert_eq!(params.num_bits, 959);
/// assert_eq!(params.num_hashes, 7);
/// ```
pub fn derive(capacity: u64, tolerance: f64) -> Result<FilterParams, Error> {
    if capacity == 0 {
        return Err(Error::invalid_capacity());
    }
    // NaN fails both comparisons.
    if !(tolerance > 0.0 && tolerance < 1.0) {
        return Err(
            Error::invalid_argument("tolerance must be between 0.0 and 1.0, exclusive")
                .with_context("tolerance", tolerance),
        );
    }

    let bits = suggest_num_bits(capacity, tolerance).ceil();
    // An `as` cast saturates silently, so the range is checked on the float.
    if !bits.is_finite() || bits > f64::from(u32::MAX) {
        return Err(Error::overflow(bits).with_context("capacity", capacity));
    }

    Ok(FilterParams {
        num_bits: bits as u32,
        num_hashes: suggest_num_hashes(tolerance),
    })
}

/// Unrounded optimal number of bits.
///
/// Formula: `m = -n * ln(p) / (ln(2)^2)`
pub fn suggest_num_bits(capacity: u64, tolerance: f64) -> f64 {
    -(capacity as f64) * tolerance.ln() / (LN_2 * LN_2)
}

/// Optimal number of hash functions for a target tolerance.
///
/// Formula: `k = ceil(-log2(p))`
///
/// ```
/// # use bloomkit::bloom::suggest_num_hashes;
/// assert_eq!(suggest_num_hashes(0.01), 7); // -log2(0.01) ≈ 6.64
/// assert_eq!(suggest_num_hashes(0.5), 1);
/// ```
pub fn suggest_num_hashes(tolerance: f64) -> u32 {
    // Ceil to avoid selecting too few hashes.
    (-tolerance.log2()).ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_zero_capacity() {
        let err = derive(0, 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCapacity);
    }

    #[test]
    fn test_reference_sizes() {
        assert_eq!(
            derive(100, 0.01).unwrap(),
            FilterParams {
                num_bits: 959,
                num_hashes: 7
            }
        );
        assert_eq!(
            derive(100, 0.001).unwrap(),
            FilterParams {
                num_bits: 1438,
                num_hashes: 10
            }
        );
        assert_eq!(
            derive(1000, 0.01).unwrap(),
            FilterParams {
                num_bits: 9586,
                num_hashes: 7
            }
        );
    }

    #[test]
    fn test_single_item() {
        let params = derive(1, 0.01).unwrap();
        assert_eq!(params.num_bits, 10);
        assert_eq!(params.num_hashes, 7);
    }

    #[test]
    fn test_tolerance_near_one() {
        let params = derive(1, 0.99).unwrap();
        assert_eq!(params.num_bits, 1);
        assert_eq!(params.num_hashes, 1);
    }

    #[test]
    fn test_invalid_tolerance() {
        for tolerance in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = derive(100, tolerance).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{tolerance}");
        }
    }

    #[test]
    fn test_overflow() {
        let err = derive(u64::from(u32::MAX), 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);

        let err = derive(10_000_000, 1e-300).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_largest_representable() {
        // ~4.29e9 bits for 447M items at 1%
        let params = derive(447_000_000, 0.01).unwrap();
        assert!(params.num_bits > 4_000_000_000);
        assert_eq!(params.num_hashes, 7);
    }
}
