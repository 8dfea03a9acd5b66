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

use crate::error::Error;

/// A fixed-length array of bits packed into bytes.
///
/// Bit `i` lives in byte `i / 8` at offset `i % 8`, where offset 0 is the least significant bit.
/// Because addressing never spans bytes, the backing buffer has the same meaning on every
/// platform and can be persisted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    num_bits: u32,
    bytes: Vec<u8>,
}

impl BitArray {
    /// Creates an array of `num_bits` zero bits backed by `ceil(num_bits / 8)` bytes.
    pub fn new(num_bits: u32) -> Self {
        BitArray {
            num_bits,
            bytes: vec![0u8; num_bytes(num_bits)],
        }
    }

    /// Wraps an existing byte buffer holding `num_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length is not exactly `ceil(num_bits / 8)`, or if any
    /// padding bit past `num_bits` in the last byte is set.
    pub fn from_bytes(num_bits: u32, bytes: Vec<u8>) -> Result<Self, Error> {
        let expected = num_bytes(num_bits);
        if bytes.len() != expected {
            return Err(Error::deserial("bit array length mismatch")
                .with_context("expected", expected)
                .with_context("found", bytes.len()));
        }

        let used = num_bits % 8;
        if used != 0 && bytes.last().is_some_and(|&last| last >> used != 0) {
            return Err(Error::deserial("padding bits past the bit length are set")
                .with_context("num_bits", num_bits));
        }

        Ok(BitArray { num_bits, bytes })
    }

    /// Returns the number of addressable bits.
    pub fn len(&self) -> u32 {
        self.num_bits
    }

    /// Returns true if the array has no addressable bits.
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Returns the backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of bits set to 1.
    pub fn count_ones(&self) -> u64 {
        self.bytes.iter().map(|b| u64::from(b.count_ones())).sum()
    }

    /// Returns the value of the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IndexOutOfRange`](crate::error::ErrorKind::IndexOutOfRange) if
    /// `index >= len()`.
    pub fn get(&self, index: u32) -> Result<bool, Error> {
        self.check_index(index)?;
        Ok(self.get_in_range(index))
    }

    /// Sets the bit at `index` to 1, returning whether it was previously 0.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IndexOutOfRange`](crate::error::ErrorKind::IndexOutOfRange) if
    /// `index >= len()`.
    pub fn set(&mut self, index: u32) -> Result<bool, Error> {
        self.check_index(index)?;
        Ok(self.set_in_range(index))
    }

    /// Bit lookup for callers that reduce indices modulo `len()`.
    #[inline]
    pub(crate) fn get_in_range(&self, index: u32) -> bool {
        debug_assert!(index < self.num_bits, "bit index {index} out of range");
        let (byte_index, bit_offset) = bit_coords(index);
        (self.bytes[byte_index] >> bit_offset) & 1 == 1
    }

    /// Bit update for callers that reduce indices modulo `len()`.
    #[inline]
    pub(crate) fn set_in_range(&mut self, index: u32) -> bool {
        debug_assert!(index < self.num_bits, "bit index {index} out of range");
        let (byte_index, bit_offset) = bit_coords(index);
        let mask = 1u8 << bit_offset;
        let was_unset = self.bytes[byte_index] & mask == 0;
        self.bytes[byte_index] |= mask;
        was_unset
    }

    fn check_index(&self, index: u32) -> Result<(), Error> {
        if index < self.num_bits {
            Ok(())
        } else {
            Err(Error::index_out_of_range(index, self.num_bits))
        }
    }
}

/// Splits a bit index into its byte index and bit offset within that byte.
#[inline]
pub(crate) fn bit_coords(index: u32) -> (usize, u32) {
    ((index / 8) as usize, index % 8)
}

fn num_bytes(num_bits: u32) -> usize {
    num_bits.div_ceil(8) as usize
}
