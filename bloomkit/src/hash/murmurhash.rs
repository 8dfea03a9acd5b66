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

use std::hash::Hasher;

use byteorder::ByteOrder;
use byteorder::LE;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// The 32-bit x86 variant of MurmurHash3, a fast, non-cryptographic hash function.
///
/// Bytes may be fed incrementally through [`Hasher::write`]; the digest only depends on the
/// concatenation of everything written.
#[derive(Debug, Clone)]
pub struct MurmurHash3X8632 {
    h1: u32,
    total: u32,
    buf: [u8; 4],
    buf_len: usize,
}

impl MurmurHash3X8632 {
    pub fn with_seed(seed: u32) -> Self {
        MurmurHash3X8632 {
            h1: seed,
            total: 0,
            buf: [0; 4],
            buf_len: 0,
        }
    }

    pub fn finish32(&self) -> u32 {
        let mut h1 = self.h1;

        // tail
        if self.buf_len > 0 {
            let mut buf = [0u8; 4];
            buf[..self.buf_len].copy_from_slice(&self.buf[..self.buf_len]);
            let mut k1 = u32::from_le_bytes(buf);
            k1 = k1.wrapping_mul(C1);
            k1 = k1.rotate_left(15);
            k1 = k1.wrapping_mul(C2);
            h1 ^= k1;
        }

        // length is taken modulo 2^32
        h1 ^= self.total.wrapping_add(self.buf_len as u32);
        fmix32(h1)
    }

    #[inline]
    fn update(&mut self, mut k1: u32) {
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);

        self.h1 ^= k1;
        self.h1 = self.h1.rotate_left(13);
        self.h1 = self.h1.wrapping_mul(5).wrapping_add(0xe6546b64);

        self.total = self.total.wrapping_add(4);
    }
}

impl Hasher for MurmurHash3X8632 {
    fn finish(&self) -> u64 {
        u64::from(self.finish32())
    }

    fn write(&mut self, mut bytes: &[u8]) {
        if self.buf_len + bytes.len() < 4 {
            self.buf[self.buf_len..self.buf_len + bytes.len()].copy_from_slice(bytes);
            self.buf_len += bytes.len();
            return;
        }

        if self.buf_len != 0 {
            let wanted = 4 - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&bytes[..wanted]);
            let k1 = LE::read_u32(&self.buf);
            self.update(k1);

            bytes = &bytes[wanted..];
            self.buf_len = 0;
        }

        let mut blocks = bytes.chunks_exact(4);
        for block in blocks.by_ref() {
            self.update(LE::read_u32(block));
        }

        let rem = blocks.remainder();
        self.buf[..rem.len()].copy_from_slice(rem);
        self.buf_len = rem.len();
    }
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^ (h >> 16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::murmurhash3_x86_32;

    #[test]
    fn test_empty_input() {
        assert_eq!(murmurhash3_x86_32(b"", 0), 0);
        assert_eq!(murmurhash3_x86_32(b"", 1), 0x514e28b7);
        assert_eq!(murmurhash3_x86_32(b"", 0xffffffff), 0x81f16f39);
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(murmurhash3_x86_32(&[0, 0, 0, 0], 0), 0x2362f9de);
        assert_eq!(murmurhash3_x86_32(b"aaaa", 0x9747b28c), 0x5a97808a);
        // remainder of 1 byte
        assert_eq!(murmurhash3_x86_32(b"Hello, world!", 0x9747b28c), 0x24884cba);
        // remainder of 3 bytes
        let key = "The quick brown fox jumps over the lazy dog";
        assert_eq!(murmurhash3_x86_32(key.as_bytes(), 0x9747b28c), 0x2fa826cd);
    }

    #[test]
    fn test_incremental_writes() {
        let key = "The quick brown fox jumps over the lazy dog".as_bytes();
        let mut hasher = MurmurHash3X8632::with_seed(0x9747b28c);
        for chunk in key.chunks(3) {
            hasher.write(chunk);
        }
        assert_eq!(hasher.finish32(), 0x2fa826cd);
        assert_eq!(hasher.finish(), 0x2fa826cd);
    }
}
