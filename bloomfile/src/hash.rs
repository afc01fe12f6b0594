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

//! MurmurHash3-based bit addressing for Bloom filters.
//!
//! A value is hashed once with the 128-bit MurmurHash3 variant and the two
//! 64-bit halves drive Kirsch-Mitzenmacher double hashing: position `i` is
//! `(h1 + i * h2) mod num_bits`. Insertion and lookup consume the same
//! position sequence, which is what makes membership answers meaningful.

/// Seed for every hash computation. Fixed so that a persisted filter yields
/// identical bit positions in every process and on every platform.
const UPDATE_SEED: u32 = 0;

/// Computes the two 64-bit base hashes for a value.
pub fn base_hashes(value: &[u8]) -> (u64, u64) {
    mur3::murmurhash3_x64_128(value, UPDATE_SEED)
}

/// Returns the sequence of bit positions probed for `value`.
///
/// Yields exactly `num_hashes` positions, each strictly less than
/// `num_bits`. Positions may repeat; duplicates are not removed.
///
/// # Examples
///
/// ```
/// use bloomfile::hash::positions;
///
/// let first: Vec<u64> = positions(b"digest", 1024, 7).collect();
/// let second: Vec<u64> = positions(b"digest", 1024, 7).collect();
/// assert_eq!(first, second);
/// assert_eq!(first.len(), 7);
/// ```
pub fn positions(value: &[u8], num_bits: u64, num_hashes: u16) -> Positions {
    debug_assert!(num_bits > 0);
    let (h1, h2) = base_hashes(value);
    Positions {
        h1,
        h2,
        num_bits,
        num_hashes,
        index: 0,
    }
}

/// Iterator over the bit positions probed for a single value.
#[derive(Debug, Clone)]
pub struct Positions {
    h1: u64,
    h2: u64,
    num_bits: u64,
    num_hashes: u16,
    index: u16,
}

impl Iterator for Positions {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.index == self.num_hashes {
            return None;
        }
        let hash = self
            .h1
            .wrapping_add(u64::from(self.index).wrapping_mul(self.h2));
        self.index += 1;
        Some(hash % self.num_bits)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.num_hashes - self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_hashes_reference_vectors() {
        let (h1, h2) = base_hashes(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(h1, 0xe34bbc7bbc071b6c);
        assert_eq!(h2, 0x7a433ca9c49a9347);

        // change one bit
        let (h1, h2) = base_hashes(b"The quick brown fox jumps over the lazy eog");
        assert_eq!(h1, 0x362108102c62d1c9);
        assert_eq!(h2, 0x3285cd100292b305);

        // remainder = 0
        let (h1, h2) = base_hashes(b"The quick brown fox jumps over t");
        assert_eq!(h1, 0xdf6af91bb29bdacf);
        assert_eq!(h2, 0x91a341c58df1f3a6);
    }

    #[test]
    fn test_positions_deterministic() {
        let first: Vec<u64> = positions(b"some value", 4096, 7).collect();
        let second: Vec<u64> = positions(b"some value", 4096, 7).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_positions_in_range() {
        for num_bits in [1, 2, 29, 64, 4096] {
            for position in positions(b"another value", num_bits, 32) {
                assert!(position < num_bits);
            }
        }
    }

    #[test]
    fn test_positions_exact_len() {
        let iter = positions(b"value", 1024, 11);
        assert_eq!(iter.len(), 11);
        assert_eq!(iter.count(), 11);
    }

    #[test]
    fn test_positions_zero_hashes_is_empty() {
        assert_eq!(positions(b"value", 1024, 0).count(), 0);
    }
}
