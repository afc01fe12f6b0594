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

/// A fixed-length array of bits packed into u64 words.
///
/// The length is chosen at construction and never changes. Bits can be set
/// and read but never cleared; setting an already-set bit is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    /// Number of addressable bits.
    length: u64,
    /// Count of bits set to 1, maintained incrementally.
    set_count: u64,
    /// Bit storage. Length = ceil(length / 64).
    words: Vec<u64>,
}

impl BitArray {
    /// Largest supported length in bits (4 GiB of bit storage). Keeps a
    /// corrupt or hostile header from driving the allocator.
    pub const MAX_BITS: u64 = 1 << 35;

    /// Creates an array of `length` zeroed bits.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidSize`](crate::error::ErrorKind::InvalidSize)
    /// if `length` is zero or exceeds [`BitArray::MAX_BITS`].
    pub fn new(length: u64) -> Result<Self, Error> {
        if length == 0 {
            return Err(Error::invalid_size("bit array length must be at least 1"));
        }
        if length > Self::MAX_BITS {
            return Err(
                Error::invalid_size("bit array length exceeds the supported maximum")
                    .with_context("length", length)
                    .with_context("max", Self::MAX_BITS),
            );
        }
        let num_words = length.div_ceil(64) as usize;
        Ok(BitArray {
            length,
            set_count: 0,
            words: vec![0u64; num_words],
        })
    }

    /// Returns the number of addressable bits.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Returns the number of bits set to 1.
    pub fn count_ones(&self) -> u64 {
        self.set_count
    }

    /// Sets the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IndexOutOfRange`](crate::error::ErrorKind::IndexOutOfRange)
    /// if `index >= length`.
    pub fn set(&mut self, index: u64) -> Result<(), Error> {
        if index >= self.length {
            return Err(Error::index_out_of_range(index, self.length));
        }
        self.set_bit(index);
        Ok(())
    }

    /// Reads the bit at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IndexOutOfRange`](crate::error::ErrorKind::IndexOutOfRange)
    /// if `index >= length`.
    pub fn get(&self, index: u64) -> Result<bool, Error> {
        if index >= self.length {
            return Err(Error::index_out_of_range(index, self.length));
        }
        Ok(self.get_bit(index))
    }

    /// Sets a single bit. The caller must guarantee `index < length`.
    pub(crate) fn set_bit(&mut self, index: u64) {
        debug_assert!(index < self.length);
        let word_index = (index / 64) as usize;
        let mask = 1u64 << (index % 64);
        if (self.words[word_index] & mask) == 0 {
            self.words[word_index] |= mask;
            self.set_count += 1;
        }
    }

    /// Reads a single bit. The caller must guarantee `index < length`.
    pub(crate) fn get_bit(&self, index: u64) -> bool {
        debug_assert!(index < self.length);
        let word_index = (index / 64) as usize;
        let mask = 1u64 << (index % 64);
        (self.words[word_index] & mask) != 0
    }

    /// Packs the bits into `ceil(length / 8)` little-endian bytes.
    ///
    /// Bit `i` lands in byte `i / 8` at bit offset `i % 8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let num_bytes = self.length.div_ceil(8) as usize;
        let mut bytes = Vec::with_capacity(self.words.len() * 8);
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes.truncate(num_bytes);
        bytes
    }

    /// Rebuilds an array of `length` bits from a packed payload.
    ///
    /// The payload must be exactly `ceil(length / 8)` bytes and every bit at
    /// or beyond `length` must be clear.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidSize`](crate::error::ErrorKind::InvalidSize)
    /// for an unsupported `length` and
    /// [`ErrorKind::CorruptFilterFile`](crate::error::ErrorKind::CorruptFilterFile)
    /// for a payload that does not round-trip.
    pub fn from_bytes(length: u64, payload: &[u8]) -> Result<Self, Error> {
        let mut bits = Self::new(length)?;
        let expected = length.div_ceil(8);
        if payload.len() as u64 != expected {
            return Err(Error::corrupt(
                "payload length does not match the declared bit length",
            )
            .with_context("expected_bytes", expected)
            .with_context("actual_bytes", payload.len()));
        }
        let dead_bits = expected * 8 - length;
        if dead_bits != 0 {
            let last = payload[payload.len() - 1];
            if last >> (8 - dead_bits) != 0 {
                return Err(Error::corrupt("bits set beyond the declared length")
                    .with_context("length", length));
            }
        }
        for (i, byte) in payload.iter().enumerate() {
            bits.words[i / 8] |= u64::from(*byte) << (8 * (i % 8));
        }
        bits.set_count = bits.words.iter().map(|word| word.count_ones() as u64).sum();
        Ok(bits)
    }
}
