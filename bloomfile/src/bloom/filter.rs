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

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::bloom::BitArray;
use crate::bloom::FilterParams;
use crate::bloom::MAX_NUM_HASHES;
use crate::bloom::serialization::FILTER_FAMILY_ID;
use crate::bloom::serialization::PREAMBLE_BYTES;
use crate::bloom::serialization::PREAMBLE_LONGS;
use crate::bloom::serialization::SERIAL_VERSION;
use crate::codec::FilterBytes;
use crate::codec::FilterSlice;
use crate::error::Error;
use crate::hash::positions;

/// A Bloom filter for probabilistic set membership testing.
///
/// Values are opaque byte strings. Membership answers are one-sided:
/// - `true`: the value was **possibly** inserted (or is a false positive)
/// - `false`: the value was **definitely not** inserted
///
/// # Examples
///
/// ```
/// use bloomfile::bloom::BloomFilter;
///
/// let mut filter = BloomFilter::create(1_000, 0.01).unwrap();
/// filter.insert(b"cbfdac6008f9cab4083784cbd1874f76618d2a97");
///
/// assert!(filter.might_contain(b"cbfdac6008f9cab4083784cbd1874f76618d2a97"));
/// assert!(!filter.might_contain(b"bb928ca332f5f4fa2cdaef238672e0fbcf5e7a0f")); // probably
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Number of hash functions per value (k).
    num_hashes: u16,
    /// Bit storage (m bits).
    bits: BitArray,
}

impl BloomFilter {
    /// Creates an empty filter sized for `expected_items` at the target
    /// false positive probability.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameters`](crate::error::ErrorKind::InvalidParameters)
    /// for a zero capacity, an `fpp` outside `(0, 1)`, or a derived size
    /// beyond [`BitArray::MAX_BITS`].
    pub fn create(expected_items: u64, fpp: f64) -> Result<Self, Error> {
        let params = FilterParams::compute(expected_items, fpp)?;
        Self::with_params(params)
    }

    /// Creates an empty filter from explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameters`](crate::error::ErrorKind::InvalidParameters)
    /// if the hash count is zero or above [`MAX_NUM_HASHES`], and
    /// [`ErrorKind::InvalidSize`](crate::error::ErrorKind::InvalidSize) if the
    /// bit count is unsupported.
    pub fn with_params(params: FilterParams) -> Result<Self, Error> {
        if params.num_hashes == 0 || params.num_hashes > MAX_NUM_HASHES {
            return Err(
                Error::invalid_parameters("number of hash functions out of range")
                    .with_context("num_hashes", params.num_hashes)
                    .with_context("max", MAX_NUM_HASHES),
            );
        }
        let bits = BitArray::new(params.num_bits)?;
        Ok(BloomFilter {
            num_hashes: params.num_hashes,
            bits,
        })
    }

    // ========================================================================
    // Update and Query Operations
    // ========================================================================

    /// Inserts a value into the filter.
    ///
    /// After insertion, `might_contain(value)` always returns `true`.
    /// Inserting a value again is a no-op.
    pub fn insert(&mut self, value: &[u8]) {
        for position in positions(value, self.bits.length(), self.num_hashes) {
            self.bits.set_bit(position);
        }
    }

    /// Tests whether a value is possibly in the set.
    ///
    /// Never returns `false` for an inserted value.
    pub fn might_contain(&self, value: &[u8]) -> bool {
        positions(value, self.bits.length(), self.num_hashes)
            .all(|position| self.bits.get_bit(position))
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns the total number of bits in the filter (m).
    pub fn num_bits(&self) -> u64 {
        self.bits.length()
    }

    /// Returns the number of hash functions per value (k).
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the number of bits set to 1.
    pub fn bits_set(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Returns whether the filter has no values inserted.
    pub fn is_empty(&self) -> bool {
        self.bits.count_ones() == 0
    }

    /// Estimates the probability that `might_contain` answers `true` for a
    /// value that was never inserted, given the current fill.
    ///
    /// Formula: `(bits_set / m)^k`.
    pub fn expected_fpp(&self) -> f64 {
        let fraction = self.bits.count_ones() as f64 / self.bits.length() as f64;
        fraction.powi(i32::from(self.num_hashes))
    }

    /// Estimates how many distinct values have been inserted.
    ///
    /// Formula: `round(-ln(1 - bits_set / m) * m / k)`. Saturates at
    /// `u64::MAX` when every bit is set.
    pub fn approximate_element_count(&self) -> u64 {
        let fraction = self.bits.count_ones() as f64 / self.bits.length() as f64;
        let estimate =
            -(-fraction).ln_1p() * self.bits.length() as f64 / f64::from(self.num_hashes);
        estimate.round() as u64
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Serializes the filter to a byte vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomfile::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::create(100, 0.01).unwrap();
    /// filter.insert(b"some digest");
    ///
    /// let bytes = filter.serialize();
    /// let restored = BloomFilter::deserialize(&bytes).unwrap();
    /// assert!(restored.might_contain(b"some digest"));
    /// ```
    pub fn serialize(&self) -> Vec<u8> {
        let payload = self.bits.to_bytes();
        let mut bytes = FilterBytes::with_capacity(PREAMBLE_BYTES + payload.len());

        // Preamble
        bytes.write_u8(PREAMBLE_LONGS);
        bytes.write_u8(SERIAL_VERSION);
        bytes.write_u8(FILTER_FAMILY_ID);
        bytes.write_u8(0); // flags
        bytes.write_u16_le(self.num_hashes);
        bytes.write_u16_le(0); // reserved
        bytes.write_u64_le(self.bits.length());

        bytes.write(&payload);
        bytes.into_bytes()
    }

    /// Deserializes a filter from bytes.
    ///
    /// Accepts exactly the images produced by [`serialize`](Self::serialize):
    /// a malformed preamble, a payload of the wrong length, or stray bits
    /// beyond the declared length all fail. There are no partial loads.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::CorruptFilterFile`](crate::error::ErrorKind::CorruptFilterFile)
    /// describing the first validation that failed.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut cursor = FilterSlice::new(bytes);

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

        if family_id != FILTER_FAMILY_ID {
            return Err(Error::corrupt("unrecognized filter image family")
                .with_context("expected", FILTER_FAMILY_ID)
                .with_context("actual", family_id));
        }
        if serial_version != SERIAL_VERSION {
            return Err(Error::corrupt("unsupported filter image serial version")
                .with_context("expected", SERIAL_VERSION)
                .with_context("actual", serial_version));
        }
        if preamble_longs != PREAMBLE_LONGS {
            return Err(Error::corrupt("unexpected filter image preamble length")
                .with_context("expected", PREAMBLE_LONGS)
                .with_context("actual", preamble_longs));
        }
        if flags != 0 {
            return Err(
                Error::corrupt("unexpected filter image flags").with_context("flags", flags)
            );
        }

        let num_hashes = cursor
            .read_u16_le()
            .map_err(|_| Error::insufficient_data("num_hashes"))?;
        cursor
            .read_u16_le()
            .map_err(|_| Error::insufficient_data("reserved"))?;
        let num_bits = cursor
            .read_u64_le()
            .map_err(|_| Error::insufficient_data("num_bits"))?;

        if num_hashes == 0 {
            return Err(Error::corrupt("filter image declares zero hash functions"));
        }
        if num_hashes > MAX_NUM_HASHES {
            return Err(Error::corrupt("filter image declares too many hash functions")
                .with_context("num_hashes", num_hashes)
                .with_context("max", MAX_NUM_HASHES));
        }
        if num_bits == 0 || num_bits > BitArray::MAX_BITS {
            return Err(Error::corrupt("filter image declares an invalid bit length")
                .with_context("num_bits", num_bits)
                .with_context("max", BitArray::MAX_BITS));
        }

        // Length check before the payload is allocated.
        let expected_bytes = num_bits.div_ceil(8);
        if cursor.remaining() != expected_bytes {
            return Err(Error::corrupt("filter image payload length mismatch")
                .with_context("expected_bytes", expected_bytes)
                .with_context("actual_bytes", cursor.remaining()));
        }
        let mut payload = vec![0u8; expected_bytes as usize];
        cursor
            .read_exact(&mut payload)
            .map_err(|_| Error::insufficient_data("payload"))?;
        let bits = BitArray::from_bytes(num_bits, &payload)?;

        Ok(BloomFilter { num_hashes, bits })
    }

    /// Writes the filter image to a file.
    ///
    /// The image is staged in a temporary file in the same directory and
    /// moved over `path`, so a crash mid-write never leaves a half-written
    /// filter behind. An existing file at `path` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Io`](crate::error::ErrorKind::Io) with the
    /// offending path in context.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(|err| {
            Error::io("failed to create temporary filter file")
                .with_context("path", path.display())
                .set_source(err)
        })?;
        staged.write_all(&self.serialize()).map_err(|err| {
            Error::io("failed to write filter file")
                .with_context("path", path.display())
                .set_source(err)
        })?;
        staged.persist(path).map_err(|err| {
            Error::io("failed to move filter file into place")
                .with_context("path", path.display())
                .set_source(std::io::Error::from(err))
        })?;
        Ok(())
    }

    /// Reads a filter image from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Io`](crate::error::ErrorKind::Io) if the file
    /// cannot be read and
    /// [`ErrorKind::CorruptFilterFile`](crate::error::ErrorKind::CorruptFilterFile)
    /// if its contents fail validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| {
            Error::io("failed to read filter file")
                .with_context("path", path.display())
                .set_source(err)
        })?;
        Self::deserialize(&bytes).map_err(|err| err.with_context("path", path.display()))
    }
}
