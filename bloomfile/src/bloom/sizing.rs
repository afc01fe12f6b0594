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

use std::f64::consts::LN_2;

use crate::bloom::BitArray;
use crate::error::Error;

/// Largest supported number of hash functions per value.
pub const MAX_NUM_HASHES: u16 = 255;

/// Suggests the optimal number of bits for a target capacity and accuracy.
///
/// Formula: `m = ceil(-n * ln(p) / ln(2)^2)`, never less than 1. Assumes
/// `fpp` lies strictly inside `(0, 1)`; [`FilterParams::compute`] validates.
///
/// # Examples
///
/// ```
/// use bloomfile::bloom::optimal_num_bits;
///
/// assert_eq!(optimal_num_bits(1000, 0.01), 9586);
/// ```
pub fn optimal_num_bits(expected_items: u64, fpp: f64) -> u64 {
    let bits = (-(expected_items as f64) * fpp.ln() / (LN_2 * LN_2)).ceil();
    bits.max(1.0) as u64
}

/// Suggests the optimal number of hash functions for a capacity and bit count.
///
/// Formula: `k = round((m / n) * ln(2))`, clamped to `1..=MAX_NUM_HASHES`.
///
/// # Examples
///
/// ```
/// use bloomfile::bloom::optimal_num_hashes;
///
/// assert_eq!(optimal_num_hashes(1000, 9586), 7);
/// ```
pub fn optimal_num_hashes(expected_items: u64, num_bits: u64) -> u16 {
    let k = (num_bits as f64 / expected_items as f64 * LN_2).round();
    k.clamp(1.0, f64::from(MAX_NUM_HASHES)) as u16
}

/// Derived shape of a Bloom filter: total bits and hash functions per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    /// Total number of bits (m).
    pub num_bits: u64,
    /// Number of hash functions per value (k).
    pub num_hashes: u16,
}

impl FilterParams {
    /// Computes optimal parameters for an expected item count and target
    /// false positive probability.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameters`](crate::error::ErrorKind::InvalidParameters)
    /// if `expected_items` is zero, `fpp` is not strictly between 0 and 1,
    /// or the derived bit count exceeds [`BitArray::MAX_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomfile::bloom::FilterParams;
    ///
    /// let params = FilterParams::compute(1000, 0.01).unwrap();
    /// assert_eq!(params.num_bits, 9586);
    /// assert_eq!(params.num_hashes, 7);
    /// ```
    pub fn compute(expected_items: u64, fpp: f64) -> Result<FilterParams, Error> {
        if expected_items == 0 {
            return Err(Error::invalid_parameters("expected_items must be at least 1"));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(
                Error::invalid_parameters("fpp must be strictly between 0 and 1")
                    .with_context("fpp", fpp),
            );
        }
        let num_bits = optimal_num_bits(expected_items, fpp);
        if num_bits > BitArray::MAX_BITS {
            return Err(Error::invalid_parameters(
                "requested capacity needs more bits than supported",
            )
            .with_context("expected_items", expected_items)
            .with_context("fpp", fpp)
            .with_context("num_bits", num_bits));
        }
        let num_hashes = optimal_num_hashes(expected_items, num_bits);
        Ok(FilterParams {
            num_bits,
            num_hashes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_optimal_num_bits() {
        assert_eq!(optimal_num_bits(1000, 0.01), 9586);
        assert_eq!(optimal_num_bits(3, 0.01), 29);
        assert_eq!(optimal_num_bits(5000, 0.01), 47926);
        assert_eq!(optimal_num_bits(1, 0.5), 2);
    }

    #[test]
    fn test_optimal_num_hashes() {
        assert_eq!(optimal_num_hashes(1000, 9586), 7);
        assert_eq!(optimal_num_hashes(1, 2), 1);
        // m / n dwarfs the cap
        assert_eq!(optimal_num_hashes(1, 10_000), MAX_NUM_HASHES);
    }

    #[test]
    fn test_compute() {
        let params = FilterParams::compute(3, 0.01).unwrap();
        assert_eq!(params.num_bits, 29);
        assert_eq!(params.num_hashes, 7);
    }

    #[test]
    fn test_compute_rejects_zero_items() {
        let err = FilterParams::compute(0, 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn test_compute_rejects_fpp_out_of_range() {
        for fpp in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let err = FilterParams::compute(100, fpp).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        }
    }

    #[test]
    fn test_compute_rejects_absurd_capacity() {
        let err = FilterParams::compute(u64::MAX, 0.000001).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }
}
