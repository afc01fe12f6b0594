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

//! Bloom filter implementation for probabilistic set membership.
//!
//! A Bloom filter answers "was this value inserted?" with no false
//! negatives and a tunable false positive probability, in constant space.
//!
//! # Usage
//!
//! ```rust
//! use bloomfile::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::create(10_000, 0.001).unwrap();
//!
//! filter.insert(b"cbfdac6008f9cab4083784cbd1874f76618d2a97");
//!
//! assert!(filter.might_contain(b"cbfdac6008f9cab4083784cbd1874f76618d2a97"));
//! ```
//!
//! # Sizing Helpers
//!
//! ```rust
//! use bloomfile::bloom::FilterParams;
//!
//! let params = FilterParams::compute(10_000, 0.001).unwrap();
//!
//! assert!(params.num_bits > 0);
//! assert!(params.num_hashes >= 1);
//! ```

mod serialization;

mod bits;
pub use self::bits::BitArray;

mod filter;
pub use self::filter::BloomFilter;

mod sizing;
pub use self::sizing::FilterParams;
pub use self::sizing::MAX_NUM_HASHES;
pub use self::sizing::optimal_num_bits;
pub use self::sizing::optimal_num_hashes;
