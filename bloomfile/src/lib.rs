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

//! Bloom filter files for screening values against large deny lists.
//!
//! This crate builds, persists, and queries Bloom filters over opaque
//! identifiers such as leaked-credential digests. A filter never produces a
//! false negative; the false positive probability is chosen at build time.
//!
//! - [`bloom`] holds the filter engine: bit storage, sizing math, the
//!   filter itself, and its file format.
//! - [`hash`] derives the bit positions probed for a value.
//! - [`ingest`] normalizes heterogeneous input lines into canonical value
//!   bytes and drives whole-input passes.
//! - [`commands`] exposes the file-level operations: create, insert,
//!   build, check.
//!
//! # Usage
//!
//! ```rust
//! use bloomfile::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::create(10_000, 0.001).unwrap();
//!
//! filter.insert(b"f2b14f68eb995facb3a1c35287b778d5bd785511");
//!
//! assert!(filter.might_contain(b"f2b14f68eb995facb3a1c35287b778d5bd785511"));
//! ```

mod codec;

pub mod bloom;
pub mod commands;
pub mod error;
pub mod hash;
pub mod ingest;
