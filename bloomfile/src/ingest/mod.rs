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

//! Line-oriented ingestion: normalization of input records into filter
//! values, and the single-pass drivers that feed them to a filter.
//!
//! Input corpora vary: some files carry bare hex digests, some carry raw
//! secrets that still need digesting, some are delimited exports where the
//! value sits in one column. A [`Normalizer`] pins down one interpretation;
//! [`ingest_lines`] and [`check_lines`] apply it to a whole input. The
//! build side and the check side must agree on the configuration.

mod normalize;
pub use self::normalize::DigestAlgorithm;
pub use self::normalize::FieldSelect;
pub use self::normalize::Normalizer;
pub use self::normalize::ValueEncoding;

mod pipeline;
pub use self::pipeline::CheckReport;
pub use self::pipeline::IngestReport;
pub use self::pipeline::check_lines;
pub use self::pipeline::ingest_lines;
