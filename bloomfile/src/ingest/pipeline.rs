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

use std::io::BufRead;

use tracing::warn;

use crate::bloom::BloomFilter;
use crate::error::Error;
use crate::ingest::Normalizer;

/// Outcome of one ingestion pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Lines read from the input.
    pub lines: u64,
    /// Values inserted into the filter.
    pub inserted: u64,
    /// Lines skipped because they could not be normalized.
    pub skipped: u64,
}

/// Outcome of one membership-check pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Lines read from the input.
    pub lines: u64,
    /// Lines whose value is possibly in the filter, in input order.
    pub positive: Vec<String>,
    /// Lines skipped because they could not be normalized.
    pub skipped: u64,
}

/// Inserts every normalizable line of `reader` into `filter`.
///
/// Blank lines are skipped silently. A line the normalizer rejects is
/// counted, logged by line number, and skipped; it never aborts the pass.
/// Only a failed read from `reader` aborts.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
///
/// use bloomfile::bloom::BloomFilter;
/// use bloomfile::ingest::Normalizer;
/// use bloomfile::ingest::ValueEncoding;
/// use bloomfile::ingest::ingest_lines;
///
/// let input = "CBFDAC6008F9CAB4083784CBD1874F76618D2A97\nnot hex\n";
/// let normalizer = Normalizer::new(ValueEncoding::HexDigest);
/// let mut filter = BloomFilter::create(10, 0.01).unwrap();
///
/// let report = ingest_lines(Cursor::new(input), &normalizer, &mut filter).unwrap();
/// assert_eq!(report.lines, 2);
/// assert_eq!(report.inserted, 1);
/// assert_eq!(report.skipped, 1);
/// ```
pub fn ingest_lines<R: BufRead>(
    reader: R,
    normalizer: &Normalizer,
    filter: &mut BloomFilter,
) -> Result<IngestReport, Error> {
    let mut report = IngestReport::default();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            Error::io("failed to read input line")
                .with_context("line", number + 1)
                .set_source(err)
        })?;
        report.lines += 1;
        if line.is_empty() {
            continue;
        }
        match normalizer.normalize(&line) {
            Ok(value) => {
                filter.insert(&value);
                report.inserted += 1;
            }
            Err(err) => {
                report.skipped += 1;
                warn!(
                    line = number + 1,
                    kind = %err.kind(),
                    "skipping malformed input line"
                );
            }
        }
    }
    Ok(report)
}

/// Checks every normalizable line of `reader` against `filter`.
///
/// Positive lines are reported verbatim in input order; a line appearing
/// twice is reported twice. Skipping rules match [`ingest_lines`].
pub fn check_lines<R: BufRead>(
    reader: R,
    normalizer: &Normalizer,
    filter: &BloomFilter,
) -> Result<CheckReport, Error> {
    let mut report = CheckReport::default();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| {
            Error::io("failed to read input line")
                .with_context("line", number + 1)
                .set_source(err)
        })?;
        report.lines += 1;
        if line.is_empty() {
            continue;
        }
        match normalizer.normalize(&line) {
            Ok(value) => {
                if filter.might_contain(&value) {
                    report.positive.push(line);
                }
            }
            Err(err) => {
                report.skipped += 1;
                warn!(
                    line = number + 1,
                    kind = %err.kind(),
                    "skipping malformed input line"
                );
            }
        }
    }
    Ok(report)
}
