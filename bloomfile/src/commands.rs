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

//! The operations exposed over filter files: create, insert, build, check.
//!
//! Each operation is a thin orchestration over [`BloomFilter`] persistence
//! and the ingestion pipeline. Results come back as structured reports;
//! nothing here writes to stdout, so callers decide how to render.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::bloom::BloomFilter;
use crate::error::Error;
use crate::ingest::CheckReport;
use crate::ingest::IngestReport;
use crate::ingest::Normalizer;
use crate::ingest::check_lines;
use crate::ingest::ingest_lines;

/// Writes a fresh empty filter file sized for `expected_items` at `fpp`.
///
/// An existing file at `path` is replaced.
pub fn create(path: impl AsRef<Path>, expected_items: u64, fpp: f64) -> Result<(), Error> {
    let path = path.as_ref();
    let filter = BloomFilter::create(expected_items, fpp)?;
    filter.save(path)?;
    info!(
        path = %path.display(),
        num_bits = filter.num_bits(),
        num_hashes = filter.num_hashes(),
        "created empty filter"
    );
    Ok(())
}

/// Ingests an input file into an existing filter file.
///
/// The filter is loaded, fed every normalizable line, and saved back in
/// place.
pub fn insert(
    path: impl AsRef<Path>,
    input: impl AsRef<Path>,
    normalizer: &Normalizer,
) -> Result<IngestReport, Error> {
    let path = path.as_ref();
    let mut filter = BloomFilter::load(path)?;
    let report = ingest_lines(open_input(input.as_ref())?, normalizer, &mut filter)?;
    filter.save(path)?;
    info!(
        path = %path.display(),
        lines = report.lines,
        inserted = report.inserted,
        skipped = report.skipped,
        "inserted values into filter"
    );
    Ok(report)
}

/// Sizes a new filter, ingests an input file, and writes the result in one
/// pass. Equivalent to [`create`] followed by [`insert`] without the
/// intermediate file round-trip.
pub fn build(
    path: impl AsRef<Path>,
    expected_items: u64,
    fpp: f64,
    input: impl AsRef<Path>,
    normalizer: &Normalizer,
) -> Result<IngestReport, Error> {
    let path = path.as_ref();
    let mut filter = BloomFilter::create(expected_items, fpp)?;
    let report = ingest_lines(open_input(input.as_ref())?, normalizer, &mut filter)?;
    filter.save(path)?;
    info!(
        path = %path.display(),
        num_bits = filter.num_bits(),
        num_hashes = filter.num_hashes(),
        lines = report.lines,
        inserted = report.inserted,
        skipped = report.skipped,
        "built filter from input"
    );
    Ok(report)
}

/// Checks every line of an input file against a filter file.
///
/// The report lists the possibly-present lines in input order.
pub fn check(
    path: impl AsRef<Path>,
    input: impl AsRef<Path>,
    normalizer: &Normalizer,
) -> Result<CheckReport, Error> {
    let path = path.as_ref();
    let filter = BloomFilter::load(path)?;
    let report = check_lines(open_input(input.as_ref())?, normalizer, &filter)?;
    info!(
        path = %path.display(),
        lines = report.lines,
        positive = report.positive.len(),
        skipped = report.skipped,
        "checked values against filter"
    );
    Ok(report)
}

fn open_input(path: &Path) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|err| {
        Error::io("failed to open input file")
            .with_context("path", path.display())
            .set_source(err)
    })?;
    Ok(BufReader::new(file))
}
