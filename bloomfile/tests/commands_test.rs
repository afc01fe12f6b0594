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
use std::path::Path;
use std::path::PathBuf;

use bloomfile::bloom::BloomFilter;
use bloomfile::commands;
use bloomfile::error::ErrorKind;
use bloomfile::ingest::DigestAlgorithm;
use bloomfile::ingest::Normalizer;
use bloomfile::ingest::ValueEncoding;
use tempfile::TempDir;

const HASH_FOOBAR1: &str = "BB928CA332F5F4FA2CDAEF238672E0FBCF5E7A0F";
const HASH_PASSWORD123: &str = "CBFDAC6008F9CAB4083784CBD1874F76618D2A97";
const HASH_IAMTHEBEST: &str = "42E1D179E9781138DF3471EEF084F6622A0E7091";
const HASH_NOTINFILTER: &str = "F16943A723FE31616A14C46EA233A57A70EF27C6";

fn hex_normalizer() -> Normalizer {
    Normalizer::new(ValueEncoding::HexDigest)
}

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn check_positives(filter: &Path, input: &Path, normalizer: &Normalizer) -> Vec<String> {
    commands::check(filter, input, normalizer).unwrap().positive
}

#[test]
fn test_create_then_check_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");

    commands::create(&filter_path, 3, 0.01).unwrap();
    let loaded = BloomFilter::load(&filter_path).unwrap();
    assert_eq!(loaded.num_bits(), 29);
    assert_eq!(loaded.num_hashes(), 7);
    assert!(loaded.is_empty());

    let probes = write_input(&dir, "probes.txt", &format!("{HASH_PASSWORD123}\n"));
    assert!(check_positives(&filter_path, &probes, &hex_normalizer()).is_empty());
}

#[test]
fn test_create_then_insert_then_check() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    let corpus = write_input(
        &dir,
        "corpus.txt",
        &format!("{HASH_FOOBAR1}\n{HASH_PASSWORD123}\n{HASH_IAMTHEBEST}\n"),
    );
    let probes = write_input(
        &dir,
        "probes.txt",
        &format!("{HASH_PASSWORD123}\n{HASH_NOTINFILTER}\n"),
    );

    commands::create(&filter_path, 3, 0.01).unwrap();
    let report = commands::insert(&filter_path, &corpus, &hex_normalizer()).unwrap();
    assert_eq!(report.inserted, 3);

    assert_eq!(
        check_positives(&filter_path, &probes, &hex_normalizer()),
        vec![HASH_PASSWORD123.to_string()]
    );
}

#[test]
fn test_insert_accumulates_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    let first = write_input(&dir, "first.txt", &format!("{HASH_FOOBAR1}\n"));
    let second = write_input(&dir, "second.txt", &format!("{HASH_PASSWORD123}\n"));

    commands::create(&filter_path, 3, 0.01).unwrap();
    commands::insert(&filter_path, &first, &hex_normalizer()).unwrap();
    commands::insert(&filter_path, &second, &hex_normalizer()).unwrap();

    let loaded = BloomFilter::load(&filter_path).unwrap();
    assert!(loaded.might_contain(&hex::decode(HASH_FOOBAR1).unwrap()));
    assert!(loaded.might_contain(&hex::decode(HASH_PASSWORD123).unwrap()));
}

#[test]
fn test_build_from_plaintext_then_check_digests() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    let corpus = write_input(&dir, "corpus.txt", "foobar1\npassword123\nIamTheBest\n");
    let probes = write_input(
        &dir,
        "probes.txt",
        &format!("{HASH_IAMTHEBEST}\n{HASH_NOTINFILTER}\n"),
    );

    let build_side = Normalizer::new(ValueEncoding::Digest(DigestAlgorithm::Sha1));
    let report = commands::build(&filter_path, 3, 0.01, &corpus, &build_side).unwrap();
    assert_eq!(report.lines, 3);
    assert_eq!(report.inserted, 3);

    assert_eq!(
        check_positives(&filter_path, &probes, &hex_normalizer()),
        vec![HASH_IAMTHEBEST.to_string()]
    );
}

#[test]
fn test_build_and_check_plaintext_both_sides() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    let corpus = write_input(&dir, "corpus.txt", "foobar1\npassword123\nIamTheBest\n");
    let probes = write_input(&dir, "probes.txt", "password123\nnotinfilter\nletmein\n");

    let normalizer = Normalizer::new(ValueEncoding::Digest(DigestAlgorithm::Sha1));
    commands::build(&filter_path, 3, 0.01, &corpus, &normalizer).unwrap();

    assert_eq!(
        check_positives(&filter_path, &probes, &normalizer),
        vec!["password123".to_string()]
    );
}

#[test]
fn test_build_from_delimited_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    let corpus = write_input(
        &dir,
        "corpus.txt",
        &format!("{HASH_FOOBAR1}:1052\n{HASH_PASSWORD123}:2412\n{HASH_IAMTHEBEST}:3\n"),
    );
    let probes = write_input(
        &dir,
        "probes.txt",
        &format!("{HASH_FOOBAR1}\n{HASH_NOTINFILTER}\n"),
    );

    let build_side = hex_normalizer().with_field(':', 0);
    let report = commands::build(&filter_path, 3, 0.01, &corpus, &build_side).unwrap();
    assert_eq!(report.inserted, 3);

    assert_eq!(
        check_positives(&filter_path, &probes, &hex_normalizer()),
        vec![HASH_FOOBAR1.to_string()]
    );
}

#[test]
fn test_build_tolerates_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    let corpus = write_input(
        &dir,
        "corpus.txt",
        &format!("{HASH_FOOBAR1}\nnot hex at all\n\n{HASH_PASSWORD123}\n"),
    );

    let report = commands::build(&filter_path, 3, 0.01, &corpus, &hex_normalizer()).unwrap();
    assert_eq!(report.lines, 4);
    assert_eq!(report.inserted, 2);
    assert_eq!(report.skipped, 1);
    assert!(filter_path.exists());
}

#[test]
fn test_create_rejects_bad_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");

    let err = commands::create(&filter_path, 0, 0.01).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    let err = commands::create(&filter_path, 100, 1.5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    assert!(!filter_path.exists());
}

#[test]
fn test_insert_requires_existing_filter() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = write_input(&dir, "corpus.txt", &format!("{HASH_FOOBAR1}\n"));

    let err =
        commands::insert(dir.path().join("absent.bf"), &corpus, &hex_normalizer()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_check_requires_existing_input() {
    let dir = tempfile::tempdir().unwrap();
    let filter_path = dir.path().join("filter.bf");
    commands::create(&filter_path, 3, 0.01).unwrap();

    let err = commands::check(&filter_path, dir.path().join("absent.txt"), &hex_normalizer())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
