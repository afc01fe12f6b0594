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

//! Example demonstrating the build-save-load-check cycle

use std::io::Cursor;

use bloomfile::bloom::BloomFilter;
use bloomfile::error::Error;
use bloomfile::ingest::DigestAlgorithm;
use bloomfile::ingest::Normalizer;
use bloomfile::ingest::ValueEncoding;
use bloomfile::ingest::ingest_lines;

fn main() -> Result<(), Error> {
    println!("=== Bloom Filter Build and Check Example ===\n");

    // Example 1: Build a filter from a plaintext credential corpus
    println!("1. Build a filter from a corpus:");
    let corpus: String = (0..10_000)
        .map(|i| format!("leaked-password-{}\n", i))
        .collect();
    let normalizer = Normalizer::new(ValueEncoding::Digest(DigestAlgorithm::Sha1));

    let mut filter = BloomFilter::create(10_000, 0.001)?;
    let report = ingest_lines(Cursor::new(corpus), &normalizer, &mut filter)?;
    println!("   Lines read: {}", report.lines);
    println!("   Values inserted: {}", report.inserted);
    println!("   Bits: {}", filter.num_bits());
    println!("   Hash functions: {}", filter.num_hashes());
    println!("   Expected FPP: {:.6}", filter.expected_fpp());
    println!(
        "   Approximate element count: {}",
        filter.approximate_element_count()
    );
    println!();

    // Example 2: Save the filter and load it back
    println!("2. Save and reload the filter:");
    let path = std::env::temp_dir().join("bloomfile_demo.bf");
    filter.save(&path)?;
    println!("   Saved to: {}", path.display());
    let restored = BloomFilter::load(&path)?;
    println!("   Restored bits set: {}", restored.bits_set());
    println!();

    // Example 3: Query the restored filter
    println!("3. Query the restored filter:");
    for probe in ["leaked-password-42", "not-a-member"] {
        let digest = DigestAlgorithm::Sha1.digest(probe);
        println!(
            "   {:20} -> {}",
            probe,
            if restored.might_contain(&digest) {
                "possibly present"
            } else {
                "definitely absent"
            }
        );
    }

    Ok(())
}
