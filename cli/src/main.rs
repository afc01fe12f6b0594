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

use std::path::PathBuf;

use bloomfile::commands;
use bloomfile::ingest::DigestAlgorithm;
use bloomfile::ingest::Normalizer;
use bloomfile::ingest::ValueEncoding;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bloomfile",
    about = "Build, persist, and query Bloom filters over credential digests"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Write a fresh empty filter file
    Create {
        /// Path of the filter file
        #[arg(long)]
        name: PathBuf,
        /// Expected number of distinct values
        #[arg(long)]
        size: u64,
        /// Target false positive probability, between 0 and 1 exclusive
        #[arg(long)]
        fpp: f64,
    },

    /// Ingest an input file into an existing filter file
    Insert {
        /// Path of the filter file
        #[arg(long)]
        name: PathBuf,
        /// Input file with one value per line
        input_file: PathBuf,
        #[command(flatten)]
        encoding: EncodingArgs,
    },

    /// Size, ingest, and write a filter in one pass
    Build {
        /// Path of the filter file
        #[arg(long)]
        name: PathBuf,
        /// Expected number of distinct values
        #[arg(long)]
        size: u64,
        /// Target false positive probability, between 0 and 1 exclusive
        #[arg(long)]
        fpp: f64,
        /// Input file with one value per line
        input_file: PathBuf,
        /// Separator of delimited input lines
        #[arg(long, requires = "field")]
        separator: Option<char>,
        /// Zero-based field holding the value in delimited lines
        #[arg(long, requires = "separator")]
        field: Option<usize>,
        #[command(flatten)]
        encoding: EncodingArgs,
    },

    /// Print the input lines the filter possibly contains
    Check {
        /// Path of the filter file
        #[arg(long)]
        name: PathBuf,
        /// Input file with one probe per line
        input_file: PathBuf,
        /// Treat probes as hex digests, the default
        #[arg(long, conflicts_with_all = ["sha1", "sha256", "raw"])]
        hashed: bool,
        #[command(flatten)]
        encoding: EncodingArgs,
    },
}

#[derive(Args)]
struct EncodingArgs {
    /// Digest each value with SHA-1 before it reaches the filter
    #[arg(long)]
    sha1: bool,
    /// Digest each value with SHA-256 before it reaches the filter
    #[arg(long, conflicts_with = "sha1")]
    sha256: bool,
    /// Use the raw value bytes without digesting
    #[arg(long, conflicts_with_all = ["sha1", "sha256"])]
    raw: bool,
}

impl EncodingArgs {
    fn encoding(&self) -> ValueEncoding {
        if self.sha1 {
            ValueEncoding::Digest(DigestAlgorithm::Sha1)
        } else if self.sha256 {
            ValueEncoding::Digest(DigestAlgorithm::Sha256)
        } else if self.raw {
            ValueEncoding::Raw
        } else {
            ValueEncoding::HexDigest
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Create { name, size, fpp } => {
            commands::create(&name, size, fpp)?;
        }
        Cmd::Insert {
            name,
            input_file,
            encoding,
        } => {
            let normalizer = Normalizer::new(encoding.encoding());
            commands::insert(&name, &input_file, &normalizer)?;
        }
        Cmd::Build {
            name,
            size,
            fpp,
            input_file,
            separator,
            field,
            encoding,
        } => {
            let mut normalizer = Normalizer::new(encoding.encoding());
            if let (Some(separator), Some(field)) = (separator, field) {
                normalizer = normalizer.with_field(separator, field);
            }
            commands::build(&name, size, fpp, &input_file, &normalizer)?;
        }
        Cmd::Check {
            name,
            input_file,
            // hashed is the default encoding; the flag only states it
            // explicitly and blocks the digest flags.
            hashed: _,
            encoding,
        } => {
            let normalizer = Normalizer::new(encoding.encoding());
            let report = commands::check(&name, &input_file, &normalizer)?;
            for line in &report.positive {
                println!("{line}");
            }
        }
    }
    Ok(())
}
