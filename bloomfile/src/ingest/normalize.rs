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

use sha1::Digest;

use crate::error::Error;
use crate::error::ErrorKind;

/// Digest applied to value text before it reaches the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestAlgorithm {
    /// SHA-1, the historical format of leaked-credential corpora.
    Sha1,
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// Digests the UTF-8 bytes of `text`.
    pub fn digest(self, text: &str) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha1 => sha1::Sha1::digest(text.as_bytes()).to_vec(),
            DigestAlgorithm::Sha256 => sha2::Sha256::digest(text.as_bytes()).to_vec(),
        }
    }
}

/// Selects one delimited field out of an input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSelect {
    /// Separator the line is split on.
    pub separator: char,
    /// Zero-based index of the field holding the value.
    pub index: usize,
}

impl FieldSelect {
    fn select<'a>(&self, line: &'a str) -> Result<&'a str, Error> {
        line.split(self.separator).nth(self.index).ok_or_else(|| {
            Error::new(ErrorKind::MalformedRecord, "record is missing the selected field")
                .with_context("field", self.index)
        })
    }
}

/// How the selected text encodes the filter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueEncoding {
    /// The text is a hex-encoded digest; the decoded bytes are the value.
    HexDigest,
    /// The text is digested and the digest bytes are the value.
    Digest(DigestAlgorithm),
    /// The UTF-8 bytes of the text are the value.
    Raw,
}

/// Maps heterogeneous input lines to the canonical bytes the filter hashes.
///
/// The same configuration must be used when building and when checking a
/// filter; only then does the same logical value map to the same bytes on
/// both sides.
///
/// # Examples
///
/// ```
/// use bloomfile::ingest::Normalizer;
/// use bloomfile::ingest::ValueEncoding;
///
/// let normalizer = Normalizer::new(ValueEncoding::HexDigest);
/// let value = normalizer
///     .normalize("CBFDAC6008F9CAB4083784CBD1874F76618D2A97")
///     .unwrap();
/// assert_eq!(value.len(), 20);
/// ```
///
/// Delimited corpora select a column first:
///
/// ```
/// use bloomfile::ingest::Normalizer;
/// use bloomfile::ingest::ValueEncoding;
///
/// let normalizer = Normalizer::new(ValueEncoding::HexDigest).with_field(':', 0);
/// let value = normalizer
///     .normalize("CBFDAC6008F9CAB4083784CBD1874F76618D2A97:54")
///     .unwrap();
/// assert_eq!(value.len(), 20);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    encoding: ValueEncoding,
    field: Option<FieldSelect>,
}

impl Normalizer {
    /// Creates a normalizer that treats the whole line as the value text.
    pub fn new(encoding: ValueEncoding) -> Self {
        Normalizer {
            encoding,
            field: None,
        }
    }

    /// Selects field `index` of lines split on `separator` as the value text.
    pub fn with_field(mut self, separator: char, index: usize) -> Self {
        self.field = Some(FieldSelect { separator, index });
        self
    }

    /// Maps one input line to canonical value bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::MalformedRecord`] when the selected field is
    /// missing or empty and [`ErrorKind::MalformedHex`] when hex decoding
    /// fails. Errors never carry the line contents.
    pub fn normalize(&self, line: &str) -> Result<Vec<u8>, Error> {
        let text = match &self.field {
            Some(select) => select.select(line)?,
            None => line,
        };
        if text.is_empty() {
            return Err(Error::new(ErrorKind::MalformedRecord, "record has no value text"));
        }
        match self.encoding {
            ValueEncoding::HexDigest => hex::decode(text).map_err(|err| {
                Error::new(ErrorKind::MalformedHex, "value is not a hex digest").set_source(err)
            }),
            ValueEncoding::Digest(algorithm) => Ok(algorithm.digest(text)),
            ValueEncoding::Raw => Ok(text.as_bytes().to_vec()),
        }
    }
}
