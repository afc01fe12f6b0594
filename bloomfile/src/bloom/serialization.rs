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

// Filter image layout, little-endian throughout:
//
//   byte 0      preamble length in longs (always 2)
//   byte 1      serial version
//   byte 2      family byte
//   byte 3      flags (must be zero)
//   bytes 4-5   number of hash functions (u16)
//   bytes 6-7   reserved (written as zero, ignored on read)
//   bytes 8-15  number of bits (u64)
//   bytes 16..  packed bit payload, exactly ceil(num_bits / 8) bytes

pub(super) const PREAMBLE_LONGS: u8 = 2;
pub(super) const SERIAL_VERSION: u8 = 1;
pub(super) const FILTER_FAMILY_ID: u8 = 0xBF;
pub(super) const PREAMBLE_BYTES: usize = 8 * PREAMBLE_LONGS as usize;
