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

//! # bloomkit
//!
//! A fixed-memory Bloom filter answering approximate set-membership queries over byte keys,
//! with one-sided error: false positives are possible, false negatives are not.
//!
//! The filter is sized from an expected capacity and a false positive tolerance, addresses its
//! bits at byte granularity, and derives its hash functions from two seeded base digests. See
//! the [`bloom`] module for details.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;

mod codec;
mod hash;
