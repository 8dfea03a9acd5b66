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

use std::collections::HashSet;

use bloomkit::bloom::BloomFilter;
use bloomkit::bloom::BloomFilterBuilder;
use bloomkit::bloom::derive;
use bloomkit::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::ge;
use googletest::prelude::gt;
use googletest::prelude::le;
use googletest::prelude::lt;
use insta::assert_snapshot;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_keys(rng: &mut StdRng, n: usize, exclude: &HashSet<u64>) -> HashSet<u64> {
    let mut keys = HashSet::with_capacity(n);
    while keys.len() < n {
        let key = rng.random::<u64>();
        if !exclude.contains(&key) {
            keys.insert(key);
        }
    }
    keys
}

#[test]
fn test_derive_boundaries() {
    let err = derive(0, 0.01).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidCapacity));

    let params = derive(100, 0.01).unwrap();
    assert_that!(params.num_bits, eq(959));
    assert_that!(params.num_hashes, eq(7));

    let params = derive(1, 0.01).unwrap();
    assert_that!(params.num_bits, ge(10));
    assert_that!(params.num_hashes, eq(7));
}

#[test]
fn test_construction_errors() {
    let err = BloomFilter::new(0, 0.01, 1).unwrap_err();
    assert_snapshot!(err, @"InvalidCapacity => capacity must be greater than 0");

    let err = BloomFilter::new(100, 0.0, 1).unwrap_err();
    assert_snapshot!(err, @"InvalidArgument, context: { tolerance: 0 } => tolerance must be between 0.0 and 1.0, exclusive");

    let err = BloomFilter::new(u64::from(u32::MAX), 0.01, 1).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::Overflow));
}

#[test]
fn test_scenario_small_keys() {
    let mut filter = BloomFilter::new(100, 0.001, 42).unwrap();
    filter.insert([0u8]);
    filter.insert([1u8, 2, 3, 4]);

    assert!(filter.contains([0u8]));
    assert!(filter.contains([1u8, 2, 3, 4]));
    assert!(!filter.contains([9u8, 9, 9, 9, 9]));
}

#[test]
fn test_no_false_negatives() {
    let mut rng = StdRng::seed_from_u64(17);
    let keys = random_keys(&mut rng, 5_000, &HashSet::new());

    // deliberately overfilled: no false negatives regardless of load
    let mut filter = BloomFilter::new(1_000, 0.01, 9001).unwrap();
    for key in &keys {
        filter.insert(key.to_le_bytes());
        assert!(filter.contains(key.to_le_bytes()));
    }
    for key in &keys {
        assert!(filter.contains(key.to_le_bytes()), "missing {key}");
    }
}

#[test]
fn test_monotonic_bits() {
    let mut filter = BloomFilter::new(500, 0.01, 3).unwrap();
    let mut previous = filter.bit_array().clone();
    let mut seen = Vec::new();

    for i in 0..500u32 {
        let key = format!("item_{i}");
        filter.insert(&key);
        seen.push(key);

        let current = filter.bit_array();
        for (old, new) in previous.as_bytes().iter().zip(current.as_bytes()) {
            assert_eq!(old & new, *old, "a bit was cleared");
        }
        previous = current.clone();
    }

    for key in &seen {
        assert!(filter.contains(key));
    }
    // an insert whose bits were all set already is not counted
    assert_that!(filter.count(), le(500));
    assert_that!(filter.count(), ge(490));
}

#[test]
fn test_observed_false_positive_rate() {
    const CAPACITY: usize = 10_000;
    const TRIALS: usize = 5;
    const PROBES: usize = 20_000;

    for tolerance in [0.01, 0.001] {
        let mut false_positives = 0;
        for trial in 0..TRIALS {
            let mut rng = StdRng::seed_from_u64(trial as u64);
            let mut filter = BloomFilterBuilder::with_accuracy(CAPACITY as u64, tolerance)
                .seed(trial as u32)
                .build()
                .unwrap();

            let inserted = random_keys(&mut rng, CAPACITY, &HashSet::new());
            for key in &inserted {
                filter.insert(key.to_le_bytes());
            }

            let probes = random_keys(&mut rng, PROBES, &inserted);
            false_positives += probes
                .iter()
                .filter(|key| filter.contains(key.to_le_bytes()))
                .count();
        }

        let observed = false_positives as f64 / (TRIALS * PROBES) as f64;
        assert_that!(observed, lt(tolerance * 3.0));
        assert_that!(observed, gt(tolerance / 3.0));
    }
}

#[test]
fn test_estimate_grows_with_count() {
    let mut filter = BloomFilter::new(200, 0.01, 11).unwrap();
    assert_that!(filter.estimated_false_positive_rate(), eq(0.0));

    let mut last = 0.0;
    for i in 0..400u32 {
        filter.insert(i.to_be_bytes());
        let rate = filter.estimated_false_positive_rate();
        assert_that!(rate, ge(last));
        assert_that!(rate, lt(1.0));
        last = rate;
    }
}

#[test]
fn test_independent_seeds() {
    let mut a = BloomFilter::new(100, 0.01, 1).unwrap();
    let mut b = BloomFilter::new(100, 0.01, 2).unwrap();
    a.insert("shared");
    b.insert("shared");

    assert!(a.contains("shared"));
    assert!(b.contains("shared"));
    assert_ne!(a.bit_array(), b.bit_array());
}

#[test]
fn test_serialization_round_trip_preserves_answers() {
    let mut rng = StdRng::seed_from_u64(99);
    let keys = random_keys(&mut rng, 1_000, &HashSet::new());
    let mut filter = BloomFilter::new(1_000, 0.02, 5).unwrap();
    for key in &keys {
        filter.insert(key.to_le_bytes());
    }

    let restored = BloomFilter::deserialize(&filter.serialize()).unwrap();
    assert_that!(restored.count(), eq(filter.count()));
    assert_that!(restored.bits_used(), eq(filter.bits_used()));
    assert_that!(restored.capacity(), eq(1_000));
    assert_that!(restored.seed(), eq(5));

    let probes = random_keys(&mut rng, 1_000, &HashSet::new());
    for key in keys.iter().chain(&probes) {
        assert_eq!(
            restored.contains(key.to_le_bytes()),
            filter.contains(key.to_le_bytes())
        );
    }
}
