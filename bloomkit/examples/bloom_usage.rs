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

use bloomkit::bloom::BloomFilterBuilder;

fn main() {
    let capacity = 100_000u64;
    let tolerance = 0.01;

    let mut filter = BloomFilterBuilder::with_accuracy(capacity, tolerance)
        .seed(42)
        .build()
        .unwrap();

    println!("Created Bloom filter for {capacity} keys at {tolerance} tolerance");
    println!("Bits: {}", filter.num_bits());
    println!("Hash functions: {}", filter.num_hashes());
    println!("Memory: {} bytes", filter.bit_array().as_bytes().len());

    println!("\nInserting {capacity} keys...");
    for i in 0..capacity {
        filter.insert(i.to_le_bytes());
    }

    let present = (0..10u64)
        .filter(|i| filter.contains(i.to_le_bytes()))
        .count();
    println!("Found {present}/10 known keys (should be 10)");

    let probes = 10_000u64;
    let false_positives = (capacity..capacity + probes)
        .filter(|i| filter.contains(i.to_le_bytes()))
        .count();
    println!(
        "Observed false positive rate: {:.4} (estimated {:.4})",
        false_positives as f64 / probes as f64,
        filter.estimated_false_positive_rate()
    );
    println!("Load factor: {:.3}", filter.load_factor());

    println!("\nSerializing filter...");
    let bytes = filter.serialize();
    println!("Serialized size: {} bytes", bytes.len());
}
