//! Synthetic microbenchmark: tiered allocation over a fixed schedule
//! Runs `allocate` 1M times across a sweep of amounts

use std::time::Instant;

use tiers::allocate;

const ITERATIONS: u64 = 1_000_000;

const THRESHOLDS: [f64; 4] = [2_000_000.0, 3_000_000.0, 5_000_000.0, 10_000_000.0];
const RATES: [f64; 5] = [1.25, 1.00, 0.75, 0.50, 0.25];

fn amount_for(i: u64) -> f64 {
    // Sweep 0..15M so every band gets exercised.
    (i % 15_000) as f64 * 1_000.0
}

fn main() {
    // Warm up
    for i in 0..10_000 {
        let alloc = allocate(amount_for(i), &THRESHOLDS, &RATES).unwrap();
        std::hint::black_box(alloc.total_fee);
    }

    let t0 = Instant::now();

    let mut sum: f64 = 0.0;
    for i in 0..ITERATIONS {
        let alloc = allocate(amount_for(i), &THRESHOLDS, &RATES).unwrap();
        sum += alloc.total_fee;
    }

    // Prevent DCE
    std::hint::black_box(sum);

    let elapsed = t0.elapsed();
    let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
    let per_iter_ns = elapsed.as_nanos() as f64 / ITERATIONS as f64;
    let throughput = ITERATIONS as f64 / elapsed.as_secs_f64();

    println!("Tiered allocation benchmark");
    println!("  Tiers: {} + remainder", THRESHOLDS.len());
    println!("  Iterations: {}", format_with_commas(ITERATIONS));
    println!("  Total time: {:.1} ms", elapsed_ms);
    println!("  Per iteration: {:.0} ns", per_iter_ns);
    println!("  Throughput: {} ops/sec", format_with_commas(throughput as u64));
    println!("  (sum={} to prevent DCE)", sum);
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
