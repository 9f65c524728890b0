//! Score a stream of segment lengths with a bounded top-k container.
//!
//! Run with `RUST_LOG=trace` to see evictions.
use kopt::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tour_segments = [17, 4, 23, 9, 23, 2, 11, 30, 6];
    let mut longest = BoundedTopK::new(4);

    for length in tour_segments {
        let admitted = longest.insert(length);
        println!(
            "insert {:>2}: {:<8} retained {:?}",
            length,
            if admitted { "admitted" } else { "rejected" },
            longest.to_vec()
        );
    }

    println!("sum         = {}", longest.sum());
    println!("sum_top_two = {}", longest.sum_top_two());
    println!("min         = {}", longest.min());
    println!("kopt_sum    = {}", longest.kopt_sum());
}
