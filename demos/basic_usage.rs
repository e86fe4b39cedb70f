// ============================================================================
// Basic Usage Example
// ============================================================================

use ternary_engine::prelude::*;
use ternary_engine::storage;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Ternary Engine Example ===\n");

    let engine = TritEngine::new();

    // Parse ternary text into big integers.
    let a: TritInt = "102".parse().unwrap(); // 11
    let b: TritInt = "10".parse().unwrap(); // 3
    println!("a = {} (decimal {})", a, a.to_i64().unwrap());
    println!("b = {} (decimal {})", b, b.to_i64().unwrap());

    // Core arithmetic.
    let sum = a.checked_add(&b).unwrap();
    let diff = a.checked_sub(&b).unwrap();
    println!("\na + b = {}", sum);
    println!("a - b = {}", diff);

    // Cached multiplication: the second call is served from the cache.
    let product = engine.multiply(&a, &b).unwrap();
    println!("a * b = {}", product);
    let again = engine.multiply(&a, &b).unwrap();
    assert_eq!(product, again);

    // Derived operations.
    let fact = engine.factorial(&b).unwrap();
    println!("b!    = {} (decimal {})", fact, fact.to_i64().unwrap());

    let tower = engine.power(&b, &a).unwrap();
    println!("b^a   = {} (decimal {})", tower, tower.to_i64().unwrap());

    // Error reporting stays in the closed taxonomy.
    let neg: TritInt = "-1".parse().unwrap();
    match engine.factorial(&neg) {
        Err(err) => println!("\n(-1)! -> error {}: {}", err.code(), err),
        Ok(_) => unreachable!(),
    }

    // Diagnostic counters from the storage arenas.
    println!(
        "\nmapped bytes: {}, map/unmap steps: {}",
        storage::stats().mapped_bytes(),
        storage::stats().operation_steps()
    );
}
