//! Example walking through routing and per-set eviction.
//!
//! Run with: cargo run --example basic_set_associative

use waycache::prelude::*;

fn main() {
    println!("=== Set-Associative Cache ===\n");

    // 4 entries split across 2 sets of 2
    let mut cache = SetAssociativeCache::new(4, 2, EvictionPolicy::Lru).unwrap();
    println!(
        "capacity {} / ways {} = {} entries per set\n",
        cache.capacity(),
        cache.ways(),
        cache.partition_capacity()
    );

    for key in [1, 2, 3] {
        println!("   key {key} -> set {}", cache.set_index(key));
    }
    println!();

    cache.put(1, "one");
    cache.put(2, "two");
    cache.get(1);
    let evicted = cache.put(3, "three");
    println!("1. put 3 into set 1 evicted {evicted:?} (set still had room)");

    // Set 1 now holds {1, 3}; key 1 is the least recently used
    let evicted = cache.put(5, "five");
    println!("2. put 5 into full set 1 evicted {evicted:?}");
    println!("   contains 2? {} (set 0 untouched)", cache.has(2));
    println!();

    println!("3. String keys route by their polynomial hash");
    cache.put("alpha", "a");
    cache.put("beta", "b");
    for key in ["alpha", "beta"] {
        println!("   {key:?} -> set {}", cache.set_index(key));
    }
    println!();

    println!("4. Contents, in set order:");
    for (key, value) in cache.list_all() {
        println!("   {key} => {value}");
    }

    cache.clear();
    println!("\nafter clear: {} entries", cache.len());
}
