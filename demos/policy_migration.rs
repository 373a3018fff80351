//! Example moving entries between caches with different policies, and
//! registering a custom eviction ledger.
//!
//! Run with: cargo run --example policy_migration

use waycache::prelude::*;

fn newest_first() -> Box<dyn EvictionLedger<CacheKey>> {
    Box::new(MruLedger::new())
}

fn main() -> Result<(), CacheError> {
    println!("=== Policy Migration ===\n");

    let mut lru = SetAssociativeCache::new(8, 2, EvictionPolicy::Lru)?;
    for i in 0..6 {
        lru.put(i, i * 10);
    }
    println!("1. LRU cache holds {} entries", lru.len());

    let mut mru = SetAssociativeCache::new(8, 2, EvictionPolicy::Mru)?;
    mru.extend(lru.into_entries());
    println!("2. migrated into MRU cache: {} entries", mru.len());

    mru.get(4);
    mru.put(8, 80);
    let evicted = mru.put(10, 100);
    println!("   set 0 full, MRU evicted {evicted:?}");
    println!();

    println!("3. Custom ledger registered under its own tag");
    let mut registry = EvictionRegistry::with_builtins();
    registry.register(EvictionPolicy::Custom("newest-first"), newest_first);
    let mut custom = SetAssociativeCache::builder(4, 1)
        .policy(EvictionPolicy::Custom("newest-first"))
        .eviction_registry(registry)
        .build()?;
    custom.put("a", 1);
    custom.put("b", 2);
    custom.put("c", 3);
    custom.put("d", 4);
    println!("   evicted {:?}", custom.put("e", 5));

    println!("\n4. Unregistered tags fail at construction");
    match SetAssociativeCache::<u8>::new(4, 1, EvictionPolicy::Custom("lfu")) {
        Ok(_) => println!("   unexpected success"),
        Err(err) => println!("   {err}"),
    }
    Ok(())
}
