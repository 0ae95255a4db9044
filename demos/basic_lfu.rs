use containerkit::policy::lfu::LfuCache;
use containerkit::traits::IdCache;

fn main() {
    let cache: LfuCache<String> = LfuCache::new(10);

    for i in 1..=10 {
        let id = i.to_string();
        if let Err(err) = cache.add_by_id(id.clone(), id) {
            eprintln!("ERROR: {err}");
        }
    }

    for i in (1..=10).filter(|i| *i != 4) {
        if cache.get(&i.to_string()).is_none() {
            println!("could not find id '{i}'");
        }
    }

    if let Err(err) = cache.add_by_id("11", "11".to_string()) {
        eprintln!("ERROR: {err}");
    }
    if let Err(err) = cache.add_by_id("11", "eleven".to_string()) {
        eprintln!("ERROR: {err}");
    }

    let mut values: Vec<String> = cache.snapshot().into_values().collect();
    values.sort_by_key(|v| v.parse::<u32>().unwrap_or(u32::MAX));
    println!("Content: {}", values.join(","));

    let (hits, misses) = cache.stats();
    println!("Hits: {hits}, misses: {misses}");
}

// Expected output:
// Content: 1,2,3,5,6,7,8,9,10,11
// Hits: 9, misses: 0
//
// stderr: ERROR: Duplicate error: 11
//
// Explanation: every id except 4 was read once, so 4 is the least
// frequently used entry when 11 arrives.
