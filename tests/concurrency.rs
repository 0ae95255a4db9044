// ==============================================
// CONCURRENCY TESTS (integration)
// ==============================================
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use containerkit::prelude::*;

mod lru {
    use super::*;

    #[test]
    fn test_concurrent_adds_respect_capacity() {
        let capacity = 64;
        let cache: LruCache<u64> = LruCache::new(capacity);
        let num_threads = 8;
        let adds_per_thread = 500;

        let handles: Vec<_> = (0..num_threads)
            .map(|thread_id| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..adds_per_thread {
                        let id = format!("t{thread_id}-{}", i % 100);
                        cache.add_by_id(id, i).unwrap();
                        assert!(cache.len() <= capacity);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), capacity);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_readers_see_consistent_rendering() {
        let cache: LruCache<u32> = LruCache::new(16);
        for i in 0..16 {
            cache.add_by_id(i.to_string(), i).unwrap();
        }

        let writer = {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 16..2_000u32 {
                    cache.add_by_id(i.to_string(), i).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let rendered = cache.to_string();
                        let values: Vec<u32> = rendered
                            .trim_start_matches('[')
                            .trim_end_matches(']')
                            .split(',')
                            .map(|v| v.parse().unwrap())
                            .collect();
                        // Fresh ids are appended in increasing order.
                        assert_eq!(values.len(), 16);
                        assert!(values.windows(2).all(|w| w[0] < w[1]));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }
}

mod lfu {
    use super::*;

    #[test]
    fn test_concurrent_gets_count_every_access() {
        let cache: LfuCache<u64> = LfuCache::new(128);
        for i in 0..128u64 {
            cache.add_by_id(i.to_string(), i * 2).unwrap();
        }

        let reader_threads = 16;
        let reads_per_thread = 400;
        let hits = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..reader_threads)
            .map(|_| {
                let cache = cache.clone();
                let hits = hits.clone();
                thread::spawn(move || {
                    for i in 0..reads_per_thread {
                        let id = (i % 128).to_string();
                        if cache.get(&id).is_some() {
                            hits.fetch_add(1, Ordering::Relaxed);
                        }
                        let _ = cache.get("missing");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let expected = (reader_threads * reads_per_thread) as u64;
        assert_eq!(hits.load(Ordering::Relaxed) as u64, expected);
        assert_eq!(cache.stats(), (expected, expected));

        let total: u64 = (0..128).map(|i| cache.frequency(&i.to_string()).unwrap()).sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_mixed_workload_keeps_invariants() {
        let capacity = 32;
        let cache: LfuCache<usize> = LfuCache::new(capacity);
        let duplicates = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|thread_id| {
                let cache = cache.clone();
                let duplicates = duplicates.clone();
                thread::spawn(move || {
                    for i in 0..300 {
                        let id = format!("{}", (thread_id * 7 + i) % 50);
                        match i % 3 {
                            0 => {
                                if let Err(err) = cache.add_by_id(id, i) {
                                    assert!(err.is_duplicate());
                                    duplicates.fetch_add(1, Ordering::Relaxed);
                                }
                            },
                            1 => {
                                let _ = cache.get(&id);
                            },
                            _ => {
                                let _ = cache.contains(&id);
                            },
                        }
                        assert!(cache.len() <= capacity);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= capacity);
        assert!(duplicates.load(Ordering::Relaxed) <= 8 * 100);
        cache.check_invariants().unwrap();
    }
}

mod linear {
    use super::*;

    #[test]
    fn test_stack_push_pop_balance() {
        let stack: Arc<BoundedStack<usize>> = Arc::new(BoundedStack::new(0));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let stack = stack.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        stack.push(t * 1_000 + i).unwrap();
                    }
                    for _ in 0..100 {
                        stack.pop().unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stack.len(), 8 * 150);
    }

    #[test]
    fn test_bounded_queue_never_overfills() {
        let capacity = 100;
        let queue: Arc<BoundedQueue<usize>> = Arc::new(BoundedQueue::new(capacity));
        let accepted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let queue = queue.clone();
                let accepted = accepted.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        match queue.push(t * 100 + i) {
                            Ok(()) => {
                                accepted.fetch_add(1, Ordering::Relaxed);
                            },
                            Err(err) => assert_eq!(err, ContainerError::Overflow),
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(accepted.load(Ordering::Relaxed), capacity);
        assert_eq!(queue.len(), capacity);
    }

    #[test]
    fn test_key_value_saves_up_to_capacity() {
        let cache: Arc<KeyValueCache<usize>> = Arc::new(KeyValueCache::new(40));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..20 {
                        let _ = cache.save(format!("{t}-{i}"), i);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 40);
        assert_eq!(cache.metrics().overflows, 40);
    }
}
