use hashdict::utils::random_generator::KeyRng;
use hashdict::{Dictionary, Strategy};
use std::time::Instant;

fn main() {
    env_logger::init();
    println!("Dictionary Stress Test Demo");
    println!("===========================");

    let size = 90_000;
    let mut rng = KeyRng::new(42);
    let keys = rng.keys(size, 1, size as i32 * 10);
    let mut doomed = keys.clone();
    rng.shuffle(&mut doomed);
    doomed.truncate(size / 2);

    for strategy in Strategy::ALL {
        let mut table = strategy.with_capacity(size);
        println!("\n{}", table.name());

        // Rapid fire insert test
        let insert_start = Instant::now();
        for (i, &key) in keys.iter().enumerate() {
            if let Err(err) = table.insert(key, 0) {
                println!("  insert of key {} failed: {}", key, err);
            }
            if i % 30_000 == 0 && i > 0 {
                let rate = i as f64 / insert_start.elapsed().as_secs_f64();
                println!("  {} keys inserted, rate: {:.0} inserts/sec", i, rate);
            }
        }
        let insert_time = insert_start.elapsed();
        println!(
            "  Inserted {} keys ({} distinct) in {:.2}ms, {:.1}ns per insert",
            keys.len(),
            table.len(),
            insert_time.as_secs_f64() * 1000.0,
            insert_time.as_nanos() as f64 / keys.len() as f64
        );

        let find_start = Instant::now();
        let hits = keys.iter().filter(|&&key| table.find(key).is_some()).count();
        println!(
            "  {} lookups ({} hits), {:.1}ns per find",
            keys.len(),
            hits,
            find_start.elapsed().as_nanos() as f64 / keys.len() as f64
        );

        let remove_start = Instant::now();
        let removed = doomed.iter().filter(|&&key| table.remove(key).is_some()).count();
        println!(
            "  Removed {} of {} keys, {:.1}ns per remove",
            removed,
            doomed.len(),
            remove_start.elapsed().as_nanos() as f64 / doomed.len() as f64
        );

        println!(
            "  Final: {} entries, {} buckets, load factor {:.2}",
            table.len(),
            table.capacity(),
            table.load_factor()
        );
    }

    println!("\nStress test completed!");
}
