use hashdict::{Dictionary, Strategy};

fn main() {
    env_logger::init();
    println!("=== DEMONSTRATION OF HASH TABLE OPERATIONS ===");

    let sample_data = [
        (10, 100),
        (22, 220),
        (31, 310),
        (4, 40),
        (15, 150),
        (28, 280),
        (17, 170),
        (88, 880),
        (59, 590),
    ];

    let mut tables: Vec<Box<dyn Dictionary>> =
        Strategy::ALL.iter().map(|s| s.with_capacity(8)).collect();

    for table in tables.iter_mut() {
        println!("\n--- Inserting data into {} ---", table.name());
        for &(key, value) in &sample_data {
            if let Err(err) = table.insert(key, value) {
                println!("Insert of key {} failed: {}", key, err);
            }
        }

        print!("{}", table.display());

        println!("\nTesting search operations:");
        for key in [10, 22, 99, 4] {
            match table.find(key) {
                Some(value) => println!("Key {} -> value {}", key, value),
                None => println!("Key {} not found", key),
            }
        }

        println!("\nRemoving keys 22, 31 and 100...");
        for key in [22, 31, 100] {
            if table.remove(key).is_some() {
                println!("Key {} removed successfully.", key);
            } else {
                println!("Key {} not found for removal.", key);
            }
        }

        println!("Size after removals: {}", table.len());
        println!("\n{}", "=".repeat(60));
        table.clear();
    }
}
