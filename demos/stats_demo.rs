use clap::Parser;
use double_hash_table::DoubleHashingTable;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Distance between consecutive keys. A multiple of the capacity makes
    /// every key share one home slot.
    #[arg(short = 's', long = "key_stride", default_value_t = 1)]
    key_stride: i32,

    /// Percentage of the capacity to fill.
    #[arg(short = 'l', long = "load", default_value_t = 100)]
    load: usize,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating DoubleHashingTable with target capacity: {}",
        args.target_capacity
    );

    let mut table = match DoubleHashingTable::with_capacity(args.target_capacity) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    println!("Actual capacity: {}", table.capacity());
    println!("Probe step prime: {}", table.prime_for_hash());

    let num_values = table.capacity() * args.load.min(100) / 100;
    println!("Filling table with {} keys (stride {})...", num_values, args.key_stride);

    let mut num_refused = 0;
    for i in 0..num_values {
        let key = (i as i32).wrapping_mul(args.key_stride);
        if !table.put(key, i as i64) {
            num_refused += 1;
        }
    }

    println!("Inserted {} values into table", table.len());
    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.print_probe_histogram();
    table.debug_stats().print();
    println!(
        "Number of refused puts: {} ({:.02}%)",
        num_refused,
        num_refused as f64 / num_values.max(1) as f64 * 100.0
    );
}
