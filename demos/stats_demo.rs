use clap::Parser;
use quad_hash::DefaultHashBuilder;
use quad_hash::ProbingTable;
use quad_hash::TableConfig;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 8)]
    initial_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.45)]
    load_factor: f64,

    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    /// Remove every n-th key after filling, leaving tombstones behind.
    #[arg(short = 'r', long = "remove_every", default_value_t = 3)]
    remove_every: u64,
}

fn main() {
    let args = Args::parse();

    let config = TableConfig::default()
        .with_initial_capacity(args.initial_capacity)
        .with_load_factor(args.load_factor);
    let mut table: ProbingTable<u64, u64, DefaultHashBuilder> =
        match ProbingTable::with_config(config) {
            Ok(table) => table,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(2);
            }
        };

    println!(
        "Created table with capacity {} (threshold {})",
        table.capacity(),
        table.threshold()
    );

    for key in 0..args.entries {
        table.insert(key, key * 2);
    }
    println!("Inserted {} entries", table.len());
    table.debug_stats().print();

    if args.remove_every > 0 {
        for key in (0..args.entries).step_by(args.remove_every as usize) {
            table.remove(&key);
        }
        println!("\nAfter removing every {} key:", args.remove_every);
        table.debug_stats().print();
        print_histogram(&table.probe_histogram());

        for key in 0..args.entries {
            table.get(&key);
        }
        println!("\nAfter looking up every key once:");
        print_histogram(&table.probe_histogram());
    }
}

fn print_histogram(histogram: &[usize]) {
    println!("Probe distance histogram:");
    for (distance, count) in histogram.iter().enumerate() {
        if *count != 0 {
            println!("  {distance:>4}: {count}");
        }
    }
}
