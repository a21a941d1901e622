use chain_table::ChainedHashTable;
use chain_table::TableError;
use clap::Parser;

const PLAYERS: [(&str, u32); 5] = [
    ("Messi", 10),
    ("C. Ronaldo", 7),
    ("Neymar Jr.", 11),
    ("Xavi", 6),
    ("Iniesta", 8),
];

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 4)]
    capacity: usize,

    #[arg(short = 'l', long = "load-factor", default_value_t = 0.75)]
    load_factor: f64,
}

fn main() -> Result<(), TableError> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Creating table with capacity {} and load factor {}",
        args.capacity, args.load_factor
    );
    let mut table =
        ChainedHashTable::with_capacity_and_load_factor(args.capacity, args.load_factor);

    for (name, number) in PLAYERS {
        table.set(name, number)?;
        println!(
            "set {name:<12} -> {number:>2}  (count {}, capacity {})",
            table.len(),
            table.capacity()
        );
    }

    println!("get(\"Messi\")      = {:?}", table.get("Messi")?);
    println!("has(\"C. Ronaldo\") = {}", table.has("C. Ronaldo")?);
    println!("has(\"Pele\")       = {}", table.has("Pele")?);

    table.print_layout();
    Ok(())
}
