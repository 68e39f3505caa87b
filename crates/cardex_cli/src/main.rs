//! Cardex CLI
//!
//! Loads a card CSV into the in-memory store and runs one query or
//! mutation against it.
//!
//! # Commands
//!
//! - `show` / `holder` - List records
//! - `add` / `remove` / `undo` / `sort` - Mutate the sequence
//! - `search-card` / `search-pin` - Index lookups
//! - `extract-max` - Drain the priority snapshot
//! - `path` / `mst` / `bfs` / `dfs` - Graph analyses over one bank
//! - `table-stats` / `stats` - Hash-table and store telemetry

mod ingest;
mod output;

use cardex_core::{CardNumber, Pin, Record, SortStrategy, StoreConfig};
use clap::{Parser, Subcommand, ValueEnum};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cardex command-line card store.
#[derive(Parser)]
#[command(name = "cardex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the card CSV file
    #[arg(global = true, short, long, default_value = "cards.csv")]
    file: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Which tree index answers a card-number lookup.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TreeIndexArg {
    /// Unbalanced binary search tree
    Bst,
    /// Self-balancing AVL tree
    Avl,
}

/// Which access path answers a PIN lookup.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PinMethodArg {
    /// Open-addressing hash table
    Open,
    /// Chaining hash table
    Chain,
    /// Linear scan of the canonical order
    Linear,
    /// Binary search (sorts the sequence by PIN first)
    Binary,
}

/// Sorting algorithm for `sort`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    /// Bubble sort
    Bubble,
    /// Selection sort
    Selection,
    /// Insertion sort
    Insertion,
    /// Merge sort
    Merge,
}

impl From<SortArg> for SortStrategy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Bubble => SortStrategy::Bubble,
            SortArg::Selection => SortStrategy::Selection,
            SortArg::Insertion => SortStrategy::Insertion,
            SortArg::Merge => SortStrategy::Merge,
        }
    }
}

/// Minimum-spanning-tree variant for `mst`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum MstAlgorithmArg {
    /// Greedy vertex growth
    Prim,
    /// Edge sorting with union-find
    Kruskal,
}

#[derive(Subcommand)]
enum Commands {
    /// List all records in canonical order
    Show {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List records held by a person
    Holder {
        /// Holder name to match exactly
        name: String,
    },

    /// Append a record
    Add {
        /// Card holder name
        holder: String,
        /// Issuing bank name
        bank: String,
        /// Unique card number
        card: u64,
        /// Expiry period (MM/YY)
        expiry: String,
        /// Billing day-of-month
        billing: i32,
        /// Card PIN
        pin: i64,
    },

    /// Delete the record matching a card number and PIN
    Remove {
        /// Card number
        card: u64,
        /// PIN (must match the same record)
        pin: i64,
    },

    /// Show the most recent still-extant insertion
    Last,

    /// Remove the most recent still-extant insertion
    Undo,

    /// Look up a record by card number
    SearchCard {
        /// Card number
        card: u64,
        /// Tree index to query
        #[arg(long, value_enum, default_value = "avl")]
        index: TreeIndexArg,
    },

    /// Look up a record by PIN
    SearchPin {
        /// PIN
        pin: i64,
        /// Access path to use
        #[arg(long, value_enum, default_value = "chain")]
        method: PinMethodArg,
    },

    /// Extract the highest card numbers from the priority snapshot
    ExtractMax {
        /// How many extractions to perform
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Sort the sequence by PIN and show the result
    Sort {
        /// Sorting algorithm
        #[arg(value_enum)]
        strategy: SortArg,
    },

    /// Cheapest expiry-month path between two cards of one bank
    Path {
        /// Bank whose records form the graph
        bank: String,
        /// Source card number
        src: u64,
        /// Destination card number
        dest: u64,
    },

    /// Minimum-spanning-tree total over one bank's billing dates
    Mst {
        /// Bank whose records form the graph
        bank: String,
        /// MST variant
        #[arg(long, value_enum, default_value = "prim")]
        algorithm: MstAlgorithmArg,
    },

    /// Breadth-first traversal of one bank's records
    Bfs {
        /// Bank whose records form the graph
        bank: String,
    },

    /// Depth-first traversal of one bank's records
    Dfs {
        /// Bank whose records form the graph
        bank: String,
    },

    /// Hash-table occupancy
    TableStats {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Store operation counters
    Stats {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

fn traversal_line(records: &[Record], order: &[usize]) -> String {
    if order.is_empty() {
        return "no records".to_string();
    }
    order
        .iter()
        .map(|&i| format!("{} (card {})", records[i].holder, records[i].card_number.as_u64()))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Version = cli.command {
        println!("Cardex CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("Cardex Core v{}", cardex_core::VERSION);
        return Ok(());
    }

    let store = ingest::load_csv(&cli.file, StoreConfig::default())?;

    match cli.command {
        Commands::Show { format } => {
            println!("{}", output::render_records(&store.records(), format));
        }
        Commands::Holder { name } => {
            let records = store.records_by_holder(&name);
            println!("{}", output::render_records(&records, OutputFormat::Text));
        }
        Commands::Add {
            holder,
            bank,
            card,
            expiry,
            billing,
            pin,
        } => {
            let record = Record::new(
                holder,
                bank,
                CardNumber::new(card),
                expiry,
                billing,
                Pin::new(pin),
            );
            store.append(record);
            println!("added; store now holds {} records", store.len());
        }
        Commands::Remove { card, pin } => {
            if store.delete_by_key(CardNumber::new(card), Pin::new(pin)) {
                println!("deleted; store now holds {} records", store.len());
            } else {
                println!("no record matches card {card} with that pin");
            }
        }
        Commands::Last => match store.peek_last_insertion() {
            Some(record) => println!("{}", output::record_line(&record)),
            None => println!("no insertions recorded"),
        },
        Commands::Undo => match store.undo_last_insertion() {
            Some(record) => println!("removed {}", output::record_line(&record)),
            None => println!("nothing to undo"),
        },
        Commands::SearchCard { card, index } => {
            let found = match index {
                TreeIndexArg::Bst => store.search_ordered(CardNumber::new(card)),
                TreeIndexArg::Avl => store.search_balanced(CardNumber::new(card)),
            };
            match found {
                Some(record) => println!("{}", output::record_line(&record)),
                None => println!("card {card} not found"),
            }
        }
        Commands::SearchPin { pin, method } => {
            let pin = Pin::new(pin);
            let found = match method {
                PinMethodArg::Open => store.search_open_addressing(pin).map(|r| (None, r)),
                PinMethodArg::Chain => store.search_chained(pin).map(|r| (None, r)),
                PinMethodArg::Linear => store.search_linear(pin).map(|(pos, r)| (Some(pos), r)),
                PinMethodArg::Binary => store.search_binary(pin).map(|(pos, r)| (Some(pos), r)),
            };
            match found {
                Some((Some(pos), record)) => {
                    println!("found at position {pos}: {}", output::record_line(&record));
                }
                Some((None, record)) => println!("{}", output::record_line(&record)),
                None => println!("pin {} not found", pin.as_i64()),
            }
        }
        Commands::ExtractMax { count } => {
            for _ in 0..count {
                match store.extract_max_priority() {
                    Some(record) => println!("{}", output::record_line(&record)),
                    None => {
                        println!("priority snapshot drained");
                        break;
                    }
                }
            }
        }
        Commands::Sort { strategy } => {
            store.reorder(strategy.into());
            println!(
                "{}",
                output::render_records(&store.records(), OutputFormat::Text)
            );
        }
        Commands::Path { bank, src, dest } => {
            let subset = store.records_by_bank(&bank);
            let total =
                cardex_graph::dijkstra(&subset, CardNumber::new(src), CardNumber::new(dest))?;
            match total {
                Some(months) => println!("total expiry difference: {months} months"),
                None => println!("no path between those cards in {bank}"),
            }
        }
        Commands::Mst { bank, algorithm } => {
            let subset = store.records_by_bank(&bank);
            let total = match algorithm {
                MstAlgorithmArg::Prim => cardex_graph::prim_total(&subset),
                MstAlgorithmArg::Kruskal => cardex_graph::kruskal_total(&subset),
            };
            println!("minimum total billing-date difference: {total} days");
        }
        Commands::Bfs { bank } => {
            let subset = store.records_by_bank(&bank);
            let order = cardex_graph::bfs(&subset);
            println!("{}", traversal_line(&subset, &order));
        }
        Commands::Dfs { bank } => {
            let subset = store.records_by_bank(&bank);
            let order = cardex_graph::dfs(&subset);
            println!("{}", traversal_line(&subset, &order));
        }
        Commands::TableStats { format } => {
            println!("open addressing entries: {}", store.open_len());
            println!("{}", output::render_chain_stats(&store.chain_stats(), format));
        }
        Commands::Stats { format } => {
            println!("{}", output::render_stats(&store.stats(), format));
        }
        // Version is handled before the store is loaded.
        Commands::Version => {}
    }

    Ok(())
}
