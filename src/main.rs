//! Cash Register CLI
//!
//! Replays a CSV of purchases through one till and writes the change handed
//! back for each purchase.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- purchases.csv --till float.csv --till-out till.csv > outcomes.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug`, `info` or `warn` to control logging verbosity

use cash_register::{CapPolicy, CheckoutEngine, CoinLedger, RegisterConfig, Result, SearchStrategy};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Purchases CSV file
    input: PathBuf,

    /// Float to seed the till with (`coin,count` CSV). Empty till if omitted.
    #[arg(long)]
    till: Option<PathBuf>,

    /// Where to write the till after the last purchase
    #[arg(long)]
    till_out: Option<PathBuf>,

    /// Which coins may be handed back as change
    #[arg(long, value_enum, default_value_t = CapPolicy::TillStock)]
    cap_policy: CapPolicy,

    /// How to search for exact change
    #[arg(long, value_enum, default_value_t = SearchStrategy::Greedy)]
    strategy: SearchStrategy,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let float = match &cli.till {
        Some(path) => CheckoutEngine::read_float(BufReader::new(File::open(path)?))?,
        None => CoinLedger::new(),
    };

    let config = RegisterConfig::new(cli.cap_policy, cli.strategy);
    let mut engine = CheckoutEngine::new(float, config);

    let file = File::open(&cli.input)?;
    engine.process_csv(BufReader::new(file))?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    engine.write_output(handle)?;

    if let Some(path) = &cli.till_out {
        engine.write_till(BufWriter::new(File::create(path)?))?;
    }

    info!(
        "Processed {} purchases, till holds {} coins worth {}",
        engine.outcomes().len(),
        engine.register().till().coin_count(),
        engine.register().till_value()
    );

    Ok(())
}
