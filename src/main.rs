use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agriledger::storage::StorageAdapter;
use agriledger::{
    InvocationContext, LedgerConfig, RecordLedger, StorageConfig, TransactionDraft,
    TransactionRecord,
};

#[derive(Parser, Debug)]
#[command(name = "agriledger", about = "Manage transaction records in a world state")]
struct Args {
    /// JSON config file selecting the storage backend.
    #[arg(long, conflicts_with = "data_dir")]
    config: Option<PathBuf>,

    /// Directory for the on-disk world state (overrides the default memory store).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the bootstrap records.
    Seed,
    /// Create a new transaction record.
    Create {
        id: String,
        date: String,
        farmer_id: String,
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: f64,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// Print a single record.
    Read { id: String },
    /// Report whether a record exists.
    Exists { id: String },
    /// Print every record in key order.
    List,
    /// Check a record's provenance mark.
    Verify { id: String, mark: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    let config = match (&args.config, &args.data_dir) {
        (Some(path), _) => LedgerConfig::load(path)?,
        (None, Some(dir)) => LedgerConfig::new(StorageConfig::disk(dir)),
        (None, None) => LedgerConfig::default(),
    };
    info!("opening ledger with config {:?}", config);

    let storage = StorageAdapter::from_config(&config.storage).context("open world state")?;
    let ledger = RecordLedger::new(Arc::new(storage));
    if config.seed_on_open {
        ledger.seed().await?;
    }

    run(&ledger, args.command).await
}

async fn run(ledger: &RecordLedger<StorageAdapter>, command: Command) -> Result<()> {
    match command {
        Command::Seed => ledger.seed().await?,
        Command::Create {
            id,
            date,
            farmer_id,
            product_id,
            quantity,
            amount,
        } => {
            let ctx = InvocationContext::now();
            let draft = TransactionDraft::new(id, date, farmer_id, product_id, quantity, amount);
            let record = ledger.create(&ctx, draft).await?;
            print_record(&record)?;
        }
        Command::Read { id } => print_record(&ledger.read(&id).await?)?,
        Command::Exists { id } => println!("{}", ledger.exists(&id).await?),
        Command::List => {
            for record in ledger.list_all().await? {
                print_record(&record?)?;
            }
        }
        Command::Verify { id, mark } => {
            let verified = ledger.verify_mark(&id, &mark).await?;
            println!("{verified}");
            if !verified {
                anyhow::bail!("provenance mark mismatch for {id}");
            }
        }
    }
    Ok(())
}

fn print_record(record: &TransactionRecord) -> Result<()> {
    let line = serde_json::to_string(record).context("render record")?;
    println!("{line}");
    Ok(())
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
