//! objstore CLI
//!
//! Inspect and edit a collection file from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use objstore::{Collection, Config, Record, StoreError, Value};
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No record with id {0}")]
    NotFound(u32),

    #[error("Invalid {kind} value {raw:?}")]
    InvalidValue { kind: &'static str, raw: String },
}

/// objstore CLI
#[derive(Parser, Debug)]
#[command(name = "objstore-cli")]
#[command(about = "Inspect and edit objstore collection files")]
#[command(version)]
struct Args {
    /// Collection file
    #[arg(short, long, default_value = "./objstore.dat")]
    file: String,

    /// Skip fsync when saving
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the number of records
    Count,

    /// Print every record
    List,

    /// Print one record
    Get {
        /// Record identifier
        id: u32,
    },

    /// Create an empty record and print its identifier
    Create,

    /// Set an entry on a record
    Set {
        /// Record identifier
        id: u32,

        /// Entry key
        key: String,

        /// Entry value
        value: String,

        /// How to interpret the value
        #[arg(short, long, value_enum, default_value_t = Kind::Text)]
        kind: Kind,
    },

    /// Remove an entry from a record
    Unset {
        /// Record identifier
        id: u32,

        /// Entry key
        key: String,
    },

    /// Delete a record
    Delete {
        /// Record identifier
        id: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Text,
    Int,
    Float,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::builder()
        .path(&args.file)
        .sync_on_save(!args.no_sync)
        .build()?;

    let mut collection = Collection::with_config(config);
    collection.load()?;

    match args.command {
        Commands::Count => println!("{}", collection.object_count()),
        Commands::List => {
            for record in collection.iter() {
                print_record(record);
            }
        }
        Commands::Get { id } => match collection.get_object(id) {
            Some(record) => print_record(record),
            None => return Err(CliError::NotFound(id)),
        },
        Commands::Create => {
            let id = collection.create_object()?.id();
            collection.save()?;
            println!("{}", id);
        }
        Commands::Set {
            id,
            key,
            value,
            kind,
        } => {
            let value = parse_value(&value, kind)?;
            let record = collection.get_object_mut(id).ok_or(CliError::NotFound(id))?;
            record.set_entry(key, value);
            collection.save()?;
        }
        Commands::Unset { id, key } => {
            let record = collection.get_object_mut(id).ok_or(CliError::NotFound(id))?;
            if record.remove_entry(&key).is_some() {
                collection.save()?;
            }
        }
        Commands::Delete { id } => {
            if collection.delete_object(id).is_none() {
                return Err(CliError::NotFound(id));
            }
            collection.save()?;
        }
    }

    Ok(())
}

fn parse_value(raw: &str, kind: Kind) -> Result<Value, CliError> {
    let invalid = |what| CliError::InvalidValue {
        kind: what,
        raw: raw.to_string(),
    };
    match kind {
        Kind::Text => Ok(Value::from(raw)),
        Kind::Int => raw.parse::<i32>().map(Value::Integer).map_err(|_| invalid("integer")),
        Kind::Float => raw.parse::<f32>().map(Value::Float).map_err(|_| invalid("float")),
    }
}

fn print_record(record: &Record) {
    println!("#{}", record.id());
    for (key, value) in record.entries() {
        println!(
            "  {} ({}) = {}",
            String::from_utf8_lossy(key),
            value.value_type(),
            value
        );
    }
}
