use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_insights::{
    create_app_state,
    import::{import_transactions, parse_seed_data},
};

/// A utility for filling the sales_insights database with seed transactions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database, created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// File path to a JSON array of seed transactions.
    #[arg(long, short)]
    input: String,
}

/// Import a seed data file into the database.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let input_path = Path::new(&args.input);

    if !input_path.is_file() {
        eprintln!("Could not find the seed data file {input_path:#?}.");
        exit(1);
    }

    let seed_data = fs::read_to_string(input_path)?;
    let builders = parse_seed_data(&seed_data)?;

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    let mut state = create_app_state(conn, "Etc/UTC", Default::default())?;

    println!("Importing {} transactions...", builders.len());
    let imported = import_transactions(&mut state.store, builders)?;

    println!("Success! Imported {} transactions.", imported.len());

    Ok(())
}
