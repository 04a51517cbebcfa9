use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use emotion_ledger::{NewExpense, count_expenses, create_expense, initialize_db};

/// A utility for creating a test database for the REST API server of the emotion ledger.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Sample expenses as (amount, emotion, reason).
const SAMPLE_EXPENSES: [(f64, &str, Option<&str>); 6] = [
    (12.5, "😄", Some("coffee with a friend")),
    (40.0, "😢", None),
    (89.99, "😤", Some("takeaway after a long week")),
    (5.0, "😐", Some("")),
    (230.0, "😞", Some("impulse headphones")),
    (-230.0, "😞", Some("returned the headphones")),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample expenses...");

    for (amount, emotion, reason) in SAMPLE_EXPENSES {
        let new_expense = NewExpense::new(amount, emotion, reason.map(str::to_owned))?;
        create_expense(new_expense, &conn)?;
    }

    println!("Success! Created {} expenses.", count_expenses(&conn)?);

    Ok(())
}
