use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::{Connection, params};
use time::OffsetDateTime;
use uuid::Uuid;

use wallet_rs::initialize_db;

/// A utility for creating a test database for the wallet REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

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

    println!("Creating test accounts and categories...");

    let now = OffsetDateTime::now_utc();

    let checking_id = insert_account(&conn, "Checking", "1250.00", now)?;
    let savings_id = insert_account(&conn, "Savings", "8000.00", now)?;

    let groceries_id = insert_category(&conn, "Groceries", now)?;
    let salary_id = insert_category(&conn, "Salary", now)?;
    insert_category(&conn, "Transport", now)?;

    println!("Creating test transactions...");

    insert_transaction(
        &conn,
        "54.20",
        "expense",
        Some("weekly shop"),
        &checking_id,
        &groceries_id,
        now,
    )?;
    insert_transaction(
        &conn,
        "2600.00",
        "income",
        Some("monthly pay"),
        &checking_id,
        &salary_id,
        now,
    )?;
    insert_transaction(&conn, "12.00", "expense", None, &savings_id, &groceries_id, now)?;

    println!("Success!");

    Ok(())
}

fn insert_account(
    conn: &Connection,
    name: &str,
    starting_balance: &str,
    now: OffsetDateTime,
) -> Result<String, Box<dyn Error>> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO accounts (id, name, starting_balance, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, name, starting_balance, now, now],
    )?;

    Ok(id)
}

fn insert_category(
    conn: &Connection,
    name: &str,
    now: OffsetDateTime,
) -> Result<String, Box<dyn Error>> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO categories (id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, now, now],
    )?;

    Ok(id)
}

fn insert_transaction(
    conn: &Connection,
    amount: &str,
    transaction_type: &str,
    description: Option<&str>,
    account_id: &str,
    category_id: &str,
    now: OffsetDateTime,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO transactions
            (id, amount, type, description, account_id, category_id, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            Uuid::new_v4().to_string(),
            amount,
            transaction_type,
            description,
            account_id,
            category_id,
            now,
            now,
        ],
    )?;

    Ok(())
}
