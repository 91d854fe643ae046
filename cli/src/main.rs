use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "matchbook-cli")]
#[command(about = "Command line client for the matchbook service")]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:6060")]
    server: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an order
    Trade {
        #[arg(short, long)]
        book: String,
        #[arg(short, long)]
        orderid: u64,
        /// GTC rests after matching, FAK cancels its remainder
        #[arg(short, long, default_value = "GTC")]
        tradetype: String,
        /// BUY or SELL
        #[arg(long)]
        side: String,
        #[arg(short, long)]
        price: i32,
        #[arg(short, long)]
        quantity: u32,
    },
    /// Cancel a resting order
    Cancel {
        #[arg(short, long)]
        book: String,
        #[arg(short, long)]
        orderid: u64,
    },
    /// Show aggregated ladders, for one book or all of them
    Status {
        #[arg(short, long)]
        book: Option<String>,
    },
}

#[derive(Deserialize)]
struct LevelEntry {
    price: i32,
    quantity: u32,
}

#[derive(Deserialize)]
struct BookStatus {
    bids: Vec<LevelEntry>,
    asks: Vec<LevelEntry>,
    size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Trade {
            book,
            orderid,
            tradetype,
            side,
            price,
            quantity,
        } => {
            let response = client
                .post(format!("{}/trade", cli.server))
                .form(&[
                    ("book", book),
                    ("orderid", orderid.to_string()),
                    ("tradetype", tradetype),
                    ("side", side),
                    ("price", price.to_string()),
                    ("quantity", quantity.to_string()),
                ])
                .send()
                .await?;
            report(response).await?;
        }

        Commands::Cancel { book, orderid } => {
            let response = client
                .post(format!("{}/cancel", cli.server))
                .form(&[("book", book), ("orderid", orderid.to_string())])
                .send()
                .await?;
            report(response).await?;
        }

        Commands::Status { book } => {
            let response = client.get(format!("{}/status", cli.server)).send().await?;
            if !response.status().is_success() {
                println!("Error: {}", response.status());
                println!("{}", response.text().await?);
                std::process::exit(1);
            }

            let books: BTreeMap<String, BookStatus> = response.json().await?;
            match book {
                Some(name) => match books.get(&name) {
                    Some(status) => print_book(&name, status),
                    None => {
                        println!("No such book: {}", name);
                        std::process::exit(1);
                    }
                },
                None => {
                    if books.is_empty() {
                        println!("No books yet");
                    }
                    for (name, status) in &books {
                        print_book(name, status);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Prints the response body; non-2xx answers exit non-zero.
async fn report(response: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        println!("{}", body);
        Ok(())
    } else {
        println!("Error: {}", status);
        println!("{}", body);
        std::process::exit(1);
    }
}

/// Renders one book as a ladder: asks on top (worst first), bids below.
fn print_book(name: &str, status: &BookStatus) {
    println!("{} ({} resting orders)", name, status.size);
    println!("  Asks:");
    for level in status.asks.iter().rev() {
        println!("    {:>8} @ {:>8}", level.quantity, level.price);
    }
    println!("  Bids:");
    for level in &status.bids {
        println!("    {:>8} @ {:>8}", level.quantity, level.price);
    }
}
