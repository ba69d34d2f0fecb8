//! CLI for sparefind - searches a stock file and prints matches as JSON
//!
//! Usage:
//!   sparefind_cli <stocks.xlsx|stocks.csv> [query]              # Matches to stdout
//!   sparefind_cli <stocks.xlsx|stocks.csv> [query] -o out.json  # Matches to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use sparefind::session::Session;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sparefind_cli <stocks.xlsx|stocks.csv> [query] [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let query = args.get(2).filter(|a| !a.starts_with('-')).cloned();
    let output_path = args
        .iter()
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 1));

    let mut session = Session::new();
    if let Err(e) = session.load_source_file(input_path) {
        eprintln!("Error loading {}: {}", input_path, e);
        std::process::exit(1);
    }

    let matches = session.search(query.as_deref().unwrap_or(""));

    let json = match serde_json::to_string_pretty(&matches) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
