//! go2web CLI - fetch a URL or search the web from the terminal
//!
//! All engine behavior lives in the go2web library; this binary only
//! parses arguments, wires up logging, and prints.

use std::io::{self, Write};

use clap::Parser;
use go2web::Session;

/// CLI tool for making HTTP requests and searching the web
#[derive(Parser, Debug)]
#[command(name = "go2web")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Make an HTTP request to the specified URL
    #[arg(
        short = 'u',
        long,
        value_name = "URL",
        conflicts_with = "search",
        required_unless_present = "search"
    )]
    url: Option<String>,

    /// Search the term using the search engine
    #[arg(short = 's', long, value_name = "TERM")]
    search: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::new();

    let result = if let Some(url) = cli.url.as_deref() {
        session.fetch(url)
    } else if let Some(term) = cli.search.as_deref() {
        session.search(term)
    } else {
        eprintln!("Usage: go2web --url <URL>");
        eprintln!("   or: go2web --search <TERM>");
        std::process::exit(1);
    };

    match result {
        Ok(text) => writeln_safe(&text),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
