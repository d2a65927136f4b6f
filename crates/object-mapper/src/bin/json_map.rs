//! `json-map` - restructure a JSON document with a mapping table.
//!
//! Usage:
//!   json-map '<mapping>' ['<seed>']
//!
//! The source document is read from stdin. The mapping table is the first
//! argument; the optional second argument is a destination to merge into.
//! Set `OBJECT_MAPPER_LOG` to a level (`debug`, `trace`, ...) to log to stderr.

use object_mapper::cli::run_mapping;
use std::io::{self, Read, Write};

fn init_logging() {
    let Ok(level) = std::env::var("OBJECT_MAPPER_LOG") else {
        return;
    };
    match level.parse::<tracing::Level>() {
        Ok(level) => tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .init(),
        Err(e) => eprintln!("OBJECT_MAPPER_LOG: {e}"),
    }
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let mapping = match args.get(1) {
        Some(m) => m.clone(),
        None => {
            eprintln!("First argument must be a JSON mapping table.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run_mapping(buf.trim(), &mapping, args.get(2).map(String::as_str)) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
