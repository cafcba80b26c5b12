//! Writes the lab-orders backend boilerplate (schema and API route).

use clap::Parser;
use repobundle::scaffold::{LAB_BACKEND, write_scaffold_file};
use std::path::PathBuf;
use std::process::exit;

/// lab-scaffold — generate the lab-orders schema and route handler
#[derive(Parser)]
#[command(name = "lab-scaffold", version, about, long_about = None)]
struct Cli {
    /// Project directory the files are written under
    #[arg(long, default_value = ".")]
    base: PathBuf,
}

fn main() {
    #[cfg(feature = "logging")]
    repobundle::logging::init();

    let cli = Cli::parse();
    for file in &LAB_BACKEND {
        match write_scaffold_file(&cli.base, file) {
            Ok(path) => println!("✅ {} created at {}", file.label, path.display()),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }
    }
}
