use std::{fs, path::PathBuf};

use amta::run_program;
use clap::Parser;

/// amta is an interpreter for a small, dynamically-typed scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the script to execute.
    source_file: PathBuf,

    /// Maximum number of iterations a single while loop may run; -1 disables
    /// the budget.
    #[arg(long = "max_while_loops", default_value_t = 10_000, allow_hyphen_values = true)]
    max_while_loops: i64,
}

fn main() {
    let args = Args::parse();

    let script = fs::read_to_string(&args.source_file).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.source_file.display());
        std::process::exit(1);
    });

    let budget = u64::try_from(args.max_while_loops).ok();

    match run_program(&script, budget) {
        Ok(value) => {
            println!();
            println!("---");
            println!("{value}");
        },
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
