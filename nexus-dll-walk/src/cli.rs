//! Command-line arguments

use clap::Parser;

/// Insert values at the head of a list, then walk it with prefix and postfix
/// cursor loops.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Use fixed storage with this many slots instead of a growable slab
    #[arg(long, value_name = "CAPACITY")]
    pub fixed: Option<usize>,

    /// Values to insert, each in front of the previous one
    #[arg(default_values_t = [6u64, 5, 4, 3, 2, 1])]
    pub values: Vec<u64>,
}
