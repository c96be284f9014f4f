use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lastn-dfa",
    about = "DFA for binary strings whose last n bits are not all zero",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the automaton and write it as a DOT graph
    Dot {
        /// Window size n
        #[arg(allow_negative_numbers = true)]
        depth: i64,

        /// Output file (default: DFA-<depth>.dot)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Check whether a '0'/'1' string is accepted
    Accept {
        #[arg(allow_negative_numbers = true)]
        depth: i64,

        /// Input string (may be empty)
        input: String,

        /// Use the closed-form rule instead of building the graph
        #[arg(long)]
        closed_form: bool,
    },

    /// Check a decimal number through its binary representation
    Number {
        #[arg(allow_negative_numbers = true)]
        depth: i64,

        /// Non-negative decimal integer (arbitrary size)
        n: String,
    },

    /// Print every state visited while reading the input
    Trace {
        #[arg(allow_negative_numbers = true)]
        depth: i64,

        input: String,
    },

    /// Check every value in [start, end] against (val & (2^n - 1)) != 0
    Verify {
        #[arg(allow_negative_numbers = true)]
        depth: i64,

        start: u64,

        end: u64,

        /// Single-threaded
        #[arg(long)]
        serial: bool,
    },
}
