mod cli;
mod command;
mod config;
mod error;
mod shadow {
    #![allow(clippy::needless_raw_string_hashes)]
    use shadow_rs::shadow;
    shadow!(build);

    pub use self::build::*;
}

use clap::Parser;

use self::{cli::Cli, error::CommandError};

fn main() {
    // Values already present in the environment take precedence over `.env`.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Warning: could not load .env file: {err}");
        }
    }

    if let Err(err) = Cli::parse().run() {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}
