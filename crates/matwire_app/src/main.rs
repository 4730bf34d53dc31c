// SPDX-License-Identifier: MIT OR Apache-2.0
//! `matwire` command-line tool.
//!
//! Classifies texture files by name and wires them into a Redshift
//! standard material graph stored as RON.

mod cli;
mod run;
mod scan;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    tracing::debug!("matwire v{}", env!("CARGO_PKG_VERSION"));
    run::run(cli)
}
