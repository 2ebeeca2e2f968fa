/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io;

use anyhow::Result;
use clap::Parser;
use qorki::{Config, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::parse();

    // `RUST_LOG` takes precedence over `--log`
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(config) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    let mut session = Session::new(config.save_file);
    let mut stdout = io::stdout().lock();

    for command in &config.commands {
        if session.execute_line(command, &mut stdout)?.is_break() {
            return Ok(());
        }
    }

    session.run(io::stdin().lock(), &mut stdout)
}
