/*
 * This file is part of psumon.
 *
 * Copyright (C) 2025 psumon contributors
 *
 * psumon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * psumon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with psumon. If not, see <https://www.gnu.org/licenses/>.
 */

use std::io::Write;

use clap::Parser;
use tracing::{debug, error};

use psumon::app;
use psumon::cli::Cli;
use psumon::logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let target = logger::init_logging();
    debug!(?target, "Logging initialized");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = app::run_cli(&cli, &mut out) {
        error!("{:#}", err);
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }

    out.flush()?;
    Ok(())
}
