/*
This file is part of the TA Boundary Download Tool
Copyright (C) 2022 Novel-T

The TA Boundary Download Tool is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
use std::path::PathBuf;

use anyhow::Result;
use log::{error, LevelFilter};
use simple_logger::SimpleLogger;
use structopt::StructOpt;

use crate::config::Config;
use crate::sync::run_sync;

mod config;
mod db;
mod rest;
mod sync;

/// Downloads the latest Territorial Authority boundaries from the national
/// map service into a PostGIS table, skipping the load when the stored
/// dataset year is already current.
#[derive(StructOpt)]
struct Cli {

    #[structopt(long, default_value = "Info")]
    log_level: LevelFilter,

    #[structopt(parse(from_os_str), long, help = "Path to the TOML config file")]
    config: PathBuf,
}

fn main() {
    let args = Cli::from_args();

    SimpleLogger::new().with_level(args.log_level).init().unwrap();

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<()> {
    let config = Config::from_file(&args.config)?;

    run_sync(&config)
}
