// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! roster - add licensed users to an Azure DevOps account, one at a time or
//! from a batch file.

use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use colored::Colorize;
use roster_cli_config::{load_config_with_cli, CliOverrides};
use tracing::info;

mod cli;
mod commands;
mod logging;
mod rows;
mod run;

use cli::{Args, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) => {
			let _ = e.print();
			return if e.use_stderr() {
				ExitCode::FAILURE
			} else {
				ExitCode::SUCCESS
			};
		}
	};

	match execute(args).await {
		Ok(code) => code,
		Err(e) => {
			eprintln!("{} {e:#}", "error:".red().bold());
			ExitCode::FAILURE
		}
	}
}

async fn execute(args: Args) -> Result<ExitCode> {
	let overrides = CliOverrides::from(&args);
	let config =
		load_config_with_cli(args.config.clone(), overrides).context("failed to load configuration")?;

	let started = Local::now();
	let log_file = logging::log_file_path(&config.logging, &config.paths, started);
	logging::init_tracing(&config.logging, log_file.as_deref())?;

	info!(
		version = env!("CARGO_PKG_VERSION"),
		started_at = %started.with_timezone(&Utc).to_rfc3339(),
		"roster starting"
	);

	let summary = match args.command {
		Command::AddUser(add) => commands::add_user::run(add, &config).await?,
		Command::AddUsers(add) => commands::add_users::run(add, &config).await?,
	};

	let elapsed = Local::now() - started;
	info!(
		elapsed_ms = elapsed.num_milliseconds(),
		attempted = summary.attempted,
		succeeded = summary.succeeded,
		failed = summary.failed,
		"roster finished"
	);
	run::print_summary(&summary, elapsed);

	Ok(ExitCode::from(run::exit_status(config.batch.exit_policy, &summary)))
}
