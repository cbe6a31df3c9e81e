// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use roster_cli_config::CliOverrides;

use crate::commands::{add_user::AddUserArgs, add_users::AddUsersArgs};

/// Add licensed users to an Azure DevOps account
#[derive(Parser, Debug)]
#[command(name = "roster", version, about, long_about = None)]
pub struct Args {
	/// Path to a configuration file; it must exist
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Log level: error, warn, info, debug or trace
	#[arg(long, global = true)]
	pub log_level: Option<String>,

	/// Log format: pretty, compact or json
	#[arg(long, global = true)]
	pub log_format: Option<String>,

	/// Also write logs to this file
	#[arg(long, global = true)]
	pub log_file: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Provision a single user
	#[command(name = "adduser")]
	AddUser(AddUserArgs),
	/// Provision every user listed in an `email,license` file
	#[command(name = "addusers")]
	AddUsers(AddUsersArgs),
}

/// Flags shared by both subcommands.
#[derive(clap::Args, Debug, Clone)]
pub struct AccountArgs {
	/// Account (collection) name
	#[arg(short = 'n', long)]
	pub account_name: Option<String>,

	/// Account URL, e.g. https://dev.azure.com/contoso
	#[arg(short = 'u', long)]
	pub account_url: Option<String>,

	/// Project whose security group the users join (requires --group)
	#[arg(short = 'p', long)]
	pub project: Option<String>,

	/// Suffix of the project security group name (requires --project)
	#[arg(short = 'g', long)]
	pub group: Option<String>,

	/// Where failed users are recorded
	#[arg(long)]
	pub quarantine_log: Option<PathBuf>,
}

impl Args {
	pub fn account(&self) -> &AccountArgs {
		match &self.command {
			Command::AddUser(args) => &args.account,
			Command::AddUsers(args) => &args.account,
		}
	}
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		let account = args.account();
		CliOverrides {
			account_url: account.account_url.clone(),
			account_name: account.account_name.clone(),
			quarantine_log: account.quarantine_log.clone(),
			log_level: args.log_level.clone(),
			log_format: args.log_format.clone(),
			log_file: args.log_file.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn command_definition_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn adduser_short_flags() {
		let args = Args::try_parse_from([
			"roster", "adduser", "-n", "contoso", "-u", "https://dev.azure.com/contoso", "-m",
			"a@x.com", "-l", "basic", "-p", "Fabrikam", "-g", "Readers",
		])
		.unwrap();

		let Command::AddUser(add) = &args.command else {
			panic!("expected adduser");
		};
		assert_eq!(add.email, "a@x.com");
		assert_eq!(add.license, "basic");
		assert_eq!(add.account.project.as_deref(), Some("Fabrikam"));
		assert_eq!(add.account.group.as_deref(), Some("Readers"));
	}

	#[test]
	fn global_flags_after_subcommand() {
		let args = Args::try_parse_from([
			"roster",
			"addusers",
			"--csv",
			"users.csv",
			"--log-level",
			"debug",
			"--config",
			"roster.toml",
		])
		.unwrap();

		assert_eq!(args.log_level.as_deref(), Some("debug"));
		assert_eq!(args.config, Some(PathBuf::from("roster.toml")));
		let Command::AddUsers(add) = &args.command else {
			panic!("expected addusers");
		};
		assert_eq!(add.csv, PathBuf::from("users.csv"));
	}

	#[test]
	fn overrides_carry_account_flags() {
		let args = Args::try_parse_from([
			"roster",
			"addusers",
			"-c",
			"users.csv",
			"-n",
			"contoso",
			"--quarantine-log",
			"failed.txt",
		])
		.unwrap();

		let overrides = CliOverrides::from(&args);
		assert_eq!(overrides.account_name.as_deref(), Some("contoso"));
		assert_eq!(overrides.quarantine_log, Some(PathBuf::from("failed.txt")));
		assert!(overrides.account_url.is_none());
	}

	#[test]
	fn adduser_requires_email_and_license() {
		assert!(Args::try_parse_from(["roster", "adduser", "-m", "a@x.com"]).is_err());
		assert!(Args::try_parse_from(["roster", "adduser", "-l", "basic"]).is_err());
	}
}
