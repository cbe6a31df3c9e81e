// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_cli_config::RosterConfig;
use roster_directory::LicenseTier;
use roster_provisioning::{BatchSummary, ValidationError};

use crate::cli::AccountArgs;
use crate::run;

#[derive(Debug, Clone, clap::Args)]
pub struct AddUserArgs {
	#[command(flatten)]
	pub account: AccountArgs,

	/// Email address of the user to add
	#[arg(short = 'm', long)]
	pub email: String,

	/// License: basic, professional, advanced, msdn or stakeholder
	#[arg(short = 'l', long)]
	pub license: String,
}

/// Provision one user. Runs as a batch of one, so a failure is also written
/// to the quarantine log.
pub async fn run(args: AddUserArgs, config: &RosterConfig) -> anyhow::Result<BatchSummary> {
	let template = super::request_template(&args.account, config)?;
	let license: LicenseTier = args.license.parse().map_err(ValidationError::from)?;
	let request = template.request(&args.email, license)?;

	tracing::info!(account = template.account(), email = request.email(), %license, "adding user");
	run::provision_all(config, vec![request]).await
}
