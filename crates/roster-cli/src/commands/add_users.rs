// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use roster_cli_config::RosterConfig;
use roster_provisioning::BatchSummary;

use crate::cli::AccountArgs;
use crate::{rows, run};

#[derive(Debug, Clone, clap::Args)]
pub struct AddUsersArgs {
	#[command(flatten)]
	pub account: AccountArgs,

	/// File of `email,license` rows
	#[arg(short = 'c', long)]
	pub csv: PathBuf,
}

/// Provision every row of the batch file. The whole file is validated
/// before the first remote call.
pub async fn run(args: AddUsersArgs, config: &RosterConfig) -> anyhow::Result<BatchSummary> {
	let template = super::request_template(&args.account, config)?;
	let requests = rows::read_rows(&args.csv, &template).await?;

	tracing::info!(
		account = template.account(),
		path = %args.csv.display(),
		rows = requests.len(),
		"adding users"
	);
	run::provision_all(config, requests).await
}
