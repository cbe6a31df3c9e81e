// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod add_user;
pub mod add_users;

use roster_cli_config::RosterConfig;
use roster_provisioning::{RequestTemplate, ValidationError};

use crate::cli::AccountArgs;

/// Account and project group shared by every request of a run. The account
/// name comes from the merged configuration, which already holds `-n`.
fn request_template(account: &AccountArgs, config: &RosterConfig) -> Result<RequestTemplate, ValidationError> {
	RequestTemplate::new(
		config.service.account_name.as_deref().unwrap_or_default(),
		account.project.as_deref(),
		account.group.as_deref(),
	)
}
