// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use roster_directory::WELL_KNOWN_SID_PREFIX;
use tracing::warn;

use crate::runtime::RosterConfig;
use crate::ConfigError;

pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

pub fn validate_config(config: &RosterConfig) -> Result<(), ConfigError> {
	validate_service(config)?;
	validate_http(config)?;
	validate_batch(config)?;
	validate_directory(config)?;

	Ok(())
}

fn validate_service(config: &RosterConfig) -> Result<(), ConfigError> {
	if let Some(url) = &config.service.account_url {
		if !(url.starts_with("https://") || url.starts_with("http://")) {
			return Err(ConfigError::invalid_value(
				"service.account_url",
				format!("'{url}' must start with https:// or http://"),
			));
		}
		if url.starts_with("http://") {
			warn!(account_url = %url, "account URL is not https; the token is sent in clear text");
		}
	}

	if config.service.personal_access_token.is_none() {
		warn!("no personal access token configured; set ROSTER_PAT or ROSTER_PAT_FILE");
	}

	Ok(())
}

fn validate_http(config: &RosterConfig) -> Result<(), ConfigError> {
	let secs = config.http.request_timeout.as_secs();
	if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&secs) {
		return Err(ConfigError::invalid_value(
			"http.request_timeout_secs",
			format!("{secs} is outside 1..={MAX_REQUEST_TIMEOUT_SECS}"),
		));
	}
	Ok(())
}

fn validate_batch(config: &RosterConfig) -> Result<(), ConfigError> {
	if config.batch.quarantine_log.as_os_str().is_empty() {
		return Err(ConfigError::invalid_value(
			"batch.quarantine_log",
			"path cannot be empty",
		));
	}
	Ok(())
}

fn validate_directory(config: &RosterConfig) -> Result<(), ConfigError> {
	if let Some(sid) = &config.directory.licensed_users_group_sid {
		if !sid.starts_with(WELL_KNOWN_SID_PREFIX) {
			return Err(ConfigError::invalid_value(
				"directory.licensed_users_group_sid",
				format!("'{sid}' is not a well-known group SID (expected prefix {WELL_KNOWN_SID_PREFIX})"),
			));
		}
	}
	Ok(())
}
