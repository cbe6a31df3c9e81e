// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG path resolution.

use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// `$XDG_CONFIG_HOME/roster/config.toml`
	pub user_config_file: PathBuf,
	/// `/etc/roster/config.toml`
	pub system_config_file: PathBuf,
	/// `$XDG_STATE_HOME/roster`, home of timestamped run logs.
	pub state_dir: PathBuf,
}

/// Resolve paths from `XDG_CONFIG_HOME` and `XDG_STATE_HOME`, falling back
/// to `~/.config` and `~/.local/state`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));
	let state_home = std::env::var_os("XDG_STATE_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/state"));

	tracing::debug!(
		config_home = %config_home.display(),
		state_home = %state_home.display(),
		"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join("roster/config.toml"),
		system_config_file: PathBuf::from("/etc/roster/config.toml"),
		state_dir: state_home.join("roster"),
	})
}
