// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, files, environment, command line.

use std::path::PathBuf;

use roster_common_secret::load_secret_env;
use tracing::{debug, trace};

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Source precedence levels (higher overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	fn precedence(&self) -> Precedence;

	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults. Applied in [`crate::RosterConfig::from_layer`], so the
/// layer itself is empty.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer::default())
	}
}

/// TOML file source.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// `/etc/roster/config.toml`, skipped when absent.
	pub fn system(paths: &PathsConfig) -> Self {
		Self {
			path: paths.system_config_file.clone(),
			precedence: Precedence::SystemFile,
			name: "system-config",
			required: false,
		}
	}

	/// `$XDG_CONFIG_HOME/roster/config.toml`, skipped when absent.
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
			required: false,
		}
	}

	/// A file named on the command line; it must exist.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			precedence: Precedence::ExplicitFile,
			name: "explicit-config",
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::MissingFile(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
			path: self.path.clone(),
			source,
		})?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// `ROSTER_*` environment variables. The access token comes from
/// `ROSTER_PAT` or the file named by `ROSTER_PAT_FILE`.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = layer_from_vars(std::env::vars())?;

		if let Some(secret) = load_secret_env("ROSTER_PAT")? {
			trace!("loaded personal access token from environment");
			layer
				.service
				.get_or_insert_with(ServiceLayer::default)
				.personal_access_token = Some(secret);
		}

		Ok(layer)
	}
}

/// Build a layer from `ROSTER_*` pairs. Blank values are ignored.
pub(crate) fn layer_from_vars<I>(vars: I) -> Result<ConfigLayer, ConfigError>
where
	I: IntoIterator<Item = (String, String)>,
{
	let mut layer = ConfigLayer::default();

	for (key, value) in vars {
		if !key.starts_with("ROSTER_") {
			continue;
		}

		let value = value.trim().to_string();
		if value.is_empty() {
			continue;
		}

		trace!(key = %key, "processing env var");

		match key.as_str() {
			"ROSTER_ACCOUNT_URL" => {
				layer.service.get_or_insert_with(ServiceLayer::default).account_url = Some(value);
			}
			"ROSTER_ACCOUNT_NAME" => {
				layer.service.get_or_insert_with(ServiceLayer::default).account_name = Some(value);
			}
			"ROSTER_REQUEST_TIMEOUT_SECS" => {
				let secs = value.parse::<u64>().map_err(|e| {
					ConfigError::invalid_value("ROSTER_REQUEST_TIMEOUT_SECS", e.to_string())
				})?;
				layer.http.get_or_insert_with(HttpLayer::default).request_timeout_secs = Some(secs);
			}
			"ROSTER_QUARANTINE_LOG" => {
				layer.batch.get_or_insert_with(BatchLayer::default).quarantine_log =
					Some(PathBuf::from(value));
			}
			"ROSTER_EXIT_POLICY" => {
				layer.batch.get_or_insert_with(BatchLayer::default).exit_policy = Some(value);
			}
			"ROSTER_LOG_LEVEL" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).level = Some(value);
			}
			"ROSTER_LOG_FORMAT" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).format = Some(value);
			}
			"ROSTER_LOG_FILE" => {
				layer.logging.get_or_insert_with(LoggingLayer::default).file = Some(PathBuf::from(value));
			}
			_ => {}
		}
	}

	Ok(layer)
}

/// Values given as command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub account_url: Option<String>,
	pub account_name: Option<String>,
	pub quarantine_log: Option<PathBuf>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub log_file: Option<PathBuf>,
}

pub struct CliSource(pub CliOverrides);

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let cli = self.0.clone();
		let mut layer = ConfigLayer::default();

		if cli.account_url.is_some() || cli.account_name.is_some() {
			layer.service = Some(ServiceLayer {
				account_url: cli.account_url,
				account_name: cli.account_name,
				personal_access_token: None,
			});
		}
		if cli.quarantine_log.is_some() {
			layer.batch = Some(BatchLayer {
				quarantine_log: cli.quarantine_log,
				exit_policy: None,
			});
		}
		if cli.log_level.is_some() || cli.log_format.is_some() || cli.log_file.is_some() {
			layer.logging = Some(LoggingLayer {
				level: cli.log_level,
				format: cli.log_format,
				run_log: None,
				file: cli.log_file,
			});
		}

		Ok(layer)
	}
}
