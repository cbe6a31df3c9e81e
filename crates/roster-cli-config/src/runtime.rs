// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use roster_common_secret::SecretString;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_QUARANTINE_LOG: &str = "failed-accounts.txt";

/// The final, validated configuration for a run.
#[derive(Debug, Clone)]
pub struct RosterConfig {
	pub service: ServiceConfig,
	pub http: HttpConfig,
	pub batch: BatchConfig,
	pub directory: DirectoryConfig,
	pub logging: LoggingConfig,
	pub paths: PathsConfig,
}

/// Account coordinates. All optional here; the command that needs them
/// reports what is missing.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
	pub account_url: Option<String>,
	pub account_name: Option<String>,
	pub personal_access_token: Option<SecretString>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
	pub request_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
	pub quarantine_log: PathBuf,
	pub exit_policy: ExitPolicy,
}

/// `None` keeps the provisioning engine's built-in value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryConfig {
	pub licensed_users_group_sid: Option<String>,
	pub personal_account_domain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
	/// Write a timestamped log under the state directory.
	pub run_log: bool,
	pub file: Option<PathBuf>,
}

/// How per-item failures affect the process exit code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
	/// Exit 0 once the batch ran and every failure was recorded.
	#[default]
	AlwaysSucceed,
	/// Exit 2 when any item failed.
	FailOnItemFailure,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

impl FromStr for ExitPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"always-succeed" => Ok(Self::AlwaysSucceed),
			"fail-on-item-failure" => Ok(Self::FailOnItemFailure),
			other => Err(format!(
				"unknown exit policy '{other}': expected always-succeed or fail-on-item-failure"
			)),
		}
	}
}

impl FromStr for LogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"error" => Ok(Self::Error),
			"warn" => Ok(Self::Warn),
			"info" => Ok(Self::Info),
			"debug" => Ok(Self::Debug),
			"trace" => Ok(Self::Trace),
			other => Err(format!(
				"unknown log level '{other}': expected error, warn, info, debug or trace"
			)),
		}
	}
}

impl LogLevel {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Error => "error",
			Self::Warn => "warn",
			Self::Info => "info",
			Self::Debug => "debug",
			Self::Trace => "trace",
		}
	}
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"pretty" => Ok(Self::Pretty),
			"compact" => Ok(Self::Compact),
			"json" => Ok(Self::Json),
			other => Err(format!(
				"unknown log format '{other}': expected pretty, compact or json"
			)),
		}
	}
}

impl RosterConfig {
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			service: build_service_config(layer.service),
			http: build_http_config(layer.http),
			batch: build_batch_config(layer.batch)?,
			directory: build_directory_config(layer.directory),
			logging: build_logging_config(layer.logging)?,
			paths,
		})
	}
}

fn build_service_config(layer: Option<ServiceLayer>) -> ServiceConfig {
	let layer = layer.unwrap_or_default();
	ServiceConfig {
		account_url: non_blank(layer.account_url),
		account_name: non_blank(layer.account_name),
		personal_access_token: layer.personal_access_token,
	}
}

fn build_http_config(layer: Option<HttpLayer>) -> HttpConfig {
	let secs = layer
		.and_then(|l| l.request_timeout_secs)
		.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
	HttpConfig {
		request_timeout: Duration::from_secs(secs),
	}
}

fn build_batch_config(layer: Option<BatchLayer>) -> Result<BatchConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	let exit_policy = match layer.exit_policy {
		Some(raw) => raw
			.parse()
			.map_err(|message: String| ConfigError::invalid_value("batch.exit_policy", message))?,
		None => ExitPolicy::default(),
	};
	Ok(BatchConfig {
		quarantine_log: layer
			.quarantine_log
			.unwrap_or_else(|| PathBuf::from(DEFAULT_QUARANTINE_LOG)),
		exit_policy,
	})
}

fn build_directory_config(layer: Option<DirectoryLayer>) -> DirectoryConfig {
	let layer = layer.unwrap_or_default();
	DirectoryConfig {
		licensed_users_group_sid: non_blank(layer.licensed_users_group_sid),
		personal_account_domain: non_blank(layer.personal_account_domain),
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> Result<LoggingConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	let level = match layer.level {
		Some(raw) => raw
			.parse()
			.map_err(|message: String| ConfigError::invalid_value("logging.level", message))?,
		None => LogLevel::default(),
	};
	let format = match layer.format {
		Some(raw) => raw
			.parse()
			.map_err(|message: String| ConfigError::invalid_value("logging.format", message))?,
		None => LogFormat::default(),
	};
	Ok(LoggingConfig {
		level,
		format,
		run_log: layer.run_log.unwrap_or(false),
		file: layer.file,
	})
}

fn non_blank(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}
