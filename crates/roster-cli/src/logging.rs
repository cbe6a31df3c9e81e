// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracing setup: stderr plus an optional log file, in the configured format.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use roster_cli_config::{LogFormat, LoggingConfig, PathsConfig};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// The file events are copied to: `logging.file`, or a timestamped file
/// under the state directory when `logging.run_log` is set.
pub fn log_file_path(logging: &LoggingConfig, paths: &PathsConfig, now: DateTime<Local>) -> Option<PathBuf> {
	if let Some(file) = &logging.file {
		return Some(file.clone());
	}
	logging.run_log.then(|| {
		paths
			.state_dir
			.join(format!("roster-{}.log", now.format("%Y-%m-%d-%H-%M-%S")))
	})
}

pub fn init_tracing(logging: &LoggingConfig, log_file: Option<&Path>) -> Result<()> {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("roster={}", logging.level.as_str())));

	let mut layers: Vec<BoxedLayer> = vec![fmt_layer(logging.format, std::io::stderr, true)];

	if let Some(path) = log_file {
		let file = open_log_file(path)?;
		layers.push(fmt_layer(logging.format, Mutex::new(file), false));
	}

	tracing_subscriber::registry()
		.with(layers)
		.with(filter)
		.try_init()
		.context("failed to install tracing subscriber")?;

	if let Some(path) = log_file {
		tracing::debug!(path = %path.display(), "writing log file");
	}
	Ok(())
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
	W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
	match format {
		LogFormat::Json => layer.json().boxed(),
		LogFormat::Compact => layer.compact().boxed(),
		LogFormat::Pretty => layer.pretty().boxed(),
	}
}

fn open_log_file(path: &Path) -> Result<File> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		std::fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use roster_cli_config::LogLevel;

	fn logging(file: Option<PathBuf>, run_log: bool) -> LoggingConfig {
		LoggingConfig {
			level: LogLevel::Info,
			format: LogFormat::Pretty,
			run_log,
			file,
		}
	}

	fn paths() -> PathsConfig {
		PathsConfig {
			user_config_file: "/home/u/.config/roster/config.toml".into(),
			system_config_file: "/etc/roster/config.toml".into(),
			state_dir: "/home/u/.local/state/roster".into(),
		}
	}

	#[test]
	fn explicit_file_wins_over_run_log() {
		let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
		let path = log_file_path(&logging(Some("/tmp/run.log".into()), true), &paths(), now);
		assert_eq!(path, Some(PathBuf::from("/tmp/run.log")));
	}

	#[test]
	fn run_log_is_timestamped_under_state_dir() {
		let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
		let path = log_file_path(&logging(None, true), &paths(), now);
		assert_eq!(
			path,
			Some(PathBuf::from("/home/u/.local/state/roster/roster-2025-03-04-05-06-07.log"))
		);
	}

	#[test]
	fn no_file_by_default() {
		assert_eq!(log_file_path(&logging(None, false), &paths(), Local::now()), None);
	}

	#[test]
	fn log_file_parent_is_created() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested/deeper/run.log");
		open_log_file(&path).unwrap();
		assert!(path.exists());
	}
}
