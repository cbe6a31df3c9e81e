// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for the roster CLI.
//!
//! Sources, lowest precedence first: built-in defaults,
//! `/etc/roster/config.toml`, `$XDG_CONFIG_HOME/roster/config.toml`, an
//! explicit `--config` file, `ROSTER_*` environment variables, and
//! command-line flags.

pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

use std::path::PathBuf;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{
	BatchConfig, DirectoryConfig, ExitPolicy, HttpConfig, LogFormat, LogLevel, LoggingConfig,
	RosterConfig, ServiceConfig,
};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from every source, with `explicit` as the
/// `--config` file when given.
pub fn load_config_with_cli(
	explicit: Option<PathBuf>,
	cli: CliOverrides,
) -> Result<RosterConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	let mut registry = ConfigRegistry::new();
	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system(&paths)));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Some(path) = explicit {
		registry.register(Box::new(sources::FileSource::explicit(path)));
	}
	registry.register(Box::new(sources::EnvSource));
	registry.register(Box::new(sources::CliSource(cli)));

	registry.load(paths)
}
