// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration registry: merges sources in precedence order.

use tracing::{debug, info};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::RosterConfig;
use crate::sources::ConfigSource;
use crate::validation::validate_config;
use crate::ConfigError;

#[derive(Default)]
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "registering config source");
		self.sources.push(source);
	}

	/// Load every source, lowest precedence first, merge, and validate.
	///
	/// A failing source fails the load. Sources that may legitimately be
	/// absent return an empty layer instead of an error.
	pub fn load(&self, paths: PathsConfig) -> Result<RosterConfig, ConfigError> {
		let mut sorted_sources: Vec<_> = self.sources.iter().collect();
		sorted_sources.sort_by_key(|s| s.precedence());

		debug!(
			source_count = sorted_sources.len(),
			"loading configuration from sources"
		);

		let mut merged = ConfigLayer::default();
		for source in &sorted_sources {
			let layer = source.load()?;
			debug!(source = source.name(), "merging config layer");
			merged.merge(layer);
		}

		let config = RosterConfig::from_layer(merged, paths)?;
		validate_config(&config)?;

		info!(
			account_url = config.service.account_url.as_deref().unwrap_or("<unset>"),
			exit_policy = ?config.batch.exit_policy,
			log_level = config.logging.level.as_str(),
			"configuration loaded"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}
