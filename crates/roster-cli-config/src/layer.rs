// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration from one source. Every field is optional so layers
//! can be merged.

use std::path::PathBuf;

use roster_common_secret::SecretString;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub service: Option<ServiceLayer>,
	#[serde(default)]
	pub http: Option<HttpLayer>,
	#[serde(default)]
	pub batch: Option<BatchLayer>,
	#[serde(default)]
	pub directory: Option<DirectoryLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceLayer {
	#[serde(default)]
	pub account_url: Option<String>,
	#[serde(default)]
	pub account_name: Option<String>,
	/// Only ever set from the environment.
	#[serde(skip)]
	pub personal_access_token: Option<SecretString>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpLayer {
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchLayer {
	#[serde(default)]
	pub quarantine_log: Option<PathBuf>,
	#[serde(default)]
	pub exit_policy: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryLayer {
	#[serde(default)]
	pub licensed_users_group_sid: Option<String>,
	#[serde(default)]
	pub personal_account_domain: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
	#[serde(default)]
	pub run_log: Option<bool>,
	#[serde(default)]
	pub file: Option<PathBuf>,
}

impl ConfigLayer {
	/// Merge `other` into this layer; values set in `other` win.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.service, other.service, |t, s| {
			overwrite(&mut t.account_url, s.account_url);
			overwrite(&mut t.account_name, s.account_name);
			overwrite(&mut t.personal_access_token, s.personal_access_token);
		});
		merge_option(&mut self.http, other.http, |t, s| {
			overwrite(&mut t.request_timeout_secs, s.request_timeout_secs);
		});
		merge_option(&mut self.batch, other.batch, |t, s| {
			overwrite(&mut t.quarantine_log, s.quarantine_log);
			overwrite(&mut t.exit_policy, s.exit_policy);
		});
		merge_option(&mut self.directory, other.directory, |t, s| {
			overwrite(&mut t.licensed_users_group_sid, s.licensed_users_group_sid);
			overwrite(&mut t.personal_account_domain, s.personal_account_domain);
		});
		merge_option(&mut self.logging, other.logging, |t, s| {
			overwrite(&mut t.level, s.level);
			overwrite(&mut t.format, s.format);
			overwrite(&mut t.run_log, s.run_log);
			overwrite(&mut t.file, s.file);
		});
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn overwrite<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}
