// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connects to the account and streams requests through the batch runner.

use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;
use futures::StreamExt;
use roster_cli_config::{DirectoryConfig, ExitPolicy, RosterConfig};
use roster_devops::{DevOpsDirectory, DevOpsLicensing, DevOpsProjects, ServiceEndpoints};
use roster_directory::IdentityDescriptor;
use roster_provisioning::{
	BatchRunner, BatchSummary, EngineSettings, GroupAssignment, ProvisioningEngine,
	ProvisioningOutcome, ProvisioningRequest, QuarantineLog, QuarantineStatus,
};
use tracing::{info, instrument};

/// Exit status when a failed user could not be written to the quarantine log.
pub const QUARANTINE_LOST_EXIT: u8 = 1;
/// Exit status when `fail-on-item-failure` is set and an item failed.
pub const ITEM_FAILURE_EXIT: u8 = 2;

#[instrument(skip_all, fields(requests = requests.len()))]
pub async fn provision_all(
	config: &RosterConfig,
	requests: Vec<ProvisioningRequest>,
) -> Result<BatchSummary> {
	let account_url = config
		.service
		.account_url
		.as_deref()
		.context("no account URL: pass --account-url or set ROSTER_ACCOUNT_URL")?;
	let pat = config
		.service
		.personal_access_token
		.clone()
		.context("no personal access token: set ROSTER_PAT or ROSTER_PAT_FILE")?;

	let endpoints = ServiceEndpoints::from_account_url(account_url)?;
	let session = roster_devops::connect(endpoints, pat, config.http.request_timeout)
		.await
		.with_context(|| format!("failed to connect to {account_url}"))?;
	let caller = session.authorized_identity();
	info!(caller = %caller.descriptor, "connected");

	let engine = ProvisioningEngine::new(
		Arc::new(DevOpsDirectory::new(session.clone())),
		Arc::new(DevOpsLicensing::new(session.clone())),
		Arc::new(DevOpsProjects::new(session.clone())),
		&caller.descriptor,
		engine_settings(&config.directory),
	);
	let runner = BatchRunner::new(engine, QuarantineLog::new(&config.batch.quarantine_log));

	let outcomes = runner.run(requests);
	futures::pin_mut!(outcomes);

	let mut summary = BatchSummary::default();
	while let Some(outcome) = outcomes.next().await {
		report(&outcome);
		summary.record(&outcome);
	}

	let log = config.batch.quarantine_log.display();
	if !summary.all_recorded() {
		eprintln!(
			"{} {} of {} failed users could not be written to {}",
			"error:".red().bold(),
			summary.unrecorded,
			summary.failed,
			log
		);
	} else if summary.failed > 0 {
		println!("{} failed users recorded in {}", "!".yellow(), log);
	}
	Ok(summary)
}

pub fn engine_settings(directory: &DirectoryConfig) -> EngineSettings {
	let mut settings = EngineSettings::default();
	if let Some(sid) = &directory.licensed_users_group_sid {
		settings.licensed_users_group = IdentityDescriptor::team_foundation(sid);
	}
	if let Some(domain) = &directory.personal_account_domain {
		settings.personal_account_domain = domain.clone();
	}
	settings
}

/// A lost quarantine entry fails the run whatever the policy.
pub fn exit_status(policy: ExitPolicy, summary: &BatchSummary) -> u8 {
	if !summary.all_recorded() {
		return QUARANTINE_LOST_EXIT;
	}
	match policy {
		ExitPolicy::FailOnItemFailure if !summary.all_succeeded() => ITEM_FAILURE_EXIT,
		_ => 0,
	}
}

fn report(outcome: &ProvisioningOutcome) {
	match &outcome.result {
		Ok(success) => {
			let mut detail = format!(
				"{} {}",
				if success.created { "created" } else { "existing" },
				success.license
			);
			match &success.group {
				GroupAssignment::NotRequested => {}
				GroupAssignment::Added { group, changed: true } => detail.push_str(&format!(", joined {group}")),
				GroupAssignment::Added { group, changed: false } => {
					detail.push_str(&format!(", already in {group}"))
				}
				GroupAssignment::IdentityNotFound => detail.push_str(", group skipped"),
			}
			println!("{} {} ({})", "✓".green(), outcome.email().cyan(), detail.dimmed());
		}
		Err(error) => {
			println!("{} {} {}", "✗".red(), outcome.email().cyan(), error.to_string().red());
			if let QuarantineStatus::Lost(io_error) = &outcome.quarantine {
				println!("  {} not recorded in quarantine log: {}", "!".red(), io_error);
			}
		}
	}
}

pub fn print_summary(summary: &BatchSummary, elapsed: chrono::Duration) {
	let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
	let failed = if summary.failed > 0 {
		summary.failed.to_string().red().bold()
	} else {
		summary.failed.to_string().normal()
	};
	println!(
		"{} attempted, {} succeeded, {} failed in {:.1}s",
		summary.attempted.to_string().bold(),
		summary.succeeded.to_string().green(),
		failed,
		seconds
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use roster_cli_config::layer::{BatchLayer, ConfigLayer, ServiceLayer};
	use roster_cli_config::PathsConfig;
	use roster_common_secret::SecretString;
	use roster_provisioning::RequestTemplate;
	use wiremock::matchers::{method, path, path_regex, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	const EXISTING_ID: &str = "6f6d8c3e-6c2a-4b55-9b53-0a0f2e1b3c4d";

	fn config(account_url: Option<String>, quarantine: &std::path::Path) -> RosterConfig {
		let layer = ConfigLayer {
			service: Some(ServiceLayer {
				account_url,
				account_name: Some("contoso".into()),
				personal_access_token: Some(SecretString::new("pat".into())),
			}),
			batch: Some(BatchLayer {
				quarantine_log: Some(quarantine.to_path_buf()),
				exit_policy: None,
			}),
			..Default::default()
		};
		let paths = PathsConfig {
			user_config_file: quarantine.with_file_name("config.toml"),
			system_config_file: "/etc/roster/config.toml".into(),
			state_dir: quarantine.with_file_name("state"),
		};
		RosterConfig::from_layer(layer, paths).unwrap()
	}

	fn requests(emails: &[&str]) -> Vec<ProvisioningRequest> {
		let template = RequestTemplate::new("contoso", None, None).unwrap();
		emails
			.iter()
			.map(|email| template.request(email, roster_directory::LicenseTier::Basic).unwrap())
			.collect()
	}

	#[test]
	fn exit_status_follows_policy() {
		let clean = BatchSummary {
			attempted: 2,
			succeeded: 2,
			..Default::default()
		};
		let partial = BatchSummary {
			attempted: 2,
			succeeded: 1,
			failed: 1,
			unrecorded: 0,
		};
		let lost = BatchSummary {
			unrecorded: 1,
			..partial
		};
		assert_eq!(exit_status(ExitPolicy::AlwaysSucceed, &partial), 0);
		assert_eq!(exit_status(ExitPolicy::FailOnItemFailure, &clean), 0);
		assert_eq!(exit_status(ExitPolicy::FailOnItemFailure, &partial), ITEM_FAILURE_EXIT);
		assert_eq!(exit_status(ExitPolicy::AlwaysSucceed, &lost), QUARANTINE_LOST_EXIT);
		assert_eq!(exit_status(ExitPolicy::FailOnItemFailure, &lost), QUARANTINE_LOST_EXIT);
	}

	#[test]
	fn settings_override_only_what_is_configured() {
		let settings = engine_settings(&DirectoryConfig {
			licensed_users_group_sid: None,
			personal_account_domain: Some("Contoso AD".into()),
		});
		assert_eq!(settings.licensed_users_group, EngineSettings::default().licensed_users_group);
		assert_eq!(settings.personal_account_domain, "Contoso AD");
	}

	#[tokio::test]
	async fn missing_account_url_fails_before_any_request() {
		let dir = tempfile::tempdir().unwrap();
		let config = config(None, &dir.path().join("failed.txt"));
		let err = provision_all(&config, requests(&["a@x.com"])).await.unwrap_err();
		assert!(err.to_string().contains("no account URL"));
	}

	#[tokio::test]
	async fn rejected_token_fails_the_run() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/_apis/connectionData"))
			.respond_with(ResponseTemplate::new(401))
			.mount(&server)
			.await;

		let dir = tempfile::tempdir().unwrap();
		let config = config(Some(server.uri()), &dir.path().join("failed.txt"));
		let err = provision_all(&config, requests(&["a@x.com"])).await.unwrap_err();
		assert!(format!("{err:#}").contains("unauthorized"));
	}

	#[tokio::test]
	async fn failed_item_is_quarantined_and_batch_continues() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/_apis/connectionData"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"authenticatedUser": {
					"id": "0f8fad5b-d9cb-469f-a165-70867728950e",
					"descriptor": "Microsoft.IdentityModel.Claims.ClaimsIdentity;tenant\\admin@x.com"
				}
			})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/_apis/identities"))
			.and(query_param("filterValue", "a@x.com"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"value": [{
					"id": EXISTING_ID,
					"descriptor": "Microsoft.IdentityModel.Claims.ClaimsIdentity;tenant\\a@x.com"
				}]
			})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/_apis/identities"))
			.and(query_param("filterValue", "b@x.com"))
			.respond_with(ResponseTemplate::new(500).set_body_string("boom"))
			.mount(&server)
			.await;
		Mock::given(method("PUT"))
			.and(path_regex(r"^/_apis/licensing/entitlements/[0-9a-f-]+$"))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!({ "userId": EXISTING_ID })),
			)
			.expect(1)
			.mount(&server)
			.await;

		let dir = tempfile::tempdir().unwrap();
		let quarantine = dir.path().join("failed.txt");
		let config = config(Some(server.uri()), &quarantine);

		let summary = provision_all(&config, requests(&["b@x.com", "a@x.com"]))
			.await
			.unwrap();

		assert_eq!(
			summary,
			BatchSummary {
				attempted: 2,
				succeeded: 1,
				failed: 1,
				unrecorded: 0,
			}
		);
		let log = std::fs::read_to_string(&quarantine).unwrap();
		assert_eq!(log.lines().count(), 1);
		assert!(log.starts_with("b@x.com, failed, identity lookup failed"));
	}

	#[tokio::test]
	async fn unwritable_quarantine_log_fails_the_run() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/_apis/connectionData"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"authenticatedUser": {
					"id": "0f8fad5b-d9cb-469f-a165-70867728950e",
					"descriptor": "Microsoft.IdentityModel.Claims.ClaimsIdentity;tenant\\admin@x.com"
				}
			})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path("/_apis/identities"))
			.and(query_param("filterValue", "b@x.com"))
			.respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
			.mount(&server)
			.await;

		let dir = tempfile::tempdir().unwrap();
		let quarantine = dir.path().join("missing-dir").join("failed.txt");
		let config = config(Some(server.uri()), &quarantine);

		let summary = provision_all(&config, requests(&["b@x.com"])).await.unwrap();

		assert_eq!(summary.failed, 1);
		assert_eq!(summary.unrecorded, 1);
		assert!(!summary.all_recorded());
		assert!(!quarantine.exists());
		assert_eq!(exit_status(ExitPolicy::AlwaysSucceed, &summary), QUARANTINE_LOST_EXIT);
	}
}
