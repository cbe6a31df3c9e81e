// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use roster_directory::{
	licensed_users_group, DirectoryService, IdentityDescriptor, LicensingService, ProjectService,
};

use crate::creation::{IdentityCreator, DEFAULT_PERSONAL_ACCOUNT_DOMAIN};
use crate::error::ProvisioningError;
use crate::outcome::{
	GroupAssignment, ProvisioningOutcome, ProvisioningState, ProvisioningSuccess, QuarantineStatus,
};
use crate::project_group::ProjectGroupAssigner;
use crate::request::ProvisioningRequest;
use crate::resolver::IdentityResolver;

/// Directory constants that vary between deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
	/// Well-known licensed users group, rescoped per collection on creation.
	pub licensed_users_group: IdentityDescriptor,
	/// Domain for bind-pending UPNs when the caller has none.
	pub personal_account_domain: String,
}

impl Default for EngineSettings {
	fn default() -> Self {
		Self {
			licensed_users_group: licensed_users_group(),
			personal_account_domain: DEFAULT_PERSONAL_ACCOUNT_DOMAIN.to_string(),
		}
	}
}

/// Ordered record of the states a request passes through.
struct StateTrace {
	states: Vec<ProvisioningState>,
}

impl StateTrace {
	fn new() -> Self {
		Self {
			states: vec![ProvisioningState::Start],
		}
	}

	fn enter(&mut self, state: ProvisioningState) {
		debug_assert!(!self.states.contains(&state), "state {state} entered twice");
		tracing::debug!(%state, "entering state");
		self.states.push(state);
	}
}

/// Drives one request through resolve, create, license, and group steps.
pub struct ProvisioningEngine {
	resolver: IdentityResolver,
	creator: IdentityCreator,
	licensing: Arc<dyn LicensingService>,
	groups: ProjectGroupAssigner,
}

impl ProvisioningEngine {
	/// `caller` is the authenticated identity running the tool; its domain
	/// qualifies the UPN of any identity this engine creates.
	pub fn new(
		directory: Arc<dyn DirectoryService>,
		licensing: Arc<dyn LicensingService>,
		projects: Arc<dyn ProjectService>,
		caller: &IdentityDescriptor,
		settings: EngineSettings,
	) -> Self {
		let resolver = IdentityResolver::new(directory.clone());
		let creator = IdentityCreator::new(
			directory.clone(),
			resolver.clone(),
			settings.licensed_users_group,
			caller,
			&settings.personal_account_domain,
		);
		let groups = ProjectGroupAssigner::new(directory, projects, resolver.clone());
		Self {
			resolver,
			creator,
			licensing,
			groups,
		}
	}

	/// Provision one request. Failures are returned in the outcome, never
	/// raised.
	#[tracing::instrument(
		skip(self, request),
		fields(email = %request.email(), license = %request.license())
	)]
	pub async fn provision(&self, request: ProvisioningRequest) -> ProvisioningOutcome {
		let mut trace = StateTrace::new();
		let result = self.run(&request, &mut trace).await;

		match &result {
			Ok(success) => {
				tracing::info!(identity_id = %success.identity_id, created = success.created, "provisioned")
			}
			Err(error) => {
				let state = trace.states.last().copied().unwrap_or(ProvisioningState::Start);
				tracing::warn!(%state, %error, retryable = error.is_retryable(), "provisioning failed");
				trace.enter(ProvisioningState::Failed);
			}
		}

		ProvisioningOutcome {
			request,
			states: trace.states,
			result,
			quarantine: QuarantineStatus::NotNeeded,
		}
	}

	async fn run(
		&self,
		request: &ProvisioningRequest,
		trace: &mut StateTrace,
	) -> Result<ProvisioningSuccess, ProvisioningError> {
		let email = request.email();

		trace.enter(ProvisioningState::Resolving);
		let existing = self
			.resolver
			.resolve(email)
			.await
			.map_err(ProvisioningError::IdentityLookupFailed)?;

		let (identity, created) = match existing {
			Some(identity) => (identity, false),
			None => {
				trace.enter(ProvisioningState::Creating);
				(self.creator.create(request.account(), email).await?, true)
			}
		};

		trace.enter(ProvisioningState::LicenseAssigning);
		let entitlement = self
			.licensing
			.assign_entitlement(identity.id, request.license())
			.await
			.map_err(ProvisioningError::LicenseAssignmentFailed)?;
		tracing::debug!(license = %entitlement.license, "entitlement assigned");

		let group = match request.project_group() {
			Some(target) => {
				trace.enter(ProvisioningState::GroupAssigning);
				self.groups.assign(target, email).await?
			}
			None => GroupAssignment::NotRequested,
		};

		trace.enter(ProvisioningState::Done);
		Ok(ProvisioningSuccess {
			identity_id: identity.id,
			created,
			license: request.license(),
			group,
		})
	}
}
