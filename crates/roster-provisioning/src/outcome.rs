// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use roster_directory::LicenseTier;
use uuid::Uuid;

use crate::error::ProvisioningError;
use crate::request::ProvisioningRequest;

/// States of the single-request workflow. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
	Start,
	Resolving,
	Creating,
	LicenseAssigning,
	GroupAssigning,
	Done,
	Failed,
}

impl ProvisioningState {
	pub fn is_terminal(&self) -> bool {
		matches!(self, ProvisioningState::Done | ProvisioningState::Failed)
	}
}

impl fmt::Display for ProvisioningState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ProvisioningState::Start => "start",
			ProvisioningState::Resolving => "resolving",
			ProvisioningState::Creating => "creating",
			ProvisioningState::LicenseAssigning => "license_assigning",
			ProvisioningState::GroupAssigning => "group_assigning",
			ProvisioningState::Done => "done",
			ProvisioningState::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Result of the optional project security-group step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAssignment {
	NotRequested,
	/// `changed` is false when the identity was already a member.
	Added { group: String, changed: bool },
	/// The identity could not be found when joining the group. The request
	/// still counts as successful.
	IdentityNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningSuccess {
	pub identity_id: Uuid,
	/// Whether a bind-pending identity was created by this request.
	pub created: bool,
	pub license: LicenseTier,
	pub group: GroupAssignment,
}

/// Whether a failed request reached the quarantine log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarantineStatus {
	/// The request succeeded, or was not run through a batch.
	NotNeeded,
	Recorded,
	/// The entry could not be written; holds the I/O error.
	Lost(String),
}

/// What happened to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningOutcome {
	pub request: ProvisioningRequest,
	/// States in the order they were entered, from `Start` to a terminal state.
	pub states: Vec<ProvisioningState>,
	pub result: Result<ProvisioningSuccess, ProvisioningError>,
	pub quarantine: QuarantineStatus,
}

impl ProvisioningOutcome {
	pub fn is_success(&self) -> bool {
		self.result.is_ok()
	}

	pub fn email(&self) -> &str {
		self.request.email()
	}

	pub fn final_state(&self) -> ProvisioningState {
		self.states.last().copied().unwrap_or(ProvisioningState::Start)
	}
}

/// Running totals over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
	pub attempted: usize,
	pub succeeded: usize,
	pub failed: usize,
	/// Failures whose quarantine entry could not be written.
	pub unrecorded: usize,
}

impl BatchSummary {
	pub fn record(&mut self, outcome: &ProvisioningOutcome) {
		self.attempted += 1;
		if outcome.is_success() {
			self.succeeded += 1;
		} else {
			self.failed += 1;
		}
		if matches!(outcome.quarantine, QuarantineStatus::Lost(_)) {
			self.unrecorded += 1;
		}
	}

	pub fn all_succeeded(&self) -> bool {
		self.failed == 0
	}

	/// True when every failure made it into the quarantine log.
	pub fn all_recorded(&self) -> bool {
		self.unrecorded == 0
	}
}
