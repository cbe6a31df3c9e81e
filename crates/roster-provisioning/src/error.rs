// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use roster_directory::{MalformedIdentifierError, ServiceError, UnknownLicenseError};
use thiserror::Error;

/// Input that is rejected before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error(transparent)]
	License(#[from] UnknownLicenseError),

	#[error("missing required field: {0}")]
	MissingField(&'static str),

	#[error("invalid email address '{0}'")]
	InvalidEmail(String),

	#[error("a security group was given without a project")]
	GroupWithoutProject,

	#[error("a project was given without a security group")]
	ProjectWithoutGroup,

	#[error("line {line}: {source}")]
	Row {
		line: usize,
		source: Box<ValidationError>,
	},

	#[error("line {line}: expected 'email,license' but found {fields} field(s)")]
	RowShape { line: usize, fields: usize },
}

impl ValidationError {
	/// Attach a batch-file line number.
	pub fn at_line(self, line: usize) -> Self {
		ValidationError::Row {
			line,
			source: Box::new(self),
		}
	}
}

/// The bind-pending creation step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStep {
	FetchScope,
	DeriveGroupDescriptor,
	AddToLicensedUsers,
	Reresolve,
}

impl fmt::Display for CreationStep {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let step = match self {
			CreationStep::FetchScope => "fetch collection scope",
			CreationStep::DeriveGroupDescriptor => "derive licensed users group",
			CreationStep::AddToLicensedUsers => "add bind-pending identity to licensed users group",
			CreationStep::Reresolve => "re-resolve created identity",
		};
		f.write_str(step)
	}
}

/// Why a single request did not reach `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
	#[error("invalid request: {0}")]
	Validation(#[from] ValidationError),

	#[error("identity lookup failed: {0}")]
	IdentityLookupFailed(#[source] ServiceError),

	#[error("scope lookup failed for '{account}': {source}")]
	ScopeLookupFailed {
		account: String,
		source: ServiceError,
	},

	#[error("malformed identifier: {0}")]
	MalformedIdentifier(#[from] MalformedIdentifierError),

	#[error("identity creation failed ({step}): {source}")]
	IdentityCreationFailed {
		step: CreationStep,
		source: Box<ProvisioningError>,
	},

	#[error("identity '{0}' was not found after it was created")]
	IdentityNotVisible(String),

	#[error("license assignment failed: {0}")]
	LicenseAssignmentFailed(#[source] ServiceError),

	#[error("project lookup failed for '{project}': {source}")]
	ProjectLookupFailed {
		project: String,
		source: ServiceError,
	},

	#[error("group lookup failed for project '{project}': {source}")]
	GroupLookupFailed {
		project: String,
		source: ServiceError,
	},

	#[error("expected exactly one group in '{project}' ending with '{suffix}', found {matches}")]
	GroupNotResolved {
		project: String,
		suffix: String,
		matches: usize,
	},

	#[error("adding member to group '{group}' failed: {source}")]
	MembershipAddFailed {
		group: String,
		source: ServiceError,
	},
}

impl ProvisioningError {
	/// Wrap this error as the cause of a failed creation step.
	pub fn during(self, step: CreationStep) -> Self {
		ProvisioningError::IdentityCreationFailed {
			step,
			source: Box::new(self),
		}
	}

	/// Whether a later attempt could succeed without changing the input.
	pub fn is_retryable(&self) -> bool {
		match self {
			ProvisioningError::IdentityLookupFailed(source)
			| ProvisioningError::LicenseAssignmentFailed(source)
			| ProvisioningError::ScopeLookupFailed { source, .. }
			| ProvisioningError::ProjectLookupFailed { source, .. }
			| ProvisioningError::GroupLookupFailed { source, .. }
			| ProvisioningError::MembershipAddFailed { source, .. } => source.is_retryable(),
			ProvisioningError::IdentityCreationFailed { source, .. } => source.is_retryable(),
			ProvisioningError::IdentityNotVisible(_) => true,
			ProvisioningError::Validation(_)
			| ProvisioningError::MalformedIdentifier(_)
			| ProvisioningError::GroupNotResolved { .. } => false,
		}
	}
}
