// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User provisioning workflow.
//!
//! A [`ProvisioningRequest`] names an account, an email, a license tier, and
//! optionally a project security group. [`ProvisioningEngine`] carries one
//! request through:
//!
//! 1. resolve the identity by account name, then by mail address
//! 2. create a bind-pending identity when none exists
//! 3. assign the license entitlement
//! 4. join the project group, when requested
//!
//! [`BatchRunner`] feeds many requests through the engine in order and
//! appends each failure to a [`QuarantineLog`] without stopping the batch.

mod batch;
mod creation;
mod engine;
mod error;
#[cfg(test)]
mod fakes;
mod outcome;
mod project_group;
mod quarantine;
mod request;
mod resolver;

pub use batch::BatchRunner;
pub use creation::{bind_pending_descriptor, caller_domain, DEFAULT_PERSONAL_ACCOUNT_DOMAIN};
pub use engine::{EngineSettings, ProvisioningEngine};
pub use error::{CreationStep, ProvisioningError, ValidationError};
pub use outcome::{
	BatchSummary, GroupAssignment, ProvisioningOutcome, ProvisioningState, ProvisioningSuccess,
	QuarantineStatus,
};
pub use project_group::select_group;
pub use quarantine::{format_entry, QuarantineLog};
pub use request::{validate_email, ProjectGroup, ProvisioningRequest, RequestTemplate};
pub use resolver::IdentityResolver;
