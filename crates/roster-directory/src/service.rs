// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Capability traits consumed by the provisioning workflow.
//!
//! Each call is a single request/response exchange. Implementations decide
//! the transport; the workflow only sees [`ServiceError`] on failure.

use async_trait::async_trait;
use uuid::Uuid;

use crate::descriptor::IdentityDescriptor;
use crate::error::ServiceError;
use crate::license::LicenseTier;
use crate::model::{Entitlement, Group, Identity, Project, Scope, SearchFilter};

/// Identity search, scope/group lookup, and group membership mutation.
#[async_trait]
pub trait DirectoryService: Send + Sync {
	/// Search identities; an empty list means no match.
	async fn search_identities(
		&self,
		filter: SearchFilter,
		value: &str,
	) -> Result<Vec<Identity>, ServiceError>;

	/// Fetch the scope record for an account or collection name.
	async fn get_scope(&self, scope_name: &str) -> Result<Scope, ServiceError>;

	/// List the groups defined in the given scopes.
	async fn list_groups(&self, scope_ids: &[Uuid]) -> Result<Vec<Group>, ServiceError>;

	/// Add `member` to `group`. Returns whether the directory reported a change.
	async fn add_member_to_group(
		&self,
		group: &IdentityDescriptor,
		member: &IdentityDescriptor,
	) -> Result<bool, ServiceError>;
}

/// License entitlement assignment.
#[async_trait]
pub trait LicensingService: Send + Sync {
	async fn assign_entitlement(
		&self,
		identity_id: Uuid,
		license: LicenseTier,
	) -> Result<Entitlement, ServiceError>;
}

/// Project lookup by name.
#[async_trait]
pub trait ProjectService: Send + Sync {
	async fn get_project(&self, name: &str) -> Result<Project, ServiceError>;
}
