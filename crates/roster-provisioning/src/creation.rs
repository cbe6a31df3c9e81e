// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bind-pending identity creation.
//!
//! An identity that has never signed in is materialized by adding a
//! bind-pending descriptor (`upn:<domain>\<email>`) to the collection's
//! licensed users group. The directory does not return the new id, so the
//! identity is looked up again afterwards.

use std::sync::Arc;

use roster_directory::{
	derive_scoped_group_descriptor, DirectoryService, IdentityDescriptor, ResolvedIdentity,
};

use crate::error::{CreationStep, ProvisioningError};
use crate::resolver::IdentityResolver;

/// Domain used when the caller's identifier carries none.
pub const DEFAULT_PERSONAL_ACCOUNT_DOMAIN: &str = "Windows Live ID";

/// The caller's directory domain: the part of its identifier before `\`.
pub fn caller_domain<'a>(caller: &'a IdentityDescriptor, default: &'a str) -> &'a str {
	caller
		.identifier
		.split_once('\\')
		.map_or(default, |(domain, _)| domain)
}

pub fn bind_pending_descriptor(domain: &str, email: &str) -> IdentityDescriptor {
	IdentityDescriptor::bind_pending(format!("upn:{domain}\\{email}"))
}

pub(crate) struct IdentityCreator {
	directory: Arc<dyn DirectoryService>,
	resolver: IdentityResolver,
	licensed_users_group: IdentityDescriptor,
	domain: String,
}

impl IdentityCreator {
	pub(crate) fn new(
		directory: Arc<dyn DirectoryService>,
		resolver: IdentityResolver,
		licensed_users_group: IdentityDescriptor,
		caller: &IdentityDescriptor,
		personal_account_domain: &str,
	) -> Self {
		let domain = caller_domain(caller, personal_account_domain).to_string();
		Self {
			directory,
			resolver,
			licensed_users_group,
			domain,
		}
	}

	#[tracing::instrument(skip(self), fields(domain = %self.domain))]
	pub(crate) async fn create(
		&self,
		account: &str,
		email: &str,
	) -> Result<ResolvedIdentity, ProvisioningError> {
		let scope = self.directory.get_scope(account).await.map_err(|source| {
			ProvisioningError::ScopeLookupFailed {
				account: account.to_string(),
				source,
			}
			.during(CreationStep::FetchScope)
		})?;

		let group = derive_scoped_group_descriptor(scope.id, &self.licensed_users_group)
			.map_err(|e| ProvisioningError::from(e).during(CreationStep::DeriveGroupDescriptor))?;
		tracing::debug!(scope_id = %scope.id, group = %group, "derived collection licensed users group");

		let member = bind_pending_descriptor(&self.domain, email);
		let changed = self
			.directory
			.add_member_to_group(&group, &member)
			.await
			.map_err(|source| {
				ProvisioningError::MembershipAddFailed {
					group: group.identifier.clone(),
					source,
				}
				.during(CreationStep::AddToLicensedUsers)
			})?;
		tracing::debug!(member = %member, changed, "added bind-pending identity");

		match self.resolver.resolve_by_account_name(email).await {
			Ok(Some(identity)) => {
				tracing::info!(identity_id = %identity.id, "created bind-pending identity");
				Ok(identity)
			}
			Ok(None) => Err(ProvisioningError::IdentityNotVisible(email.to_string())
				.during(CreationStep::Reresolve)),
			Err(source) => {
				Err(ProvisioningError::IdentityLookupFailed(source).during(CreationStep::Reresolve))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fakes::FakeDirectory;
	use roster_directory::{licensed_users_group, ServiceError, BIND_PENDING_TYPE};

	fn creator(directory: &Arc<FakeDirectory>, caller: &str) -> IdentityCreator {
		IdentityCreator::new(
			directory.clone(),
			IdentityResolver::new(directory.clone()),
			licensed_users_group(),
			&IdentityDescriptor::new(roster_directory::CLAIMS_TYPE, caller),
			DEFAULT_PERSONAL_ACCOUNT_DOMAIN,
		)
	}

	#[test]
	fn caller_domain_is_prefix_before_backslash() {
		let aad = IdentityDescriptor::new("t", "4b7e9c1a-tenant\\admin@contoso.com");
		assert_eq!(caller_domain(&aad, DEFAULT_PERSONAL_ACCOUNT_DOMAIN), "4b7e9c1a-tenant");

		let msa = IdentityDescriptor::new("t", "admin@live.com");
		assert_eq!(caller_domain(&msa, DEFAULT_PERSONAL_ACCOUNT_DOMAIN), "Windows Live ID");
	}

	#[test]
	fn bind_pending_descriptor_uses_upn_form() {
		let descriptor = bind_pending_descriptor("Windows Live ID", "a@x.com");
		assert_eq!(descriptor.identity_type, BIND_PENDING_TYPE);
		assert_eq!(descriptor.identifier, "upn:Windows Live ID\\a@x.com");
	}

	#[tokio::test]
	async fn creates_identity_in_scoped_licensed_users_group() {
		let directory = Arc::new(FakeDirectory::default());
		let scope = directory.add_scope("contoso");

		let identity = creator(&directory, "tenant\\admin@x.com")
			.create("contoso", "a@x.com")
			.await
			.unwrap();

		let memberships = directory.memberships();
		assert_eq!(memberships.len(), 1);
		let (group, member) = &memberships[0];
		let expected_group = derive_scoped_group_descriptor(scope, &licensed_users_group()).unwrap();
		assert_eq!(group, &expected_group);
		assert_eq!(member.identifier, "upn:tenant\\a@x.com");
		assert_eq!(directory.account_id("a@x.com"), Some(identity.id));
	}

	#[tokio::test]
	async fn missing_scope_fails_first_step() {
		let directory = Arc::new(FakeDirectory::default());
		let err = creator(&directory, "admin@x.com")
			.create("contoso", "a@x.com")
			.await
			.unwrap_err();

		assert!(matches!(
			err,
			ProvisioningError::IdentityCreationFailed {
				step: CreationStep::FetchScope,
				..
			}
		));
		assert!(directory.memberships().is_empty());
	}

	#[tokio::test]
	async fn malformed_template_fails_before_membership_change() {
		let directory = Arc::new(FakeDirectory::default());
		directory.add_scope("contoso");
		let creator = IdentityCreator::new(
			directory.clone(),
			IdentityResolver::new(directory.clone()),
			IdentityDescriptor::team_foundation("S-1-9"),
			&IdentityDescriptor::new("t", "admin@x.com"),
			DEFAULT_PERSONAL_ACCOUNT_DOMAIN,
		);

		let err = creator.create("contoso", "a@x.com").await.unwrap_err();
		assert!(matches!(
			err,
			ProvisioningError::IdentityCreationFailed {
				step: CreationStep::DeriveGroupDescriptor,
				..
			}
		));
		assert!(directory.memberships().is_empty());
	}

	#[tokio::test]
	async fn membership_failure_is_reported_with_step() {
		let directory = Arc::new(FakeDirectory::default());
		directory.add_scope("contoso");
		directory.fail_membership(ServiceError::Unauthorized("denied".into()));

		let err = creator(&directory, "admin@x.com")
			.create("contoso", "a@x.com")
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			ProvisioningError::IdentityCreationFailed {
				step: CreationStep::AddToLicensedUsers,
				..
			}
		));
	}

	#[tokio::test]
	async fn identity_missing_after_add_is_not_visible() {
		let directory = Arc::new(FakeDirectory::default());
		directory.add_scope("contoso");
		directory.set_materialize_bind_pending(false);

		let err = creator(&directory, "admin@x.com")
			.create("contoso", "a@x.com")
			.await
			.unwrap_err();
		assert_eq!(
			err,
			ProvisioningError::IdentityNotVisible("a@x.com".into()).during(CreationStep::Reresolve)
		);
	}
}
