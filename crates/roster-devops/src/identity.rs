// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use roster_directory::{
	DirectoryService, Group, Identity, IdentityDescriptor, Scope, SearchFilter, ServiceError,
};
use tracing::instrument;
use uuid::Uuid;

use crate::endpoints::join;
use crate::session::{AuthenticatedSession, API_VERSION};
use crate::wire::{ListEnvelope, WireIdentity, WireScope};

/// [`DirectoryService`] over the identity (vssps) REST endpoints.
#[derive(Debug, Clone)]
pub struct DevOpsDirectory {
	session: Arc<AuthenticatedSession>,
}

impl DevOpsDirectory {
	pub fn new(session: Arc<AuthenticatedSession>) -> Self {
		Self { session }
	}
}

#[async_trait]
impl DirectoryService for DevOpsDirectory {
	#[instrument(skip(self))]
	async fn search_identities(
		&self,
		filter: SearchFilter,
		value: &str,
	) -> Result<Vec<Identity>, ServiceError> {
		let mut url = join(&self.session.endpoints().identity, &["_apis", "identities"])?;
		url.query_pairs_mut()
			.append_pair("searchFilter", filter.as_str())
			.append_pair("filterValue", value)
			.append_pair("queryMembership", "None");

		let list: ListEnvelope<WireIdentity> = self.session.get_json(url, API_VERSION).await?;
		Ok(list.value.into_iter().map(Identity::from).collect())
	}

	#[instrument(skip(self))]
	async fn get_scope(&self, scope_name: &str) -> Result<Scope, ServiceError> {
		let mut url = join(
			&self.session.endpoints().identity,
			&["_apis", "identities", "scopes"],
		)?;
		url.query_pairs_mut().append_pair("scopeName", scope_name);

		let scope: WireScope = self.session.get_json(url, API_VERSION).await?;
		Ok(scope.into())
	}

	#[instrument(skip(self))]
	async fn list_groups(&self, scope_ids: &[Uuid]) -> Result<Vec<Group>, ServiceError> {
		let mut url = join(
			&self.session.endpoints().identity,
			&["_apis", "identities", "groups"],
		)?;
		let ids: Vec<String> = scope_ids.iter().map(Uuid::to_string).collect();
		url.query_pairs_mut().append_pair("scopeIds", &ids.join(","));

		let list: ListEnvelope<WireIdentity> = self.session.get_json(url, API_VERSION).await?;
		Ok(list.value.into_iter().map(Group::from).collect())
	}

	#[instrument(skip(self, group, member), fields(group = %group, member = %member))]
	async fn add_member_to_group(
		&self,
		group: &IdentityDescriptor,
		member: &IdentityDescriptor,
	) -> Result<bool, ServiceError> {
		let url = join(
			&self.session.endpoints().identity,
			&[
				"_apis",
				"identities",
				group.to_string().as_str(),
				"members",
				member.to_string().as_str(),
			],
		)?;
		Ok(self.session.put_empty(url, API_VERSION).await?)
	}
}
