// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use roster_directory::{DirectoryService, Group, ProjectService};

use crate::error::ProvisioningError;
use crate::outcome::GroupAssignment;
use crate::request::ProjectGroup;
use crate::resolver::IdentityResolver;

/// The single group whose display name ends with `suffix`, or the number of
/// matches when that is not exactly one.
pub fn select_group<'a>(groups: &'a [Group], suffix: &str) -> Result<&'a Group, usize> {
	let mut matches = groups.iter().filter(|g| g.display_name.ends_with(suffix));
	match (matches.next(), matches.next()) {
		(Some(group), None) => Ok(group),
		(None, _) => Err(0),
		(Some(_), Some(_)) => Err(2 + matches.count()),
	}
}

pub(crate) struct ProjectGroupAssigner {
	directory: Arc<dyn DirectoryService>,
	projects: Arc<dyn ProjectService>,
	resolver: IdentityResolver,
}

impl ProjectGroupAssigner {
	pub(crate) fn new(
		directory: Arc<dyn DirectoryService>,
		projects: Arc<dyn ProjectService>,
		resolver: IdentityResolver,
	) -> Self {
		Self {
			directory,
			projects,
			resolver,
		}
	}

	#[tracing::instrument(skip(self, target), fields(project = %target.project, suffix = %target.group_suffix))]
	pub(crate) async fn assign(
		&self,
		target: &ProjectGroup,
		email: &str,
	) -> Result<GroupAssignment, ProvisioningError> {
		let project = self
			.projects
			.get_project(&target.project)
			.await
			.map_err(|source| ProvisioningError::ProjectLookupFailed {
				project: target.project.clone(),
				source,
			})?;

		let groups = self
			.directory
			.list_groups(&[project.id])
			.await
			.map_err(|source| ProvisioningError::GroupLookupFailed {
				project: target.project.clone(),
				source,
			})?;

		let group = select_group(&groups, &target.group_suffix).map_err(|matches| {
			ProvisioningError::GroupNotResolved {
				project: target.project.clone(),
				suffix: target.group_suffix.clone(),
				matches,
			}
		})?;

		let identity = match self
			.resolver
			.resolve_by_account_name(email)
			.await
			.map_err(ProvisioningError::IdentityLookupFailed)?
		{
			Some(identity) => identity,
			None => {
				tracing::warn!(email, group = %group.display_name, "identity not found, skipping group membership");
				return Ok(GroupAssignment::IdentityNotFound);
			}
		};

		let changed = self
			.directory
			.add_member_to_group(&group.descriptor, &identity.descriptor)
			.await
			.map_err(|source| ProvisioningError::MembershipAddFailed {
				group: group.display_name.clone(),
				source,
			})?;
		tracing::info!(group = %group.display_name, changed, "added identity to project group");

		Ok(GroupAssignment::Added {
			group: group.display_name.clone(),
			changed,
		})
	}
}
