// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory directory, licensing, and project services for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use roster_directory::{
	DescriptorKind, DirectoryService, Entitlement, Group, Identity, IdentityDescriptor,
	LicenseTier, LicensingService, Project, ProjectService, Scope, SearchFilter, ServiceError,
	CLAIMS_TYPE,
};
use uuid::Uuid;

struct Entry {
	identity: Identity,
	account_name: String,
	mail: Option<String>,
}

struct DirectoryState {
	entries: Vec<Entry>,
	scopes: HashMap<String, Scope>,
	groups: HashMap<Uuid, Vec<Group>>,
	memberships: Vec<(IdentityDescriptor, IdentityDescriptor)>,
	searches: Vec<(SearchFilter, String)>,
	search_failures: HashMap<String, ServiceError>,
	membership_failure: Option<ServiceError>,
	materialize_bind_pending: bool,
}

/// Adding a bind-pending member creates an identity whose account name is the
/// email, the way the real directory does.
pub struct FakeDirectory {
	state: Mutex<DirectoryState>,
}

impl Default for FakeDirectory {
	fn default() -> Self {
		Self {
			state: Mutex::new(DirectoryState {
				entries: Vec::new(),
				scopes: HashMap::new(),
				groups: HashMap::new(),
				memberships: Vec::new(),
				searches: Vec::new(),
				search_failures: HashMap::new(),
				membership_failure: None,
				materialize_bind_pending: true,
			}),
		}
	}
}

impl FakeDirectory {
	pub fn add_identity(&self, account_name: &str, mail: Option<&str>) -> Uuid {
		let id = Uuid::new_v4();
		self.state.lock().unwrap().entries.push(Entry {
			identity: Identity {
				id,
				descriptor: IdentityDescriptor::new(CLAIMS_TYPE, account_name),
				display_name: None,
			},
			account_name: account_name.to_string(),
			mail: mail.map(str::to_string),
		});
		id
	}

	pub fn add_scope(&self, name: &str) -> Uuid {
		let id = Uuid::new_v4();
		self.state.lock().unwrap().scopes.insert(
			name.to_string(),
			Scope {
				id,
				name: name.to_string(),
			},
		);
		id
	}

	pub fn add_groups(&self, scope_id: Uuid, names: &[&str]) {
		let groups = names
			.iter()
			.map(|name| Group {
				descriptor: IdentityDescriptor::team_foundation(format!("group-{name}")),
				display_name: name.to_string(),
			})
			.collect();
		self.state.lock().unwrap().groups.insert(scope_id, groups);
	}

	pub fn fail_search_for(&self, value: &str, error: ServiceError) {
		self.state
			.lock()
			.unwrap()
			.search_failures
			.insert(value.to_string(), error);
	}

	pub fn fail_membership(&self, error: ServiceError) {
		self.state.lock().unwrap().membership_failure = Some(error);
	}

	pub fn set_materialize_bind_pending(&self, enabled: bool) {
		self.state.lock().unwrap().materialize_bind_pending = enabled;
	}

	pub fn account_id(&self, account_name: &str) -> Option<Uuid> {
		self.state
			.lock()
			.unwrap()
			.entries
			.iter()
			.find(|e| e.account_name == account_name)
			.map(|e| e.identity.id)
	}

	pub fn identity_count(&self) -> usize {
		self.state.lock().unwrap().entries.len()
	}

	pub fn searches(&self) -> Vec<(SearchFilter, String)> {
		self.state.lock().unwrap().searches.clone()
	}

	pub fn memberships(&self) -> Vec<(IdentityDescriptor, IdentityDescriptor)> {
		self.state.lock().unwrap().memberships.clone()
	}
}

#[async_trait]
impl DirectoryService for FakeDirectory {
	async fn search_identities(
		&self,
		filter: SearchFilter,
		value: &str,
	) -> Result<Vec<Identity>, ServiceError> {
		let mut state = self.state.lock().unwrap();
		state.searches.push((filter, value.to_string()));
		if let Some(error) = state.search_failures.get(value) {
			return Err(error.clone());
		}
		Ok(state
			.entries
			.iter()
			.filter(|e| match filter {
				SearchFilter::AccountName => e.account_name == value,
				SearchFilter::MailAddress => e.mail.as_deref() == Some(value),
			})
			.map(|e| e.identity.clone())
			.collect())
	}

	async fn get_scope(&self, scope_name: &str) -> Result<Scope, ServiceError> {
		self.state
			.lock()
			.unwrap()
			.scopes
			.get(scope_name)
			.cloned()
			.ok_or_else(|| ServiceError::NotFound(format!("scope {scope_name}")))
	}

	async fn list_groups(&self, scope_ids: &[Uuid]) -> Result<Vec<Group>, ServiceError> {
		let state = self.state.lock().unwrap();
		Ok(scope_ids
			.iter()
			.filter_map(|id| state.groups.get(id))
			.flatten()
			.cloned()
			.collect())
	}

	async fn add_member_to_group(
		&self,
		group: &IdentityDescriptor,
		member: &IdentityDescriptor,
	) -> Result<bool, ServiceError> {
		let mut state = self.state.lock().unwrap();
		if let Some(error) = &state.membership_failure {
			return Err(error.clone());
		}

		if member.kind() == DescriptorKind::BindPending && state.materialize_bind_pending {
			let email = member
				.identifier
				.rsplit_once('\\')
				.map_or(member.identifier.as_str(), |(_, email)| email)
				.to_string();
			if !state.entries.iter().any(|e| e.account_name == email) {
				state.entries.push(Entry {
					identity: Identity {
						id: Uuid::new_v4(),
						descriptor: IdentityDescriptor::new(CLAIMS_TYPE, email.clone()),
						display_name: None,
					},
					account_name: email,
					mail: None,
				});
			}
		}

		let pair = (group.clone(), member.clone());
		if state.memberships.contains(&pair) {
			return Ok(false);
		}
		state.memberships.push(pair);
		Ok(true)
	}
}

#[derive(Default)]
pub struct FakeLicensing {
	assignments: Mutex<Vec<(Uuid, LicenseTier)>>,
	failure: Mutex<Option<ServiceError>>,
}

impl FakeLicensing {
	pub fn fail_with(&self, error: ServiceError) {
		*self.failure.lock().unwrap() = Some(error);
	}

	pub fn assignments(&self) -> Vec<(Uuid, LicenseTier)> {
		self.assignments.lock().unwrap().clone()
	}
}

#[async_trait]
impl LicensingService for FakeLicensing {
	async fn assign_entitlement(
		&self,
		identity_id: Uuid,
		license: LicenseTier,
	) -> Result<Entitlement, ServiceError> {
		if let Some(error) = self.failure.lock().unwrap().clone() {
			return Err(error);
		}
		self.assignments.lock().unwrap().push((identity_id, license));
		Ok(Entitlement {
			identity_id,
			license,
		})
	}
}

#[derive(Default)]
pub struct FakeProjects {
	projects: Mutex<HashMap<String, Project>>,
}

impl FakeProjects {
	pub fn add_project(&self, name: &str) -> Uuid {
		let id = Uuid::new_v4();
		self.projects.lock().unwrap().insert(
			name.to_string(),
			Project {
				id,
				name: name.to_string(),
			},
		);
		id
	}
}

#[async_trait]
impl ProjectService for FakeProjects {
	async fn get_project(&self, name: &str) -> Result<Project, ServiceError> {
		self.projects
			.lock()
			.unwrap()
			.get(name)
			.cloned()
			.ok_or_else(|| ServiceError::NotFound(format!("project {name}")))
	}
}
