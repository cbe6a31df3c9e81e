// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use roster_directory::LicenseTier;

use crate::error::ValidationError;

/// A project and the suffix of the security group to join within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGroup {
	pub project: String,
	pub group_suffix: String,
}

/// One user to provision. Fields are validated on construction and cannot
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
	account: String,
	email: String,
	license: LicenseTier,
	project_group: Option<ProjectGroup>,
}

impl ProvisioningRequest {
	pub fn new(
		account: &str,
		email: &str,
		license: LicenseTier,
		project: Option<&str>,
		group: Option<&str>,
	) -> Result<Self, ValidationError> {
		RequestTemplate::new(account, project, group)?.request(email, license)
	}

	/// Like [`ProvisioningRequest::new`] but parses the license tier from
	/// user input.
	pub fn parse(
		account: &str,
		email: &str,
		license: &str,
		project: Option<&str>,
		group: Option<&str>,
	) -> Result<Self, ValidationError> {
		let license: LicenseTier = license.parse()?;
		Self::new(account, email, license, project, group)
	}

	pub fn account(&self) -> &str {
		&self.account
	}

	pub fn email(&self) -> &str {
		&self.email
	}

	pub fn license(&self) -> LicenseTier {
		self.license
	}

	pub fn project_group(&self) -> Option<&ProjectGroup> {
		self.project_group.as_ref()
	}
}

/// Settings shared by every row of a batch: the account and the optional
/// project group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
	account: String,
	project_group: Option<ProjectGroup>,
}

impl RequestTemplate {
	pub fn new(
		account: &str,
		project: Option<&str>,
		group: Option<&str>,
	) -> Result<Self, ValidationError> {
		let account = account.trim();
		if account.is_empty() {
			return Err(ValidationError::MissingField("account name"));
		}

		let project = project.map(str::trim).filter(|p| !p.is_empty());
		let group = group.map(str::trim).filter(|g| !g.is_empty());
		let project_group = match (project, group) {
			(Some(project), Some(group)) => Some(ProjectGroup {
				project: project.to_string(),
				group_suffix: group.to_string(),
			}),
			(None, None) => None,
			(Some(_), None) => return Err(ValidationError::ProjectWithoutGroup),
			(None, Some(_)) => return Err(ValidationError::GroupWithoutProject),
		};

		Ok(Self {
			account: account.to_string(),
			project_group,
		})
	}

	pub fn account(&self) -> &str {
		&self.account
	}

	pub fn request(&self, email: &str, license: LicenseTier) -> Result<ProvisioningRequest, ValidationError> {
		Ok(ProvisioningRequest {
			account: self.account.clone(),
			email: validate_email(email)?,
			license,
			project_group: self.project_group.clone(),
		})
	}
}

/// Trim and check that an address has a non-empty local part and domain.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
	let email = email.trim();
	if email.is_empty() {
		return Err(ValidationError::MissingField("email"));
	}
	match email.split_once('@') {
		Some((local, domain))
			if !local.is_empty()
				&& !domain.is_empty()
				&& !domain.contains('@')
				&& !email.chars().any(char::is_whitespace) =>
		{
			Ok(email.to_string())
		}
		_ => Err(ValidationError::InvalidEmail(email.to_string())),
	}
}
