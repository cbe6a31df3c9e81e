// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity descriptors: the typed string keys the directory uses to address
//! users and groups.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedIdentifierError;

/// Type tag for Team Foundation groups, well-known or collection-scoped.
pub const TEAM_FOUNDATION_TYPE: &str = "Microsoft.TeamFoundation.Identity";

/// Type tag for placeholder identities recorded before a user's first sign-in.
pub const BIND_PENDING_TYPE: &str = "Microsoft.TeamFoundation.BindPendingIdentity";

/// Type tag for directory-backed user identities.
pub const CLAIMS_TYPE: &str = "Microsoft.IdentityModel.Claims.ClaimsIdentity";

/// Coarse classification of a descriptor by its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
	Group,
	BindPending,
	User,
	Other,
}

/// A directory descriptor, serialized on the wire as `<type>;<identifier>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityDescriptor {
	pub identity_type: String,
	pub identifier: String,
}

impl IdentityDescriptor {
	pub fn new(identity_type: impl Into<String>, identifier: impl Into<String>) -> Self {
		Self {
			identity_type: identity_type.into(),
			identifier: identifier.into(),
		}
	}

	/// A Team Foundation group descriptor.
	pub fn team_foundation(identifier: impl Into<String>) -> Self {
		Self::new(TEAM_FOUNDATION_TYPE, identifier)
	}

	/// A bind-pending user descriptor for the given UPN string.
	pub fn bind_pending(upn: impl Into<String>) -> Self {
		Self::new(BIND_PENDING_TYPE, upn)
	}

	pub fn kind(&self) -> DescriptorKind {
		match self.identity_type.as_str() {
			TEAM_FOUNDATION_TYPE => DescriptorKind::Group,
			BIND_PENDING_TYPE => DescriptorKind::BindPending,
			CLAIMS_TYPE => DescriptorKind::User,
			_ => DescriptorKind::Other,
		}
	}

	/// Parse the `<type>;<identifier>` wire form.
	///
	/// Only the first `;` separates the two halves; identifiers may contain
	/// further semicolons.
	pub fn parse(value: &str) -> Result<Self, MalformedIdentifierError> {
		match value.split_once(';') {
			Some((identity_type, identifier)) if !identity_type.is_empty() && !identifier.is_empty() => {
				Ok(Self::new(identity_type, identifier))
			}
			_ => Err(MalformedIdentifierError::Descriptor(value.to_string())),
		}
	}
}

impl fmt::Display for IdentityDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{};{}", self.identity_type, self.identifier)
	}
}

impl TryFrom<String> for IdentityDescriptor {
	type Error = MalformedIdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<IdentityDescriptor> for String {
	fn from(descriptor: IdentityDescriptor) -> Self {
		descriptor.to_string()
	}
}
