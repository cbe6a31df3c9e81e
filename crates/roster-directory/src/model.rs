// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::descriptor::IdentityDescriptor;
use crate::license::LicenseTier;

/// Search strategy for identity lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFilter {
	AccountName,
	MailAddress,
}

impl SearchFilter {
	pub fn as_str(&self) -> &'static str {
		match self {
			SearchFilter::AccountName => "AccountName",
			SearchFilter::MailAddress => "MailAddress",
		}
	}
}

/// A directory entry as returned by identity search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub id: Uuid,
	pub descriptor: IdentityDescriptor,
	pub display_name: Option<String>,
}

/// The part of an identity the provisioning workflow carries forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
	pub id: Uuid,
	pub descriptor: IdentityDescriptor,
}

impl From<Identity> for ResolvedIdentity {
	fn from(identity: Identity) -> Self {
		Self {
			id: identity.id,
			descriptor: identity.descriptor,
		}
	}
}

/// An account or collection scope record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
	pub id: Uuid,
	pub name: String,
}

/// A security group visible within one or more scopes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
	pub descriptor: IdentityDescriptor,
	pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub id: Uuid,
	pub name: String,
}

/// The association between an identity and a license tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
	pub identity_id: Uuid,
	pub license: LicenseTier,
}
